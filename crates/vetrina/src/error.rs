//! Display error types.

use thiserror::Error;

/// Errors produced by form display operations.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// No candidate template name resolved to a loaded template.
    #[error("no template found among candidates: {candidates}")]
    TemplateNotFound { candidates: String },

    /// An expected attribute is absent on the supplied field object.
    #[error("field `{field}` has no `{attribute}` attribute")]
    AttributeMissing {
        field: String,
        attribute: &'static str,
    },

    /// A value had the wrong shape for the requested operation.
    #[error("field `{field}`: expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// Fault propagated from the template engine.
    #[error("template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

/// Result type alias using DisplayError.
pub type DisplayResult<T> = Result<T, DisplayError>;
