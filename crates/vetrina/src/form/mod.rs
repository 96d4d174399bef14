//! Typed form model and field display operations.
//!
//! Forms and fields are built by the caller (or deserialized from it) and
//! rendered through the theme engine. This module owns the data model and the
//! field-level display transforms; widget-to-HTML rendering and validation
//! belong to the surrounding application.

mod display;
mod types;

pub use types::{BoundField, Field, Fieldset, Form, FormKind, Widget, WidgetKind};
