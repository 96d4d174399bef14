//! Theme engine and template rendering.
//!
//! Provides Tera-based form and label rendering with template suggestion
//! resolution, and registers the display filters for use inside templates.

mod engine;
mod filters;

pub use engine::{
    SharedThemeEngine, ThemeEngine, BETTER_FORM_TEMPLATE, FORM_TEMPLATE, LABEL_TEMPLATE,
};
