//! Vetrina: form display for Tera templates.
//!
//! Turns already-built form and field objects into rendered output: the theme
//! engine resolves form templates by suggestion (first match wins) and a set
//! of Tera filters formats individual fields inside templates.

pub mod error;
pub mod form;
pub mod theme;
