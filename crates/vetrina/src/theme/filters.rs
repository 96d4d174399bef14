//! Tera filters for form and field display.
//!
//! Field-level filters take a serialized [`BoundField`] as the piped value and
//! either derive text/booleans from it or return the updated field so the
//! mutation flows down the template pipe. `render` and `label` re-enter the
//! engine's template store through the shared handle.

use std::collections::HashMap;

use tera::{Tera, Value};

use crate::error::DisplayError;
use crate::form::{BoundField, Form};

use super::engine::{render_form_html, render_label_html, SharedTemplates, SuggestionCache};

/// Register every display filter on the given Tera instance.
///
/// Must run before the instance is published into `templates`: `render` and
/// `label` read that handle at call time and expect it to hold the instance
/// they are registered on.
pub(crate) fn register(tera: &mut Tera, templates: SharedTemplates, cache: SuggestionCache) {
    tera.register_filter("placeholder", placeholder);
    tera.register_filter("label_text", label_text);
    tera.register_filter("value_text", value_text);
    tera.register_filter("values_text", values_text);
    tera.register_filter("classes", classes);
    tera.register_filter("optional", optional);
    tera.register_filter("is_checkbox", is_checkbox);
    tera.register_filter("is_multiple", is_multiple);

    let label_templates = templates.clone();
    let label_cache = cache.clone();
    tera.register_filter(
        "label",
        move |value: &Value, args: &HashMap<String, Value>| {
            let field = bound_field("label", value)?;
            let contents = optional_str_arg("label", args, "contents")?;

            // read_recursive: this filter runs while the outer render already
            // holds the read side of the same lock.
            let tera = label_templates.read_recursive();
            render_label_html(&tera, &label_cache, &field, contents.as_deref())
                .map(Value::String)
                .map_err(into_tera_error)
        },
    );

    tera.register_filter(
        "render",
        move |value: &Value, args: &HashMap<String, Value>| {
            let form: Form = serde_json::from_value(value.clone())
                .map_err(|_| tera::Error::msg(format!("render: expected a form, got `{value}`")))?;
            let template = optional_str_arg("render", args, "template")?;

            let tera = templates.read_recursive();
            render_form_html(&tera, &cache, &form, template.as_deref())
                .map(Value::String)
                .map_err(into_tera_error)
        },
    );
}

/// Set the widget placeholder attribute and return the updated field.
fn placeholder(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let mut field = bound_field("placeholder", value)?;
    let text = required_str_arg("placeholder", args, "text")?;

    field.set_placeholder(text);
    field_value("placeholder", &field)
}

/// Append classes to the widget class attribute and return the updated field.
fn classes(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let mut field = bound_field("classes", value)?;
    let classes = required_str_arg("classes", args, "classes")?;

    field.add_classes(&classes);
    field_value("classes", &field)
}

/// The field's default label text.
fn label_text(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("label_text", value)?;

    field
        .label_text()
        .map(|text| Value::String(text.to_string()))
        .map_err(into_tera_error)
}

/// Human-readable text for the field's current value.
fn value_text(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("value_text", value)?;
    Ok(Value::String(field.value_text()))
}

/// Human-readable text for every entry of a multi-valued field.
fn values_text(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("values_text", value)?;

    let texts = field.values_text().map_err(into_tera_error)?;
    serde_json::to_value(texts).map_err(|e| tera::Error::msg(format!("values_text: {e}")))
}

/// Whether the field is optional.
fn optional(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("optional", value)?;
    Ok(Value::Bool(field.is_optional()))
}

/// Whether the field's widget is a checkbox.
fn is_checkbox(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("is_checkbox", value)?;
    Ok(Value::Bool(field.is_checkbox()))
}

/// Whether the field's widget is a multi-select.
fn is_multiple(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field = bound_field("is_multiple", value)?;
    Ok(Value::Bool(field.is_multiple()))
}

fn bound_field(filter: &str, value: &Value) -> tera::Result<BoundField> {
    serde_json::from_value(value.clone())
        .map_err(|_| tera::Error::msg(format!("{filter}: expected a bound field, got `{value}`")))
}

fn field_value(filter: &str, field: &BoundField) -> tera::Result<Value> {
    serde_json::to_value(field).map_err(|e| tera::Error::msg(format!("{filter}: {e}")))
}

fn required_str_arg(
    filter: &str,
    args: &HashMap<String, Value>,
    name: &str,
) -> tera::Result<String> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(tera::Error::msg(format!(
            "{filter}: argument `{name}` must be a string, got `{other}`"
        ))),
        None => Err(tera::Error::msg(format!(
            "{filter}: missing argument `{name}`"
        ))),
    }
}

fn optional_str_arg(
    filter: &str,
    args: &HashMap<String, Value>,
    name: &str,
) -> tera::Result<Option<String>> {
    match args.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(tera::Error::msg(format!(
            "{filter}: argument `{name}` must be a string, got `{other}`"
        ))),
    }
}

fn into_tera_error(err: DisplayError) -> tera::Error {
    tera::Error::msg(err.to_string())
}
