//! Field-level display operations.
//!
//! These are the transforms behind the template filters: human-readable value
//! text via the choice list, widget attribute mutation, and capability tests.
//! Mutating operations return the same field so calls chain; the caller owns
//! the field and must not read it concurrently from another thread.

use serde_json::Value;

use crate::error::{DisplayError, DisplayResult};

use super::types::{BoundField, Field};

impl Field {
    /// Look up the display label for a raw value in the choice list.
    pub fn choice_label(&self, value: &Value) -> Option<&str> {
        self.choices
            .iter()
            .find(|(raw, _)| raw == value)
            .map(|(_, label)| label.as_str())
    }
}

impl BoundField {
    /// The field's default label text.
    pub fn label_text(&self) -> DisplayResult<&str> {
        self.field
            .label
            .as_deref()
            .ok_or_else(|| DisplayError::AttributeMissing {
                field: self.name.clone(),
                attribute: "label",
            })
    }

    /// Human-readable text for the current value: the choice label when the
    /// raw value is a key of the choice list, the raw value's display form
    /// otherwise.
    pub fn value_text(&self) -> String {
        display_text(&self.field, &self.value)
    }

    /// Human-readable text for every entry of a multi-valued field.
    ///
    /// The current value must be a sequence.
    pub fn values_text(&self) -> DisplayResult<Vec<String>> {
        let Some(values) = self.value.as_array() else {
            return Err(DisplayError::TypeMismatch {
                field: self.name.clone(),
                expected: "a sequence of values",
            });
        };

        Ok(values
            .iter()
            .map(|value| display_text(&self.field, value))
            .collect())
    }

    /// Set the widget `placeholder` attribute, overwriting any prior value.
    pub fn set_placeholder(&mut self, text: impl Into<String>) -> &mut Self {
        self.field
            .widget
            .attrs
            .insert("placeholder".to_string(), text.into());
        self
    }

    /// Append classes to the widget `class` attribute, space-separated,
    /// skipping empty parts.
    ///
    /// Repeated application with the same classes appends again; templates
    /// that apply this filter twice get the classes twice.
    pub fn add_classes(&mut self, classes: &str) -> &mut Self {
        let attrs = &mut self.field.widget.attrs;
        let existing = attrs.get("class").map(String::as_str).unwrap_or_default();
        let joined = [existing, classes]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        attrs.insert("class".to_string(), joined);
        self
    }

    /// Whether the field is optional (required flag unset).
    pub fn is_optional(&self) -> bool {
        !self.field.required
    }

    /// Whether the field's widget is a checkbox-style single boolean input.
    pub fn is_checkbox(&self) -> bool {
        self.field.widget.kind.is_checkbox()
    }

    /// Whether the field's widget is a multi-select input.
    pub fn is_multiple(&self) -> bool {
        self.field.widget.kind.is_multiple()
    }

    /// The identifier used for label targets: the widget `id` attribute when
    /// set and non-empty, the auto-generated id otherwise.
    pub fn html_id(&self) -> &str {
        match self.field.widget.attrs.get("id") {
            Some(id) if !id.is_empty() => id,
            _ => &self.auto_id,
        }
    }
}

fn display_text(field: &Field, value: &Value) -> String {
    match field.choice_label(value) {
        Some(label) => label.to_string(),
        None => display_value(value),
    }
}

/// The display form of a raw value: strings unquoted, null empty, everything
/// else via its canonical JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use crate::error::DisplayError;
    use crate::form::{BoundField, Field};

    fn yes_no_choices() -> Vec<(serde_json::Value, String)> {
        vec![(json!(1), "Yes".to_string()), (json!(2), "No".to_string())]
    }

    #[test]
    fn test_value_text_uses_choice_label() {
        let field = BoundField::new("answer", Field::select(yes_no_choices())).bind(1);
        assert_eq!(field.value_text(), "Yes");
    }

    #[test]
    fn test_value_text_falls_back_to_raw_value() {
        let field = BoundField::new("answer", Field::select(yes_no_choices())).bind(3);
        assert_eq!(field.value_text(), "3");
    }

    #[test]
    fn test_value_text_without_choices() {
        let field = BoundField::new("name", Field::text()).bind("Ada");
        assert_eq!(field.value_text(), "Ada");
    }

    #[test]
    fn test_value_text_unbound() {
        let field = BoundField::new("name", Field::text());
        assert_eq!(field.value_text(), "");
    }

    #[test]
    fn test_values_text_element_wise() {
        let field =
            BoundField::new("answers", Field::multi_select(yes_no_choices())).bind(json!([1, 3]));
        assert_eq!(field.values_text().unwrap(), vec!["Yes", "3"]);
    }

    #[test]
    fn test_values_text_rejects_scalar() {
        let field = BoundField::new("answers", Field::multi_select(yes_no_choices())).bind(1);
        assert!(matches!(
            field.values_text(),
            Err(DisplayError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_placeholder_overwrites() {
        let mut field = BoundField::new("name", Field::text().attr("placeholder", "old"));
        field.set_placeholder("Enter name");
        assert_eq!(
            field.field.widget.attrs.get("placeholder").unwrap(),
            "Enter name"
        );
    }

    #[test]
    fn test_add_classes_fresh() {
        let mut field = BoundField::new("name", Field::text());
        field.add_classes("bold");
        assert_eq!(field.field.widget.attrs.get("class").unwrap(), "bold");
    }

    #[test]
    fn test_add_classes_appends() {
        let mut field = BoundField::new("name", Field::text());
        field.add_classes("bold").add_classes("italic");
        assert_eq!(
            field.field.widget.attrs.get("class").unwrap(),
            "bold italic"
        );
    }

    #[test]
    fn test_add_classes_not_idempotent() {
        let mut field = BoundField::new("name", Field::text());
        field.add_classes("bold").add_classes("bold");
        assert_eq!(field.field.widget.attrs.get("class").unwrap(), "bold bold");
    }

    #[test]
    fn test_add_classes_skips_empty() {
        let mut field = BoundField::new("name", Field::text());
        field.add_classes("");
        assert_eq!(field.field.widget.attrs.get("class").unwrap(), "");

        field.add_classes("bold");
        assert_eq!(field.field.widget.attrs.get("class").unwrap(), "bold");
    }

    #[test]
    fn test_label_text() {
        let field = BoundField::new("name", Field::text().label("Name"));
        assert_eq!(field.label_text().unwrap(), "Name");

        let unlabeled = BoundField::new("name", Field::text());
        assert!(matches!(
            unlabeled.label_text(),
            Err(DisplayError::AttributeMissing {
                attribute: "label",
                ..
            })
        ));
    }

    #[test]
    fn test_is_optional() {
        assert!(BoundField::new("name", Field::text()).is_optional());
        assert!(!BoundField::new("name", Field::text().required()).is_optional());
    }

    #[test]
    fn test_is_checkbox() {
        assert!(BoundField::new("agree", Field::checkbox()).is_checkbox());
        assert!(!BoundField::new("name", Field::text()).is_checkbox());
    }

    #[test]
    fn test_is_multiple() {
        assert!(BoundField::new("tags", Field::multi_select(Vec::new())).is_multiple());
        assert!(!BoundField::new("tag", Field::select(Vec::new())).is_multiple());
    }

    #[test]
    fn test_html_id() {
        let field = BoundField::new("email", Field::text());
        assert_eq!(field.html_id(), "edit-email");

        let field = BoundField::new("email", Field::text().attr("id", "custom"));
        assert_eq!(field.html_id(), "custom");

        // An empty id attribute falls back to the auto id.
        let field = BoundField::new("email", Field::text().attr("id", ""));
        assert_eq!(field.html_id(), "edit-email");
    }
}
