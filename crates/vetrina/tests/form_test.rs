#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Form model and display operation tests.

use serde_json::json;
use vetrina::error::DisplayError;
use vetrina::form::{BoundField, Field, Fieldset, Form, FormKind, WidgetKind};

fn rating_choices() -> Vec<(serde_json::Value, String)> {
    vec![(json!(1), "Yes".to_string()), (json!(2), "No".to_string())]
}

#[test]
fn test_form_creation() {
    let form = Form::new("signup")
        .title("Sign up")
        .action("/signup")
        .field(BoundField::new("email", Field::text().label("Email").required()))
        .field(BoundField::new("agree", Field::checkbox().label("I agree")));

    assert_eq!(form.form_id, "signup");
    assert_eq!(form.title, Some("Sign up".to_string()));
    assert_eq!(form.kind, FormKind::Plain);
    assert_eq!(form.fields.len(), 2);
    assert!(form.is_valid());
}

#[test]
fn test_better_form_carries_fieldsets() {
    let form = Form::new("account")
        .better()
        .field(BoundField::new("email", Field::text().label("Email")))
        .fieldset(Fieldset::new("main", vec!["email".to_string()]).legend("Account"));

    assert!(form.kind.is_better());
    assert_eq!(form.fieldsets[0].fields, vec!["email"]);
}

#[test]
fn test_value_text_choice_lookup() {
    let field = BoundField::new("answer", Field::select(rating_choices())).bind(1);
    assert_eq!(field.value_text(), "Yes");

    let field = BoundField::new("answer", Field::select(rating_choices())).bind(3);
    assert_eq!(field.value_text(), "3");
}

#[test]
fn test_values_text_multi_select() {
    let field =
        BoundField::new("answers", Field::multi_select(rating_choices())).bind(json!([1, 3]));
    assert_eq!(field.values_text().unwrap(), vec!["Yes", "3"]);
}

#[test]
fn test_values_text_requires_sequence() {
    let field = BoundField::new("answers", Field::multi_select(rating_choices())).bind("1");
    assert!(matches!(
        field.values_text(),
        Err(DisplayError::TypeMismatch { .. })
    ));
}

#[test]
fn test_placeholder_and_classes_chain() {
    let mut field = BoundField::new("name", Field::text());

    field
        .set_placeholder("Enter name")
        .add_classes("bold")
        .add_classes("italic");

    let attrs = &field.field.widget.attrs;
    assert_eq!(attrs.get("placeholder").unwrap(), "Enter name");
    assert_eq!(attrs.get("class").unwrap(), "bold italic");
}

#[test]
fn test_placeholder_overwrites_previous() {
    let mut field = BoundField::new("name", Field::text());
    field.set_placeholder("first").set_placeholder("Enter name");
    assert_eq!(
        field.field.widget.attrs.get("placeholder").unwrap(),
        "Enter name"
    );
}

#[test]
fn test_capability_checks() {
    let checkbox = BoundField::new("agree", Field::checkbox().required());
    assert!(checkbox.is_checkbox());
    assert!(!checkbox.is_multiple());
    assert!(!checkbox.is_optional());

    let tags = BoundField::new("tags", Field::multi_select(Vec::new()));
    assert!(tags.is_multiple());
    assert!(!tags.is_checkbox());
    assert!(tags.is_optional());
}

#[test]
fn test_widget_kind_type_names() {
    assert_eq!(WidgetKind::Text.type_name(), "text");
    assert_eq!(WidgetKind::SelectMultiple.type_name(), "select_multiple");
    assert_eq!(WidgetKind::Checkbox.type_name(), "checkbox");
}

#[test]
fn test_mutation_visible_through_form() {
    let mut form = Form::new("profile")
        .field(BoundField::new("name", Field::text().label("Name")));

    form.get_field_mut("name")
        .unwrap()
        .set_placeholder("Enter name");

    let attrs = &form.fields.get("name").unwrap().field.widget.attrs;
    assert_eq!(attrs.get("placeholder").unwrap(), "Enter name");
}
