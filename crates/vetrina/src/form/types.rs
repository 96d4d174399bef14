//! Form, field, and widget types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete form: named bound fields plus overall validation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    /// Unique form identifier (e.g., "profile_edit_form").
    pub form_id: String,

    /// Rendering variant tag.
    #[serde(default)]
    pub kind: FormKind,

    /// Form action URL.
    pub action: String,

    /// HTTP method ("post" or "get").
    pub method: String,

    /// Bound fields keyed by name.
    pub fields: BTreeMap<String, BoundField>,

    /// Optional form title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named field groups, the layout capability of better forms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fieldsets: Vec<Fieldset>,

    /// Form-level validation errors, populated by external validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Form {
    /// Create a new plain form with the given ID.
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            kind: FormKind::Plain,
            action: String::new(),
            method: "post".to_string(),
            fields: BTreeMap::new(),
            title: None,
            description: None,
            fieldsets: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the form kind.
    pub fn kind(mut self, kind: FormKind) -> Self {
        self.kind = kind;
        self
    }

    /// Tag this form as a better form.
    pub fn better(mut self) -> Self {
        self.kind = FormKind::Better;
        self
    }

    /// Set the form action URL.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set the form method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the form title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the form description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a bound field, keyed by its name.
    pub fn field(mut self, field: BoundField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Add multiple bound fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = BoundField>) -> Self {
        for field in fields {
            self.fields.insert(field.name.clone(), field);
        }
        self
    }

    /// Add a fieldset.
    pub fn fieldset(mut self, fieldset: Fieldset) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    /// Get a mutable reference to a bound field.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut BoundField> {
        self.fields.get_mut(name)
    }

    /// Whether external validation recorded no form-level errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Form rendering variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Ordinary form.
    #[default]
    Plain,
    /// Form with an enhanced default rendering (fieldset layout).
    Better,
}

impl FormKind {
    /// Whether this kind gets the better-form template fallback.
    pub fn is_better(self) -> bool {
        matches!(self, FormKind::Better)
    }
}

/// A named group of fields rendered together by better-form templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fieldset {
    /// Fieldset identifier.
    pub name: String,

    /// Legend displayed for the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,

    /// Names of the fields in this group, in display order.
    pub fields: Vec<String>,

    /// Extra CSS classes for the fieldset wrapper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl Fieldset {
    /// Create a fieldset over the given field names.
    pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            legend: None,
            fields,
            classes: None,
        }
    }

    /// Set the legend.
    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Set wrapper CSS classes.
    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }
}

/// A field definition bound to its current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundField {
    /// Field name within the form.
    pub name: String,

    /// The field definition.
    pub field: Field,

    /// Current value; `Null` when unbound, an array for multi-valued fields.
    #[serde(default)]
    pub value: Value,

    /// Fallback identifier used when the widget has no `id` attribute.
    pub auto_id: String,
}

impl BoundField {
    /// Create an unbound field with the default auto id (`edit-{name}`).
    pub fn new(name: impl Into<String>, field: Field) -> Self {
        let name = name.into();
        let auto_id = format!("edit-{name}");
        Self {
            name,
            field,
            value: Value::Null,
            auto_id,
        }
    }

    /// Bind the field to a value.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Override the auto-generated identifier.
    pub fn auto_id(mut self, auto_id: impl Into<String>) -> Self {
        self.auto_id = auto_id.into();
        self
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A field definition: label, required flag, choice list, and widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Default display text for the field label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether a value is required.
    #[serde(default)]
    pub required: bool,

    /// Ordered raw-value to display-label mapping; empty when the field has
    /// no choice list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<(Value, String)>,

    /// The display/input control for this field.
    pub widget: Widget,

    /// Help text displayed alongside the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl Field {
    /// Create a single-line text field.
    pub fn text() -> Self {
        Self::new(WidgetKind::Text)
    }

    /// Create a multi-line text field.
    pub fn textarea() -> Self {
        Self::new(WidgetKind::Textarea)
    }

    /// Create a dropdown select field with the given choices.
    pub fn select(choices: Vec<(Value, String)>) -> Self {
        Self::new(WidgetKind::Select).choices(choices)
    }

    /// Create a multi-select field with the given choices.
    pub fn multi_select(choices: Vec<(Value, String)>) -> Self {
        Self::new(WidgetKind::SelectMultiple).choices(choices)
    }

    /// Create a checkbox field.
    pub fn checkbox() -> Self {
        Self::new(WidgetKind::Checkbox)
    }

    /// Create a radio button group with the given choices.
    pub fn radio(choices: Vec<(Value, String)>) -> Self {
        Self::new(WidgetKind::Radio).choices(choices)
    }

    /// Create a password field.
    pub fn password() -> Self {
        Self::new(WidgetKind::Password)
    }

    /// Create a hidden field.
    pub fn hidden() -> Self {
        Self::new(WidgetKind::Hidden)
    }

    /// Create a file upload field.
    pub fn file() -> Self {
        Self::new(WidgetKind::File)
    }

    fn new(kind: WidgetKind) -> Self {
        Self {
            label: None,
            required: false,
            choices: Vec::new(),
            widget: Widget::new(kind),
            help_text: None,
        }
    }

    /// Set the label text.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the choice list.
    pub fn choices(mut self, choices: Vec<(Value, String)>) -> Self {
        self.choices = choices;
        self
    }

    /// Set help text.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Set a widget HTML attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.widget.attrs.insert(name.into(), value.into());
        self
    }
}

/// The display/input control associated with a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    /// Widget capability tag.
    #[serde(flatten)]
    pub kind: WidgetKind,

    /// HTML attributes, mutated in place by the display filters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl Widget {
    /// Create a widget with no attributes.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
        }
    }
}

/// Widget capability tags, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Dropdown select.
    Select,
    /// Multi-select input.
    SelectMultiple,
    /// Checkbox-style single boolean input.
    Checkbox,
    /// Radio button group.
    Radio,
    /// Password input.
    Password,
    /// Hidden field.
    Hidden,
    /// File upload.
    File,
}

impl WidgetKind {
    /// Get the tag name as a string.
    pub fn type_name(self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Textarea => "textarea",
            WidgetKind::Select => "select",
            WidgetKind::SelectMultiple => "select_multiple",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Radio => "radio",
            WidgetKind::Password => "password",
            WidgetKind::Hidden => "hidden",
            WidgetKind::File => "file",
        }
    }

    /// Whether this widget is a checkbox-style single boolean input.
    pub fn is_checkbox(self) -> bool {
        matches!(self, WidgetKind::Checkbox)
    }

    /// Whether this widget is a multi-select input.
    pub fn is_multiple(self) -> bool {
        matches!(self, WidgetKind::SelectMultiple)
    }
}
