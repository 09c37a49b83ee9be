//! # Form Descriptors
//!
//! The declarative description of a multi-step form: steps, fields, their
//! kinds and formats, and conditional visibility. Descriptors are plain
//! data; rendering and validation read them, nothing in here executes.
//!
//! The serialized shape matches what a form host consumes:
//!
//! ```json
//! {
//!   "name": "panNumber",
//!   "label": "PAN Number",
//!   "type": "text",
//!   "format": "pan",
//!   "required": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use udyam_core::{
    Aadhaar, EmailAddress, Gstin, Ifsc, MobileNumber, Pan, PinCode, ValidationError,
};

// ─── Field Kinds ─────────────────────────────────────────────────────

/// Validated format of a text field.
///
/// Each format delegates to the corresponding identifier newtype, so the
/// form shows the same message the server would reject with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// Permanent Account Number.
    Pan,
    /// Aadhaar number, separators allowed.
    Aadhaar,
    /// GST identification number.
    Gstin,
    /// Bank branch IFSC.
    Ifsc,
    /// Indian mobile number.
    Phone,
    /// Postal PIN code.
    Pincode,
    /// Email address.
    Email,
}

impl TextFormat {
    /// Check `value` against this format.
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Pan => Pan::new(value).map(drop),
            Self::Aadhaar => Aadhaar::new(value).map(drop),
            Self::Gstin => Gstin::new(value).map(drop),
            Self::Ifsc => Ifsc::new(value).map(drop),
            Self::Phone => MobileNumber::new(value).map(drop),
            Self::Pincode => PinCode::new(value).map(drop),
            Self::Email => EmailAddress::new(value).map(drop),
        }
    }
}

/// One option of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Construct an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The kind of a field, with kind-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldKind {
    /// Free text, optionally format-checked.
    Text {
        /// Format constraint, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<TextFormat>,
        /// Render as a multi-line area.
        #[serde(default)]
        multiline: bool,
        /// Minimum character count.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
    },
    /// Single choice from a fixed option list.
    Select {
        /// The options.
        options: Vec<SelectOption>,
    },
    /// Numeric input.
    Number {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Yes/no input.
    Boolean {
        /// Render as a switch rather than a checkbox.
        #[serde(default)]
        switch: bool,
    },
    /// Multiple choices from a fixed option list.
    MultiSelect {
        /// The options.
        options: Vec<String>,
    },
    /// Calendar date, stored as an ISO 8601 string.
    Date {
        /// Reject dates that are not in the past.
        #[serde(default)]
        past_only: bool,
    },
}

// ─── Visibility ──────────────────────────────────────────────────────

/// Conditional visibility: show the field only while another field's
/// current value equals `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleWhen {
    /// Name of the controlling field.
    pub field: String,
    /// Value the controlling field must hold.
    pub value: Value,
}

// ─── Field Descriptor ────────────────────────────────────────────────

/// A single form field.
///
/// Constructed through the kind constructors ([`text`](Self::text),
/// [`select`](Self::select), ...) and refined with the chainable setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique field name; the key in the value map.
    pub name: String,
    /// Label shown to the user and used in required-field messages.
    pub label: String,
    /// Kind and kind-specific settings.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Input placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text shown under the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value shown under the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Value the field starts with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Conditional visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
    /// Span the full row when rendered in a grid.
    #[serde(default)]
    pub full_width: bool,
}

impl FieldDescriptor {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: None,
            description: None,
            example: None,
            default_value: None,
            visible_when: None,
            full_width: false,
        }
    }

    /// A plain text field.
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Text {
                format: None,
                multiline: false,
                min_length: None,
            },
        )
    }

    /// A select field with the given options.
    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Select { options })
    }

    /// A numeric field.
    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number { min: None, max: None })
    }

    /// A checkbox field.
    pub fn boolean(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Boolean { switch: false })
    }

    /// A switch field.
    pub fn switch(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Boolean { switch: true })
    }

    /// A date field.
    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date { past_only: false })
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Constrain a text field to `format`.
    pub fn format(mut self, format: TextFormat) -> Self {
        if let FieldKind::Text { format: slot, .. } = &mut self.kind {
            *slot = Some(format);
        }
        self
    }

    /// Render a text field as a multi-line area.
    pub fn multiline(mut self) -> Self {
        if let FieldKind::Text { multiline, .. } = &mut self.kind {
            *multiline = true;
        }
        self
    }

    /// Require at least `n` characters in a text field.
    pub fn min_length(mut self, n: usize) -> Self {
        if let FieldKind::Text { min_length, .. } = &mut self.kind {
            *min_length = Some(n);
        }
        self
    }

    /// Reject dates that are not in the past.
    pub fn past_only(mut self) -> Self {
        if let FieldKind::Date { past_only } = &mut self.kind {
            *past_only = true;
        }
        self
    }

    /// Set the placeholder.
    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    /// Set the help text.
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Set the example value.
    pub fn example(mut self, text: &str) -> Self {
        self.example = Some(text.to_string());
        self
    }

    /// Set the starting value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Show the field only while `field` holds `value`.
    pub fn visible_when(mut self, field: &str, value: Value) -> Self {
        self.visible_when = Some(VisibleWhen {
            field: field.to_string(),
            value,
        });
        self
    }

    /// Span the full row when rendered in a grid.
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Whether the field is visible given the current values.
    ///
    /// A field with no condition is always visible. A condition against an
    /// unset field hides the target, since nothing equals an absent value.
    pub fn is_visible(&self, values: &Map<String, Value>) -> bool {
        match &self.visible_when {
            Some(cond) => values.get(&cond.field).is_some_and(|v| *v == cond.value),
            None => true,
        }
    }
}

// ─── Steps and Schema ────────────────────────────────────────────────

/// One step of a multi-step form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStep {
    /// Stable step identifier.
    pub id: String,
    /// Title shown above the step.
    pub title: String,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl FormStep {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A complete multi-step form description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Form title.
    pub title: String,
    /// Schema version string.
    pub version: String,
    /// Steps in order.
    pub steps: Vec<FormStep>,
}

/// Errors raised while loading a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The JSON did not parse into a schema.
    #[error("malformed form schema: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The schema declares no steps.
    #[error("form schema has no steps")]
    Empty,

    /// Two fields share a name. Field names key the flat value map, so
    /// they must be unique across the whole form.
    #[error("duplicate field name in form schema: {0}")]
    DuplicateField(String),
}

impl FormSchema {
    /// Load and check a schema from JSON.
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(raw)?;
        schema.check()?;
        Ok(schema)
    }

    /// Structural checks: at least one step, globally unique field names.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.steps.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for field in self.steps.iter().flat_map(|s| &s.fields) {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(())
    }

    /// The step at `index`.
    pub fn step(&self, index: usize) -> Option<&FormStep> {
        self.steps.get(index)
    }

    /// Look up a step by identifier.
    pub fn step_by_id(&self, id: &str) -> Option<&FormStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Look up a field by name, across all steps.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.steps.iter().find_map(|s| s.field(name))
    }

    /// Collect the declared default values into a flat map.
    pub fn defaults(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in self.steps.iter().flat_map(|s| &s.fields) {
            if let Some(value) = &field.default_value {
                map.insert(field.name.clone(), value.clone());
            }
        }
        map
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_field_schema() -> FormSchema {
        FormSchema {
            title: "Test".to_string(),
            version: "1.0".to_string(),
            steps: vec![FormStep {
                id: "one".to_string(),
                title: "One".to_string(),
                description: None,
                fields: vec![
                    FieldDescriptor::switch("hasEmployees", "Do you have employees?").required(),
                    FieldDescriptor::number("employeeCount", "Number of Employees")
                        .visible_when("hasEmployees", json!(true)),
                ],
            }],
        }
    }

    #[test]
    fn descriptor_serializes_with_flattened_kind() {
        let field = FieldDescriptor::text("panNumber", "PAN Number")
            .format(TextFormat::Pan)
            .required()
            .placeholder("ABCDE1234F")
            .default_value(json!("ABCDE1234F"));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["format"], "pan");
        assert_eq!(json["required"], true);
        assert_eq!(json["defaultValue"], "ABCDE1234F");
        // Unset options do not clutter the output.
        assert!(json.get("visibleWhen").is_none());
        assert!(json.get("minLength").is_none());
    }

    #[test]
    fn descriptor_roundtrips_through_json() {
        let field = FieldDescriptor::select(
            "enterpriseType",
            "Enterprise Type",
            vec![SelectOption::new("llp", "Limited Liability Partnership (LLP)")],
        )
        .required();
        let raw = serde_json::to_string(&field).unwrap();
        let parsed: FieldDescriptor = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, field);
    }

    #[test]
    fn schema_from_json_accepts_a_minimal_form() {
        let raw = r#"{
            "title": "T",
            "version": "1.0",
            "steps": [{
                "id": "s1",
                "title": "S1",
                "fields": [
                    { "name": "a", "label": "A", "type": "text", "required": true },
                    { "name": "b", "label": "B", "type": "date", "pastOnly": true }
                ]
            }]
        }"#;
        let schema = FormSchema::from_json(raw).unwrap();
        assert_eq!(schema.steps.len(), 1);
        let b = schema.field("b").unwrap();
        assert_eq!(b.kind, FieldKind::Date { past_only: true });
    }

    #[test]
    fn schema_rejects_empty_and_duplicates() {
        let empty = r#"{ "title": "T", "version": "1.0", "steps": [] }"#;
        assert!(matches!(
            FormSchema::from_json(empty),
            Err(SchemaError::Empty)
        ));

        let dup = r#"{
            "title": "T",
            "version": "1.0",
            "steps": [
                { "id": "s1", "title": "S1", "fields": [{ "name": "x", "label": "X", "type": "text" }] },
                { "id": "s2", "title": "S2", "fields": [{ "name": "x", "label": "X", "type": "number" }] }
            ]
        }"#;
        match FormSchema::from_json(dup) {
            Err(SchemaError::DuplicateField(name)) => assert_eq!(name, "x"),
            other => panic!("expected duplicate field error, got {other:?}"),
        }
    }

    #[test]
    fn schema_rejects_garbage() {
        assert!(matches!(
            FormSchema::from_json("not json"),
            Err(SchemaError::Malformed(_))
        ));
    }

    #[test]
    fn visibility_follows_the_controlling_field() {
        let schema = two_field_schema();
        let count = schema.field("employeeCount").unwrap();

        let mut values = Map::new();
        assert!(!count.is_visible(&values), "hidden while controller unset");

        values.insert("hasEmployees".to_string(), json!(true));
        assert!(count.is_visible(&values));

        values.insert("hasEmployees".to_string(), json!(false));
        assert!(!count.is_visible(&values));
    }

    #[test]
    fn unconditional_fields_are_always_visible() {
        let schema = two_field_schema();
        let switch = schema.field("hasEmployees").unwrap();
        assert!(switch.is_visible(&Map::new()));
    }

    #[test]
    fn defaults_collects_only_declared_values() {
        let mut schema = two_field_schema();
        schema.steps[0].fields[0] = schema.steps[0].fields[0]
            .clone()
            .default_value(json!(false));
        let defaults = schema.defaults();
        assert_eq!(defaults.get("hasEmployees"), Some(&json!(false)));
        assert!(!defaults.contains_key("employeeCount"));
    }

    #[test]
    fn text_format_delegates_to_the_newtypes() {
        assert!(TextFormat::Pan.validate("ABCDE1234F").is_ok());
        assert!(TextFormat::Pan.validate("abcde1234f").is_err());
        assert!(TextFormat::Pincode.validate("110001").is_ok());
        assert!(TextFormat::Pincode.validate("010001").is_err());
        assert_eq!(
            TextFormat::Phone.validate("12345").unwrap_err().to_string(),
            "Mobile number must be 10 digits starting with 6, 7, 8, or 9"
        );
    }

    #[test]
    fn kind_setters_ignore_mismatched_kinds() {
        let field = FieldDescriptor::number("n", "N").multiline().past_only();
        assert_eq!(field.kind, FieldKind::Number { min: None, max: None });
    }
}
