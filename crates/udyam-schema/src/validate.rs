//! # Pure Form Validation
//!
//! Validates a flat value map against field descriptors. No side effects,
//! no I/O; callers decide when to run it (on step advance, on change, on
//! final review).
//!
//! Rules, in check order per field:
//!
//! 1. Hidden fields (failed `visibleWhen`) are skipped entirely.
//! 2. An optional field that is absent or blank passes outright.
//! 3. On required fields, format constraints run before the required
//!    check, so an empty formatted field reports its format message.
//! 4. At most one error per field, in declaration order.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use udyam_core::FieldError;

use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormStep};

/// Validate the visible fields of one step.
pub fn validate_step(step: &FormStep, values: &Map<String, Value>) -> Vec<FieldError> {
    step.fields
        .iter()
        .filter(|field| field.is_visible(values))
        .filter_map(|field| {
            field_message(field, values.get(&field.name))
                .map(|message| FieldError::new(&field.name, message))
        })
        .collect()
}

/// Validate every step of the form.
pub fn validate_form(schema: &FormSchema, values: &Map<String, Value>) -> Vec<FieldError> {
    schema
        .steps
        .iter()
        .flat_map(|step| validate_step(step, values))
        .collect()
}

/// First failing check for one field, if any.
fn field_message(field: &FieldDescriptor, value: Option<&Value>) -> Option<String> {
    match &field.kind {
        FieldKind::Text {
            format, min_length, ..
        } => {
            let text = value.and_then(Value::as_str).unwrap_or("");
            if text.is_empty() && !field.required {
                return None;
            }
            if let Some(format) = format {
                if let Err(err) = format.validate(text) {
                    return Some(err.to_string());
                }
            }
            if let Some(min) = min_length {
                if text.chars().count() < *min {
                    return Some(format!("Minimum {min} characters required"));
                }
            }
            if field.required && text.is_empty() {
                return Some(format!("{} is required", field.label));
            }
            None
        }

        FieldKind::Select { .. } => {
            let text = value.and_then(Value::as_str).unwrap_or("");
            if field.required && text.is_empty() {
                return Some(format!("{} is required", field.label));
            }
            None
        }

        FieldKind::Number { min, max } => {
            let Some(number) = value.and_then(Value::as_f64) else {
                return field
                    .required
                    .then(|| format!("{} is required", field.label));
            };
            if let Some(min) = min {
                if number < *min {
                    return Some(format!(
                        "Number must be greater than or equal to {min}"
                    ));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Some(format!("Number must be less than or equal to {max}"));
                }
            }
            None
        }

        FieldKind::Boolean { .. } => {
            if field.required && value.and_then(Value::as_bool).is_none() {
                return Some(format!("{} is required", field.label));
            }
            None
        }

        FieldKind::MultiSelect { .. } => match value.and_then(Value::as_array) {
            Some(items) if items.is_empty() => {
                Some("Please select at least one option".to_string())
            }
            Some(_) => None,
            None => field
                .required
                .then(|| format!("{} is required", field.label)),
        },

        FieldKind::Date { past_only } => {
            // Hosts store a cleared date input as an empty string; treat
            // it the same as absent.
            let text = value.and_then(Value::as_str).unwrap_or("");
            if text.is_empty() {
                return field
                    .required
                    .then(|| format!("{} is required", field.label));
            }
            let Some(parsed) = parse_date(text) else {
                return Some("Please select a valid date".to_string());
            };
            if *past_only && parsed >= Utc::now() {
                return Some("Date of birth must be in the past".to_string());
            }
            None
        }
    }
}

/// Parse an ISO 8601 datetime, or a bare `YYYY-MM-DD` as midnight UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ─── Tests ───────────────────────────────────────────────────────────
