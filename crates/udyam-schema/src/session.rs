//! # Form Sessions
//!
//! A [`FormSession`] walks one applicant through a [`FormSchema`]: it
//! holds the flat value map, tracks the current step, gates step
//! advancement on validation, and reports fill progress.
//!
//! The session is deliberately storage-agnostic. `values()` hands out the
//! map for persistence and [`FormSession::with_values`] restores it, so a
//! caller can auto-save through whatever client it has.

use serde_json::{Map, Value};

use udyam_core::FieldError;

use crate::form::{FieldDescriptor, FieldKind, FormSchema, TextFormat};
use crate::validate::{validate_form, validate_step};

// ─── Lookup Triggers ─────────────────────────────────────────────────

/// A value change that should kick off a reference-data lookup.
///
/// Mirrors the portal behavior: a complete 6-character PIN code looks up
/// state and district, a complete 11-character IFSC looks up bank and
/// branch. The session only reports the trigger; running the lookup and
/// feeding the result back (via [`FormSession::apply_pin_lookup`] or
/// [`FormSession::apply_ifsc_lookup`]) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTrigger {
    /// A PIN code field reached 6 characters.
    Pincode(String),
    /// An IFSC field reached 11 characters.
    Ifsc(String),
}

/// Result of [`FormSession::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step validated; the session moved to `step`.
    Advanced {
        /// Index of the step now current.
        step: usize,
    },
    /// The final step validated; the form is ready to submit.
    Complete,
    /// The current step has errors; the session did not move.
    Invalid(Vec<FieldError>),
}

// ─── Session ─────────────────────────────────────────────────────────

/// Mutable per-applicant state over an immutable schema.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    values: Map<String, Value>,
    current_step: usize,
}

impl FormSession {
    /// Start a fresh session, seeding the schema's declared defaults.
    pub fn new(schema: FormSchema) -> Self {
        let values = schema.defaults();
        Self {
            schema,
            values,
            current_step: 0,
        }
    }

    /// Resume a session from previously saved values.
    ///
    /// Saved values win over schema defaults, so a field the applicant
    /// cleared before saving stays cleared.
    pub fn with_values(schema: FormSchema, stored: Map<String, Value>) -> Self {
        let mut session = Self::new(schema);
        session.values.extend(stored);
        session
    }

    /// The schema this session walks.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Current value of `name`, if set.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The whole value map, for persistence.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Set one field and report any lookup the change should trigger.
    pub fn set_value(&mut self, name: &str, value: Value) -> Option<LookupTrigger> {
        self.values.insert(name.to_string(), value);
        self.lookup_trigger(name)
    }

    /// Merge a batch of values. Batch restores never trigger lookups.
    pub fn merge(&mut self, values: Map<String, Value>) {
        self.values.extend(values);
    }

    fn lookup_trigger(&self, name: &str) -> Option<LookupTrigger> {
        let field = self.schema.field(name)?;
        let FieldKind::Text {
            format: Some(format),
            ..
        } = &field.kind
        else {
            return None;
        };
        let text = self.values.get(name)?.as_str()?;
        match format {
            TextFormat::Pincode if text.chars().count() == 6 => {
                Some(LookupTrigger::Pincode(text.to_string()))
            }
            TextFormat::Ifsc if text.chars().count() == 11 => {
                Some(LookupTrigger::Ifsc(text.to_string()))
            }
            _ => None,
        }
    }

    /// Fill state and district from a PIN lookup result.
    pub fn apply_pin_lookup(&mut self, state: &str, district: &str) {
        self.values.insert("state".to_string(), Value::from(state));
        self.values
            .insert("district".to_string(), Value::from(district));
    }

    /// Fill bank and branch names from an IFSC lookup result.
    pub fn apply_ifsc_lookup(&mut self, bank: &str, branch: &str) {
        self.values.insert("bankName".to_string(), Value::from(bank));
        self.values
            .insert("branchName".to_string(), Value::from(branch));
    }

    // ─── Navigation ──────────────────────────────────────────────────

    /// Index of the step the applicant is on.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Jump to `index`. Returns `false` (without moving) if out of range.
    pub fn go_to_step(&mut self, index: usize) -> bool {
        if index >= self.schema.steps.len() {
            return false;
        }
        self.current_step = index;
        true
    }

    /// Step back one step, stopping at the first.
    pub fn previous_step(&mut self) -> usize {
        self.current_step = self.current_step.saturating_sub(1);
        self.current_step
    }

    /// Validate the current step and move forward if it passes.
    pub fn advance(&mut self) -> StepOutcome {
        let errors = self.validate_current_step();
        if !errors.is_empty() {
            return StepOutcome::Invalid(errors);
        }
        if self.current_step + 1 >= self.schema.steps.len() {
            return StepOutcome::Complete;
        }
        self.current_step += 1;
        StepOutcome::Advanced {
            step: self.current_step,
        }
    }

    // ─── Validation ──────────────────────────────────────────────────

    /// Errors on the current step's visible fields.
    pub fn validate_current_step(&self) -> Vec<FieldError> {
        self.schema
            .step(self.current_step)
            .map(|step| validate_step(step, &self.values))
            .unwrap_or_default()
    }

    /// Errors across every step, for a final pre-submit check.
    pub fn validate_all(&self) -> Vec<FieldError> {
        validate_form(&self.schema, &self.values)
    }

    /// The fields of step `index` that are currently visible.
    pub fn visible_fields(&self, index: usize) -> Vec<&FieldDescriptor> {
        self.schema
            .step(index)
            .map(|step| {
                step.fields
                    .iter()
                    .filter(|f| f.is_visible(&self.values))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ─── Progress ────────────────────────────────────────────────────

    /// Percent of step `index` that is filled in, 0 to 100.
    ///
    /// A field counts as filled when its value is set and is neither the
    /// empty string nor null. `false` and `0` are deliberate answers and
    /// count as filled.
    pub fn step_progress(&self, index: usize) -> u8 {
        let Some(step) = self.schema.step(index) else {
            return 0;
        };
        if step.fields.is_empty() {
            return 0;
        }
        let filled = step
            .fields
            .iter()
            .filter(|field| match self.values.get(&field.name) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            })
            .count();
        ((filled as f64 / step.fields.len() as f64) * 100.0).round() as u8
    }

    /// Overall progress: the mean of the per-step percentages.
    pub fn total_progress(&self) -> u8 {
        let steps = self.schema.steps.len();
        if steps == 0 {
            return 0;
        }
        let sum: u32 = (0..steps).map(|i| u32::from(self.step_progress(i))).sum();
        (f64::from(sum) / steps as f64).round() as u8
    }

    /// Drop all values, re-seed defaults, and return to the first step.
    pub fn clear(&mut self) {
        self.values = self.schema.defaults();
        self.current_step = 0;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_schema;
    use serde_json::json;

    fn session() -> FormSession {
        FormSession::new(builtin_schema())
    }

    fn fill_enterprise_step(session: &mut FormSession) {
        session.set_value("enterpriseName", json!("Sharma Industries"));
        session.set_value("enterpriseType", json!("proprietorship"));
        session.set_value("commencementDate", json!("2020-04-01"));
        session.set_value("hasEmployees", json!(false));
    }

    fn fill_location_step(session: &mut FormSession) {
        session.set_value("pinCode", json!("110001"));
        session.set_value("state", json!("Delhi"));
        session.set_value("district", json!("Central Delhi"));
        session.set_value("address", json!("12, Connaught Place"));
    }

    // ── Seeding and restore ──────────────────────────────────────────

    #[test]
    fn new_session_seeds_schema_defaults() {
        let session = session();
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.value("fullName"), Some(&json!("Rajesh Kumar Sharma")));
        assert_eq!(session.value("ifscCode"), Some(&json!("SBIN0000001")));
        assert_eq!(session.value("enterpriseName"), None);
    }

    #[test]
    fn with_values_lets_saved_data_win() {
        let mut stored = Map::new();
        stored.insert("fullName".to_string(), json!("Meena Iyer"));
        stored.insert("enterpriseName".to_string(), json!("Iyer Textiles"));
        let session = FormSession::with_values(builtin_schema(), stored);
        assert_eq!(session.value("fullName"), Some(&json!("Meena Iyer")));
        assert_eq!(session.value("enterpriseName"), Some(&json!("Iyer Textiles")));
        // Untouched defaults survive.
        assert_eq!(session.value("panNumber"), Some(&json!("ABCDE1234F")));
    }

    #[test]
    fn clear_reseeds_defaults_and_rewinds() {
        let mut session = session();
        fill_enterprise_step(&mut session);
        session.go_to_step(2);
        session.clear();
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.value("enterpriseName"), None);
        assert_eq!(session.value("fullName"), Some(&json!("Rajesh Kumar Sharma")));
    }

    // ── Lookup triggers ──────────────────────────────────────────────

    #[test]
    fn complete_pin_code_triggers_a_lookup() {
        let mut session = session();
        assert_eq!(session.set_value("pinCode", json!("1100")), None);
        assert_eq!(
            session.set_value("pinCode", json!("110001")),
            Some(LookupTrigger::Pincode("110001".to_string()))
        );
    }

    #[test]
    fn complete_ifsc_triggers_a_lookup() {
        let mut session = session();
        assert_eq!(session.set_value("ifscCode", json!("HDFC000")), None);
        assert_eq!(
            session.set_value("ifscCode", json!("HDFC0000001")),
            Some(LookupTrigger::Ifsc("HDFC0000001".to_string()))
        );
    }

    #[test]
    fn unformatted_fields_never_trigger_lookups() {
        let mut session = session();
        assert_eq!(session.set_value("fullName", json!("sixchr")), None);
        assert_eq!(session.set_value("accountNumber", json!("12345678901")), None);
        // Non-string values cannot trigger either.
        assert_eq!(session.set_value("pinCode", json!(110001)), None);
    }

    #[test]
    fn lookup_results_land_in_the_right_fields() {
        let mut session = session();
        session.apply_pin_lookup("Delhi", "Central Delhi");
        assert_eq!(session.value("state"), Some(&json!("Delhi")));
        assert_eq!(session.value("district"), Some(&json!("Central Delhi")));

        session.apply_ifsc_lookup("HDFC Bank", "Mumbai Main Branch");
        assert_eq!(session.value("bankName"), Some(&json!("HDFC Bank")));
        assert_eq!(session.value("branchName"), Some(&json!("Mumbai Main Branch")));
    }

    #[test]
    fn merge_restores_without_triggering() {
        let mut session = session();
        let mut batch = Map::new();
        batch.insert("pinCode".to_string(), json!("110001"));
        session.merge(batch);
        assert_eq!(session.value("pinCode"), Some(&json!("110001")));
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn advance_walks_the_whole_form() {
        let mut session = session();

        // Step 0 is fully pre-filled by defaults.
        assert_eq!(session.advance(), StepOutcome::Advanced { step: 1 });

        // Step 1 starts empty.
        match session.advance() {
            StepOutcome::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.field == "enterpriseName"));
                assert_eq!(session.current_step(), 1);
            }
            other => panic!("expected invalid step, got {other:?}"),
        }

        fill_enterprise_step(&mut session);
        assert_eq!(session.advance(), StepOutcome::Advanced { step: 2 });

        fill_location_step(&mut session);
        assert_eq!(session.advance(), StepOutcome::Advanced { step: 3 });

        // Step 3 is fully pre-filled by defaults, so the form completes.
        assert_eq!(session.advance(), StepOutcome::Complete);
        assert_eq!(session.current_step(), 3);
    }

    #[test]
    fn go_to_step_rejects_out_of_range() {
        let mut session = session();
        assert!(session.go_to_step(3));
        assert_eq!(session.current_step(), 3);
        assert!(!session.go_to_step(4));
        assert_eq!(session.current_step(), 3);
    }

    #[test]
    fn previous_step_stops_at_the_first() {
        let mut session = session();
        session.go_to_step(1);
        assert_eq!(session.previous_step(), 0);
        assert_eq!(session.previous_step(), 0);
    }

    // ── Visibility ───────────────────────────────────────────────────

    #[test]
    fn visible_fields_follow_the_employee_switch() {
        let mut session = session();
        let names = |s: &FormSession| {
            s.visible_fields(1)
                .iter()
                .map(|f| f.name.clone())
                .collect::<Vec<_>>()
        };
        assert!(!names(&session).contains(&"employeeCount".to_string()));

        session.set_value("hasEmployees", json!(true));
        assert!(names(&session).contains(&"employeeCount".to_string()));

        session.set_value("hasEmployees", json!(false));
        assert!(!names(&session).contains(&"employeeCount".to_string()));
    }

    // ── Progress ─────────────────────────────────────────────────────

    #[test]
    fn step_progress_counts_filled_fields() {
        let mut session = session();
        // Every applicant-details field carries a default.
        assert_eq!(session.step_progress(0), 100);
        assert_eq!(session.step_progress(1), 0);

        session.set_value("enterpriseName", json!("Sharma Industries"));
        session.set_value("enterpriseType", json!("proprietorship"));
        session.set_value("commencementDate", json!("2020-04-01"));
        // 3 of 6 fields filled.
        assert_eq!(session.step_progress(1), 50);
    }

    #[test]
    fn false_and_zero_count_as_filled() {
        let mut session = session();
        session.set_value("hasEmployees", json!(false));
        session.set_value("employeeCount", json!(0));
        assert_eq!(session.step_progress(1), 33);
    }

    #[test]
    fn empty_strings_and_nulls_do_not_count() {
        let mut session = session();
        session.set_value("enterpriseName", json!(""));
        session.set_value("gstNumber", Value::Null);
        assert_eq!(session.step_progress(1), 0);
    }

    #[test]
    fn total_progress_averages_the_steps() {
        let mut session = session();
        // Defaults fill steps 0 and 3 completely, steps 1 and 2 not at all.
        assert_eq!(session.total_progress(), 50);

        fill_enterprise_step(&mut session);
        fill_location_step(&mut session);
        // Steps: 100, 67 (4 of 6), 80 (4 of 5), 100 -> mean 86.75 -> 87.
        assert_eq!(session.total_progress(), 87);
    }

    #[test]
    fn out_of_range_progress_is_zero() {
        let session = session();
        assert_eq!(session.step_progress(9), 0);
    }
}
