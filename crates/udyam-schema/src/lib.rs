//! # udyam-schema
//!
//! The schema-driven form engine behind the registration wizard.
//!
//! A [`FormSchema`] declares steps, fields, formats, defaults, and
//! conditional visibility as plain data. [`validate_step`] and
//! [`validate_form`] check a flat value map against it, and a
//! [`FormSession`] walks an applicant through the steps with progress
//! tracking, lookup triggers, and auto-save-friendly value access.
//!
//! [`builtin_schema`] is the four-step Udyam registration form; hosts
//! that need a different form can load their own JSON through
//! [`FormSchema::from_json`].

pub mod builtin;
pub mod form;
pub mod session;
pub mod validate;

pub use builtin::builtin_schema;
pub use form::{
    FieldDescriptor, FieldKind, FormSchema, FormStep, SchemaError, SelectOption, TextFormat,
    VisibleWhen,
};
pub use session::{FormSession, LookupTrigger, StepOutcome};
pub use validate::{validate_form, validate_step};
