#![deny(missing_docs)]

//! # udyam-core — Foundational Types for the Udyam Registration Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `thiserror`, `uuid`, and `rand` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`Aadhaar`] where a [`Pan`] is
//!    expected, and an invalid value cannot be constructed at all.
//!
//! 2. **Validation at the boundary.** Every string newtype validates in its
//!    `new()` constructor, and `Deserialize` routes through `new()`, so a
//!    malformed identifier is rejected the moment it enters the system.
//!
//! 3. **Portal-exact messages.** Each rejection carries the end-user message
//!    the registration portal shows for that field, so the same text flows
//!    from the deepest newtype to the HTTP error envelope unchanged.
//!
//! 4. **[`ValidationError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod constants;
pub mod error;
pub mod identity;
pub mod udyam;

// Re-export primary types at crate root for ergonomic imports.
pub use constants::{
    is_allowed_content_type, is_indian_state, MsmeCategory, ALLOWED_CONTENT_TYPES, INDIAN_STATES,
    MAX_UPLOAD_BYTES,
};
pub use error::{FieldError, ValidationError};
pub use identity::{
    Aadhaar, EmailAddress, Gstin, Ifsc, MobileNumber, NicCode, Pan, PinCode, RegistrationId,
};
pub use udyam::UdyamNumber;
