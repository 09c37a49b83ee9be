//! # Error Hierarchy
//!
//! Structured validation errors for the registration stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each variant's `Display` is the exact message the portal shows the user
//! for that field. The rejected input is kept on the variant for `Debug`
//! diagnostics but deliberately never appears in `Display`, since several of
//! these identifiers (Aadhaar in particular) are sensitive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// PAN does not match the Income Tax Department format.
    #[error("PAN must be in format ABCDE1234F (5 letters, 4 digits, 1 letter)")]
    InvalidPan(String),

    /// Aadhaar is not 12 digits after stripping separators.
    #[error("Aadhaar must be 12 digits (with or without dashes/spaces)")]
    InvalidAadhaar(String),

    /// GSTIN does not match the 15-character GST format.
    #[error("GST number must be in correct 15-character format")]
    InvalidGstin(String),

    /// IFSC does not match the RBI bank branch code format.
    #[error("IFSC must be in format BANK0123456 (4 letters, 1 zero, 6 alphanumeric)")]
    InvalidIfsc(String),

    /// Mobile number is not a 10-digit Indian mobile number.
    #[error("Mobile number must be 10 digits starting with 6, 7, 8, or 9")]
    InvalidMobileNumber(String),

    /// PIN code is not a valid 6-digit postal code.
    #[error("PIN code must be 6 digits and cannot start with 0")]
    InvalidPinCode(String),

    /// Email address fails basic structural validation.
    #[error("Please enter a valid email address")]
    InvalidEmail(String),

    /// NIC activity code is not 4 or 5 digits.
    #[error("NIC code must be 4 or 5 digits")]
    InvalidNicCode(String),

    /// Udyam number does not match `UDYAM-XX-XX-XXXXXXX`.
    #[error("Invalid Udyam Registration Number format")]
    InvalidUdyamNumber(String),
}

impl ValidationError {
    /// The raw input that failed validation.
    ///
    /// Available for logging at the caller's discretion; intentionally not
    /// part of the `Display` output.
    pub fn rejected_input(&self) -> &str {
        match self {
            Self::InvalidPan(s)
            | Self::InvalidAadhaar(s)
            | Self::InvalidGstin(s)
            | Self::InvalidIfsc(s)
            | Self::InvalidMobileNumber(s)
            | Self::InvalidPinCode(s)
            | Self::InvalidEmail(s)
            | Self::InvalidNicCode(s)
            | Self::InvalidUdyamNumber(s) => s,
        }
    }
}

/// A validation failure attributed to a named input field.
///
/// This is the shape the API returns in its `errors` array and the form
/// engine returns per field: `{"field": "panNumber", "message": "..."}`.
/// Field names use the wire-level camelCase path (`location.plantAddress.state`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted camelCase path of the offending field.
    pub field: String,
    /// User-facing message for that field.
    pub message: String,
}

impl FieldError {
    /// Construct a field error from any displayable parts.
    pub fn new(field: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
