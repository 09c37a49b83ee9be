//! # udyam-state — Registration Lifecycle
//!
//! The registration aggregate and its review state machine.
//!
//! ## State Machine
//!
//! ```text
//! Draft ──▶ Submitted ──▶ UnderReview ──▶ Approved (terminal)
//!               │              │
//!               │              └─────────▶ Rejected (terminal)
//!               └────────────────────────▶ Approved / Rejected
//! ```
//!
//! Transitions live on [`Registration`] and are the only way to change
//! `status`. Each transition stamps its timestamp (`submitted_at`,
//! `approved_at`, `rejected_at`); approval also assigns the Udyam number.
//! Invalid transitions return [`StatusError`] values whose `Display` is the
//! message the portal shows for that violation.
//!
//! ## Payload Validation
//!
//! [`RegistrationInput`] is the untyped wire payload. Validation collects
//! every field failure into a list (the portal reports all errors at once,
//! not just the first) and only then constructs the typed aggregate, so an
//! invalid [`Registration`] cannot exist.

pub mod input;
pub mod model;
pub mod status;

pub use input::{AddressInput, RegistrationInput};
pub use model::{
    Activity, Address, BankDetails, Documents, DocumentType, Employment, Enterprise,
    EnterpriseType, Entrepreneur, Gender, Investment, InvestmentSnapshot, Location, Registration,
    SocialCategory, Turnover,
};
pub use status::{RegistrationStatus, ReviewEvidence, StatusError};
