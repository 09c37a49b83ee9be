//! # Review Status State Machine
//!
//! The linear review lifecycle of a registration. Status names on the wire
//! are snake_case (`under_review`), matching the stored records.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// The review status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Editable; not yet handed to review.
    Draft,
    /// Submitted for review; frozen for the applicant.
    Submitted,
    /// A reviewer has picked it up.
    UnderReview,
    /// Approved and issued a Udyam number (terminal).
    Approved,
    /// Rejected with remarks (terminal).
    Rejected,
}

impl RegistrationStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether the registration can still be edited or deleted.
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Whether approve/reject decisions are accepted from this status.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }

    /// Stable snake_case name used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A status string that names no known status.
///
/// List filters treat this as "matches nothing" rather than an error,
/// mirroring the portal's behavior for unrecognized filter values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown registration status: {0}")]
pub struct UnknownStatus(pub String);

/// Errors raised by lifecycle transitions and edit guards.
///
/// `Display` carries the portal's user-facing message for each violation;
/// the offending status is kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// `submit` from anything but `Draft`.
    #[error("Registration has already been submitted")]
    AlreadySubmitted {
        /// The status the registration was in.
        current: RegistrationStatus,
    },

    /// `approve` from a status that is not submitted or under review.
    #[error("Registration cannot be approved in current status")]
    NotApprovable {
        /// The status the registration was in.
        current: RegistrationStatus,
    },

    /// `reject` from a status that is not submitted or under review.
    #[error("Registration cannot be rejected in current status")]
    NotRejectable {
        /// The status the registration was in.
        current: RegistrationStatus,
    },

    /// `begin_review` from anything but `Submitted`.
    #[error("Registration cannot be moved to review in current status")]
    NotReviewable {
        /// The status the registration was in.
        current: RegistrationStatus,
    },

    /// Edit attempted after the draft left the applicant's hands.
    #[error("Cannot update registration that has been submitted")]
    UpdateLocked,

    /// Delete attempted after the draft left the applicant's hands.
    #[error("Cannot delete registration that has been submitted")]
    DeleteLocked,
}

/// Reviewer-supplied context for approve/reject decisions.
///
/// Both fields are optional on the wire; defaults are applied during the
/// transition (`reviewed_by` falls back to `"System"`, rejection remarks to
/// `"Registration rejected"`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvidence {
    /// Who made the decision.
    pub reviewed_by: Option<String>,
    /// Free-text remarks; recorded on rejection.
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(RegistrationStatus::Draft.as_str(), "draft");
        assert_eq!(RegistrationStatus::UnderReview.as_str(), "under_review");
        assert_eq!(
            serde_json::to_string(&RegistrationStatus::UnderReview).unwrap(),
            "\"under_review\""
        );
    }

    #[test]
    fn from_str_roundtrips_every_status() {
        for status in [
            RegistrationStatus::Draft,
            RegistrationStatus::Submitted,
            RegistrationStatus::UnderReview,
            RegistrationStatus::Approved,
            RegistrationStatus::Rejected,
        ] {
            let parsed: RegistrationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("pending".parse::<RegistrationStatus>().is_err());
        assert!("DRAFT".parse::<RegistrationStatus>().is_err());
        assert!("".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
        assert!(!RegistrationStatus::Draft.is_terminal());
        assert!(!RegistrationStatus::Submitted.is_terminal());
        assert!(!RegistrationStatus::UnderReview.is_terminal());
    }

    #[test]
    fn reviewable_states() {
        assert!(RegistrationStatus::Submitted.is_reviewable());
        assert!(RegistrationStatus::UnderReview.is_reviewable());
        assert!(!RegistrationStatus::Draft.is_reviewable());
        assert!(!RegistrationStatus::Approved.is_reviewable());
    }

    #[test]
    fn error_messages_are_portal_exact() {
        let err = StatusError::AlreadySubmitted {
            current: RegistrationStatus::Approved,
        };
        assert_eq!(format!("{err}"), "Registration has already been submitted");

        let err = StatusError::NotApprovable {
            current: RegistrationStatus::Draft,
        };
        assert_eq!(
            format!("{err}"),
            "Registration cannot be approved in current status"
        );

        assert_eq!(
            format!("{}", StatusError::UpdateLocked),
            "Cannot update registration that has been submitted"
        );
        assert_eq!(
            format!("{}", StatusError::DeleteLocked),
            "Cannot delete registration that has been submitted"
        );
    }

    #[test]
    fn review_evidence_defaults_to_empty() {
        let ev = ReviewEvidence::default();
        assert!(ev.reviewed_by.is_none());
        assert!(ev.remarks.is_none());
    }

    #[test]
    fn review_evidence_deserializes_camel_case() {
        let ev: ReviewEvidence =
            serde_json::from_str(r#"{"reviewedBy":"officer-7","remarks":"ok"}"#).unwrap();
        assert_eq!(ev.reviewed_by.as_deref(), Some("officer-7"));
        assert_eq!(ev.remarks.as_deref(), Some("ok"));
    }
}
