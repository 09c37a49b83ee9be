//! # Domain Constants
//!
//! The fixed reference data the portal ships with: the list of Indian states
//! and union territories, MSME classification thresholds, and document
//! upload limits.

use serde::{Deserialize, Serialize};

/// All 28 states and 8 union territories accepted in address forms.
pub const INDIAN_STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Whether `name` is one of the accepted states or union territories.
///
/// Comparison is exact; the portal's select widget supplies canonical names.
pub fn is_indian_state(name: &str) -> bool {
    INDIAN_STATES.contains(&name)
}

/// Maximum accepted document upload size (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for document uploads.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

/// Whether `content_type` is accepted for document uploads.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// MSME classification under the 2020 composite criteria.
///
/// An enterprise must satisfy **both** the investment and turnover ceilings
/// of a class; exceeding either pushes it into the next class up.
/// All amounts are INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MsmeCategory {
    /// Investment ≤ 1 crore and turnover ≤ 5 crore.
    Micro,
    /// Investment ≤ 10 crore and turnover ≤ 50 crore.
    Small,
    /// Investment ≤ 50 crore and turnover ≤ 250 crore.
    Medium,
}

/// Micro class ceilings: 1 crore investment, 5 crore turnover.
pub const MICRO_LIMITS: (f64, f64) = (10_000_000.0, 50_000_000.0);
/// Small class ceilings: 10 crore investment, 50 crore turnover.
pub const SMALL_LIMITS: (f64, f64) = (100_000_000.0, 500_000_000.0);
/// Medium class ceilings: 50 crore investment, 250 crore turnover.
pub const MEDIUM_LIMITS: (f64, f64) = (500_000_000.0, 2_500_000_000.0);

impl MsmeCategory {
    /// Classify an enterprise from its plant & machinery investment and
    /// annual turnover (both INR).
    ///
    /// Returns `None` when either figure exceeds the medium ceilings, which
    /// places the enterprise outside the MSME definition.
    pub fn classify(investment: f64, turnover: f64) -> Option<Self> {
        let fits = |limits: (f64, f64)| investment <= limits.0 && turnover <= limits.1;
        if fits(MICRO_LIMITS) {
            Some(Self::Micro)
        } else if fits(SMALL_LIMITS) {
            Some(Self::Small)
        } else if fits(MEDIUM_LIMITS) {
            Some(Self::Medium)
        } else {
            None
        }
    }

    /// Stable lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

impl std::fmt::Display for MsmeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_list_is_complete() {
        assert_eq!(INDIAN_STATES.len(), 36);
        assert!(is_indian_state("Maharashtra"));
        assert!(is_indian_state("Delhi"));
        assert!(is_indian_state("Puducherry"));
        assert!(is_indian_state("Dadra and Nagar Haveli and Daman and Diu"));
    }

    #[test]
    fn state_membership_is_exact() {
        assert!(!is_indian_state("maharashtra")); // case matters
        assert!(!is_indian_state("Bombay"));
        assert!(!is_indian_state(""));
    }

    #[test]
    fn content_type_allowlist() {
        assert!(is_allowed_content_type("image/jpeg"));
        assert!(is_allowed_content_type("image/jpg"));
        assert!(is_allowed_content_type("image/png"));
        assert!(is_allowed_content_type("application/pdf"));
        assert!(!is_allowed_content_type("image/gif"));
        assert!(!is_allowed_content_type("application/zip"));
        assert!(!is_allowed_content_type(""));
    }

    #[test]
    fn upload_cap_is_5_mib() {
        assert_eq!(MAX_UPLOAD_BYTES, 5 * 1024 * 1024);
    }

    // -- MSME classification --

    #[test]
    fn classify_micro() {
        assert_eq!(
            MsmeCategory::classify(500_000.0, 2_000_000.0),
            Some(MsmeCategory::Micro)
        );
        // Exactly at the ceilings is still micro.
        assert_eq!(
            MsmeCategory::classify(10_000_000.0, 50_000_000.0),
            Some(MsmeCategory::Micro)
        );
    }

    #[test]
    fn classify_small_when_either_ceiling_exceeded() {
        // Investment above micro, turnover within micro.
        assert_eq!(
            MsmeCategory::classify(20_000_000.0, 2_000_000.0),
            Some(MsmeCategory::Small)
        );
        // Turnover above micro, investment within micro.
        assert_eq!(
            MsmeCategory::classify(500_000.0, 60_000_000.0),
            Some(MsmeCategory::Small)
        );
    }

    #[test]
    fn classify_medium() {
        assert_eq!(
            MsmeCategory::classify(200_000_000.0, 1_000_000_000.0),
            Some(MsmeCategory::Medium)
        );
    }

    #[test]
    fn classify_beyond_medium_is_none() {
        assert_eq!(MsmeCategory::classify(600_000_000.0, 0.0), None);
        assert_eq!(MsmeCategory::classify(0.0, 3_000_000_000.0), None);
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(MsmeCategory::Micro.as_str(), "micro");
        assert_eq!(MsmeCategory::Small.to_string(), "small");
        let json = serde_json::to_string(&MsmeCategory::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
