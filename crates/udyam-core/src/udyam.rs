//! # Udyam Registration Numbers
//!
//! The certificate number issued when a registration is approved:
//! `UDYAM-SS-DD-NNNNNNN` where `SS` is a state code (01-36), `DD` a district
//! code (01-99), and `NNNNNNN` a 7-digit sequential number.
//!
//! [`UdyamNumber::generate`] produces demo numbers with random components in
//! the issuing ranges; validation accepts any digit string in the shape, so
//! numbers issued elsewhere still parse.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::impl_validating_deserialize;

/// Number of state codes in the issuing range (01-36).
const STATE_CODE_MAX: u8 = 36;
/// Number of district codes in the issuing range (01-99).
const DISTRICT_CODE_MAX: u8 = 99;
/// Upper bound of the 7-digit sequential range.
const SEQUENTIAL_MAX: u32 = 9_999_999;

/// An issued Udyam registration number.
///
/// # Validation
///
/// - Must be `UDYAM-` followed by 2 digits, `-`, 2 digits, `-`, 7 digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UdyamNumber(String);

impl_validating_deserialize!(UdyamNumber);

impl UdyamNumber {
    /// Create a Udyam number from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUdyamNumber`] if the string does not
    /// match `UDYAM-XX-XX-XXXXXXX`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_valid(&s) {
            return Err(ValidationError::InvalidUdyamNumber(s));
        }
        Ok(Self(s))
    }

    fn is_valid(s: &str) -> bool {
        let Some(rest) = s.strip_prefix("UDYAM-") else {
            return false;
        };
        let parts: Vec<&str> = rest.split('-').collect();
        parts.len() == 3
            && parts[0].len() == 2
            && parts[1].len() == 2
            && parts[2].len() == 7
            && parts
                .iter()
                .all(|p| p.chars().all(|c| c.is_ascii_digit()))
    }

    /// Generate a random Udyam number within the issuing ranges.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a Udyam number using the supplied RNG.
    ///
    /// Lets tests drive generation from a seeded RNG.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let state = rng.gen_range(1..=STATE_CODE_MAX);
        let district = rng.gen_range(1..=DISTRICT_CODE_MAX);
        let sequential = rng.gen_range(1..=SEQUENTIAL_MAX);
        Self(format!("UDYAM-{state:02}-{district:02}-{sequential:07}"))
    }

    /// Access the full number string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-digit state code component.
    pub fn state_code(&self) -> u8 {
        self.0[6..8].parse().expect("validated at construction")
    }

    /// The two-digit district code component.
    pub fn district_code(&self) -> u8 {
        self.0[9..11].parse().expect("validated at construction")
    }

    /// The seven-digit sequential component.
    pub fn sequential_number(&self) -> u32 {
        self.0[12..].parse().expect("validated at construction")
    }
}

impl std::fmt::Display for UdyamNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UdyamNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn valid_number_parses() {
        let n = UdyamNumber::new("UDYAM-05-01-0000001").unwrap();
        assert_eq!(n.as_str(), "UDYAM-05-01-0000001");
        assert_eq!(n.state_code(), 5);
        assert_eq!(n.district_code(), 1);
        assert_eq!(n.sequential_number(), 1);
    }

    #[test]
    fn rejects_invalid() {
        assert!(UdyamNumber::new("").is_err());
        assert!(UdyamNumber::new("UDYAM-5-01-0000001").is_err()); // 1-digit state
        assert!(UdyamNumber::new("UDYAM-05-01-000001").is_err()); // 6-digit seq
        assert!(UdyamNumber::new("UDYAM-05-01-00000012").is_err()); // 8-digit seq
        assert!(UdyamNumber::new("UDYAM-05-0A-0000001").is_err()); // letter
        assert!(UdyamNumber::new("udyam-05-01-0000001").is_err()); // lowercase prefix
        assert!(UdyamNumber::new("UDYAM-05-01").is_err()); // truncated
        assert!(UdyamNumber::new("UR-05-01-0000001").is_err()); // wrong prefix
    }

    #[test]
    fn generated_numbers_validate() {
        for _ in 0..100 {
            let n = UdyamNumber::generate();
            assert!(UdyamNumber::new(n.as_str()).is_ok(), "{n} should validate");
            assert!((1..=36).contains(&n.state_code()));
            assert!((1..=99).contains(&n.district_code()));
            assert!((1..=9_999_999).contains(&n.sequential_number()));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = UdyamNumber::generate_with(&mut StdRng::seed_from_u64(7));
        let b = UdyamNumber::generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let n = UdyamNumber::new("UDYAM-27-14-1234567").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"UDYAM-27-14-1234567\"");
        let back: UdyamNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn deserialize_rejects_malformed() {
        let result: Result<UdyamNumber, _> = serde_json::from_str("\"UDYAM-1-2-3\"");
        assert!(result.is_err());
    }

    #[test]
    fn from_str_matches_new() {
        let parsed: UdyamNumber = "UDYAM-09-33-7654321".parse().unwrap();
        assert_eq!(parsed.state_code(), 9);
        assert_eq!(parsed.district_code(), 33);
        assert_eq!(parsed.sequential_number(), 7_654_321);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every string in the documented shape is accepted and its
        /// components survive the round trip.
        #[test]
        fn shape_is_exactly_the_accepted_language(
            state in 0u8..=99,
            district in 0u8..=99,
            seq in 0u32..=9_999_999,
        ) {
            let s = format!("UDYAM-{state:02}-{district:02}-{seq:07}");
            let n = UdyamNumber::new(&s).unwrap();
            prop_assert_eq!(n.state_code(), state);
            prop_assert_eq!(n.district_code(), district);
            prop_assert_eq!(n.sequential_number(), seq);
        }

        /// Arbitrary input never panics the validator.
        #[test]
        fn validation_never_panics(s in ".{0,30}") {
            let _ = UdyamNumber::new(&s);
        }
    }
}
