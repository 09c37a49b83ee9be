//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the registration
//! stack. Each identifier is a distinct type — you cannot pass an [`Aadhaar`]
//! where a [`Pan`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers validate format at construction time and store a
//! canonical form. The UUID-based [`RegistrationId`] is always valid by
//! construction.
//!
//! ## Format Reference
//!
//! - PAN: Income Tax Department Permanent Account Number (`ABCDE1234F`)
//! - Aadhaar: UIDAI 12-digit identity number (dashes/spaces tolerated)
//! - GSTIN: 15-character GST identification number
//! - IFSC: RBI bank branch code (`SBIN0000001`)
//! - NIC: National Industrial Classification activity code (4-5 digits)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_validating_deserialize;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a registration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Create a new random registration identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a registration identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RegistrationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RegistrationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// Permanent Account Number (PAN).
///
/// Issued by the Income Tax Department. Format: 5 uppercase letters,
/// 4 digits, 1 uppercase letter (`ABCDE1234F`).
///
/// # Validation
///
/// - Must be exactly 10 characters
/// - Positions 1-5 uppercase letters, 6-9 digits, 10 an uppercase letter
/// - Lowercase input is rejected, matching the portal's server-side check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pan(String);

impl_validating_deserialize!(Pan);

impl Pan {
    /// Create a PAN from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPan`] if the string does not match
    /// the `ABCDE1234F` shape.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid = s.len() == 10
            && s.chars().enumerate().all(|(i, c)| match i {
                0..=4 => c.is_ascii_uppercase(),
                5..=8 => c.is_ascii_digit(),
                _ => c.is_ascii_uppercase(),
            });
        if !valid {
            return Err(ValidationError::InvalidPan(s));
        }
        Ok(Self(s))
    }

    /// Access the PAN string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aadhaar number.
///
/// UIDAI 12-digit identity number. The canonical storage format is 12 digits
/// without separators. The constructor accepts both:
/// - `"123456789012"` (12 digits)
/// - `"1234-5678-9012"` or `"1234 5678 9012"` (grouped for readability)
///
/// # Validation
///
/// - Must be exactly 12 digits after stripping dashes and spaces
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Aadhaar(String);

impl_validating_deserialize!(Aadhaar);

impl Aadhaar {
    /// Create an Aadhaar number from a string value, validating format.
    ///
    /// Stores the canonical 12-digit form (separators stripped).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAadhaar`] if the cleaned value is
    /// not exactly 12 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();

        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidAadhaar(raw));
        }

        Ok(Self(digits))
    }

    /// Access the Aadhaar in canonical 12-digit format (no separators).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the Aadhaar in grouped form: XXXX-XXXX-XXXX.
    pub fn formatted(&self) -> String {
        format!("{}-{}-{}", &self.0[..4], &self.0[4..8], &self.0[8..])
    }
}

impl std::fmt::Display for Aadhaar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// GST Identification Number (GSTIN).
///
/// 15 characters: 2-digit state code, 10-character PAN, entity code,
/// the literal `Z`, and a check character.
///
/// # Validation
///
/// - Positions 1-2 digits, 3-7 uppercase letters, 8-11 digits,
///   12 an uppercase letter, 13 alphanumeric excluding `0`,
///   14 the literal `Z`, 15 alphanumeric
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Gstin(String);

impl_validating_deserialize!(Gstin);

impl Gstin {
    /// Create a GSTIN from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidGstin`] if any position fails its
    /// character class.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid = s.len() == 15
            && s.chars().enumerate().all(|(i, c)| match i {
                0 | 1 => c.is_ascii_digit(),
                2..=6 => c.is_ascii_uppercase(),
                7..=10 => c.is_ascii_digit(),
                11 => c.is_ascii_uppercase(),
                12 => (c.is_ascii_digit() && c != '0') || c.is_ascii_uppercase(),
                13 => c == 'Z',
                _ => c.is_ascii_digit() || c.is_ascii_uppercase(),
            });
        if !valid {
            return Err(ValidationError::InvalidGstin(s));
        }
        Ok(Self(s))
    }

    /// Access the GSTIN string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-digit state code prefix.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }
}

impl std::fmt::Display for Gstin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indian Financial System Code (IFSC).
///
/// RBI-issued bank branch identifier. Format: 4 uppercase letters (bank),
/// the literal `0`, 6 alphanumerics (branch), e.g. `SBIN0000001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ifsc(String);

impl_validating_deserialize!(Ifsc);

impl Ifsc {
    /// Create an IFSC from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIfsc`] if the string does not match
    /// the `BANK0123456` shape.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid = s.len() == 11
            && s.chars().enumerate().all(|(i, c)| match i {
                0..=3 => c.is_ascii_uppercase(),
                4 => c == '0',
                _ => c.is_ascii_uppercase() || c.is_ascii_digit(),
            });
        if !valid {
            return Err(ValidationError::InvalidIfsc(s));
        }
        Ok(Self(s))
    }

    /// Access the IFSC string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four-letter bank prefix.
    pub fn bank_code(&self) -> &str {
        &self.0[..4]
    }
}

impl std::fmt::Display for Ifsc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indian mobile number.
///
/// 10 digits, first digit 6-9 (TRAI numbering plan).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MobileNumber(String);

impl_validating_deserialize!(MobileNumber);

impl MobileNumber {
    /// Create a mobile number from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMobileNumber`] if the string is not
    /// 10 digits starting with 6-9.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid = s.len() == 10
            && s.chars().all(|c| c.is_ascii_digit())
            && matches!(s.as_bytes()[0], b'6'..=b'9');
        if !valid {
            return Err(ValidationError::InvalidMobileNumber(s));
        }
        Ok(Self(s))
    }

    /// Access the mobile number string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal Index Number (PIN code).
///
/// 6 digits; the leading digit is the postal region and is never `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PinCode(String);

impl_validating_deserialize!(PinCode);

impl PinCode {
    /// Create a PIN code from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPinCode`] if the string is not
    /// 6 digits or starts with `0`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid =
            s.len() == 6 && s.chars().all(|c| c.is_ascii_digit()) && !s.starts_with('0');
        if !valid {
            return Err(ValidationError::InvalidPinCode(s));
        }
        Ok(Self(s))
    }

    /// Access the PIN code string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address.
///
/// Structural validation only: one `@` with non-empty local part, a domain
/// containing an interior dot, and no whitespace anywhere. Deliverability is
/// out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EmailAddress(String);

impl_validating_deserialize!(EmailAddress);

impl EmailAddress {
    /// Create an email address from a string value, validating structure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the structure check fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_valid(&s) {
            return Err(ValidationError::InvalidEmail(s));
        }
        Ok(Self(s))
    }

    fn is_valid(s: &str) -> bool {
        if s.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        // The domain needs an interior dot: at least one character on each side.
        let chars: Vec<char> = domain.chars().collect();
        chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
    }

    /// Access the email address string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain part (everything after the first `@`).
    pub fn domain(&self) -> &str {
        // Non-panicking by construction: `is_valid` required an `@`.
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// National Industrial Classification (NIC) activity code.
///
/// 4 or 5 digits identifying an enterprise activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NicCode(String);

impl_validating_deserialize!(NicCode);

impl NicCode {
    /// Create a NIC code from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidNicCode`] if the string is not
    /// 4 or 5 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let valid = (s.len() == 4 || s.len() == 5) && s.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(ValidationError::InvalidNicCode(s));
        }
        Ok(Self(s))
    }

    /// Access the NIC code string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NicCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- RegistrationId --

    #[test]
    fn registration_id_unique() {
        let a = RegistrationId::new();
        let b = RegistrationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn registration_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = RegistrationId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn registration_id_parses_from_display() {
        let id = RegistrationId::new();
        let parsed: RegistrationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    // -- PAN --

    #[test]
    fn pan_valid() {
        let pan = Pan::new("ABCDE1234F").unwrap();
        assert_eq!(pan.as_str(), "ABCDE1234F");
    }

    #[test]
    fn pan_rejects_invalid() {
        assert!(Pan::new("").is_err());
        assert!(Pan::new("abcde1234f").is_err()); // lowercase
        assert!(Pan::new("ABCDE12345").is_err()); // last char digit
        assert!(Pan::new("ABCD1234FG").is_err()); // wrong class layout
        assert!(Pan::new("ABCDE1234FX").is_err()); // 11 chars
        assert!(Pan::new("ABCDE123F").is_err()); // 9 chars
    }

    #[test]
    fn pan_serde_roundtrip() {
        let pan = Pan::new("ABCDE1234F").unwrap();
        let json = serde_json::to_string(&pan).unwrap();
        assert_eq!(json, "\"ABCDE1234F\"");
        let back: Pan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pan);
    }

    #[test]
    fn pan_deserialize_rejects_invalid() {
        let result: Result<Pan, _> = serde_json::from_str("\"not-a-pan\"");
        assert!(result.is_err());
    }

    // -- Aadhaar --

    #[test]
    fn aadhaar_valid_plain() {
        let a = Aadhaar::new("123456789012").unwrap();
        assert_eq!(a.as_str(), "123456789012");
    }

    #[test]
    fn aadhaar_valid_with_dashes() {
        let a = Aadhaar::new("1234-5678-9012").unwrap();
        assert_eq!(a.as_str(), "123456789012"); // stored without separators
        assert_eq!(a.formatted(), "1234-5678-9012");
    }

    #[test]
    fn aadhaar_valid_with_spaces() {
        let a = Aadhaar::new("1234 5678 9012").unwrap();
        assert_eq!(a.as_str(), "123456789012");
    }

    #[test]
    fn aadhaar_rejects_invalid() {
        assert!(Aadhaar::new("").is_err());
        assert!(Aadhaar::new("12345678901").is_err()); // 11 digits
        assert!(Aadhaar::new("1234567890123").is_err()); // 13 digits
        assert!(Aadhaar::new("1234a6789012").is_err()); // non-digit
    }

    #[test]
    fn aadhaar_dashed_and_plain_compare_equal() {
        let dashed = Aadhaar::new("1234-5678-9012").unwrap();
        let plain = Aadhaar::new("123456789012").unwrap();
        assert_eq!(dashed, plain);
    }

    // -- GSTIN --

    #[test]
    fn gstin_valid() {
        let g = Gstin::new("27ABCDE1234F1Z5").unwrap();
        assert_eq!(g.as_str(), "27ABCDE1234F1Z5");
        assert_eq!(g.state_code(), "27");
    }

    #[test]
    fn gstin_rejects_invalid() {
        assert!(Gstin::new("").is_err());
        assert!(Gstin::new("27ABCDE1234F1Y5").is_err()); // 14th char not Z
        assert!(Gstin::new("27ABCDE1234F0Z5").is_err()); // entity code 0
        assert!(Gstin::new("27abcde1234f1z5").is_err()); // lowercase
        assert!(Gstin::new("27ABCDE1234F1Z").is_err()); // 14 chars
    }

    #[test]
    fn gstin_entity_code_letter_allowed() {
        assert!(Gstin::new("27ABCDE1234F2Z5").is_ok());
        assert!(Gstin::new("27ABCDE1234FAZ5").is_ok());
    }

    // -- IFSC --

    #[test]
    fn ifsc_valid() {
        let i = Ifsc::new("SBIN0000001").unwrap();
        assert_eq!(i.as_str(), "SBIN0000001");
        assert_eq!(i.bank_code(), "SBIN");
    }

    #[test]
    fn ifsc_branch_may_mix_letters_and_digits() {
        assert!(Ifsc::new("HDFC0ABC123").is_ok());
    }

    #[test]
    fn ifsc_rejects_invalid() {
        assert!(Ifsc::new("").is_err());
        assert!(Ifsc::new("SBIN1000001").is_err()); // fifth char not 0
        assert!(Ifsc::new("SB1N0000001").is_err()); // digit in bank code
        assert!(Ifsc::new("sbin0000001").is_err()); // lowercase
        assert!(Ifsc::new("SBIN000001").is_err()); // 10 chars
    }

    // -- MobileNumber --

    #[test]
    fn mobile_valid() {
        for first in ["6", "7", "8", "9"] {
            let n = format!("{first}876543210");
            assert!(MobileNumber::new(&n).is_ok(), "{n} should be valid");
        }
    }

    #[test]
    fn mobile_rejects_invalid() {
        assert!(MobileNumber::new("").is_err());
        assert!(MobileNumber::new("5876543210").is_err()); // starts with 5
        assert!(MobileNumber::new("987654321").is_err()); // 9 digits
        assert!(MobileNumber::new("98765432100").is_err()); // 11 digits
        assert!(MobileNumber::new("98765a3210").is_err()); // non-digit
    }

    // -- PinCode --

    #[test]
    fn pin_code_valid() {
        let p = PinCode::new("110001").unwrap();
        assert_eq!(p.as_str(), "110001");
    }

    #[test]
    fn pin_code_rejects_invalid() {
        assert!(PinCode::new("").is_err());
        assert!(PinCode::new("011001").is_err()); // leading zero
        assert!(PinCode::new("11001").is_err()); // 5 digits
        assert!(PinCode::new("1100011").is_err()); // 7 digits
        assert!(PinCode::new("11000a").is_err()); // non-digit
    }

    // -- EmailAddress --

    #[test]
    fn email_valid() {
        assert!(EmailAddress::new("rajesh@example.com").is_ok());
        assert!(EmailAddress::new("a.b+c@mail.example.co.in").is_ok());
    }

    #[test]
    fn email_domain_accessor() {
        let e = EmailAddress::new("rajesh@example.com").unwrap();
        assert_eq!(e.domain(), "example.com");
    }

    #[test]
    fn email_rejects_invalid() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("plainaddress").is_err());
        assert!(EmailAddress::new("@example.com").is_err()); // empty local
        assert!(EmailAddress::new("user@").is_err()); // empty domain
        assert!(EmailAddress::new("user@nodot").is_err()); // no dot in domain
        assert!(EmailAddress::new("us er@example.com").is_err()); // whitespace
        assert!(EmailAddress::new("user@@example.com").is_err()); // double @
    }

    // -- NicCode --

    #[test]
    fn nic_code_valid() {
        assert!(NicCode::new("6201").is_ok());
        assert!(NicCode::new("62012").is_ok());
    }

    #[test]
    fn nic_code_rejects_invalid() {
        assert!(NicCode::new("").is_err());
        assert!(NicCode::new("620").is_err()); // 3 digits
        assert!(NicCode::new("620123").is_err()); // 6 digits
        assert!(NicCode::new("62a1").is_err()); // non-digit
    }

    // -- Cross-cutting serde behavior --

    #[test]
    fn validated_types_serialize_as_plain_strings() {
        let a = Aadhaar::new("1234-5678-9012").unwrap();
        // Canonical form on the wire, not the input form.
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"123456789012\"");

        let i = Ifsc::new("SBIN0000001").unwrap();
        assert_eq!(serde_json::to_string(&i).unwrap(), "\"SBIN0000001\"");
    }

    #[test]
    fn validated_types_usable_in_hash_sets() {
        let mut seen = std::collections::HashSet::new();
        seen.insert(Aadhaar::new("123456789012").unwrap());
        // Same number in a different input format is the same key.
        assert!(seen.contains(&Aadhaar::new("1234-5678-9012").unwrap()));
    }
}
