//! Fixed reference directories for the demo client.
//!
//! Fifteen well-known PIN codes and fifteen major bank IFSCs, enough to
//! make the lookup-driven autofill feel real in a demo. Anything outside
//! these tables resolves to nothing, exactly like a miss against the live
//! postal and banking directories would.

/// `(pin, state, district)` rows for the PIN code directory.
pub(crate) const PIN_DIRECTORY: [(&str, &str, &str); 15] = [
    ("110001", "Delhi", "Central Delhi"),
    ("400001", "Maharashtra", "Mumbai City"),
    ("560001", "Karnataka", "Bengaluru Urban"),
    ("600001", "Tamil Nadu", "Chennai"),
    ("700001", "West Bengal", "Kolkata"),
    ("500001", "Telangana", "Hyderabad"),
    ("411001", "Maharashtra", "Pune"),
    ("302001", "Rajasthan", "Jaipur"),
    ("380001", "Gujarat", "Ahmedabad"),
    ("201001", "Uttar Pradesh", "Ghaziabad"),
    ("122001", "Haryana", "Gurgaon"),
    ("201301", "Uttar Pradesh", "Gautam Buddha Nagar"),
    ("226001", "Uttar Pradesh", "Lucknow"),
    ("282001", "Uttar Pradesh", "Agra"),
    ("324001", "Rajasthan", "Kota"),
];

/// `(ifsc, bank, branch)` rows for the IFSC directory.
pub(crate) const IFSC_DIRECTORY: [(&str, &str, &str); 15] = [
    ("SBIN0000001", "State Bank of India", "New Delhi Main Branch"),
    ("HDFC0000001", "HDFC Bank", "Mumbai Main Branch"),
    ("ICIC0000001", "ICICI Bank", "Mumbai Main Branch"),
    ("AXIS0000001", "Axis Bank", "Ahmedabad Main Branch"),
    ("PUNB0000001", "Punjab National Bank", "New Delhi Branch"),
    ("BKID0000001", "Bank of India", "Mumbai Fort Branch"),
    ("CNRB0000001", "Canara Bank", "Bengaluru Main Branch"),
    ("UBIN0000001", "Union Bank of India", "Mumbai Main Branch"),
    ("IDIB0000001", "Indian Bank", "Chennai Main Branch"),
    ("IOBA0000001", "Indian Overseas Bank", "Chennai Branch"),
    ("CBIN0000001", "Central Bank of India", "Mumbai Central Branch"),
    ("YESB0000001", "Yes Bank", "Mumbai Branch"),
    ("KKBK0000001", "Kotak Mahindra Bank", "Mumbai BKC Branch"),
    ("INDB0000001", "IndusInd Bank", "Mumbai Branch"),
    ("FDRL0000001", "Federal Bank", "Kochi Main Branch"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_rows_are_unique_and_well_formed() {
        let mut seen = std::collections::HashSet::new();
        for (pin, state, district) in PIN_DIRECTORY {
            assert!(seen.insert(pin), "duplicate PIN {pin}");
            assert_eq!(pin.len(), 6);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
            assert!(!pin.starts_with('0'));
            assert!(!state.is_empty() && !district.is_empty());
        }
    }

    #[test]
    fn ifsc_rows_are_unique_and_well_formed() {
        let mut seen = std::collections::HashSet::new();
        for (ifsc, bank, branch) in IFSC_DIRECTORY {
            assert!(seen.insert(ifsc), "duplicate IFSC {ifsc}");
            assert_eq!(ifsc.len(), 11);
            assert!(ifsc[..4].chars().all(|c| c.is_ascii_uppercase()));
            assert_eq!(&ifsc[4..5], "0");
            assert!(!bank.is_empty() && !branch.is_empty());
        }
    }
}
