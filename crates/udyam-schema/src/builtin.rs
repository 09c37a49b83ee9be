//! # Built-in Registration Form
//!
//! The four-step Udyam registration form the portal ships with. A form
//! host could load its own schema with [`FormSchema::from_json`]; this is
//! the one the demo serves.

use serde_json::json;

use crate::form::{FieldDescriptor, FormSchema, FormStep, SelectOption, TextFormat};

/// The four-step Udyam registration form.
pub fn builtin_schema() -> FormSchema {
    FormSchema {
        title: "Udyam Registration Form".to_string(),
        version: "1.0".to_string(),
        steps: vec![
            applicant_details(),
            enterprise_details(),
            location_details(),
            bank_investment(),
        ],
    }
}

fn applicant_details() -> FormStep {
    FormStep {
        id: "applicant-details".to_string(),
        title: "Applicant Details".to_string(),
        description: Some("Enter entrepreneur and business owner information".to_string()),
        fields: vec![
            FieldDescriptor::text("fullName", "Full Name")
                .required()
                .placeholder("Enter full name as per Aadhaar")
                .example("Rajesh Kumar Sharma")
                .description("Enter your full name exactly as it appears on your Aadhaar card")
                .default_value(json!("Rajesh Kumar Sharma")),
            FieldDescriptor::text("panNumber", "PAN Number")
                .format(TextFormat::Pan)
                .required()
                .placeholder("ABCDE1234F")
                .example("ABCDE1234F")
                .description("Enter your 10-digit PAN (Permanent Account Number)")
                .default_value(json!("ABCDE1234F")),
            FieldDescriptor::text("aadhaarNumber", "Aadhaar Number")
                .format(TextFormat::Aadhaar)
                .required()
                .placeholder("1234-5678-9012")
                .example("1234-5678-9012")
                .description("Enter your 12-digit Aadhaar number")
                .default_value(json!("1234-5678-9012")),
            FieldDescriptor::text("email", "Email Address")
                .format(TextFormat::Email)
                .required()
                .placeholder("rajesh@example.com")
                .description("Enter a valid email address for communication")
                .default_value(json!("rajesh@example.com")),
            FieldDescriptor::text("mobileNumber", "Mobile Number")
                .format(TextFormat::Phone)
                .required()
                .placeholder("9876543210")
                .example("9876543210")
                .description("Enter your 10-digit mobile number")
                .default_value(json!("9876543210")),
            FieldDescriptor::date("dateOfBirth", "Date of Birth")
                .past_only()
                .required()
                .description("Enter your date of birth as per Aadhaar")
                .default_value(json!("1990-01-01")),
        ],
    }
}

fn enterprise_details() -> FormStep {
    FormStep {
        id: "enterprise-details".to_string(),
        title: "Enterprise Details".to_string(),
        description: Some("Provide information about your business/enterprise".to_string()),
        fields: vec![
            FieldDescriptor::text("enterpriseName", "Enterprise Name")
                .required()
                .placeholder("ABC Manufacturing Pvt Ltd")
                .description("Enter the official name of your enterprise"),
            FieldDescriptor::select(
                "enterpriseType",
                "Enterprise Type",
                vec![
                    SelectOption::new("proprietorship", "Proprietorship"),
                    SelectOption::new("partnership", "Partnership"),
                    SelectOption::new("llp", "Limited Liability Partnership (LLP)"),
                    SelectOption::new("pvt_ltd", "Private Limited Company"),
                    SelectOption::new("public_ltd", "Public Limited Company"),
                    SelectOption::new("society", "Society"),
                    SelectOption::new("trust", "Trust"),
                    SelectOption::new("cooperative", "Cooperative Society"),
                ],
            )
            .required()
            .description("Select the legal structure of your enterprise"),
            FieldDescriptor::date("commencementDate", "Date of Commencement")
                .required()
                .description("Enter the date when your business operations started"),
            FieldDescriptor::text("gstNumber", "GST Number")
                .format(TextFormat::Gstin)
                .placeholder("22ABCDE1234F1Z5")
                .example("22ABCDE1234F1Z5")
                .description("Enter GST number if registered (optional)"),
            FieldDescriptor::switch("hasEmployees", "Do you have employees?")
                .required()
                .description("Indicate if your enterprise has employees"),
            FieldDescriptor::number("employeeCount", "Number of Employees")
                .visible_when("hasEmployees", json!(true))
                .description("Enter total number of employees including yourself"),
        ],
    }
}

fn location_details() -> FormStep {
    FormStep {
        id: "location-details".to_string(),
        title: "Location Details".to_string(),
        description: Some("Enter address and location information".to_string()),
        fields: vec![
            FieldDescriptor::text("pinCode", "PIN Code")
                .format(TextFormat::Pincode)
                .required()
                .placeholder("110001")
                .example("110001")
                .description("Enter 6-digit PIN code of your business location"),
            FieldDescriptor::text("state", "State")
                .required()
                .placeholder("Will be auto-filled based on PIN")
                .description("State will be automatically populated based on PIN code"),
            FieldDescriptor::text("district", "District")
                .required()
                .placeholder("Will be auto-filled based on PIN")
                .description("District will be automatically populated based on PIN code"),
            FieldDescriptor::text("address", "Complete Address")
                .multiline()
                .required()
                .full_width()
                .placeholder(
                    "Enter complete address including building/plot number, street, locality",
                )
                .description("Provide complete address of your business location"),
            FieldDescriptor::boolean("sameAsOwner", "Business address same as owner's address")
                .description("Check if business address is same as owner's address"),
        ],
    }
}

fn bank_investment() -> FormStep {
    FormStep {
        id: "bank-investment".to_string(),
        title: "Bank & Investment Details".to_string(),
        description: Some("Provide banking information and investment details".to_string()),
        fields: vec![
            FieldDescriptor::text("ifscCode", "Bank IFSC Code")
                .format(TextFormat::Ifsc)
                .required()
                .placeholder("SBIN0000001")
                .example("SBIN0000001")
                .description("Enter 11-character IFSC code of your bank")
                .default_value(json!("SBIN0000001")),
            FieldDescriptor::text("bankName", "Bank Name")
                .required()
                .placeholder("Will be auto-filled based on IFSC")
                .description("Bank name will be automatically populated")
                .default_value(json!("State Bank of India")),
            FieldDescriptor::text("branchName", "Branch Name")
                .required()
                .placeholder("Will be auto-filled based on IFSC")
                .description("Branch name will be automatically populated")
                .default_value(json!("Main Branch")),
            FieldDescriptor::text("accountNumber", "Bank Account Number")
                .required()
                .placeholder("Enter bank account number")
                .description("Enter your business bank account number")
                .default_value(json!("12345678901234")),
            FieldDescriptor::number("plantMachineryInvestment", "Investment in Plant & Machinery (₹)")
                .required()
                .placeholder("500000")
                .description("Enter investment amount in plant and machinery in rupees")
                .default_value(json!(500000)),
            FieldDescriptor::number("annualTurnover", "Annual Turnover (₹)")
                .required()
                .placeholder("2000000")
                .description("Enter annual turnover of previous financial year in rupees")
                .default_value(json!(2000000)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;

    #[test]
    fn builtin_schema_passes_its_own_checks() {
        let schema = builtin_schema();
        schema.check().unwrap();
    }

    #[test]
    fn builtin_schema_has_the_four_steps() {
        let schema = builtin_schema();
        let ids: Vec<&str> = schema.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "applicant-details",
                "enterprise-details",
                "location-details",
                "bank-investment"
            ]
        );
        let counts: Vec<usize> = schema.steps.iter().map(|s| s.fields.len()).collect();
        assert_eq!(counts, [6, 6, 5, 6]);
    }

    #[test]
    fn formats_are_wired_to_the_lookup_fields() {
        let schema = builtin_schema();
        let pin = schema.field("pinCode").unwrap();
        assert!(matches!(
            pin.kind,
            FieldKind::Text {
                format: Some(TextFormat::Pincode),
                ..
            }
        ));
        let ifsc = schema.field("ifscCode").unwrap();
        assert!(matches!(
            ifsc.kind,
            FieldKind::Text {
                format: Some(TextFormat::Ifsc),
                ..
            }
        ));
    }

    #[test]
    fn employee_count_is_conditional_on_has_employees() {
        let schema = builtin_schema();
        let count = schema.field("employeeCount").unwrap();
        let cond = count.visible_when.as_ref().unwrap();
        assert_eq!(cond.field, "hasEmployees");
        assert_eq!(cond.value, serde_json::json!(true));
        assert!(!count.required);
    }

    #[test]
    fn enterprise_type_lists_all_constitutions() {
        let schema = builtin_schema();
        let field = schema.field("enterpriseType").unwrap();
        let FieldKind::Select { options } = &field.kind else {
            panic!("enterpriseType should be a select");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            [
                "proprietorship",
                "partnership",
                "llp",
                "pvt_ltd",
                "public_ltd",
                "society",
                "trust",
                "cooperative"
            ]
        );
    }

    #[test]
    fn date_of_birth_is_past_only() {
        let schema = builtin_schema();
        let dob = schema.field("dateOfBirth").unwrap();
        assert_eq!(dob.kind, FieldKind::Date { past_only: true });
        let commencement = schema.field("commencementDate").unwrap();
        assert_eq!(commencement.kind, FieldKind::Date { past_only: false });
    }

    #[test]
    fn defaults_cover_the_prefilled_demo_values() {
        use serde_json::json;

        let defaults = builtin_schema().defaults();
        assert_eq!(defaults.get("fullName"), Some(&json!("Rajesh Kumar Sharma")));
        assert_eq!(defaults.get("ifscCode"), Some(&json!("SBIN0000001")));
        assert_eq!(
            defaults.get("plantMachineryInvestment"),
            Some(&json!(500000))
        );
        assert!(!defaults.contains_key("enterpriseName"));
        assert!(!defaults.contains_key("pinCode"));
    }

    #[test]
    fn builtin_schema_survives_a_json_roundtrip() {
        let schema = builtin_schema();
        let raw = serde_json::to_string(&schema).unwrap();
        let parsed = FormSchema::from_json(&raw).unwrap();
        assert_eq!(parsed, schema);
    }
}
