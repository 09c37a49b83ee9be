//! # Validated Input Layer
//!
//! Raw create/update payloads, checked field by field into the domain
//! model. Unlike the model structs, everything here deserializes leniently:
//! sections default when absent and leaf values are plain strings and
//! numbers, so one request produces the complete list of field errors
//! instead of stopping at the first malformed value.
//!
//! Field names in errors use the wire-level dotted camelCase path
//! (`location.plantAddress.pinCode`), matching what the portal frontend
//! highlights.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use udyam_core::{
    is_indian_state, Aadhaar, FieldError, Gstin, Ifsc, NicCode, Pan, PinCode, RegistrationId,
    ValidationError,
};

use crate::model::{
    Activity, Address, BankDetails, Documents, Employment, Enterprise, EnterpriseType,
    Entrepreneur, Gender, Investment, InvestmentSnapshot, Location, Registration, SocialCategory,
    Turnover,
};
use crate::status::RegistrationStatus;

// ─── Wire Structs ────────────────────────────────────────────────────

/// Raw payload of a create or update request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationInput {
    /// Applicant section.
    pub entrepreneur: EntrepreneurInput,
    /// Enterprise section.
    pub enterprise: EnterpriseInput,
    /// Plant and office addresses.
    pub location: LocationInput,
    /// Bank account details.
    pub bank_details: BankDetailsInput,
    /// Business activities.
    pub activities: Vec<ActivityInput>,
    /// Investment figures.
    pub investment: InvestmentInput,
    /// Turnover figures.
    pub turnover: TurnoverInput,
    /// Employment head counts.
    pub employment: EmploymentInput,
}

/// Raw applicant section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EntrepreneurInput {
    /// Full name.
    pub name: String,
    /// `"Male"`, `"Female"` or `"Other"`.
    pub gender: String,
    /// `"General"`, `"SC"`, `"ST"` or `"OBC"`.
    pub category: String,
    /// Physically handicapped flag.
    pub physically_handicapped: bool,
    /// Aadhaar number, with or without separators.
    pub aadhaar_number: String,
    /// Personal PAN.
    pub pan_number: String,
}

/// Raw enterprise section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EnterpriseInput {
    /// Registered name.
    pub name: String,
    /// Legal constitution; `type` on the wire.
    #[serde(rename = "type")]
    pub enterprise_type: String,
    /// ISO 8601 date or datetime.
    pub commencement_date: String,
    /// Enterprise PAN, optional.
    pub pan_number: Option<String>,
    /// GSTIN, optional.
    pub gst_number: Option<String>,
    /// Earlier registration number, optional.
    pub previous_registration_number: Option<String>,
}

/// Raw location section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationInput {
    /// Plant address.
    pub plant_address: AddressInput,
    /// Office address, optional.
    pub office_address: Option<AddressInput>,
    /// Office same as plant flag.
    pub same_as_plant: bool,
}

/// Raw postal address.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInput {
    /// Flat or unit number.
    pub flat_no: Option<String>,
    /// Building name.
    pub building_name: Option<String>,
    /// Road or street.
    pub road_street: String,
    /// Block or locality.
    pub block: Option<String>,
    /// State or union territory.
    pub state: String,
    /// District.
    pub district: String,
    /// Postal PIN code.
    pub pin_code: String,
}

/// Raw bank section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetailsInput {
    /// Account number.
    pub account_number: String,
    /// IFSC of the branch.
    pub ifsc_code: String,
    /// Bank name.
    pub bank_name: String,
    /// Branch name.
    pub branch_name: String,
}

/// Raw activity line.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityInput {
    /// NIC code.
    pub nic_code: String,
    /// Activity description.
    pub description: String,
    /// Primary activity flag.
    pub is_primary: bool,
}

/// Raw investment section. Numbers arrive as JSON numbers.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestmentInput {
    /// Plant and machinery investment.
    pub plant_machinery: Option<f64>,
    /// Land and building investment.
    pub land_building: Option<f64>,
    /// Previous-year figures, optional.
    pub previous_year: Option<InvestmentSnapshotInput>,
}

/// Raw previous-year investment figures.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestmentSnapshotInput {
    /// Plant and machinery investment.
    pub plant_machinery: Option<f64>,
    /// Land and building investment.
    pub land_building: Option<f64>,
}

/// Raw turnover section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnoverInput {
    /// Current-year turnover.
    pub current_year: Option<f64>,
    /// Previous-year turnover, optional.
    pub previous_year: Option<f64>,
}

/// Raw employment section. Counts arrive as JSON numbers and are checked
/// for integrality here rather than rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmploymentInput {
    /// Male employees.
    pub male: Option<f64>,
    /// Female employees.
    pub female: Option<f64>,
    /// Employees of other genders.
    pub others: Option<f64>,
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Run a newtype constructor, recording its message against `field`.
fn check<T>(
    errors: &mut Vec<FieldError>,
    field: &str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(FieldError::new(field, err));
            None
        }
    }
}

/// Require a non-negative amount.
fn require_amount(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<f64>,
    message: &str,
) -> Option<f64> {
    match value {
        Some(v) if v >= 0.0 => Some(v),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Require a non-negative whole number, returned as a count.
fn require_count(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<f64>,
    message: &str,
) -> Option<u32> {
    match value {
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Some(v as u32),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Trim an optional string, mapping blanks to `None`.
fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Parse an ISO 8601 datetime, or a bare `YYYY-MM-DD` as midnight UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ─── Section Validation ──────────────────────────────────────────────

impl EntrepreneurInput {
    fn validated(&self) -> Result<Entrepreneur, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(
                "entrepreneur.name",
                "Entrepreneur name is required",
            ));
        }
        let gender = Gender::parse(&self.gender);
        if gender.is_none() {
            errors.push(FieldError::new("entrepreneur.gender", "Invalid gender"));
        }
        let category = SocialCategory::parse(&self.category);
        if category.is_none() {
            errors.push(FieldError::new("entrepreneur.category", "Invalid category"));
        }
        let aadhaar = check(
            &mut errors,
            "entrepreneur.aadhaarNumber",
            Aadhaar::new(self.aadhaar_number.as_str()),
        );
        let pan = check(
            &mut errors,
            "entrepreneur.panNumber",
            Pan::new(self.pan_number.as_str()),
        );

        let (Some(gender), Some(category), Some(aadhaar_number), Some(pan_number)) =
            (gender, category, aadhaar, pan)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Entrepreneur {
            name: self.name.trim().to_string(),
            gender,
            category,
            physically_handicapped: self.physically_handicapped,
            aadhaar_number,
            pan_number,
        })
    }
}

impl EnterpriseInput {
    fn validated(&self) -> Result<Enterprise, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(
                "enterprise.name",
                "Enterprise name is required",
            ));
        }
        let enterprise_type = EnterpriseType::parse(&self.enterprise_type);
        if enterprise_type.is_none() {
            errors.push(FieldError::new("enterprise.type", "Invalid enterprise type"));
        }
        let commencement_date = parse_date(&self.commencement_date);
        if commencement_date.is_none() {
            errors.push(FieldError::new(
                "enterprise.commencementDate",
                "Invalid commencement date",
            ));
        }
        let pan_number = match none_if_blank(&self.pan_number) {
            Some(raw) => check(&mut errors, "enterprise.panNumber", Pan::new(raw)).map(Some),
            None => Some(None),
        };
        let gst_number = match none_if_blank(&self.gst_number) {
            Some(raw) => check(&mut errors, "enterprise.gstNumber", Gstin::new(raw)).map(Some),
            None => Some(None),
        };

        let (Some(enterprise_type), Some(commencement_date), Some(pan_number), Some(gst_number)) =
            (enterprise_type, commencement_date, pan_number, gst_number)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Enterprise {
            name: self.name.trim().to_string(),
            enterprise_type,
            commencement_date,
            pan_number,
            gst_number,
            previous_registration_number: none_if_blank(&self.previous_registration_number),
        })
    }
}

impl AddressInput {
    /// Validate one address. `prefix` is the dotted wire path and `label`
    /// the human prefix of the required-field messages.
    fn validated(&self, prefix: &str, label: &str) -> Result<Address, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.road_street.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.roadStreet"),
                format!("{label} road/street is required"),
            ));
        }
        let state = self.state.trim();
        if state.is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.state"),
                format!("{label} state is required"),
            ));
        } else if !is_indian_state(state) {
            errors.push(FieldError::new(
                format!("{prefix}.state"),
                "Invalid state name",
            ));
        }
        if self.district.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.district"),
                format!("{label} district is required"),
            ));
        }
        let pin = check(
            &mut errors,
            &format!("{prefix}.pinCode"),
            PinCode::new(self.pin_code.as_str()),
        );

        let Some(pin_code) = pin else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Address {
            flat_no: none_if_blank(&self.flat_no),
            building_name: none_if_blank(&self.building_name),
            road_street: self.road_street.trim().to_string(),
            block: none_if_blank(&self.block),
            state: state.to_string(),
            district: self.district.trim().to_string(),
            pin_code,
        })
    }
}

impl LocationInput {
    fn validated(&self) -> Result<Location, Vec<FieldError>> {
        let mut errors = Vec::new();
        let plant = self
            .plant_address
            .validated("location.plantAddress", "Plant address")
            .map_err(|e| errors.extend(e))
            .ok();
        let office = match &self.office_address {
            Some(addr) => addr
                .validated("location.officeAddress", "Office address")
                .map_err(|e| errors.extend(e))
                .ok()
                .map(Some),
            None => Some(None),
        };

        let (Some(plant_address), Some(office_address)) = (plant, office) else {
            return Err(errors);
        };
        Ok(Location {
            plant_address,
            office_address,
            same_as_plant: self.same_as_plant,
        })
    }
}

impl BankDetailsInput {
    fn validated(&self) -> Result<BankDetails, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.account_number.trim().is_empty() {
            errors.push(FieldError::new(
                "bankDetails.accountNumber",
                "Bank account number is required",
            ));
        }
        let ifsc = check(
            &mut errors,
            "bankDetails.ifscCode",
            Ifsc::new(self.ifsc_code.as_str()),
        );
        if self.bank_name.trim().is_empty() {
            errors.push(FieldError::new("bankDetails.bankName", "Bank name is required"));
        }
        if self.branch_name.trim().is_empty() {
            errors.push(FieldError::new(
                "bankDetails.branchName",
                "Branch name is required",
            ));
        }

        let Some(ifsc_code) = ifsc else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(BankDetails {
            account_number: self.account_number.trim().to_string(),
            ifsc_code,
            bank_name: self.bank_name.trim().to_string(),
            branch_name: self.branch_name.trim().to_string(),
        })
    }
}

fn validated_activities(activities: &[ActivityInput]) -> Result<Vec<Activity>, Vec<FieldError>> {
    if activities.is_empty() {
        return Err(vec![FieldError::new(
            "activities",
            "At least one activity is required",
        )]);
    }
    let mut errors = Vec::new();
    let mut out = Vec::with_capacity(activities.len());
    for (i, activity) in activities.iter().enumerate() {
        let nic = check(
            &mut errors,
            &format!("activities[{i}].nicCode"),
            NicCode::new(activity.nic_code.as_str()),
        );
        let description = activity.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new(
                format!("activities[{i}].description"),
                "Activity description is required",
            ));
        }
        if let Some(nic_code) = nic {
            if !description.is_empty() {
                out.push(Activity {
                    nic_code,
                    description: description.to_string(),
                    is_primary: activity.is_primary,
                });
            }
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(out)
}

impl InvestmentInput {
    fn validated(&self) -> Result<Investment, Vec<FieldError>> {
        let mut errors = Vec::new();
        let plant = require_amount(
            &mut errors,
            "investment.plantMachinery",
            self.plant_machinery,
            "Plant machinery investment must be a positive number",
        );
        let land = require_amount(
            &mut errors,
            "investment.landBuilding",
            self.land_building,
            "Land building investment must be a positive number",
        );
        let previous = match &self.previous_year {
            Some(snapshot) => {
                let pm = require_amount(
                    &mut errors,
                    "investment.previousYear.plantMachinery",
                    snapshot.plant_machinery,
                    "Previous year plant machinery investment must be a positive number",
                );
                let lb = require_amount(
                    &mut errors,
                    "investment.previousYear.landBuilding",
                    snapshot.land_building,
                    "Previous year land building investment must be a positive number",
                );
                match (pm, lb) {
                    (Some(plant_machinery), Some(land_building)) => Some(Some(InvestmentSnapshot {
                        plant_machinery,
                        land_building,
                        total_investment: plant_machinery + land_building,
                    })),
                    _ => None,
                }
            }
            None => Some(None),
        };

        let (Some(plant_machinery), Some(land_building), Some(previous_year)) =
            (plant, land, previous)
        else {
            return Err(errors);
        };
        Ok(Investment {
            plant_machinery,
            land_building,
            total_investment: plant_machinery + land_building,
            previous_year,
        })
    }
}

impl TurnoverInput {
    fn validated(&self) -> Result<Turnover, Vec<FieldError>> {
        let mut errors = Vec::new();
        let current = require_amount(
            &mut errors,
            "turnover.currentYear",
            self.current_year,
            "Current year turnover must be a positive number",
        );
        let previous = match self.previous_year {
            Some(v) if v < 0.0 => {
                errors.push(FieldError::new(
                    "turnover.previousYear",
                    "Previous year turnover must be a positive number",
                ));
                None
            }
            other => Some(other),
        };

        let (Some(current_year), Some(previous_year)) = (current, previous) else {
            return Err(errors);
        };
        Ok(Turnover {
            current_year,
            previous_year,
        })
    }
}

impl EmploymentInput {
    fn validated(&self) -> Result<Employment, Vec<FieldError>> {
        let mut errors = Vec::new();
        let male = require_count(
            &mut errors,
            "employment.male",
            self.male,
            "Male employment must be a non-negative integer",
        );
        let female = require_count(
            &mut errors,
            "employment.female",
            self.female,
            "Female employment must be a non-negative integer",
        );
        let others = require_count(
            &mut errors,
            "employment.others",
            self.others,
            "Others employment must be a non-negative integer",
        );

        let (Some(male), Some(female), Some(others)) = (male, female, others) else {
            return Err(errors);
        };
        Ok(Employment {
            male,
            female,
            others,
            total: male + female + others,
        })
    }
}

// ─── Assembly ────────────────────────────────────────────────────────

struct Sections {
    entrepreneur: Entrepreneur,
    enterprise: Enterprise,
    location: Location,
    bank_details: BankDetails,
    activities: Vec<Activity>,
    investment: Investment,
    turnover: Turnover,
    employment: Employment,
}

impl RegistrationInput {
    /// Validate every section, collecting errors across all of them.
    fn sections(&self) -> Result<Sections, Vec<FieldError>> {
        let mut errors = Vec::new();
        let entrepreneur = self
            .entrepreneur
            .validated()
            .map_err(|e| errors.extend(e))
            .ok();
        let enterprise = self.enterprise.validated().map_err(|e| errors.extend(e)).ok();
        let location = self.location.validated().map_err(|e| errors.extend(e)).ok();
        let bank_details = self
            .bank_details
            .validated()
            .map_err(|e| errors.extend(e))
            .ok();
        let activities = validated_activities(&self.activities)
            .map_err(|e| errors.extend(e))
            .ok();
        let investment = self.investment.validated().map_err(|e| errors.extend(e)).ok();
        let turnover = self.turnover.validated().map_err(|e| errors.extend(e)).ok();
        let employment = self.employment.validated().map_err(|e| errors.extend(e)).ok();

        match (
            entrepreneur,
            enterprise,
            location,
            bank_details,
            activities,
            investment,
            turnover,
            employment,
        ) {
            (
                Some(entrepreneur),
                Some(enterprise),
                Some(location),
                Some(bank_details),
                Some(activities),
                Some(investment),
                Some(turnover),
                Some(employment),
            ) => Ok(Sections {
                entrepreneur,
                enterprise,
                location,
                bank_details,
                activities,
                investment,
                turnover,
                employment,
            }),
            _ => Err(errors),
        }
    }

    /// Validate the payload and build a fresh draft registration.
    pub fn build(&self) -> Result<Registration, Vec<FieldError>> {
        let s = self.sections()?;
        let now = Utc::now();
        let mut registration = Registration {
            id: RegistrationId::new(),
            status: RegistrationStatus::Draft,
            entrepreneur: s.entrepreneur,
            enterprise: s.enterprise,
            location: s.location,
            bank_details: s.bank_details,
            activities: s.activities,
            investment: s.investment,
            turnover: s.turnover,
            employment: s.employment,
            documents: Documents::default(),
            udyam_number: None,
            submitted_at: None,
            approved_at: None,
            rejected_at: None,
            remarks: None,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        };
        registration.recompute_totals();
        Ok(registration)
    }

    /// Validate the payload and overwrite the data sections of an existing
    /// registration.
    ///
    /// Identity, status, documents, review metadata and `createdAt` are
    /// preserved; `updatedAt` is bumped. The caller is responsible for the
    /// draft-only guard ([`Registration::ensure_updatable`]).
    pub fn apply_to(&self, registration: &mut Registration) -> Result<(), Vec<FieldError>> {
        let s = self.sections()?;
        registration.entrepreneur = s.entrepreneur;
        registration.enterprise = s.enterprise;
        registration.location = s.location;
        registration.bank_details = s.bank_details;
        registration.activities = s.activities;
        registration.investment = s.investment;
        registration.turnover = s.turnover;
        registration.employment = s.employment;
        registration.recompute_totals();
        registration.touch();
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
