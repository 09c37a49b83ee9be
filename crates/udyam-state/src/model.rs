//! # Registration Aggregate
//!
//! The complete Udyam registration record: the entrepreneur, enterprise,
//! location, bank, activity, investment, turnover and employment sections,
//! the uploaded document slots, and the review lifecycle transitions.
//!
//! Section structs serialize in camelCase to match the wire format the
//! portal frontend speaks. Derived totals (`totalInvestment`,
//! `employment.total`) are recomputed server-side and never taken from
//! client input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use udyam_core::{
    Aadhaar, Gstin, Ifsc, MsmeCategory, NicCode, Pan, PinCode, RegistrationId, UdyamNumber,
};

use crate::status::{RegistrationStatus, ReviewEvidence, StatusError};

// ─── Field Enums ─────────────────────────────────────────────────────

/// Gender of the entrepreneur, as collected by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
}

impl Gender {
    /// Parse the wire-level string (`"Male"`, `"Female"`, `"Other"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The wire-level string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Social category of the entrepreneur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SocialCategory {
    /// General category.
    General,
    /// Scheduled Caste.
    #[serde(rename = "SC")]
    Sc,
    /// Scheduled Tribe.
    #[serde(rename = "ST")]
    St,
    /// Other Backward Class.
    #[serde(rename = "OBC")]
    Obc,
}

impl SocialCategory {
    /// Parse the wire-level string (`"General"`, `"SC"`, `"ST"`, `"OBC"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "General" => Some(Self::General),
            "SC" => Some(Self::Sc),
            "ST" => Some(Self::St),
            "OBC" => Some(Self::Obc),
            _ => None,
        }
    }

    /// The wire-level string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Obc => "OBC",
        }
    }
}

/// Legal constitution of the enterprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EnterpriseType {
    /// Sole proprietorship.
    Proprietorship,
    /// Partnership firm.
    Partnership,
    /// Limited liability partnership.
    #[serde(rename = "LLP")]
    Llp,
    /// Private limited company.
    #[serde(rename = "Private Limited")]
    PrivateLimited,
    /// Public limited company.
    #[serde(rename = "Public Limited")]
    PublicLimited,
    /// Any other constitution (society, trust, cooperative, ...).
    Others,
}

impl EnterpriseType {
    /// Parse the wire-level string (`"Proprietorship"`, `"LLP"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Proprietorship" => Some(Self::Proprietorship),
            "Partnership" => Some(Self::Partnership),
            "LLP" => Some(Self::Llp),
            "Private Limited" => Some(Self::PrivateLimited),
            "Public Limited" => Some(Self::PublicLimited),
            "Others" => Some(Self::Others),
            _ => None,
        }
    }

    /// The wire-level string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proprietorship => "Proprietorship",
            Self::Partnership => "Partnership",
            Self::Llp => "LLP",
            Self::PrivateLimited => "Private Limited",
            Self::PublicLimited => "Public Limited",
            Self::Others => "Others",
        }
    }
}

// ─── Section Structs ─────────────────────────────────────────────────

/// A postal address as collected for the plant and office locations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Flat or unit number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_no: Option<String>,
    /// Building or premises name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    /// Road or street (required).
    pub road_street: String,
    /// Block or locality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// State or union territory name.
    pub state: String,
    /// District name.
    pub district: String,
    /// Six-digit postal PIN code.
    #[schema(value_type = String, example = "110001")]
    pub pin_code: PinCode,
}

/// The applicant section of a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entrepreneur {
    /// Full name of the entrepreneur.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Social category.
    pub category: SocialCategory,
    /// Whether the entrepreneur is physically handicapped.
    #[serde(default)]
    pub physically_handicapped: bool,
    /// Aadhaar number (unique across registrations).
    #[schema(value_type = String, example = "1234-5678-9012")]
    pub aadhaar_number: Aadhaar,
    /// Personal PAN (unique across registrations).
    #[schema(value_type = String, example = "ABCDE1234F")]
    pub pan_number: Pan,
}

/// The enterprise section of a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    /// Registered name of the enterprise.
    pub name: String,
    /// Legal constitution. Serialized as `type` on the wire.
    #[serde(rename = "type")]
    pub enterprise_type: EnterpriseType,
    /// Date the enterprise commenced operations.
    pub commencement_date: DateTime<Utc>,
    /// Enterprise PAN, when distinct from the entrepreneur's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub pan_number: Option<Pan>,
    /// GSTIN, if the enterprise is GST-registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub gst_number: Option<Gstin>,
    /// Earlier EM-II or UAM registration number, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_registration_number: Option<String>,
}

/// Plant and office addresses of the enterprise.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Address of the plant or principal place of business.
    pub plant_address: Address,
    /// Office address, when it differs from the plant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_address: Option<Address>,
    /// Whether the office address is the same as the plant address.
    #[serde(default)]
    pub same_as_plant: bool,
}

/// Bank account details for the enterprise.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    /// Account number (kept as an opaque string).
    pub account_number: String,
    /// IFSC of the branch.
    #[schema(value_type = String, example = "SBIN0000001")]
    pub ifsc_code: Ifsc,
    /// Bank name.
    pub bank_name: String,
    /// Branch name.
    pub branch_name: String,
}

/// A business activity line with its NIC classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// National Industrial Classification code (4 or 5 digits).
    #[schema(value_type = String, example = "1410")]
    pub nic_code: NicCode,
    /// Free-text description of the activity.
    pub description: String,
    /// Whether this is the primary activity.
    #[serde(default)]
    pub is_primary: bool,
}

/// Investment figures for a single year.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSnapshot {
    /// Investment in plant and machinery, in rupees.
    pub plant_machinery: f64,
    /// Investment in land and building, in rupees.
    pub land_building: f64,
    /// Sum of the two, in rupees.
    pub total_investment: f64,
}

/// Investment section of a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Current investment in plant and machinery, in rupees.
    pub plant_machinery: f64,
    /// Current investment in land and building, in rupees.
    pub land_building: f64,
    /// Derived total; recomputed by [`Registration::recompute_totals`].
    pub total_investment: f64,
    /// Previous-year figures, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_year: Option<InvestmentSnapshot>,
}

/// Turnover section of a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Turnover {
    /// Current-year turnover, in rupees.
    pub current_year: f64,
    /// Previous-year turnover, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_year: Option<f64>,
}

/// Employment head counts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employment {
    /// Male employees.
    pub male: u32,
    /// Female employees.
    pub female: u32,
    /// Employees of other genders.
    pub others: u32,
    /// Derived total; recomputed by [`Registration::recompute_totals`].
    pub total: u32,
}

// ─── Documents ───────────────────────────────────────────────────────

/// The kind of supporting document attached to a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Aadhaar card scan.
    AadhaarCard,
    /// PAN card scan.
    PanCard,
    /// Bank statement or cancelled cheque.
    BankStatement,
    /// Proof of business (rent agreement, utility bill, ...).
    BusinessProof,
    /// Anything else; multiple uploads accumulate.
    Others,
}

impl DocumentType {
    /// The wire-level camelCase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AadhaarCard => "aadhaarCard",
            Self::PanCard => "panCard",
            Self::BankStatement => "bankStatement",
            Self::BusinessProof => "businessProof",
            Self::Others => "others",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = InvalidDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aadhaarCard" => Ok(Self::AadhaarCard),
            "panCard" => Ok(Self::PanCard),
            "bankStatement" => Ok(Self::BankStatement),
            "businessProof" => Ok(Self::BusinessProof),
            "others" => Ok(Self::Others),
            other => Err(InvalidDocumentType(other.to_string())),
        }
    }
}

/// A document type string the portal does not recognize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid document type")]
pub struct InvalidDocumentType(pub String);

/// Uploaded document URLs, one slot per [`DocumentType`].
///
/// The `others` slot accumulates; the named slots hold at most one URL and
/// a re-upload replaces the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Documents {
    /// URL of the Aadhaar card scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_card: Option<String>,
    /// URL of the PAN card scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_card: Option<String>,
    /// URL of the bank statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_statement: Option<String>,
    /// URL of the business proof.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_proof: Option<String>,
    /// URLs of any other documents, in upload order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<String>,
}

impl Documents {
    /// Record an uploaded document URL in the slot for `kind`.
    pub fn set(&mut self, kind: DocumentType, url: String) {
        match kind {
            DocumentType::AadhaarCard => self.aadhaar_card = Some(url),
            DocumentType::PanCard => self.pan_card = Some(url),
            DocumentType::BankStatement => self.bank_statement = Some(url),
            DocumentType::BusinessProof => self.business_proof = Some(url),
            DocumentType::Others => self.others.push(url),
        }
    }

    /// The stored URL for `kind`, if one exists.
    ///
    /// For [`DocumentType::Others`] this is the most recent upload.
    pub fn url(&self, kind: DocumentType) -> Option<&str> {
        match kind {
            DocumentType::AadhaarCard => self.aadhaar_card.as_deref(),
            DocumentType::PanCard => self.pan_card.as_deref(),
            DocumentType::BankStatement => self.bank_statement.as_deref(),
            DocumentType::BusinessProof => self.business_proof.as_deref(),
            DocumentType::Others => self.others.last().map(String::as_str),
        }
    }

    /// Clear the slot for `kind`. Returns whether anything was removed.
    ///
    /// For [`DocumentType::Others`] all accumulated uploads are cleared.
    pub fn clear(&mut self, kind: DocumentType) -> bool {
        match kind {
            DocumentType::AadhaarCard => self.aadhaar_card.take().is_some(),
            DocumentType::PanCard => self.pan_card.take().is_some(),
            DocumentType::BankStatement => self.bank_statement.take().is_some(),
            DocumentType::BusinessProof => self.business_proof.take().is_some(),
            DocumentType::Others => {
                let had = !self.others.is_empty();
                self.others.clear();
                had
            }
        }
    }

    /// Whether a document is stored for `kind`.
    pub fn has(&self, kind: DocumentType) -> bool {
        self.url(kind).is_some()
    }
}

// ─── Registration ────────────────────────────────────────────────────

/// A Udyam registration record with its review lifecycle.
///
/// Lifecycle transitions go through [`submit`](Self::submit),
/// [`begin_review`](Self::begin_review), [`approve`](Self::approve) and
/// [`reject`](Self::reject); direct status writes bypass the guards and
/// are reserved for storage hydration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Server-assigned identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: RegistrationId,
    /// Current review status.
    pub status: RegistrationStatus,
    /// Applicant section.
    pub entrepreneur: Entrepreneur,
    /// Enterprise section.
    pub enterprise: Enterprise,
    /// Plant and office addresses.
    pub location: Location,
    /// Bank account details.
    pub bank_details: BankDetails,
    /// Business activities; at least one, exactly one primary is customary.
    pub activities: Vec<Activity>,
    /// Investment figures.
    pub investment: Investment,
    /// Turnover figures.
    pub turnover: Turnover,
    /// Employment head counts.
    pub employment: Employment,
    /// Uploaded document slots.
    #[serde(default)]
    pub documents: Documents,
    /// Issued on approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "UDYAM-07-11-1234567")]
    pub udyam_number: Option<UdyamNumber>,
    /// When the draft was submitted for review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the registration was approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// When the registration was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    /// Reviewer remarks; recorded on rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Who reviewed the registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Submit the draft for review (`draft` → `submitted`).
    pub fn submit(&mut self) -> Result<(), StatusError> {
        if self.status != RegistrationStatus::Draft {
            return Err(StatusError::AlreadySubmitted {
                current: self.status,
            });
        }
        self.status = RegistrationStatus::Submitted;
        self.submitted_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    /// Move a submitted registration into review (`submitted` → `under_review`).
    pub fn begin_review(&mut self, evidence: ReviewEvidence) -> Result<(), StatusError> {
        if self.status != RegistrationStatus::Submitted {
            return Err(StatusError::NotReviewable {
                current: self.status,
            });
        }
        self.status = RegistrationStatus::UnderReview;
        if evidence.reviewed_by.is_some() {
            self.reviewed_by = evidence.reviewed_by;
        }
        self.touch();
        Ok(())
    }

    /// Approve the registration and issue a Udyam number.
    ///
    /// Allowed from `submitted` or `under_review`. The reviewer defaults
    /// to `"System"` when the evidence names none.
    pub fn approve(&mut self, evidence: ReviewEvidence) -> Result<(), StatusError> {
        if !self.status.is_reviewable() {
            return Err(StatusError::NotApprovable {
                current: self.status,
            });
        }
        self.status = RegistrationStatus::Approved;
        self.approved_at = Some(Utc::now());
        self.udyam_number = Some(UdyamNumber::generate());
        self.reviewed_by = Some(
            evidence
                .reviewed_by
                .unwrap_or_else(|| "System".to_string()),
        );
        self.touch();
        Ok(())
    }

    /// Reject the registration with remarks.
    ///
    /// Allowed from `submitted` or `under_review`. Remarks default to
    /// `"Registration rejected"` when the evidence carries none.
    pub fn reject(&mut self, evidence: ReviewEvidence) -> Result<(), StatusError> {
        if !self.status.is_reviewable() {
            return Err(StatusError::NotRejectable {
                current: self.status,
            });
        }
        self.status = RegistrationStatus::Rejected;
        self.rejected_at = Some(Utc::now());
        self.remarks = Some(
            evidence
                .remarks
                .unwrap_or_else(|| "Registration rejected".to_string()),
        );
        self.reviewed_by = Some(
            evidence
                .reviewed_by
                .unwrap_or_else(|| "System".to_string()),
        );
        self.touch();
        Ok(())
    }

    /// Check that the registration may still be edited.
    pub fn ensure_updatable(&self) -> Result<(), StatusError> {
        if self.status != RegistrationStatus::Draft {
            return Err(StatusError::UpdateLocked);
        }
        Ok(())
    }

    /// Check that the registration may still be deleted.
    pub fn ensure_deletable(&self) -> Result<(), StatusError> {
        if self.status != RegistrationStatus::Draft {
            return Err(StatusError::DeleteLocked);
        }
        Ok(())
    }

    /// Recompute the derived totals from their parts.
    ///
    /// `totalInvestment` and `employment.total` are derived figures and
    /// never taken from client input. Previous-year snapshots keep the
    /// totals they were reported with.
    pub fn recompute_totals(&mut self) {
        self.investment.total_investment =
            self.investment.plant_machinery + self.investment.land_building;
        self.employment.total =
            self.employment.male + self.employment.female + self.employment.others;
    }

    /// Classify the enterprise under the MSME investment and turnover
    /// ceilings, or `None` when it exceeds the medium band.
    pub fn msme_category(&self) -> Option<MsmeCategory> {
        MsmeCategory::classify(self.investment.plant_machinery, self.turnover.current_year)
    }

    /// Bump `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
