//! Wizard state — the accumulating form-data record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::step::{Flow, Step};

/// Which identity document the applicant presents (individual flow).
///
/// Selects exactly one required upload set: both card sides for `IdCard`,
/// the main page for `Passport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IdCard,
    Passport,
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::IdCard
    }
}

impl DocumentType {
    /// Upload slots this document type requires.
    pub fn required_slots(self) -> &'static [DocumentSlot] {
        match self {
            Self::IdCard => &[DocumentSlot::IdFront, DocumentSlot::IdBack],
            Self::Passport => &[DocumentSlot::PassportPage],
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::IdCard => Self::Passport,
            Self::Passport => Self::IdCard,
        }
    }
}

/// A named upload slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    // Individual flow
    IdFront,
    IdBack,
    PassportPage,
    Selfie,
    // Business flow
    RegistrationDoc,
    ArticlesDoc,
    FinancialDoc,
    OwnershipDoc,
}

impl std::fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IdFront => "id_front",
            Self::IdBack => "id_back",
            Self::PassportPage => "passport_page",
            Self::Selfie => "selfie",
            Self::RegistrationDoc => "registration_doc",
            Self::ArticlesDoc => "articles_doc",
            Self::FinancialDoc => "financial_doc",
            Self::OwnershipDoc => "ownership_doc",
        };
        write!(f, "{s}")
    }
}

/// An uploaded file reference.
///
/// Only presence and display name matter; the payload never enters the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Field keys, grouped by the step that collects them.
pub mod fields {
    // Personal info (individual)
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";

    // Identity document details (individual)
    pub const DOCUMENT_NUMBER: &str = "document_number";
    pub const DOCUMENT_EXPIRY: &str = "document_expiry";

    // Company identity (business)
    pub const COMPANY_NAME: &str = "company_name";
    pub const REGISTRATION_NUMBER: &str = "registration_number";
    pub const VAT_NUMBER: &str = "vat_number";
    pub const INCORPORATION_DATE: &str = "incorporation_date";
    pub const COMPANY_TYPE: &str = "company_type";

    // Company address (business)
    pub const STREET_ADDRESS: &str = "street_address";
    pub const CITY: &str = "city";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const COUNTRY: &str = "country";

    // Legal representative (business)
    pub const LEGAL_REP_FIRST_NAME: &str = "legal_rep_first_name";
    pub const LEGAL_REP_LAST_NAME: &str = "legal_rep_last_name";
    pub const LEGAL_REP_POSITION: &str = "legal_rep_position";
    pub const LEGAL_REP_EMAIL: &str = "legal_rep_email";
    pub const LEGAL_REP_PHONE: &str = "legal_rep_phone";
}

/// Per-instance wizard state.
///
/// Created fresh on session start, discarded on abandon or completion;
/// never persisted. Fields are merged, never reset between steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub flow: Flow,
    pub step: Step,
    pub fields: BTreeMap<String, String>,
    pub documents: BTreeMap<DocumentSlot, DocumentFile>,
    pub document_type: DocumentType,
    pub wants_rewards: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl WizardState {
    pub fn new(flow: Flow, first_step: Step) -> Self {
        Self {
            flow,
            step: first_step,
            fields: BTreeMap::new(),
            documents: BTreeMap::new(),
            document_type: DocumentType::default(),
            wants_rewards: true,
            wallet_address: None,
        }
    }

    /// Value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Whether a field is present and non-blank.
    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Whether an upload slot holds a file.
    pub fn has_document(&self, slot: DocumentSlot) -> bool {
        self.documents.contains_key(&slot)
    }
}
