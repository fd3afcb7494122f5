//! Per-step validators — pure predicates evaluated only on forward
//! navigation, never on keystroke.
//!
//! One entry per [`Step`], shared by both flows and parameterized by the
//! flow's required-field tables. Every failure yields a distinct
//! (title, description) notice; nothing here panics or propagates errors.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::notify::Notice;

use super::state::{DocumentSlot, DocumentType, WizardState, fields};
use super::step::{Flow, Step};

/// Phone number acceptance policy.
///
/// Two regimes exist across the observed form variants; both are kept and
/// selected per flow instead of blessing one as the only correct reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhonePolicy {
    /// Ignore separators and any leading `+`; accept when the digit count
    /// falls within the inclusive range.
    DigitCount { min: usize, max: usize },
    /// Strict spaced international format, e.g. `+33 612 345 678`.
    International,
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self::DigitCount { min: 10, max: 12 }
    }
}

/// Notice texts. One constant per distinct failure, plus upload feedback.
pub mod msg {
    pub const MISSING_INFO: &str = "Missing information";
    pub const FILL_REQUIRED: &str = "Please fill in all required fields.";

    pub const MIN_AGE: &str = "Minimum age not met";
    pub const AGE_REQUIREMENT: &str = "You must be at least 18 years old to continue.";

    pub const INVALID_DOB: &str = "Invalid date of birth";
    pub const DOB_FORMAT: &str = "Please enter your date of birth as YYYY-MM-DD.";

    pub const INVALID_PHONE: &str = "Invalid phone number";
    pub const PHONE_FORMAT: &str =
        "Please enter a phone number in international format (e.g. +33 612 345 678).";

    pub const MISSING_DOCUMENTS: &str = "Missing documents";
    pub const ID_CARD_SIDES: &str = "Both sides of the identity card must be uploaded.";
    pub const PASSPORT_PAGE: &str = "The main passport page must be uploaded.";
    pub const BUSINESS_DOCS: &str =
        "The registration certificate and the articles of association are mandatory.";

    pub const SELFIE_REQUIRED: &str = "Selfie required";
    pub const SELFIE_INSTRUCTION: &str = "Please take a selfie for verification.";

    pub const INCOMPLETE_ADDRESS: &str = "Incomplete address";
    pub const ADDRESS_REQUIRED: &str = "Please fill in every field of the company address.";

    pub const MISSING_REPRESENTATIVE: &str = "Missing representative details";
    pub const REPRESENTATIVE_REQUIRED: &str =
        "Please fill in all information about the legal representative.";

    pub const MISSING_WALLET: &str = "Missing wallet address";
    pub const WALLET_REQUIRED: &str = "Please enter your reward wallet address.";

    pub const INVALID_WALLET: &str = "Invalid wallet address";
    pub const WALLET_FORMAT: &str =
        "Please enter a valid EVM address (0x followed by 40 hexadecimal characters).";

    pub const FILE_UPLOADED: &str = "File uploaded";
}

const PERSONAL_INFO_FIELDS: &[&str] = &[
    fields::FIRST_NAME,
    fields::LAST_NAME,
    fields::DATE_OF_BIRTH,
    fields::EMAIL,
    fields::PHONE,
];

const DOCUMENT_DETAIL_FIELDS: &[&str] = &[fields::DOCUMENT_NUMBER, fields::DOCUMENT_EXPIRY];

const COMPANY_INFO_FIELDS: &[&str] = &[
    fields::COMPANY_NAME,
    fields::REGISTRATION_NUMBER,
    fields::INCORPORATION_DATE,
    fields::COMPANY_TYPE,
];

const COMPANY_ADDRESS_FIELDS: &[&str] = &[
    fields::STREET_ADDRESS,
    fields::CITY,
    fields::POSTAL_CODE,
    fields::COUNTRY,
];

const LEGAL_REP_FIELDS: &[&str] = &[
    fields::LEGAL_REP_FIRST_NAME,
    fields::LEGAL_REP_LAST_NAME,
    fields::LEGAL_REP_POSITION,
    fields::LEGAL_REP_EMAIL,
    fields::LEGAL_REP_PHONE,
];

/// Business-flow uploads: the financial statement and ownership chart stay
/// optional.
const BUSINESS_REQUIRED_DOCS: &[DocumentSlot] =
    &[DocumentSlot::RegistrationDoc, DocumentSlot::ArticlesDoc];

/// Compiled validation rules, shared by every session of a flow.
pub struct Validator {
    policy: PhonePolicy,
    evm_address: Regex,
    international_phone: Regex,
}

impl Validator {
    pub fn new(policy: PhonePolicy) -> Self {
        Self {
            policy,
            evm_address: Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap(),
            international_phone: Regex::new(r"^\+[1-9]\d{1,2} \d{3} \d{3} \d{3}$").unwrap(),
        }
    }

    /// `0x` + exactly 40 hex characters, case-insensitive.
    pub fn valid_evm_address(&self, address: &str) -> bool {
        self.evm_address.is_match(address)
    }

    /// Phone check under the configured policy.
    pub fn valid_phone(&self, phone: &str) -> bool {
        match self.policy {
            PhonePolicy::DigitCount { min, max } => {
                let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
                digits >= min && digits <= max
            }
            PhonePolicy::International => self.international_phone.is_match(phone),
        }
    }

    /// Run the validator for `step` against the current state.
    ///
    /// `today` is injected so age checks are deterministic under test.
    pub fn check_step(
        &self,
        step: Step,
        state: &WizardState,
        today: NaiveDate,
    ) -> Result<(), Notice> {
        match step {
            Step::WalletChoice => Ok(()),
            Step::WalletConnect => self.check_wallet(state),
            Step::PersonalInfo => self.check_personal_info(state, today),
            Step::CompanyInfo => {
                if all_present(state, COMPANY_INFO_FIELDS) {
                    Ok(())
                } else {
                    Err(Notice::destructive(msg::MISSING_INFO, msg::FILL_REQUIRED))
                }
            }
            Step::CompanyAddress => {
                if all_present(state, COMPANY_ADDRESS_FIELDS) {
                    Ok(())
                } else {
                    Err(Notice::destructive(
                        msg::INCOMPLETE_ADDRESS,
                        msg::ADDRESS_REQUIRED,
                    ))
                }
            }
            Step::LegalRep => self.check_legal_rep(state),
            Step::Documents => match state.flow {
                Flow::Individual => self.check_identity_documents(state),
                Flow::Business => self.check_business_documents(state),
            },
            Step::Selfie => {
                if state.has_document(DocumentSlot::Selfie) {
                    Ok(())
                } else {
                    Err(Notice::destructive(
                        msg::SELFIE_REQUIRED,
                        msg::SELFIE_INSTRUCTION,
                    ))
                }
            }
            Step::Reward => {
                if state.wants_rewards {
                    self.check_wallet(state)
                } else {
                    Ok(())
                }
            }
            // Terminal summary; the reducer refuses to advance past it anyway.
            Step::Confirmation => Ok(()),
        }
    }

    fn check_personal_info(&self, state: &WizardState, today: NaiveDate) -> Result<(), Notice> {
        if !all_present(state, PERSONAL_INFO_FIELDS) {
            return Err(Notice::destructive(msg::MISSING_INFO, msg::FILL_REQUIRED));
        }

        let dob_raw = state.field(fields::DATE_OF_BIRTH).unwrap_or_default();
        let dob = NaiveDate::parse_from_str(dob_raw.trim(), "%Y-%m-%d")
            .map_err(|_| Notice::destructive(msg::INVALID_DOB, msg::DOB_FORMAT))?;
        if age_on(dob, today) < 18 {
            return Err(Notice::destructive(msg::MIN_AGE, msg::AGE_REQUIREMENT));
        }

        let phone = state.field(fields::PHONE).unwrap_or_default();
        if !self.valid_phone(phone) {
            return Err(Notice::destructive(msg::INVALID_PHONE, msg::PHONE_FORMAT));
        }
        Ok(())
    }

    fn check_legal_rep(&self, state: &WizardState) -> Result<(), Notice> {
        if !all_present(state, LEGAL_REP_FIELDS) {
            return Err(Notice::destructive(
                msg::MISSING_REPRESENTATIVE,
                msg::REPRESENTATIVE_REQUIRED,
            ));
        }
        let phone = state.field(fields::LEGAL_REP_PHONE).unwrap_or_default();
        if !self.valid_phone(phone) {
            return Err(Notice::destructive(msg::INVALID_PHONE, msg::PHONE_FORMAT));
        }
        Ok(())
    }

    fn check_identity_documents(&self, state: &WizardState) -> Result<(), Notice> {
        if !all_present(state, DOCUMENT_DETAIL_FIELDS) {
            return Err(Notice::destructive(msg::MISSING_INFO, msg::FILL_REQUIRED));
        }
        let complete = state
            .document_type
            .required_slots()
            .iter()
            .all(|slot| state.has_document(*slot));
        if complete {
            Ok(())
        } else {
            let description = match state.document_type {
                DocumentType::IdCard => msg::ID_CARD_SIDES,
                DocumentType::Passport => msg::PASSPORT_PAGE,
            };
            Err(Notice::destructive(msg::MISSING_DOCUMENTS, description))
        }
    }

    fn check_business_documents(&self, state: &WizardState) -> Result<(), Notice> {
        let complete = BUSINESS_REQUIRED_DOCS
            .iter()
            .all(|slot| state.has_document(*slot));
        if complete {
            Ok(())
        } else {
            Err(Notice::destructive(msg::MISSING_DOCUMENTS, msg::BUSINESS_DOCS))
        }
    }

    fn check_wallet(&self, state: &WizardState) -> Result<(), Notice> {
        let address = state.wallet_address.as_deref().unwrap_or_default();
        if address.trim().is_empty() {
            return Err(Notice::destructive(msg::MISSING_WALLET, msg::WALLET_REQUIRED));
        }
        if !self.valid_evm_address(address) {
            return Err(Notice::destructive(msg::INVALID_WALLET, msg::WALLET_FORMAT));
        }
        Ok(())
    }
}

fn all_present(state: &WizardState, required: &[&str]) -> bool {
    required.iter().all(|f| state.has_field(f))
}

/// Calendar-aware age: year difference, minus one when the birthday has not
/// yet occurred this year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
