//! Step identity and per-flow sequences.
//!
//! Each screen of the wizard is a tagged [`Step`] variant; ordering comes
//! from the flow's static sequence, never from arithmetic on the variant
//! itself.

use serde::{Deserialize, Serialize};

/// Which onboarding flow a wizard instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// KYC — individual identity verification.
    Individual,
    /// KYB — business verification.
    Business,
}

/// The screens of the onboarding wizard.
///
/// `WalletChoice`/`WalletConnect` form the optional interstitial pair at the
/// head of the individual flow. `Confirmation` is the terminal read-only
/// summary; no forward transition is defined past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    WalletChoice,
    WalletConnect,
    PersonalInfo,
    CompanyInfo,
    CompanyAddress,
    LegalRep,
    Documents,
    Selfie,
    Reward,
    Confirmation,
}

impl Step {
    /// Whether this step is terminal (verification submitted).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmation)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::WalletChoice => "wallet_choice",
            Self::WalletConnect => "wallet_connect",
            Self::PersonalInfo => "personal_info",
            Self::CompanyInfo => "company_info",
            Self::CompanyAddress => "company_address",
            Self::LegalRep => "legal_rep",
            Self::Documents => "documents",
            Self::Selfie => "selfie",
            Self::Reward => "reward",
            Self::Confirmation => "confirmation",
        };
        write!(f, "{s}")
    }
}

const INDIVIDUAL_STEPS: &[Step] = &[
    Step::PersonalInfo,
    Step::Documents,
    Step::Selfie,
    Step::Reward,
    Step::Confirmation,
];

const INDIVIDUAL_STEPS_WITH_CONNECT: &[Step] = &[
    Step::WalletChoice,
    Step::WalletConnect,
    Step::PersonalInfo,
    Step::Documents,
    Step::Selfie,
    Step::Reward,
    Step::Confirmation,
];

const BUSINESS_STEPS: &[Step] = &[
    Step::CompanyInfo,
    Step::CompanyAddress,
    Step::LegalRep,
    Step::Documents,
    Step::Reward,
    Step::Confirmation,
];

impl Flow {
    /// The ordered step sequence for this flow.
    ///
    /// The wallet-connect interstitial only exists for the individual flow.
    pub fn sequence(self, offer_wallet_connect: bool) -> &'static [Step] {
        match (self, offer_wallet_connect) {
            (Flow::Individual, false) => INDIVIDUAL_STEPS,
            (Flow::Individual, true) => INDIVIDUAL_STEPS_WITH_CONNECT,
            (Flow::Business, _) => BUSINESS_STEPS,
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "individual"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// Position of `step` within `sequence`, if it belongs to it.
pub fn position(sequence: &[Step], step: Step) -> Option<usize> {
    sequence.iter().position(|s| *s == step)
}

/// The step after `current`, or `None` at the end of the sequence.
pub fn next_step(sequence: &[Step], current: Step) -> Option<Step> {
    position(sequence, current).and_then(|i| sequence.get(i + 1).copied())
}

/// The step before `current`, or `None` at the start of the sequence.
pub fn prev_step(sequence: &[Step], current: Step) -> Option<Step> {
    match position(sequence, current) {
        Some(i) if i > 0 => sequence.get(i - 1).copied(),
        _ => None,
    }
}

/// 1-based display index and total step count, for progress rendering.
pub fn progress(sequence: &[Step], current: Step) -> (usize, usize) {
    let index = position(sequence, current).map(|i| i + 1).unwrap_or(0);
    (index, sequence.len())
}
