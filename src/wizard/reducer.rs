//! Pure reducer over wizard actions.
//!
//! Every state transition goes through [`Reducer::reduce`]: it takes the
//! current state and one action, and returns the next state plus an optional
//! user-facing notice. Validation runs only on forward navigation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::notify::Notice;

use super::state::{DocumentFile, DocumentSlot, DocumentType, WizardState};
use super::step::{next_step, prev_step};
use super::validate::{Validator, msg};

/// One user interaction against the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Merge one field into the record; never validated on write.
    SetField { name: String, value: String },
    /// Record a file selection. `None` models an aborted picker and is a
    /// no-op; a file overwrites whatever the slot held.
    SetDocument {
        slot: DocumentSlot,
        file: Option<DocumentFile>,
    },
    SetDocumentType { document_type: DocumentType },
    SetWantsRewards { wants_rewards: bool },
    SetWalletAddress { address: String },
    /// A wallet provider handed back an address. From the connect
    /// interstitial this also acts as the forward transition.
    WalletConnected { address: String },
    GoNext,
    GoBack,
}

/// Result of one reduction.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub state: WizardState,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn silent(state: WizardState) -> Self {
        Self {
            state,
            notice: None,
        }
    }
}

/// Applies actions to wizard state. Holds the flow configuration and the
/// compiled validators; carries no mutable state of its own.
pub struct Reducer {
    cfg: FlowConfig,
    validator: Validator,
}

impl Reducer {
    pub fn new(cfg: FlowConfig) -> Self {
        let validator = Validator::new(cfg.phone_policy.clone());
        Self { cfg, validator }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.cfg
    }

    /// A fresh state at the entry step of the configured flow.
    pub fn initial_state(&self) -> WizardState {
        WizardState::new(self.cfg.flow, self.cfg.first_step())
    }

    /// 1-based progress of a state within this flow's sequence.
    pub fn progress(&self, state: &WizardState) -> (usize, usize) {
        super::step::progress(self.cfg.sequence(), state.step)
    }

    /// Apply one action. `today` is injected for deterministic age checks.
    pub fn reduce(&self, state: &WizardState, action: Action, today: NaiveDate) -> Outcome {
        match action {
            Action::SetField { name, value } => {
                let mut next = state.clone();
                next.fields.insert(name, value);
                Outcome::silent(next)
            }
            Action::SetDocument { slot, file } => self.set_document(state, slot, file),
            Action::SetDocumentType { document_type } => {
                let mut next = state.clone();
                next.document_type = document_type;
                if self.cfg.clear_stale_documents {
                    for slot in document_type.other().required_slots() {
                        next.documents.remove(slot);
                    }
                }
                Outcome::silent(next)
            }
            Action::SetWantsRewards { wants_rewards } => {
                let mut next = state.clone();
                next.wants_rewards = wants_rewards;
                Outcome::silent(next)
            }
            Action::SetWalletAddress { address } => {
                let mut next = state.clone();
                let trimmed = address.trim();
                next.wallet_address =
                    (!trimmed.is_empty()).then(|| trimmed.to_string());
                Outcome::silent(next)
            }
            Action::WalletConnected { address } => self.wallet_connected(state, address),
            Action::GoNext => self.go_next(state, today),
            Action::GoBack => self.go_back(state),
        }
    }

    fn set_document(
        &self,
        state: &WizardState,
        slot: DocumentSlot,
        file: Option<DocumentFile>,
    ) -> Outcome {
        let Some(file) = file else {
            // Aborted file picker: the slot keeps whatever it held.
            return Outcome::silent(state.clone());
        };
        let mut next = state.clone();
        let description = format!("Your document {} was uploaded successfully.", file.name);
        next.documents.insert(slot, file);
        Outcome {
            state: next,
            notice: Some(Notice::info(msg::FILE_UPLOADED, description)),
        }
    }

    fn wallet_connected(&self, state: &WizardState, address: String) -> Outcome {
        let mut next = state.clone();
        next.wallet_address = Some(address);
        // Connect success doubles as the forward transition, but only from
        // the interstitial; at the reward step navigation stays manual.
        if state.step == super::step::Step::WalletConnect {
            if let Some(step) = next_step(self.cfg.sequence(), next.step) {
                next.step = step;
            }
        }
        Outcome::silent(next)
    }

    fn go_next(&self, state: &WizardState, today: NaiveDate) -> Outcome {
        if state.step.is_terminal() {
            return Outcome::silent(state.clone());
        }
        if let Err(notice) = self.validator.check_step(state.step, state, today) {
            return Outcome {
                state: state.clone(),
                notice: Some(notice),
            };
        }

        let mut next = state.clone();
        if state.step == super::step::Step::Reward && !state.wants_rewards {
            next.wallet_address = None;
        }
        if let Some(step) = next_step(self.cfg.sequence(), next.step) {
            next.step = step;
        }
        Outcome::silent(next)
    }

    fn go_back(&self, state: &WizardState) -> Outcome {
        let mut next = state.clone();
        if let Some(step) = prev_step(self.cfg.sequence(), next.step) {
            next.step = step;
        }
        Outcome::silent(next)
    }
}
