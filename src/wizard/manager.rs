//! WizardManager — session table and action coordination.
//!
//! One manager per flow. Sessions are created fresh, live only in memory,
//! and are dropped on abandon; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::FlowConfig;
use crate::error::SessionError;
use crate::notify::{Notice, Notifier};
use crate::wallet::WalletProvider;

use super::reducer::{Action, Outcome, Reducer};
use super::state::WizardState;

pub struct WizardManager {
    reducer: Reducer,
    sessions: RwLock<HashMap<Uuid, WizardState>>,
    wallet: Arc<dyn WalletProvider>,
    notifier: Arc<dyn Notifier>,
}

impl WizardManager {
    pub fn new(
        cfg: FlowConfig,
        wallet: Arc<dyn WalletProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            reducer: Reducer::new(cfg),
            sessions: RwLock::new(HashMap::new()),
            wallet,
            notifier,
        }
    }

    /// Start a new wizard instance at the flow's entry step.
    pub async fn create_session(&self) -> (Uuid, WizardState) {
        let id = Uuid::new_v4();
        let state = self.reducer.initial_state();
        self.sessions.write().await.insert(id, state.clone());
        tracing::info!(session = %id, flow = %state.flow, "wizard session created");
        (id, state)
    }

    /// Snapshot of a session's state.
    pub async fn get(&self, id: Uuid) -> Result<WizardState, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound { id })
    }

    /// 1-based progress of a state within this flow's sequence.
    pub fn progress(&self, state: &WizardState) -> (usize, usize) {
        self.reducer.progress(state)
    }

    /// Apply one action to a session and forward any notice to the sink.
    pub async fn apply(&self, id: Uuid, action: Action) -> Result<Outcome, SessionError> {
        let today = Utc::now().date_naive();
        let mut sessions = self.sessions.write().await;
        let state = sessions.get(&id).ok_or(SessionError::NotFound { id })?;

        let was_terminal = state.step.is_terminal();
        let outcome = self.reducer.reduce(state, action, today);
        if let Some(notice) = &outcome.notice {
            self.notifier.notify(notice);
        }
        if !was_terminal && outcome.state.step.is_terminal() {
            // Final submission is local-only: logged, never transmitted.
            tracing::info!(
                session = %id,
                flow = %outcome.state.flow,
                fields = outcome.state.fields.len(),
                documents = outcome.state.documents.len(),
                wants_rewards = outcome.state.wants_rewards,
                "verification submitted"
            );
        }
        sessions.insert(id, outcome.state.clone());
        Ok(outcome)
    }

    /// Ask the wallet provider for an address.
    ///
    /// On success the address lands in the session (advancing it when the
    /// cursor sits on the connect interstitial); on failure the state stays
    /// untouched and a destructive notice goes out.
    pub async fn connect_wallet(&self, id: Uuid) -> Result<Outcome, SessionError> {
        // Fail fast on unknown sessions before touching the provider.
        let state = self.get(id).await?;

        match self.wallet.connect().await {
            Ok(address) => {
                self.apply(
                    id,
                    Action::WalletConnected {
                        address: address.as_str().to_string(),
                    },
                )
                .await
            }
            Err(err) => {
                tracing::warn!(session = %id, error = %err, "wallet connect failed");
                let notice = connect_failure_notice(&err);
                self.notifier.notify(&notice);
                Ok(Outcome {
                    state,
                    notice: Some(notice),
                })
            }
        }
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove_session(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}

fn connect_failure_notice(err: &crate::error::WalletError) -> Notice {
    use crate::error::WalletError;
    match err {
        WalletError::ProviderNotFound => Notice::destructive(
            "Wallet provider not found",
            "No wallet provider was detected. Install or enable one and try again.",
        ),
        WalletError::NoAccountsReturned => Notice::destructive(
            "No accounts available",
            "The wallet provider returned no accounts.",
        ),
        WalletError::Connection(reason) => {
            Notice::destructive("Wallet connection failed", reason.clone())
        }
    }
}
