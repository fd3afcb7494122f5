//! Configuration types.

use crate::wizard::step::{Flow, Step};
use crate::wizard::validate::PhonePolicy;

/// Service configuration, read from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    /// JSON-RPC endpoint of the wallet provider. Absent means no provider
    /// is available and every connect attempt reports that.
    pub wallet_rpc_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            wallet_rpc_url: None,
        }
    }
}

/// Per-flow wizard behavior.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub flow: Flow,
    /// Phone acceptance rule for this flow.
    pub phone_policy: PhonePolicy,
    /// When switching document type, drop uploads belonging to the other
    /// type. Off by default: switching back must not force a re-upload.
    pub clear_stale_documents: bool,
    /// Offer the wallet-connect interstitial ahead of personal info
    /// (individual flow only).
    pub offer_wallet_connect: bool,
}

impl FlowConfig {
    /// KYC defaults: relaxed digit-count phone rule, no interstitial.
    pub fn individual() -> Self {
        Self {
            flow: Flow::Individual,
            phone_policy: PhonePolicy::default(),
            clear_stale_documents: false,
            offer_wallet_connect: false,
        }
    }

    /// KYB defaults: strict international phone rule.
    pub fn business() -> Self {
        Self {
            flow: Flow::Business,
            phone_policy: PhonePolicy::International,
            clear_stale_documents: false,
            offer_wallet_connect: false,
        }
    }

    /// The ordered step sequence this configuration produces.
    pub fn sequence(&self) -> &'static [Step] {
        self.flow.sequence(self.offer_wallet_connect)
    }

    /// The entry step of the sequence.
    pub fn first_step(&self) -> Step {
        self.sequence()[0]
    }
}
