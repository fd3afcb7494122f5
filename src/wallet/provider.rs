//! Wallet provider trait and address type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// An EVM account address: `0x` followed by exactly 40 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Accepts `0x` + 40 hex characters, any case. Anything else is treated
    /// as a malformed provider response.
    pub fn parse(raw: &str) -> Result<Self, WalletError> {
        match raw.strip_prefix("0x") {
            Some(body) if body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(WalletError::Connection(format!(
                "provider returned a malformed address: {raw}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single user-gesture-triggered account request against an external
/// wallet provider. The wizard consumes only the first account.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn connect(&self) -> Result<Address, WalletError>;
}

/// Environment without any injected wallet provider — every connect attempt
/// reports [`WalletError::ProviderNotFound`].
pub struct DisconnectedWalletProvider;

#[async_trait]
impl WalletProvider for DisconnectedWalletProvider {
    async fn connect(&self) -> Result<Address, WalletError> {
        Err(WalletError::ProviderNotFound)
    }
}
