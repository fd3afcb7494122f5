//! JSON-RPC wallet provider — asks an HTTP endpoint for its accounts.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::WalletError;

use super::provider::{Address, WalletProvider};

/// Speaks the `eth_accounts` request against a configured JSON-RPC endpoint
/// and takes the first account it answers with.
pub struct RpcWalletProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl RpcWalletProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Vec<String>>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn connect(&self) -> Result<Address, WalletError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_accounts",
            "params": [],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Connection(e.to_string()))?;
        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Connection(e.to_string()))?;

        if let Some(err) = parsed.error {
            // User declined in the wallet UI, or any other provider-side
            // rejection.
            return Err(WalletError::Connection(format!(
                "{} (code {})",
                err.message, err.code
            )));
        }

        let first = parsed
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccountsReturned)?;
        Address::parse(&first)
    }
}
