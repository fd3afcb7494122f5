//! Wallet connector boundary.
//!
//! One round trip to an externally-provided wallet: ask for its accounts,
//! take the first address. No retry, no timeout — the wizard reports
//! failures and lets the user try again.

pub mod provider;
pub mod rpc;

pub use provider::{Address, DisconnectedWalletProvider, WalletProvider};
pub use rpc::RpcWalletProvider;
