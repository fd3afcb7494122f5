//! Veriflow — KYC/KYB onboarding wizard engine.
//!
//! A linear step wizard for identity (KYC) and business (KYB) verification:
//! an accumulating form-data record, per-step validators evaluated only on
//! forward navigation, and a wallet-connector boundary for obtaining an EVM
//! reward address. A thin REST layer mounts one session store per flow.

pub mod config;
pub mod error;
pub mod notify;
pub mod wallet;
pub mod wizard;
