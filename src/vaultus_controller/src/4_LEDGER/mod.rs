//! # Ledger Seams
//!
//! The controller never talks to contracts directly. It consumes three
//! collaborators, all driven on the host's single thread:
//!
//! - **Ledger**: read-only queries plus receipt resolution
//! - **WalletSession**: account/chain state, signing and broadcasting writes
//! - **Notifier**: user-visible success/failure messages
//!
//! ## Write Flow
//! 1. **Submit**: `WalletSession::send_transaction` signs and broadcasts,
//!    returning a transaction hash (or a rejection)
//! 2. **Confirm**: `Ledger::wait_for_receipt` resolves the hash to
//!    success or revert
//!
//! - **approvals/**: minimal-allowance approval requests for deposits

pub mod approvals;

use std::fmt;
use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;
use crate::types::{Address, Contract, ReceiptStatus, TransactionRequest, TxHash};

/// Read-only queries against the vault and its asset token
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ReadCall {
    TotalAssets,
    UserBalance { user: Address },
    UserShares { user: Address },
    CurrentApys,
    Allocation,
    Allowance { owner: Address, spender: Address },
    TokenBalance { account: Address },
    AssetsToShares { assets: Nat },
    SharePrice,
    TotalShares,
    LastRebalance,
    MinRebalanceInterval,
    Paused,
}

impl ReadCall {
    pub fn target(&self) -> Contract {
        match self {
            ReadCall::Allowance { .. } | ReadCall::TokenBalance { .. } => Contract::AssetToken,
            _ => Contract::Vault,
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            ReadCall::TotalAssets => "getTotalAssets",
            ReadCall::UserBalance { .. } => "getUserBalance",
            ReadCall::UserShares { .. } => "userShares",
            ReadCall::CurrentApys => "getCurrentAPYs",
            ReadCall::Allocation => "getAllocation",
            ReadCall::Allowance { .. } => "allowance",
            ReadCall::TokenBalance { .. } => "balanceOf",
            ReadCall::AssetsToShares { .. } => "assetsToShares",
            ReadCall::SharePrice => "getSharePrice",
            ReadCall::TotalShares => "totalShares",
            ReadCall::LastRebalance => "lastRebalance",
            ReadCall::MinRebalanceInterval => "minRebalanceInterval",
            ReadCall::Paused => "paused",
        }
    }
}

/// Decoded return value of a read
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ReadValue {
    Amount(Nat),
    /// One entry per pool, in `Pool::index` order
    PerPool(Vec<Nat>),
    Flag(bool),
}

impl ReadValue {
    pub fn as_amount(&self) -> Option<&Nat> {
        match self {
            ReadValue::Amount(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_per_pool(&self) -> Option<&[Nat]> {
        match self {
            ReadValue::PerPool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ReadValue::Flag(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerError {
    pub reason: String,
}

impl LedgerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// User declined the signature request
    Rejected { reason: String },
    /// Wallet-level failure before broadcast
    Failed { reason: String },
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::Rejected { reason } => write!(f, "user rejected: {}", reason),
            WalletError::Failed { reason } => write!(f, "wallet error: {}", reason),
        }
    }
}

/// On-chain vault and token contracts
#[allow(async_fn_in_trait)]
pub trait Ledger {
    async fn read(&self, call: &ReadCall) -> Result<ReadValue, LedgerError>;

    /// Resolves once the transaction is mined
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<ReceiptStatus, LedgerError>;
}

/// Connected wallet
#[allow(async_fn_in_trait)]
pub trait WalletSession {
    fn current_address(&self) -> Option<Address>;
    fn is_connected(&self) -> bool;
    fn chain_id(&self) -> Option<u64>;

    async fn connect(&self) -> Result<Address, WalletError>;
    async fn disconnect(&self);
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Sign and broadcast a write
    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError>;
}

/// Toast rendering
pub trait Notifier {
    fn notify_success(&self, text: &str);
    fn notify_error(&self, text: &str);
}
