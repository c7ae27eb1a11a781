//! Error taxonomy for the vault controller
//!
//! Only `WalletRejected`, `TransactionReverted` and `ReceiptUnavailable` ever
//! reach the Notifier. Everything else degrades silently: a disabled action
//! or a stale-but-valid reading.

use candid::{CandidType, Deserialize};
use serde::Serialize;
use std::fmt;
use crate::types::{ActionKind, RequestKind, TxHash};

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Malformed or over-precision user input
    InvalidAmount(AmountError),
    /// Action cannot start; no Ledger call was made
    PreconditionFailed(PreconditionError),
    /// User declined signing or the wallet failed before broadcast
    WalletRejected { request: RequestKind, reason: String },
    /// Broadcast succeeded but execution reverted on chain
    TransactionReverted { request: RequestKind, tx_hash: TxHash },
    /// Receipt wait itself errored; the transaction outcome is unknown
    ReceiptUnavailable { request: RequestKind, tx_hash: TxHash, reason: String },
    /// A polling read failed; previous value retained
    ReadTransientFailure { query: String, reason: String },
    Config(ConfigError),
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    Empty,
    NotNumeric { input: String },
    Negative { input: String },
    TooManyDecimals { input: String, decimals: u32 },
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    WalletDisconnected,
    WrongChain { expected: u64, actual: Option<u64> },
    ActionInFlight { action: ActionKind },
    MissingAmount,
    ZeroAmount,
    /// Share conversion for the current withdraw input has not arrived yet
    ConversionPending,
    /// No share conversion is available for the current withdraw input
    ConversionUnavailable,
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddress { value: String },
    InvalidDecimals { decimals: u32 },
}

impl VaultError {
    /// Whether this error is surfaced through the Notifier
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            VaultError::WalletRejected { .. }
                | VaultError::TransactionReverted { .. }
                | VaultError::ReceiptUnavailable { .. }
        )
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::InvalidAmount(e) => write!(f, "Invalid amount: {}", e),
            VaultError::PreconditionFailed(e) => write!(f, "Precondition failed: {}", e),
            VaultError::WalletRejected { request, reason } => {
                write!(f, "{} rejected by wallet: {}", request.label(), reason)
            }
            VaultError::TransactionReverted { request, tx_hash } => {
                write!(f, "{} reverted on chain (tx {})", request.label(), tx_hash)
            }
            VaultError::ReceiptUnavailable { request, tx_hash, reason } => {
                write!(f, "{} receipt unavailable for tx {}: {}", request.label(), tx_hash, reason)
            }
            VaultError::ReadTransientFailure { query, reason } => {
                write!(f, "Read {} failed: {}", query, reason)
            }
            VaultError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => write!(f, "amount is empty"),
            AmountError::NotNumeric { input } => write!(f, "'{}' is not a decimal number", input),
            AmountError::Negative { input } => write!(f, "'{}' is negative", input),
            AmountError::TooManyDecimals { input, decimals } => {
                write!(f, "'{}' has more than {} fractional digits", input, decimals)
            }
        }
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::WalletDisconnected => write!(f, "wallet is not connected"),
            PreconditionError::WrongChain { expected, actual } => match actual {
                Some(actual) => write!(f, "wallet is on chain {}, expected {}", actual, expected),
                None => write!(f, "wallet chain unknown, expected {}", expected),
            },
            PreconditionError::ActionInFlight { action } => {
                write!(f, "{} already in progress", action.as_str())
            }
            PreconditionError::MissingAmount => write!(f, "no amount entered"),
            PreconditionError::ZeroAmount => write!(f, "amount must be greater than zero"),
            PreconditionError::ConversionPending => write!(f, "share conversion still loading"),
            PreconditionError::ConversionUnavailable => write!(f, "share conversion unavailable"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddress { value } => write!(f, "invalid address '{}'", value),
            ConfigError::InvalidDecimals { decimals } => write!(f, "unsupported decimals {}", decimals),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<AmountError> for VaultError {
    fn from(e: AmountError) -> Self {
        VaultError::InvalidAmount(e)
    }
}

impl From<PreconditionError> for VaultError {
    fn from(e: PreconditionError) -> Self {
        VaultError::PreconditionFailed(e)
    }
}
