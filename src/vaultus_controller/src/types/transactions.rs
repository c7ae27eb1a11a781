//! Write requests and their lifecycle states

use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;
use super::address::{Address, TxHash};

/// Independent write slots
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Deposit,
    Withdraw,
    Rebalance,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "deposit",
            ActionKind::Withdraw => "withdraw",
            ActionKind::Rebalance => "rebalance",
        }
    }
}

/// Lifecycle of the write currently owning a slot
///
/// `Succeeded` and `Failed` are transient: the slot returns to `Idle` once
/// the terminal transition has been processed.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    Idle,
    /// Waiting for the wallet to sign and broadcast
    Submitting,
    /// Broadcast; waiting for the on-chain receipt
    Confirming,
    Succeeded,
    Failed,
}

impl TransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Idle => "idle",
            TransactionState::Submitting => "submitting",
            TransactionState::Confirming => "confirming",
            TransactionState::Succeeded => "succeeded",
            TransactionState::Failed => "failed",
        }
    }
}

/// Approve → deposit sub-workflow inside the deposit slot
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepositFlowState {
    #[default]
    Idle,
    Approving,
    Depositing,
}

/// Contract a write or read is addressed to
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    Vault,
    AssetToken,
}

/// A write the wallet signs and broadcasts
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum TransactionRequest {
    /// token `approve(spender, amount)`
    Approve { spender: Address, amount: Nat },
    /// vault `deposit(amount)`, asset base units
    Deposit { amount: Nat },
    /// vault `withdraw(shares)`, share base units
    Withdraw { shares: Nat },
    /// vault `rebalance()`
    Rebalance,
}

impl TransactionRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            TransactionRequest::Approve { .. } => RequestKind::Approve,
            TransactionRequest::Deposit { .. } => RequestKind::Deposit,
            TransactionRequest::Withdraw { .. } => RequestKind::Withdraw,
            TransactionRequest::Rebalance => RequestKind::Rebalance,
        }
    }

    pub fn target(&self) -> Contract {
        match self {
            TransactionRequest::Approve { .. } => Contract::AssetToken,
            _ => Contract::Vault,
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            TransactionRequest::Approve { .. } => "approve",
            TransactionRequest::Deposit { .. } => "deposit",
            TransactionRequest::Withdraw { .. } => "withdraw",
            TransactionRequest::Rebalance => "rebalance",
        }
    }
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Approve,
    Deposit,
    Withdraw,
    Rebalance,
}

impl RequestKind {
    /// Noun used in notifications
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Approve => "Approval",
            RequestKind::Deposit => "Deposit",
            RequestKind::Withdraw => "Withdrawal",
            RequestKind::Rebalance => "Rebalance",
        }
    }
}

/// On-chain outcome of a broadcast transaction
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// Record of a terminal transition
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub action: ActionKind,
    pub request: RequestKind,
    pub tx_hash: Option<TxHash>,
    pub success: bool,
    pub details: String,
}

/// Result of pressing deposit
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum DepositOutcome {
    /// Deposit confirmed, preceded by an approval when allowance was short
    Deposited { approval: Option<TxHash>, deposit: TxHash },
    /// Approval confirmed but the chained deposit was not submitted
    /// because the amount field no longer held a usable amount
    ApprovedOnly { approval: TxHash },
}
