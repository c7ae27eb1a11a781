//! # Approval Module
//!
//! Builds the token approval a deposit needs so the vault can pull funds.
//!
//! ## Policy
//! - The grant is exactly the deposit amount, never an unlimited allowance
//! - The spender is always the configured vault

use candid::Nat;
use crate::infrastructure::VaultConfig;
use crate::types::{Address, TransactionRequest};
use super::ReadCall;

/// Approval request for a deposit of `amount` base units
pub fn approval_request(config: &VaultConfig, amount: &Nat) -> TransactionRequest {
    TransactionRequest::Approve {
        spender: config.vault.clone(),
        amount: amount.clone(),
    }
}

/// Allowance query for `owner` against the vault
pub fn vault_allowance_call(config: &VaultConfig, owner: &Address) -> ReadCall {
    ReadCall::Allowance {
        owner: owner.clone(),
        spender: config.vault.clone(),
    }
}
