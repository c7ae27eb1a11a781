//! Tracked query set
//!
//! Global queries are always active. Per-user queries are keyed by the
//! owner address and only exist while a wallet is connected, so a reading
//! taken for one account can never be served for another.

use crate::_4_LEDGER::approvals::vault_allowance_call;
use crate::_4_LEDGER::ReadCall;
use crate::infrastructure::VaultConfig;
use crate::types::Address;

/// Cache key for one tracked query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    TotalAssets,
    CurrentApys,
    Allocation,
    SharePrice,
    TotalShares,
    LastRebalance,
    MinRebalanceInterval,
    Paused,
    UserBalance(Address),
    UserShares(Address),
    /// Allowance granted by the owner to the vault
    Allowance(Address),
    WalletTokenBalance(Address),
}

const GLOBAL_QUERIES: [QueryKey; 8] = [
    QueryKey::TotalAssets,
    QueryKey::CurrentApys,
    QueryKey::Allocation,
    QueryKey::SharePrice,
    QueryKey::TotalShares,
    QueryKey::LastRebalance,
    QueryKey::MinRebalanceInterval,
    QueryKey::Paused,
];

impl QueryKey {
    /// Account a per-user query belongs to
    pub fn owner(&self) -> Option<&Address> {
        match self {
            QueryKey::UserBalance(owner)
            | QueryKey::UserShares(owner)
            | QueryKey::Allowance(owner)
            | QueryKey::WalletTokenBalance(owner) => Some(owner),
            _ => None,
        }
    }

    pub fn is_per_user(&self) -> bool {
        self.owner().is_some()
    }

    pub fn to_call(&self, config: &VaultConfig) -> ReadCall {
        match self {
            QueryKey::TotalAssets => ReadCall::TotalAssets,
            QueryKey::CurrentApys => ReadCall::CurrentApys,
            QueryKey::Allocation => ReadCall::Allocation,
            QueryKey::SharePrice => ReadCall::SharePrice,
            QueryKey::TotalShares => ReadCall::TotalShares,
            QueryKey::LastRebalance => ReadCall::LastRebalance,
            QueryKey::MinRebalanceInterval => ReadCall::MinRebalanceInterval,
            QueryKey::Paused => ReadCall::Paused,
            QueryKey::UserBalance(user) => ReadCall::UserBalance { user: user.clone() },
            QueryKey::UserShares(user) => ReadCall::UserShares { user: user.clone() },
            QueryKey::Allowance(owner) => vault_allowance_call(config, owner),
            QueryKey::WalletTokenBalance(account) => ReadCall::TokenBalance { account: account.clone() },
        }
    }
}

/// Every query active for the given session
pub fn tracked_queries(address: Option<&Address>) -> Vec<QueryKey> {
    let mut keys = GLOBAL_QUERIES.to_vec();

    if let Some(address) = address {
        keys.extend([
            QueryKey::UserBalance(address.clone()),
            QueryKey::UserShares(address.clone()),
            QueryKey::Allowance(address.clone()),
            QueryKey::WalletTokenBalance(address.clone()),
        ]);
    }

    keys
}
