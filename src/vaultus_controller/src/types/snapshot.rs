use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;

/// Latest known chain readings, one field per tracked query
///
/// Fields are cached independently and may come from different poll
/// cycles. Values that must agree with each other (per-pool allocations)
/// always come from a single read.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Most recent poll cycle that stored at least one value
    pub cycle: u64,
    pub total_assets: Option<Nat>,
    pub user_balance: Option<Nat>,
    pub user_shares: Option<Nat>,
    /// Per-pool APY in basis points
    pub apys: Option<Vec<Nat>>,
    /// Per-pool allocation in asset base units
    pub allocations: Option<Vec<Nat>>,
    pub allowance: Option<Nat>,
    pub wallet_token_balance: Option<Nat>,
    pub share_price: Option<Nat>,
    pub total_shares: Option<Nat>,
    /// Unix seconds of the last successful rebalance
    pub last_rebalance: Option<Nat>,
    /// Seconds the vault enforces between rebalances
    pub min_rebalance_interval: Option<Nat>,
    pub paused: Option<bool>,
}
