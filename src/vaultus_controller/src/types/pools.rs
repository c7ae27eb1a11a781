use candid::{CandidType, Deserialize};
use serde::Serialize;

/// Yield pools the vault allocates across, in the order the vault
/// returns per-pool APYs and allocations
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    Neverland,
    TownSquare,
}

impl Pool {
    pub fn all() -> &'static [Pool] {
        &[Pool::Neverland, Pool::TownSquare]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pool::Neverland => "Neverland",
            Pool::TownSquare => "TownSquare",
        }
    }

    /// Position in per-pool ledger vectors
    pub fn index(&self) -> usize {
        match self {
            Pool::Neverland => 0,
            Pool::TownSquare => 1,
        }
    }
}
