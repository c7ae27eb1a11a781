//! # Derived Metrics
//!
//! Pure, deterministic functions over the latest cached readings. Nothing
//! here touches the Ledger; share/asset conversion for withdrawals is
//! deliberately absent and always comes from the vault's own query.
//!
//! ## Rules
//! - Zero total allocation yields all-zero percentages, never a fault
//! - Every pool tied for the highest APY is marked best
//! - A missing allowance is insufficient, never sufficient

use candid::Nat;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::infrastructure::math::multiply_and_divide;

/// Basis points in 100%
const BPS_DENOMINATOR: u32 = 10_000;

/// Per-pool share of the total allocation, in percent (2dp, floored)
///
/// All values come from one allocation read so they are mutually
/// consistent.
pub fn percent_allocation(allocations: &[Nat]) -> Vec<Decimal> {
    let total: BigUint = allocations.iter().map(|a| &a.0).sum();
    let denominator = BigUint::from(BPS_DENOMINATOR);

    allocations
        .iter()
        .map(|allocation| {
            multiply_and_divide(&allocation.0, &denominator, &total)
                .and_then(|bps| bps.to_i64())
                .map(|bps| Decimal::new(bps, 2))
                .unwrap_or(Decimal::ZERO)
        })
        .collect()
}

/// Highest APY and which pools hold it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestApy {
    /// Highest APY in basis points; `None` with no pools
    pub best_bps: Option<Nat>,
    /// One flag per pool; every pool equal to the maximum is flagged
    pub is_best: Vec<bool>,
}

pub fn best_apy(apys: &[Nat]) -> BestApy {
    let max = apys.iter().max_by(|a, b| a.0.cmp(&b.0));

    BestApy {
        best_bps: max.cloned(),
        is_best: apys.iter().map(|apy| Some(apy) == max).collect(),
    }
}

/// APY basis points as a percentage (850 → 8.50)
pub fn apy_percent(bps: &Nat) -> Option<Decimal> {
    bps.0.to_i64().map(|bps| Decimal::from(bps) / dec!(100))
}

/// Whether a deposit of `requested` needs an approval first
pub fn needs_approval(allowance: Option<&Nat>, requested: &Nat) -> bool {
    match allowance {
        Some(allowance) => allowance < requested,
        None => true,
    }
}

/// Seconds until the vault's own rebalance interval elapses
///
/// Informational only; the controller never gates rebalance on it.
pub fn rebalance_cooldown_remaining(last_rebalance: Option<&Nat>, min_interval: Option<&Nat>, now_secs: u64) -> u64 {
    let (Some(last), Some(interval)) = (last_rebalance, min_interval) else {
        return 0;
    };

    let ready_at = &last.0 + &interval.0;
    let now = BigUint::from(now_secs);
    if ready_at <= now {
        return 0;
    }

    (ready_at - now).to_u64().unwrap_or(u64::MAX)
}
