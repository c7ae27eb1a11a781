//! Display module - Dashboard view model for the host UI
//!
//! Built on demand from the latest snapshot and slot states. Absent
//! readings render as zero; nothing here ever faults.

use candid::{CandidType, Deserialize};
use serde::Serialize;
use crate::_3_METRICS::{apy_percent, best_apy, percent_allocation, rebalance_cooldown_remaining};
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::{display_amount, to_display_string, Result, VaultError};
use crate::types::{ActionKind, Pool, TransactionState};
use crate::VaultController;

/// Fraction digits for the share price
const SHARE_PRICE_FRACTION_DIGITS: u32 = 4;

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolView {
    pub pool: Pool,
    pub name: String,
    pub address: Option<String>,
    /// "8.50%"
    pub apy: String,
    /// "65.00%"
    pub allocation: String,
    pub is_best: bool,
}

/// Whether an action button should be enabled, and why not
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionAvailability {
    pub enabled: bool,
    pub blocked_by: Option<VaultError>,
    pub state: TransactionState,
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub connected: bool,
    /// "0x8b13...4c3a"
    pub short_address: Option<String>,
    pub wrong_chain: bool,
    /// "$250.00"
    pub total_value_locked: String,
    pub user_balance: String,
    pub wallet_balance: String,
    pub user_shares: String,
    pub share_price: String,
    pub best_apy: String,
    pub pools: Vec<PoolView>,
    pub paused: bool,
    pub rebalance_cooldown_secs: u64,
    pub deposit: ActionAvailability,
    /// The deposit button starts with an approval
    pub deposit_needs_approval: bool,
    pub withdraw: ActionAvailability,
    pub rebalance: ActionAvailability,
}

fn percent(value: rust_decimal::Decimal) -> String {
    format!("{:.2}%", value)
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    fn availability<T>(&self, action: ActionKind, check: Result<T>) -> ActionAvailability {
        let blocked_by = check.err();
        ActionAvailability {
            enabled: blocked_by.is_none(),
            blocked_by,
            state: self.slots.state(action),
        }
    }

    /// Render the dashboard at `now_secs` (unix seconds)
    pub fn dashboard(&self, now_secs: u64) -> DashboardView {
        let snapshot = self.snapshot();
        let address = self.session_address();
        let decimals = self.config.asset_decimals;

        let apys = snapshot.apys.clone().unwrap_or_default();
        let allocations = percent_allocation(&snapshot.allocations.clone().unwrap_or_default());
        let best = best_apy(&apys);

        let pools = Pool::all()
            .iter()
            .map(|pool| {
                let index = pool.index();
                PoolView {
                    pool: *pool,
                    name: pool.name().to_string(),
                    address: self.config.pool_address(*pool).map(|a| a.to_string()),
                    apy: percent(apys.get(index).and_then(apy_percent).unwrap_or_default()),
                    allocation: percent(allocations.get(index).copied().unwrap_or_default()),
                    is_best: best.is_best.get(index).copied().unwrap_or(false),
                }
            })
            .collect();

        DashboardView {
            connected: address.is_some(),
            short_address: address.as_ref().map(|a| a.short()),
            wrong_chain: self.is_wrong_chain(),
            total_value_locked: format!("${}", display_amount(snapshot.total_assets.as_ref(), decimals)),
            user_balance: format!("${}", display_amount(snapshot.user_balance.as_ref(), decimals)),
            wallet_balance: display_amount(snapshot.wallet_token_balance.as_ref(), decimals),
            user_shares: display_amount(snapshot.user_shares.as_ref(), self.config.share_decimals),
            share_price: to_display_string(
                snapshot.share_price.as_ref(),
                self.config.share_decimals,
                SHARE_PRICE_FRACTION_DIGITS,
            ),
            best_apy: percent(best.best_bps.as_ref().and_then(apy_percent).unwrap_or_default()),
            pools,
            paused: snapshot.paused.unwrap_or(false),
            rebalance_cooldown_secs: rebalance_cooldown_remaining(
                snapshot.last_rebalance.as_ref(),
                snapshot.min_rebalance_interval.as_ref(),
                now_secs,
            ),
            deposit: self.availability(ActionKind::Deposit, self.check_deposit()),
            deposit_needs_approval: self.deposit_needs_approval(),
            withdraw: self.availability(ActionKind::Withdraw, self.check_withdraw()),
            rebalance: self.availability(ActionKind::Rebalance, self.check_rebalance()),
        }
    }
}
