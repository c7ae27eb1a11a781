//! # Rebalance Module
//!
//! Triggers the vault's parameterless `rebalance()`. The vault decides the
//! new allocation; the controller only gates on wallet state and reports
//! the outcome.
//!
//! ## Cooldown
//! The vault enforces `minRebalanceInterval` itself. A rebalance inside
//! the cooldown is still submitted and reported through the normal failure
//! path if the vault reverts it.

use tracing::info;
use crate::_3_METRICS::rebalance_cooldown_remaining;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::{Result, SlotGuard};
use crate::types::{ActionKind, TransactionRequest, TxHash};
use crate::VaultController;

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    pub fn check_rebalance(&self) -> Result<()> {
        self.require_idle(ActionKind::Rebalance)?;
        self.require_session()?;
        Ok(())
    }

    /// Trigger a vault rebalance
    ///
    /// `now_secs` is only used to log a likely cooldown revert.
    pub async fn rebalance(&self, now_secs: u64) -> Result<TxHash> {
        self.check_rebalance()?;
        let _slot = SlotGuard::acquire(&self.slots, ActionKind::Rebalance)?;

        let snapshot = self.snapshot();
        let remaining = rebalance_cooldown_remaining(
            snapshot.last_rebalance.as_ref(),
            snapshot.min_rebalance_interval.as_ref(),
            now_secs,
        );
        if remaining > 0 {
            info!(remaining_secs = remaining, "⚖️ vault cooldown still running, submitting rebalance anyway");
        } else {
            info!("⚖️ triggering vault rebalance");
        }

        self.execute_transaction(ActionKind::Rebalance, TransactionRequest::Rebalance)
            .await
    }
}
