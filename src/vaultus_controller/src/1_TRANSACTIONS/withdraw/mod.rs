//! # Withdraw Module
//!
//! Withdraws from the vault. The field is entered in asset units; the
//! submitted share amount is exactly the vault's `assetsToShares` answer
//! for that field, so submission waits until the conversion has arrived.

use candid::Nat;
use tracing::info;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::{Result, SlotGuard};
use crate::types::{ActionKind, TransactionRequest, TxHash};
use crate::VaultController;

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    /// Share amount a withdraw would submit, or why it cannot start
    pub fn check_withdraw(&self) -> Result<Nat> {
        self.require_idle(ActionKind::Withdraw)?;
        self.require_session()?;
        self.withdraw_shares_for_submission()
    }

    /// Withdraw the amount in the withdraw field
    pub async fn withdraw(&self) -> Result<TxHash> {
        let shares = self.check_withdraw()?;
        let _slot = SlotGuard::acquire(&self.slots, ActionKind::Withdraw)?;

        info!(assets = %self.withdraw_input(), shares = %shares, "💸 withdrawing vault-converted shares");
        self.execute_transaction(ActionKind::Withdraw, TransactionRequest::Withdraw { shares })
            .await
    }
}
