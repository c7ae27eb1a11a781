//! Withdraw amount conversion
//!
//! The withdraw field is entered in asset units but the vault withdraws
//! shares. The share amount always comes from the vault's own
//! `assetsToShares` query; it is never derived locally.
//!
//! Each edit bumps a sequence number. A conversion that lands after the
//! field changed again is discarded.

use std::cell::{Cell, RefCell};
use candid::Nat;
use num_traits::Zero;
use tracing::{debug, warn};
use crate::_4_LEDGER::{Ledger, Notifier, ReadCall, ReadValue, WalletSession};
use crate::_1_TRANSACTIONS::preconditions::parse_amount;
use crate::infrastructure::{format_units, to_base_units, PreconditionError, Result};
use crate::VaultController;

#[derive(Debug, Default)]
pub struct WithdrawConversion {
    input: RefCell<String>,
    /// Parsed, non-zero asset amount of the current input
    assets: RefCell<Option<Nat>>,
    /// Vault conversion of `assets`
    shares: RefCell<Option<Nat>>,
    pending: Cell<bool>,
    sequence: Cell<u64>,
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    pub fn withdraw_input(&self) -> String {
        self.conversion.input.borrow().clone()
    }

    /// Vault share amount for the current withdraw input, once known
    pub fn withdraw_shares(&self) -> Option<Nat> {
        self.conversion.shares.borrow().clone()
    }

    pub fn withdraw_conversion_pending(&self) -> bool {
        self.conversion.pending.get()
    }

    /// Replace the withdraw field
    ///
    /// Any conversion for the previous amount is dropped immediately.
    pub fn set_withdraw_input(&self, input: &str) {
        let conversion = &self.conversion;
        *conversion.input.borrow_mut() = input.to_string();

        let assets = to_base_units(input, self.config.asset_decimals)
            .ok()
            .filter(|assets| !assets.0.is_zero());

        if *conversion.assets.borrow() == assets {
            return;
        }

        conversion.sequence.set(conversion.sequence.get() + 1);
        conversion.pending.set(assets.is_some());
        *conversion.shares.borrow_mut() = None;
        *conversion.assets.borrow_mut() = assets;
    }

    /// Replace the withdraw field and fetch its share conversion
    pub async fn update_withdraw_input(&self, input: &str) {
        self.set_withdraw_input(input);
        self.refresh_withdraw_conversion().await;
    }

    /// Fill the withdraw field with the user's full position
    pub async fn fill_max_withdraw(&self) -> Option<String> {
        let balance = self.snapshot().user_balance?;
        let text = format_units(&balance, self.config.asset_decimals);
        self.update_withdraw_input(&text).await;
        Some(text)
    }

    /// Query the vault conversion for the current withdraw amount
    pub async fn refresh_withdraw_conversion(&self) {
        let Some(assets) = self.conversion.assets.borrow().clone() else {
            return;
        };
        let sequence = self.conversion.sequence.get();

        let result = self.ledger.read(&ReadCall::AssetsToShares { assets: assets.clone() }).await;

        if self.conversion.sequence.get() != sequence {
            debug!(assets = %assets, "discarding conversion for superseded withdraw input");
            return;
        }

        self.conversion.pending.set(false);
        match result {
            Ok(ReadValue::Amount(shares)) => {
                debug!(assets = %assets, shares = %shares, "withdraw conversion updated");
                *self.conversion.shares.borrow_mut() = Some(shares);
            }
            Ok(other) => warn!(value = ?other, "unexpected assetsToShares response"),
            Err(e) => debug!(reason = %e, "⚠️ assetsToShares read failed"),
        }
    }

    /// Share amount to submit for the current withdraw input
    pub(crate) fn withdraw_shares_for_submission(&self) -> Result<Nat> {
        parse_amount(&self.withdraw_input(), self.config.asset_decimals)?;

        match self.withdraw_shares() {
            Some(shares) => Ok(shares),
            None if self.conversion.pending.get() => Err(PreconditionError::ConversionPending.into()),
            None => Err(PreconditionError::ConversionUnavailable.into()),
        }
    }
}
