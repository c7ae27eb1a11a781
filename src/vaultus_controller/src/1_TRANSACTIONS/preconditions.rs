//! Precondition checks shared by all write actions
//!
//! Every check here is synchronous and runs before the slot is claimed, so
//! a refused action never reaches the wallet or the Ledger.

use candid::Nat;
use num_traits::Zero;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::{to_base_units, PreconditionError, Result};
use crate::types::{ActionKind, Address};
use crate::VaultController;

/// Parse an amount field for submission
///
/// Empty input is a missing amount rather than a malformed one.
pub fn parse_amount(input: &str, decimals: u32) -> Result<Nat> {
    if input.trim().is_empty() {
        return Err(PreconditionError::MissingAmount.into());
    }

    let amount = to_base_units(input, decimals)?;
    if amount.0.is_zero() {
        return Err(PreconditionError::ZeroAmount.into());
    }

    Ok(amount)
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    /// Connected account on the vault's chain
    pub(crate) fn require_session(&self) -> Result<Address> {
        let address = self
            .session_address()
            .ok_or(PreconditionError::WalletDisconnected)?;

        let actual = self.wallet.chain_id();
        if actual != Some(self.config.chain_id) {
            return Err(PreconditionError::WrongChain { expected: self.config.chain_id, actual }.into());
        }

        Ok(address)
    }

    pub(crate) fn require_idle(&self, action: ActionKind) -> Result<()> {
        if self.slots.is_idle(action) {
            Ok(())
        } else {
            Err(PreconditionError::ActionInFlight { action }.into())
        }
    }

    /// Whether the wallet is connected but on another chain
    pub fn is_wrong_chain(&self) -> bool {
        self.session_address().is_some() && self.wallet.chain_id() != Some(self.config.chain_id)
    }
}
