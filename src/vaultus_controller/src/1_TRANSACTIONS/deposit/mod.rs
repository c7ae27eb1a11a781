//! # Deposit Module
//!
//! Deposits asset tokens into the vault, approving the vault first when
//! the cached allowance does not cover the amount.
//!
//! ## Process
//! 1. **Validate**: idle slot, connected wallet on the vault chain, amount
//! 2. **Approve** (if needed): exact-amount approval, confirmed on chain
//! 3. **Chain**: re-read the still-populated field and submit the deposit
//!
//! ## Safety
//! - The deposit is only submitted after the approval receipt succeeded
//! - A field cleared, emptied or raised past the approved amount during
//!   approval ends the flow after the approval (`ApprovedOnly`)
//! - Approval and deposit share the deposit slot, so neither can be
//!   re-submitted while the other is in flight

use std::cell::{Cell, RefCell};
use candid::Nat;
use tracing::{info, warn};
use crate::_3_METRICS::needs_approval;
use crate::_4_LEDGER::approvals::approval_request;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::{Result, SlotGuard};
use crate::types::{ActionKind, Address, DepositFlowState, DepositOutcome, TransactionRequest};
use crate::VaultController;
use crate::QueryKey;
use super::preconditions::parse_amount;

/// Deposit field and approve → deposit sub-state
#[derive(Debug, Default)]
pub struct DepositForm {
    input: RefCell<String>,
    flow: Cell<DepositFlowState>,
}

impl DepositForm {
    pub fn input(&self) -> String {
        self.input.borrow().clone()
    }

    pub fn flow(&self) -> DepositFlowState {
        self.flow.get()
    }

    pub(crate) fn clear_input(&self) {
        self.input.borrow_mut().clear();
    }

    fn set_flow(&self, next: DepositFlowState) {
        self.flow.set(next);
    }
}

/// Returns the flow to `Idle` on every exit path
struct FlowReset<'a>(&'a DepositForm);

impl Drop for FlowReset<'_> {
    fn drop(&mut self) {
        self.0.set_flow(DepositFlowState::Idle);
    }
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    pub fn set_deposit_input(&self, input: &str) {
        *self.deposit_form.input.borrow_mut() = input.to_string();
    }

    pub fn deposit_input(&self) -> String {
        self.deposit_form.input()
    }

    /// Cached allowance `owner` has granted the vault
    pub(crate) fn cached_allowance(&self, owner: &Address) -> Option<Nat> {
        self.reader
            .cache
            .get(&QueryKey::Allowance(owner.clone()))
            .and_then(|value| value.as_amount().cloned())
    }

    /// Everything a deposit needs, or why it cannot start
    pub fn check_deposit(&self) -> Result<(Address, Nat)> {
        self.require_idle(ActionKind::Deposit)?;
        let owner = self.require_session()?;
        let amount = parse_amount(&self.deposit_input(), self.config.asset_decimals)?;
        Ok((owner, amount))
    }

    /// Whether the current field would start with an approval
    pub fn deposit_needs_approval(&self) -> bool {
        match self.check_deposit() {
            Ok((owner, amount)) => needs_approval(self.cached_allowance(&owner).as_ref(), &amount),
            Err(_) => false,
        }
    }

    /// Deposit the amount in the deposit field
    pub async fn deposit(&self) -> Result<DepositOutcome> {
        let (owner, amount) = self.check_deposit()?;
        let _slot = SlotGuard::acquire(&self.slots, ActionKind::Deposit)?;
        let _flow = FlowReset(&self.deposit_form);

        let allowance = self.cached_allowance(&owner);
        if !needs_approval(allowance.as_ref(), &amount) {
            self.deposit_form.set_flow(DepositFlowState::Depositing);
            let deposit = self
                .execute_transaction(ActionKind::Deposit, TransactionRequest::Deposit { amount })
                .await?;
            return Ok(DepositOutcome::Deposited { approval: None, deposit });
        }

        info!(
            amount = %amount,
            allowance = ?allowance,
            "🔐 allowance does not cover deposit, approving exact amount"
        );
        self.deposit_form.set_flow(DepositFlowState::Approving);
        let approval = self
            .execute_transaction(ActionKind::Deposit, approval_request(&self.config, &amount))
            .await?;

        let chained = match parse_amount(&self.deposit_input(), self.config.asset_decimals) {
            Ok(chained) if chained <= amount => chained,
            Ok(chained) => {
                warn!(approved = %amount, requested = %chained, "deposit field exceeds approval, not chaining deposit");
                return Ok(DepositOutcome::ApprovedOnly { approval });
            }
            Err(e) => {
                info!(reason = %e, "deposit field changed during approval, not chaining deposit");
                return Ok(DepositOutcome::ApprovedOnly { approval });
            }
        };

        // The wallet may have disconnected or switched chain while approving
        self.require_session()?;

        self.deposit_form.set_flow(DepositFlowState::Depositing);
        let deposit = self
            .execute_transaction(ActionKind::Deposit, TransactionRequest::Deposit { amount: chained })
            .await?;

        Ok(DepositOutcome::Deposited { approval: Some(approval), deposit })
    }
}

#[cfg(test)]
mod tests;
