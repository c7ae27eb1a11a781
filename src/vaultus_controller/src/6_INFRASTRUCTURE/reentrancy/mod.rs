//! Reentrancy guards for write actions
//! Prevents a second submission into an action slot that is still in flight
//!
//! ## Slots
//! Deposit, withdraw and rebalance are independent slots: all three may be
//! in flight at once, but each holds at most one write. The guard is the
//! sole mutator of its slot, so the check does not depend on the UI
//! disabling its button.
//!
//! Dropping the guard returns the slot to `Idle`, whichever path the
//! action took (success, failure, or the future being dropped).

use std::cell::Cell;
use tracing::debug;
use crate::infrastructure::{Result, PreconditionError};
use crate::types::{ActionKind, TransactionState};

/// Per-action transaction state
#[derive(Debug, Default)]
pub struct ActionSlots {
    deposit: Cell<TransactionState>,
    withdraw: Cell<TransactionState>,
    rebalance: Cell<TransactionState>,
}

impl ActionSlots {
    pub fn state(&self, action: ActionKind) -> TransactionState {
        self.slot(action).get()
    }

    pub fn is_idle(&self, action: ActionKind) -> bool {
        self.state(action) == TransactionState::Idle
    }

    /// Move a slot to its next state (only called while holding the guard)
    pub(crate) fn transition(&self, action: ActionKind, next: TransactionState) {
        let previous = self.slot(action).replace(next);
        if previous != next {
            debug!(action = action.as_str(), from = previous.as_str(), to = next.as_str(), "slot transition");
        }
    }

    fn slot(&self, action: ActionKind) -> &Cell<TransactionState> {
        match action {
            ActionKind::Deposit => &self.deposit,
            ActionKind::Withdraw => &self.withdraw,
            ActionKind::Rebalance => &self.rebalance,
        }
    }
}

/// Guard for one action slot
pub struct SlotGuard<'a> {
    slots: &'a ActionSlots,
    action: ActionKind,
}

impl<'a> SlotGuard<'a> {
    /// Claim the slot, moving it from `Idle` to `Submitting`
    pub fn acquire(slots: &'a ActionSlots, action: ActionKind) -> Result<Self> {
        if !slots.is_idle(action) {
            debug!(action = action.as_str(), state = slots.state(action).as_str(), "slot busy, refusing submission");
            return Err(PreconditionError::ActionInFlight { action }.into());
        }

        slots.transition(action, TransactionState::Submitting);
        Ok(SlotGuard { slots, action })
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.slots.transition(self.action, TransactionState::Idle);
    }
}
