//! # Transactions Module
//!
//! The three user-triggered writes against the vault. Each owns an
//! independent slot; a slot holds at most one write at a time.
//!
//! ## Lifecycle
//! ```text
//! Idle → Submitting → Confirming → Succeeded → Idle
//!            │             │
//!            └─────────────┴──────→ Failed → Idle
//! ```
//!
//! ## Safety
//! - Preconditions run before any Ledger or wallet call
//! - The slot guard refuses re-submission while a write is in flight
//! - Success requests a refresh of every tracked query; failure refreshes
//!   nothing
//! - A terminal transition never waits on a read
//! - Exactly one notification per terminal transition
//!
//! - **preconditions**: session and amount checks
//! - **lifecycle**: submit → confirm → terminal handling
//! - **deposit/**: approve-if-needed, then deposit
//! - **withdraw/**: vault-converted share withdrawal
//! - **rebalance/**: parameterless rebalance trigger

pub mod deposit;
pub mod lifecycle;
pub mod preconditions;
pub mod rebalance;
pub mod withdraw;

use std::cell::RefCell;
use std::collections::VecDeque;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::infrastructure::MAX_ACTION_HISTORY;
use crate::types::ActionRecord;
use crate::VaultController;

/// Recent terminal transitions, newest last
#[derive(Debug, Default)]
pub struct ActionHistory {
    records: RefCell<VecDeque<ActionRecord>>,
}

impl ActionHistory {
    /// Keeps only the last MAX_ACTION_HISTORY records
    pub fn record(&self, record: ActionRecord) {
        let mut records = self.records.borrow_mut();
        records.push_back(record);
        while records.len() > MAX_ACTION_HISTORY {
            records.pop_front();
        }
    }

    pub fn to_vec(&self) -> Vec<ActionRecord> {
        self.records.borrow().iter().cloned().collect()
    }
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    pub fn action_history(&self) -> Vec<ActionRecord> {
        self.history.to_vec()
    }
}
