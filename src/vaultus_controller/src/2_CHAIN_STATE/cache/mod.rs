//! Last-known-good reading cache
//!
//! A failed read never clears an entry. The dashboard keeps showing the
//! previous value until a later poll succeeds.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use tracing::debug;
use crate::_4_LEDGER::{LedgerError, ReadValue};
use crate::infrastructure::VaultError;
use super::queries::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRead {
    pub value: ReadValue,
    /// Poll cycle the value was read in
    pub cycle: u64,
    /// Set by invalidation, cleared by the next successful read
    pub stale: bool,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RefCell<HashMap<QueryKey, CachedRead>>,
    failures: Cell<u64>,
}

impl QueryCache {
    pub fn get(&self, key: &QueryKey) -> Option<ReadValue> {
        self.entries.borrow().get(key).map(|entry| entry.value.clone())
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.borrow().get(key).map_or(false, |entry| entry.stale)
    }

    pub fn store(&self, key: QueryKey, value: ReadValue, cycle: u64) {
        self.entries.borrow_mut().insert(key, CachedRead { value, cycle, stale: false });
    }

    /// Keep the previous value and log the failure
    pub fn record_failure(&self, key: &QueryKey, query: &str, error: &LedgerError) {
        self.failures.set(self.failures.get() + 1);

        let failure = VaultError::ReadTransientFailure {
            query: query.to_string(),
            reason: error.reason.clone(),
        };
        debug!(
            key = ?key,
            retained = self.entries.borrow().contains_key(key),
            "⚠️ {}",
            failure
        );
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.get()
    }

    /// Mark every entry stale without dropping its value
    pub fn invalidate_all(&self) {
        for entry in self.entries.borrow_mut().values_mut() {
            entry.stale = true;
        }
    }

    /// Drop every per-user entry, returning how many were removed
    pub fn clear_per_user(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|key, _| !key.is_per_user());
        before - entries.len()
    }

    /// Most recent cycle any entry was read in
    pub fn latest_cycle(&self) -> u64 {
        self.entries.borrow().values().map(|entry| entry.cycle).max().unwrap_or(0)
    }
}
