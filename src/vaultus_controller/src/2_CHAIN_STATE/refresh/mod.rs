//! Forced refresh
//!
//! A confirmed write invalidates every tracked query and wakes each query
//! poller for an immediate re-read. Requesting never waits on a read, so a
//! stalled query cannot hold up the write that asked for it.
//!
//! Requests coalesce per poller: several requests while a poller is idle
//! produce one read, and a request landing mid-read produces exactly one
//! more read once the current one settles.

use std::cell::Cell;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use tracing::info;
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::VaultController;

#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    generation: Cell<u64>,
    signal: Notify,
}

impl RefreshCoordinator {
    /// Number of refresh requests so far
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Resolves on the next refresh request
    pub(crate) fn requested(&self) -> Notified<'_> {
        self.signal.notified()
    }

    fn request(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.signal.notify_waiters();
        generation
    }
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    /// Invalidate every tracked query and ask every poller to re-read it now
    pub fn refresh_all(&self) {
        self.reader.cache.invalidate_all();
        let generation = self.refresh.request();
        info!(generation, "🔄 refresh of all queries requested");
    }

    pub fn refresh_requests(&self) -> u64 {
        self.refresh.generation()
    }
}
