//! # Chain State Module
//!
//! Keeps the latest reading of every tracked query and refreshes them on a
//! fixed interval.
//!
//! ## Process
//! 1. **Session sync**: detect account/connection changes and drop per-user
//!    readings that no longer belong to the connected account
//! 2. **Per-query pollers**: every active query runs its own interval loop,
//!    so a stalled read only delays that query's next tick
//! 3. **Store**: each read writes its own cache entry as it completes; a
//!    failed read keeps the previous value
//!
//! ## Consistency
//! Readings are cached independently and may come from different reads.
//! Per-user results that land after the account changed are discarded.
//!
//! - **queries/**: tracked query set and its read calls
//! - **cache/**: last-known-good entries
//! - **conversion/**: withdraw asset → share conversion
//! - **refresh/**: forced refresh after confirmed writes

pub mod cache;
pub mod conversion;
pub mod queries;
pub mod refresh;

use std::cell::{Cell, RefCell};
use std::future::Future;
use futures::future::join_all;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::types::{Address, ChainSnapshot};
use crate::VaultController;
use cache::QueryCache;
use queries::{tracked_queries, QueryKey};

#[derive(Debug, Default)]
pub struct ChainStateReader {
    pub(crate) cache: QueryCache,
    /// Read sequence; one value per `poll_once` or per standalone read
    cycle: Cell<u64>,
    /// Account the per-user entries were read for
    session_address: RefCell<Option<Address>>,
    /// Wakes the polling loop so it rebuilds its query set
    session_changed: Notify,
}

impl ChainStateReader {
    fn next_cycle(&self) -> u64 {
        let cycle = self.cycle.get() + 1;
        self.cycle.set(cycle);
        cycle
    }
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    /// Connected account, if any
    pub(crate) fn session_address(&self) -> Option<Address> {
        if self.wallet.is_connected() {
            self.wallet.current_address()
        } else {
            None
        }
    }

    /// Reconcile cached per-user readings with the wallet session
    pub(crate) fn sync_session(&self) -> Option<Address> {
        let current = self.session_address();
        let previous = self.reader.session_address.replace(current.clone());

        if previous != current {
            let cleared = self.reader.cache.clear_per_user();
            info!(
                previous = ?previous.as_ref().map(Address::short),
                current = ?current.as_ref().map(Address::short),
                cleared,
                "🔄 wallet session changed"
            );
            self.reader.session_changed.notify_waiters();
        }

        current
    }

    /// Issue every active query once
    ///
    /// For hosts that drive reads themselves. Resolves when all reads have
    /// settled; each read stores its own result on completion.
    pub async fn poll_once(&self) {
        let address = self.sync_session();
        let cycle = self.reader.next_cycle();
        let keys = tracked_queries(address.as_ref());

        debug!(cycle, queries = keys.len(), "poll cycle started");

        let reads = join_all(keys.into_iter().map(|key| self.fetch_query(key, cycle)));
        futures::join!(reads, self.refresh_withdraw_conversion());

        debug!(cycle, "poll cycle settled");
    }

    async fn fetch_query(&self, key: QueryKey, cycle: u64) {
        let call = key.to_call(&self.config);

        match self.ledger.read(&call).await {
            Ok(value) => {
                if let Some(owner) = key.owner() {
                    if self.session_address().as_ref() != Some(owner) {
                        debug!(query = call.function_name(), owner = %owner.short(), "discarding reading for previous account");
                        return;
                    }
                }
                self.reader.cache.store(key, value, cycle);
            }
            Err(e) => self.reader.cache.record_failure(&key, call.function_name(), &e),
        }
    }

    /// Poll forever on the configured interval
    ///
    /// Each active query gets its own ticker. The query set is rebuilt
    /// whenever the wallet session changes.
    pub async fn run_polling(&self) {
        info!(interval_secs = self.config.poll_interval_secs, "⏱️ chain polling started");

        loop {
            let address = self.sync_session();
            let keys = tracked_queries(address.as_ref());
            debug!(queries = keys.len(), account = ?address.as_ref().map(Address::short), "starting query pollers");

            let pollers = join_all(keys.into_iter().map(|key| {
                self.poll_every(move || {
                    let key = key.clone();
                    async move { self.fetch_query(key, self.reader.next_cycle()).await }
                })
            }));
            let conversion = self.poll_every(|| self.refresh_withdraw_conversion());

            tokio::select! {
                _ = futures::future::join(pollers, conversion) => {}
                _ = self.watch_session(address.clone()) => {}
            }
        }
    }

    /// Run `read` on every tick and on every forced refresh
    ///
    /// A stalled read delays only this loop's next tick.
    async fn poll_every<F, Fut>(&self, mut read: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut served = self.refresh.generation();

        loop {
            if self.refresh.generation() == served {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = self.refresh.requested() => {}
                }
            }
            served = self.refresh.generation();
            read().await;
        }
    }

    /// Resolves once the session no longer matches `active`
    async fn watch_session(&self, active: Option<Address>) {
        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.reader.session_changed.notified() => {}
            }
            if self.sync_session() != active {
                return;
            }
        }
    }

    /// Latest readings visible to the current session
    pub fn snapshot(&self) -> ChainSnapshot {
        let cache = &self.reader.cache;
        let address = self.session_address();

        let amount = |key: &QueryKey| cache.get(key).and_then(|v| v.as_amount().cloned());
        let per_pool = |key: &QueryKey| cache.get(key).and_then(|v| v.as_per_pool().map(<[_]>::to_vec));
        let per_user = |make: fn(Address) -> QueryKey| address.clone().and_then(|a| amount(&make(a)));

        ChainSnapshot {
            cycle: cache.latest_cycle(),
            total_assets: amount(&QueryKey::TotalAssets),
            user_balance: per_user(QueryKey::UserBalance),
            user_shares: per_user(QueryKey::UserShares),
            apys: per_pool(&QueryKey::CurrentApys),
            allocations: per_pool(&QueryKey::Allocation),
            allowance: per_user(QueryKey::Allowance),
            wallet_token_balance: per_user(QueryKey::WalletTokenBalance),
            share_price: amount(&QueryKey::SharePrice),
            total_shares: amount(&QueryKey::TotalShares),
            last_rebalance: amount(&QueryKey::LastRebalance),
            min_rebalance_interval: amount(&QueryKey::MinRebalanceInterval),
            paused: cache.get(&QueryKey::Paused).and_then(|v| v.as_flag()),
        }
    }

    pub fn read_failures(&self) -> u64 {
        self.reader.cache.failure_count()
    }

    /// Whether `key` was invalidated and has not been re-read yet
    pub fn is_reading_stale(&self, key: &QueryKey) -> bool {
        self.reader.cache.is_stale(key)
    }
}
