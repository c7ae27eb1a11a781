//! Vaultus Controller - vault interaction controller with numbered zones
//!
//! Architecture:
//! 1_TRANSACTIONS - Deposit (with approval chaining), withdraw, rebalance
//! 2_CHAIN_STATE - Polled chain readings, withdraw conversion, refresh
//! 3_METRICS - Pure derived metrics over cached readings
//! 4_LEDGER - Ledger, wallet and notifier seams
//! 5_INFORMATIONAL - Dashboard view model and notifications
//! 6_INFRASTRUCTURE - Math, errors, constants, config, slot guards
//!
//! One `VaultController` owns every piece of process-wide state. All of its
//! futures run on the host's single thread; each zone adds its own `impl`
//! block.

// Import numbered modules with explicit paths
#[path = "1_TRANSACTIONS/mod.rs"]
mod transactions_1;
use transactions_1 as _1_TRANSACTIONS;

#[path = "2_CHAIN_STATE/mod.rs"]
mod chain_state_2;
use chain_state_2 as _2_CHAIN_STATE;

#[path = "3_METRICS/mod.rs"]
mod metrics_3;
use metrics_3 as _3_METRICS;

#[path = "4_LEDGER/mod.rs"]
mod ledger_4;
use ledger_4 as _4_LEDGER;

#[path = "5_INFORMATIONAL/mod.rs"]
mod informational_5;
use informational_5 as _5_INFORMATIONAL;

#[path = "6_INFRASTRUCTURE/mod.rs"]
mod infrastructure_6;
use infrastructure_6 as infrastructure;

pub mod types;

#[cfg(test)]
mod testutils;

use tracing::info;

pub use infrastructure::{
    AmountError, ConfigError, PoolConfig, PreconditionError, Result, VaultConfig, VaultError,
};
pub use infrastructure::math::{display_amount, format_units, to_base_units, to_display_string};
pub use _2_CHAIN_STATE::queries::QueryKey;
pub use _3_METRICS::{apy_percent, best_apy, needs_approval, percent_allocation, rebalance_cooldown_remaining, BestApy};
pub use _4_LEDGER::{Ledger, LedgerError, Notifier, ReadCall, ReadValue, WalletError, WalletSession};
pub use _5_INFORMATIONAL::display::{ActionAvailability, DashboardView, PoolView};

use types::{ActionKind, Address, DepositFlowState, TransactionState};

/// Controller for one vault deployment
pub struct VaultController<L, W, N> {
    pub(crate) config: VaultConfig,
    pub(crate) ledger: L,
    pub(crate) wallet: W,
    pub(crate) notifier: N,
    pub(crate) reader: _2_CHAIN_STATE::ChainStateReader,
    pub(crate) refresh: _2_CHAIN_STATE::refresh::RefreshCoordinator,
    pub(crate) conversion: _2_CHAIN_STATE::conversion::WithdrawConversion,
    pub(crate) slots: infrastructure::ActionSlots,
    pub(crate) deposit_form: _1_TRANSACTIONS::deposit::DepositForm,
    pub(crate) history: _1_TRANSACTIONS::ActionHistory,
}

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    pub fn new(config: VaultConfig, ledger: L, wallet: W, notifier: N) -> Result<Self> {
        config.validate()?;

        info!(
            chain_id = config.chain_id,
            vault = %config.vault,
            asset = %config.asset_token,
            "vault controller initialised"
        );

        Ok(Self {
            config,
            ledger,
            wallet,
            notifier,
            reader: Default::default(),
            refresh: Default::default(),
            conversion: Default::default(),
            slots: Default::default(),
            deposit_form: Default::default(),
            history: Default::default(),
        })
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ===== PUBLIC API =====

    pub fn transaction_state(&self, action: ActionKind) -> TransactionState {
        self.slots.state(action)
    }

    pub fn deposit_flow(&self) -> DepositFlowState {
        self.deposit_form.flow()
    }

    /// Connect the wallet; the pollers pick up the new account
    pub async fn connect_wallet(&self) -> std::result::Result<Address, WalletError> {
        let address = self.wallet.connect().await?;
        info!(address = %address, "wallet connected");
        self.on_session_changed();
        Ok(address)
    }

    /// Disconnect the wallet; per-user readings are dropped immediately
    ///
    /// In-flight writes keep awaiting their receipts.
    pub async fn disconnect_wallet(&self) {
        self.wallet.disconnect().await;
        self.sync_session();
        info!("wallet disconnected");
    }

    /// Ask the wallet to move to the vault's chain
    pub async fn switch_to_vault_chain(&self) -> std::result::Result<(), WalletError> {
        self.wallet.switch_chain(self.config.chain_id).await?;
        info!(chain_id = self.config.chain_id, "wallet switched to vault chain");
        Ok(())
    }

    /// Host hook for wallet account/connection events
    ///
    /// Drops readings of the previous account and restarts the per-user
    /// pollers for the new one.
    pub fn on_session_changed(&self) {
        self.sync_session();
    }
}
