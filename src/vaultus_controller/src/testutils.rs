//! In-memory Ledger, wallet and notifier for controller tests
//!
//! Reads, signatures and receipts can be held open and released one at a
//! time to drive interleavings deterministically.

use std::cell::{Cell, RefCell, RefMut};
use std::collections::VecDeque;
use candid::Nat;
use futures::channel::oneshot;
use num_bigint::BigUint;
use crate::_2_CHAIN_STATE::queries::tracked_queries;
use crate::_4_LEDGER::{Ledger, LedgerError, Notifier, ReadCall, ReadValue, WalletError, WalletSession};
use crate::infrastructure::VaultConfig;
use crate::types::{Address, ReceiptStatus, TransactionRequest, TxHash};
use crate::VaultController;

pub type TestController = VaultController<MockLedger, MockWallet, MockNotifier>;

pub fn user() -> Address {
    Address::parse("0x1111111111111111111111111111111111111111").unwrap()
}

pub fn other_user() -> Address {
    Address::parse("0x2222222222222222222222222222222222222222").unwrap()
}

pub fn test_controller() -> TestController {
    test_controller_with(MockWallet::connected())
}

pub fn test_controller_with(wallet: MockWallet) -> TestController {
    VaultController::new(
        VaultConfig::monad_testnet().unwrap(),
        MockLedger::default(),
        wallet,
        MockNotifier::default(),
    )
    .unwrap()
}

/// Queries a connected session polls per cycle
pub fn tracked_query_count() -> usize {
    tracked_queries(Some(&user())).len()
}

/// The mock vault prices a share at 2 assets (6 → 18 decimals)
pub fn vault_shares_for(assets: u64) -> Nat {
    shares_for(&Nat::from(assets))
}

fn shares_for(assets: &Nat) -> Nat {
    Nat(&assets.0 * BigUint::from(1_000_000_000_000u64) / 2u32)
}

// ===== LEDGER =====

#[derive(Debug, Clone)]
pub struct LedgerState {
    pub total_assets: Nat,
    pub user_balance: Nat,
    pub user_shares: Nat,
    pub apys: Vec<Nat>,
    pub allocations: Vec<Nat>,
    pub allowance: Nat,
    pub token_balance: Nat,
    pub share_price: Nat,
    pub total_shares: Nat,
    pub last_rebalance: Nat,
    pub min_rebalance_interval: Nat,
    pub paused: bool,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            total_assets: Nat::from(250_000_000u64),
            user_balance: Nat::from(40_000_000u64),
            user_shares: Nat::from(40_000_000_000_000_000_000u128),
            apys: vec![Nat::from(850u64), Nat::from(920u64)],
            allocations: vec![Nat::from(162_500_000u64), Nat::from(87_500_000u64)],
            allowance: Nat::from(0u64),
            token_balance: Nat::from(500_000_000u64),
            share_price: Nat::from(1_000_000_000_000_000_000u128),
            total_shares: Nat::from(250_000_000_000_000_000_000u128),
            last_rebalance: Nat::from(1_700_000_000u64),
            min_rebalance_interval: Nat::from(3_600u64),
            paused: false,
        }
    }
}

type ReceiptResult = Result<ReceiptStatus, LedgerError>;

pub struct MockLedger {
    state: RefCell<LedgerState>,
    reads: RefCell<Vec<ReadCall>>,
    fail_reads: Cell<bool>,
    hold_reads: Cell<bool>,
    stalled_reads: RefCell<Vec<&'static str>>,
    held_reads: RefCell<Vec<oneshot::Sender<()>>>,
    hold_receipts: Cell<bool>,
    held_receipts: RefCell<VecDeque<oneshot::Sender<ReceiptResult>>>,
    receipt_outcome: RefCell<ReceiptResult>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self {
            state: RefCell::new(LedgerState::default()),
            reads: RefCell::new(Vec::new()),
            fail_reads: Cell::new(false),
            hold_reads: Cell::new(false),
            stalled_reads: RefCell::new(Vec::new()),
            held_reads: RefCell::new(Vec::new()),
            hold_receipts: Cell::new(false),
            held_receipts: RefCell::new(VecDeque::new()),
            receipt_outcome: RefCell::new(Ok(ReceiptStatus::Success)),
        }
    }
}

impl MockLedger {
    pub fn state_mut(&self) -> RefMut<'_, LedgerState> {
        self.state.borrow_mut()
    }

    pub fn reads(&self) -> Vec<ReadCall> {
        self.reads.borrow().clone()
    }

    pub fn reads_of(&self, function_name: &str) -> usize {
        self.reads.borrow().iter().filter(|call| call.function_name() == function_name).count()
    }

    pub fn clear_reads(&self) {
        self.reads.borrow_mut().clear();
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Reads issued while held stay pending until `release_reads`
    pub fn hold_reads(&self, hold: bool) {
        self.hold_reads.set(hold);
    }

    /// Reads of `function_name` never resolve
    pub fn stall_reads_of(&self, function_name: &'static str) {
        self.stalled_reads.borrow_mut().push(function_name);
    }

    pub fn release_reads(&self) {
        let held: Vec<_> = self.held_reads.borrow_mut().drain(..).collect();
        for release in held {
            let _ = release.send(());
        }
    }

    /// Receipts awaited while held stay pending until `release_receipt`
    pub fn hold_receipts(&self, hold: bool) {
        self.hold_receipts.set(hold);
    }

    /// Resolve the oldest pending receipt
    pub fn release_receipt(&self, outcome: ReceiptResult) {
        let next = self.held_receipts.borrow_mut().pop_front();
        if let Some(release) = next {
            let _ = release.send(outcome);
        }
    }

    pub fn held_receipts(&self) -> usize {
        self.held_receipts.borrow().len()
    }

    pub fn set_receipt_outcome(&self, outcome: ReceiptResult) {
        *self.receipt_outcome.borrow_mut() = outcome;
    }

    fn value_of(&self, call: &ReadCall) -> ReadValue {
        let state = self.state.borrow();
        match call {
            ReadCall::TotalAssets => ReadValue::Amount(state.total_assets.clone()),
            ReadCall::UserBalance { .. } => ReadValue::Amount(state.user_balance.clone()),
            ReadCall::UserShares { .. } => ReadValue::Amount(state.user_shares.clone()),
            ReadCall::CurrentApys => ReadValue::PerPool(state.apys.clone()),
            ReadCall::Allocation => ReadValue::PerPool(state.allocations.clone()),
            ReadCall::Allowance { .. } => ReadValue::Amount(state.allowance.clone()),
            ReadCall::TokenBalance { .. } => ReadValue::Amount(state.token_balance.clone()),
            ReadCall::AssetsToShares { assets } => ReadValue::Amount(shares_for(assets)),
            ReadCall::SharePrice => ReadValue::Amount(state.share_price.clone()),
            ReadCall::TotalShares => ReadValue::Amount(state.total_shares.clone()),
            ReadCall::LastRebalance => ReadValue::Amount(state.last_rebalance.clone()),
            ReadCall::MinRebalanceInterval => ReadValue::Amount(state.min_rebalance_interval.clone()),
            ReadCall::Paused => ReadValue::Flag(state.paused),
        }
    }
}

impl Ledger for MockLedger {
    async fn read(&self, call: &ReadCall) -> Result<ReadValue, LedgerError> {
        self.reads.borrow_mut().push(call.clone());

        if self.stalled_reads.borrow().contains(&call.function_name()) {
            futures::future::pending::<()>().await;
        }

        if self.hold_reads.get() {
            let (release, held) = oneshot::channel();
            self.held_reads.borrow_mut().push(release);
            let _ = held.await;
        }

        if self.fail_reads.get() {
            return Err(LedgerError::new("rpc unavailable"));
        }
        Ok(self.value_of(call))
    }

    async fn wait_for_receipt(&self, _tx_hash: &TxHash) -> Result<ReceiptStatus, LedgerError> {
        if self.hold_receipts.get() {
            let (release, held) = oneshot::channel();
            self.held_receipts.borrow_mut().push_back(release);
            return held.await.unwrap_or_else(|_| Err(LedgerError::new("receipt dropped")));
        }
        self.receipt_outcome.borrow().clone()
    }
}

// ===== WALLET =====

pub struct MockWallet {
    address: RefCell<Option<Address>>,
    pub chain: Cell<Option<u64>>,
    sent: RefCell<Vec<TransactionRequest>>,
    reject_next: Cell<bool>,
    hold_signing: Cell<bool>,
    held_signatures: RefCell<VecDeque<oneshot::Sender<()>>>,
    nonce: Cell<u64>,
}

impl MockWallet {
    fn with_session(address: Option<Address>, chain: Option<u64>) -> Self {
        Self {
            address: RefCell::new(address),
            chain: Cell::new(chain),
            sent: RefCell::new(Vec::new()),
            reject_next: Cell::new(false),
            hold_signing: Cell::new(false),
            held_signatures: RefCell::new(VecDeque::new()),
            nonce: Cell::new(0),
        }
    }

    /// Connected as `user()` on the vault chain
    pub fn connected() -> Self {
        Self::with_session(Some(user()), Some(10143))
    }

    pub fn disconnected() -> Self {
        Self::with_session(None, Some(10143))
    }

    /// Simulate an account change (`None` disconnects)
    pub fn set_session(&self, address: Option<Address>) {
        *self.address.borrow_mut() = address;
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.borrow().clone()
    }

    /// The next signature request is declined
    pub fn reject_next(&self) {
        self.reject_next.set(true);
    }

    pub fn hold_signing(&self, hold: bool) {
        self.hold_signing.set(hold);
    }

    pub fn release_signature(&self) {
        let next = self.held_signatures.borrow_mut().pop_front();
        if let Some(release) = next {
            let _ = release.send(());
        }
    }
}

impl WalletSession for MockWallet {
    fn current_address(&self) -> Option<Address> {
        self.address.borrow().clone()
    }

    fn is_connected(&self) -> bool {
        self.address.borrow().is_some()
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain.get()
    }

    async fn connect(&self) -> Result<Address, WalletError> {
        self.set_session(Some(user()));
        Ok(user())
    }

    async fn disconnect(&self) {
        self.set_session(None);
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        self.chain.set(Some(chain_id));
        Ok(())
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        self.sent.borrow_mut().push(request.clone());

        if self.hold_signing.get() {
            let (release, held) = oneshot::channel();
            self.held_signatures.borrow_mut().push_back(release);
            let _ = held.await;
        }

        if self.reject_next.replace(false) {
            return Err(WalletError::Rejected { reason: "User denied transaction signature".to_string() });
        }

        let nonce = self.nonce.get() + 1;
        self.nonce.set(nonce);
        Ok(TxHash::new(format!("0x{:064x}", nonce)))
    }
}

// ===== NOTIFIER =====

#[derive(Default)]
pub struct MockNotifier {
    successes: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl MockNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn total(&self) -> usize {
        self.successes.borrow().len() + self.errors.borrow().len()
    }
}

impl Notifier for MockNotifier {
    fn notify_success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn notify_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
