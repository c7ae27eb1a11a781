//! Shared domain types

pub mod address;
pub mod pools;
pub mod snapshot;
pub mod transactions;

pub use address::{Address, TxHash};
pub use pools::Pool;
pub use snapshot::ChainSnapshot;
pub use transactions::{
    ActionKind, ActionRecord, Contract, DepositFlowState, DepositOutcome, ReceiptStatus, RequestKind,
    TransactionRequest, TransactionState,
};
