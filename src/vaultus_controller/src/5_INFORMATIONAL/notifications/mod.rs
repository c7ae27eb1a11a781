//! User-visible notification texts
//!
//! Called exactly once per terminal transition. Only wallet rejections,
//! reverts and lost receipts are ever shown.

use crate::_4_LEDGER::Notifier;
use crate::infrastructure::{VaultError, ASSET_SYMBOL};
use crate::types::RequestKind;

pub fn success_message(kind: RequestKind) -> String {
    match kind {
        RequestKind::Approve => format!("{} approved successfully!", ASSET_SYMBOL),
        RequestKind::Deposit => "Deposit successful!".to_string(),
        RequestKind::Withdraw => "Withdrawal successful!".to_string(),
        RequestKind::Rebalance => "Vault rebalanced successfully!".to_string(),
    }
}

pub fn failure_message(kind: RequestKind, error: &VaultError) -> String {
    let label = kind.label();
    match error {
        VaultError::WalletRejected { reason, .. } => format!("{} cancelled: {}", label, reason),
        VaultError::TransactionReverted { tx_hash, .. } => {
            format!("{} failed: transaction {} reverted", label, tx_hash)
        }
        VaultError::ReceiptUnavailable { reason, .. } => {
            format!("{} failed: could not confirm transaction ({})", label, reason)
        }
        other => format!("{} failed: {}", label, other),
    }
}

pub fn dispatch_success<N: Notifier>(notifier: &N, kind: RequestKind) {
    notifier.notify_success(&success_message(kind));
}

pub fn dispatch_failure<N: Notifier>(notifier: &N, kind: RequestKind, error: &VaultError) {
    if error.is_user_visible() {
        notifier.notify_error(&failure_message(kind, error));
    }
}
