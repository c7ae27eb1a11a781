//! Submit → confirm → terminal handling for a single write
//!
//! The caller holds the slot guard; this module only moves the slot
//! through its states and handles the terminal transition. Terminal
//! handling never awaits a read: the post-success refresh is requested,
//! not waited for.

use tracing::{info, warn};
use crate::_4_LEDGER::{Ledger, Notifier, WalletSession};
use crate::_5_INFORMATIONAL::notifications;
use crate::infrastructure::{Result, VaultError};
use crate::types::{
    ActionKind, ActionRecord, ReceiptStatus, RequestKind, TransactionRequest, TransactionState, TxHash,
};
use crate::VaultController;

impl<L: Ledger, W: WalletSession, N: Notifier> VaultController<L, W, N> {
    /// Sign, broadcast and confirm one request inside `action`'s slot
    pub(crate) async fn execute_transaction(
        &self,
        action: ActionKind,
        request: TransactionRequest,
    ) -> Result<TxHash> {
        let kind = request.kind();
        self.slots.transition(action, TransactionState::Submitting);
        info!(
            action = action.as_str(),
            contract = ?request.target(),
            call = request.function_name(),
            "📝 submitting transaction"
        );

        let tx_hash = match self.wallet.send_transaction(&request).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                let error = VaultError::WalletRejected { request: kind, reason: e.to_string() };
                return Err(self.fail_transaction(action, kind, None, error));
            }
        };

        self.slots.transition(action, TransactionState::Confirming);
        info!(action = action.as_str(), tx_hash = %tx_hash, "⏳ awaiting receipt");

        match self.ledger.wait_for_receipt(&tx_hash).await {
            Ok(ReceiptStatus::Success) => {
                self.complete_transaction(action, &request, &tx_hash);
                Ok(tx_hash)
            }
            Ok(ReceiptStatus::Reverted) => {
                let error = VaultError::TransactionReverted { request: kind, tx_hash: tx_hash.clone() };
                Err(self.fail_transaction(action, kind, Some(tx_hash), error))
            }
            Err(e) => {
                let error = VaultError::ReceiptUnavailable {
                    request: kind,
                    tx_hash: tx_hash.clone(),
                    reason: e.to_string(),
                };
                Err(self.fail_transaction(action, kind, Some(tx_hash), error))
            }
        }
    }

    /// Success path: record, clear the input, request a refresh and notify
    fn complete_transaction(&self, action: ActionKind, request: &TransactionRequest, tx_hash: &TxHash) {
        self.slots.transition(action, TransactionState::Succeeded);
        info!(action = action.as_str(), tx_hash = %tx_hash, "✅ {} confirmed", request.function_name());

        self.history.record(ActionRecord {
            action,
            request: request.kind(),
            tx_hash: Some(tx_hash.clone()),
            success: true,
            details: format!("{} confirmed", request.function_name()),
        });

        match request.kind() {
            RequestKind::Deposit => self.deposit_form.clear_input(),
            RequestKind::Withdraw => self.set_withdraw_input(""),
            RequestKind::Approve | RequestKind::Rebalance => {}
        }

        self.refresh_all();

        notifications::dispatch_success(&self.notifier, request.kind());
    }

    /// Failure path; returns the error for the caller to propagate
    fn fail_transaction(
        &self,
        action: ActionKind,
        kind: RequestKind,
        tx_hash: Option<TxHash>,
        error: VaultError,
    ) -> VaultError {
        self.slots.transition(action, TransactionState::Failed);
        warn!(action = action.as_str(), "❌ {}", error);

        self.history.record(ActionRecord {
            action,
            request: kind,
            tx_hash,
            success: false,
            details: error.to_string(),
        });

        notifications::dispatch_failure(&self.notifier, kind, &error);
        error
    }
}
