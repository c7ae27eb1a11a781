//! Deposit flow tests

use candid::Nat;
use futures::executor::block_on;
use futures::{pin_mut, poll};
use crate::infrastructure::{PreconditionError, VaultError};
use crate::testutils::*;
use crate::types::{ActionKind, DepositFlowState, DepositOutcome, ReceiptStatus, RequestKind, TransactionRequest, TransactionState};
use crate::LedgerError;

fn approve(amount: u64) -> TransactionRequest {
    TransactionRequest::Approve {
        spender: crate::VaultConfig::monad_testnet().unwrap().vault,
        amount: Nat::from(amount),
    }
}

fn deposit(amount: u64) -> TransactionRequest {
    TransactionRequest::Deposit { amount: Nat::from(amount) }
}

#[test]
fn test_sufficient_allowance_deposits_directly() {
    block_on(async {
        let controller = test_controller();
        controller.ledger().state_mut().allowance = Nat::from(500_000_000u64);
        controller.poll_once().await;
        controller.set_deposit_input("100");
        assert!(!controller.deposit_needs_approval());

        let outcome = controller.deposit().await.unwrap();

        assert!(matches!(outcome, DepositOutcome::Deposited { approval: None, .. }));
        assert_eq!(controller.wallet().sent(), vec![deposit(100_000_000)]);
        assert_eq!(controller.notifier().successes(), vec!["Deposit successful!".to_string()]);
        assert_eq!(controller.deposit_input(), "");
        assert_eq!(controller.deposit_flow(), DepositFlowState::Idle);
        assert_eq!(controller.transaction_state(ActionKind::Deposit), TransactionState::Idle);
    });
}

#[test]
fn test_missing_allowance_approves_exact_amount_first() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        assert!(controller.deposit_needs_approval());

        let outcome = controller.deposit().await.unwrap();

        assert!(matches!(outcome, DepositOutcome::Deposited { approval: Some(_), .. }));
        assert_eq!(controller.wallet().sent(), vec![approve(100_000_000), deposit(100_000_000)]);
        assert_eq!(
            controller.notifier().successes(),
            vec!["USDC approved successfully!".to_string(), "Deposit successful!".to_string()]
        );
    });
}

#[test]
fn test_deposit_waits_for_approval_receipt() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.ledger().hold_receipts(true);

        let flow = controller.deposit();
        pin_mut!(flow);

        assert!(poll!(flow.as_mut()).is_pending());
        assert_eq!(controller.deposit_flow(), DepositFlowState::Approving);
        assert_eq!(controller.transaction_state(ActionKind::Deposit), TransactionState::Confirming);
        assert_eq!(controller.wallet().sent(), vec![approve(100_000_000)]);

        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));
        assert!(poll!(flow.as_mut()).is_pending());
        assert_eq!(controller.deposit_flow(), DepositFlowState::Depositing);
        assert_eq!(controller.wallet().sent(), vec![approve(100_000_000), deposit(100_000_000)]);

        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));
        assert!(flow.await.is_ok());
        assert_eq!(controller.deposit_flow(), DepositFlowState::Idle);
    });
}

#[test]
fn test_cleared_field_during_approval_stops_after_approval() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.ledger().hold_receipts(true);

        let flow = controller.deposit();
        pin_mut!(flow);
        assert!(poll!(flow.as_mut()).is_pending());

        controller.set_deposit_input("");
        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));

        let outcome = flow.await.unwrap();
        assert!(matches!(outcome, DepositOutcome::ApprovedOnly { .. }));
        assert_eq!(controller.wallet().sent(), vec![approve(100_000_000)]);
        assert_eq!(controller.deposit_flow(), DepositFlowState::Idle);
        assert_eq!(controller.notifier().successes(), vec!["USDC approved successfully!".to_string()]);
    });
}

#[test]
fn test_raised_field_during_approval_is_not_deposited() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.ledger().hold_receipts(true);

        let flow = controller.deposit();
        pin_mut!(flow);
        assert!(poll!(flow.as_mut()).is_pending());

        controller.set_deposit_input("150");
        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));

        assert!(matches!(flow.await, Ok(DepositOutcome::ApprovedOnly { .. })));
        assert_eq!(controller.wallet().sent().len(), 1);
    });
}

#[test]
fn test_lowered_field_during_approval_deposits_new_amount() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.ledger().hold_receipts(true);

        let flow = controller.deposit();
        pin_mut!(flow);
        assert!(poll!(flow.as_mut()).is_pending());

        controller.set_deposit_input("60");
        controller.ledger().hold_receipts(false);
        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));

        assert!(flow.await.is_ok());
        assert_eq!(controller.wallet().sent(), vec![approve(100_000_000), deposit(60_000_000)]);
    });
}

#[test]
fn test_second_deposit_refused_while_in_flight() {
    block_on(async {
        let controller = test_controller();
        controller.ledger().state_mut().allowance = Nat::from(500_000_000u64);
        controller.poll_once().await;
        controller.set_deposit_input("10");
        controller.wallet().hold_signing(true);

        let first = controller.deposit();
        pin_mut!(first);
        assert!(poll!(first.as_mut()).is_pending());
        assert_eq!(controller.transaction_state(ActionKind::Deposit), TransactionState::Submitting);

        let busy = Err(VaultError::PreconditionFailed(PreconditionError::ActionInFlight { action: ActionKind::Deposit }));
        assert_eq!(controller.deposit().await, busy);

        // Still refused once broadcast and awaiting the receipt
        controller.ledger().hold_receipts(true);
        controller.wallet().release_signature();
        assert!(poll!(first.as_mut()).is_pending());
        assert_eq!(controller.transaction_state(ActionKind::Deposit), TransactionState::Confirming);
        assert_eq!(controller.deposit().await, busy);

        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));
        assert!(first.await.is_ok());
        assert_eq!(controller.wallet().sent().len(), 1);
    });
}

#[test]
fn test_rejected_approval_notifies_once() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.wallet().reject_next();
        controller.ledger().clear_reads();

        let result = controller.deposit().await;

        assert!(matches!(result, Err(VaultError::WalletRejected { request: RequestKind::Approve, .. })));
        assert_eq!(
            controller.notifier().errors(),
            vec!["Approval cancelled: user rejected: User denied transaction signature".to_string()]
        );
        assert_eq!(controller.notifier().total(), 1);
        assert!(controller.ledger().reads().is_empty());
        assert_eq!(controller.deposit_input(), "100");
        assert_eq!(controller.deposit_flow(), DepositFlowState::Idle);
        assert!(!controller.action_history()[0].success);
    });
}

#[test]
fn test_reverted_deposit_keeps_input() {
    block_on(async {
        let controller = test_controller();
        controller.ledger().state_mut().allowance = Nat::from(500_000_000u64);
        controller.poll_once().await;
        controller.set_deposit_input("25");
        controller.ledger().set_receipt_outcome(Ok(ReceiptStatus::Reverted));

        let result = controller.deposit().await;

        assert!(matches!(result, Err(VaultError::TransactionReverted { request: RequestKind::Deposit, .. })));
        assert_eq!(controller.deposit_input(), "25");
        assert_eq!(controller.notifier().errors().len(), 1);
        assert!(controller.notifier().errors()[0].starts_with("Deposit failed:"));
    });
}

#[test]
fn test_lost_receipt_is_reported() {
    block_on(async {
        let controller = test_controller();
        controller.ledger().state_mut().allowance = Nat::from(500_000_000u64);
        controller.poll_once().await;
        controller.set_deposit_input("25");
        controller.ledger().set_receipt_outcome(Err(LedgerError::new("rpc timeout")));

        let result = controller.deposit().await;

        assert!(matches!(result, Err(VaultError::ReceiptUnavailable { .. })));
        assert_eq!(controller.notifier().errors().len(), 1);
    });
}

#[test]
fn test_deposit_preconditions_make_no_calls() {
    block_on(async {
        let controller = test_controller();
        assert_eq!(
            controller.deposit().await,
            Err(VaultError::PreconditionFailed(PreconditionError::MissingAmount))
        );

        controller.set_deposit_input("1.2.3");
        assert!(matches!(controller.deposit().await, Err(VaultError::InvalidAmount(_))));

        controller.set_deposit_input("0");
        assert_eq!(
            controller.deposit().await,
            Err(VaultError::PreconditionFailed(PreconditionError::ZeroAmount))
        );

        controller.set_deposit_input("5");
        controller.wallet().set_session(None);
        assert_eq!(
            controller.deposit().await,
            Err(VaultError::PreconditionFailed(PreconditionError::WalletDisconnected))
        );

        assert!(controller.wallet().sent().is_empty());
        assert_eq!(controller.notifier().total(), 0);
    });
}

#[test]
fn test_wrong_chain_after_approval_stops_before_deposit() {
    block_on(async {
        let controller = test_controller();
        controller.poll_once().await;
        controller.set_deposit_input("100");
        controller.ledger().hold_receipts(true);

        let flow = controller.deposit();
        pin_mut!(flow);
        assert!(poll!(flow.as_mut()).is_pending());

        controller.wallet().chain.set(Some(1));
        controller.ledger().release_receipt(Ok(ReceiptStatus::Success));

        assert!(matches!(
            flow.await,
            Err(VaultError::PreconditionFailed(PreconditionError::WrongChain { .. }))
        ));
        assert_eq!(controller.wallet().sent().len(), 1);
        assert_eq!(controller.deposit_flow(), DepositFlowState::Idle);
    });
}
