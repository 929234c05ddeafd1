#![expect(
    clippy::panic,
    reason = "test code uses panic for concise assertions"
)]

use std::cell::RefCell;

use touchgrass_admin_core::notifications::ToastKind;
use touchgrass_admin_core::{
    AdminOperation, DashboardConfig, RawError, SubmittedTransaction, ToastQueue,
    TransactionTracker, TxOutcome, TxStatus, execute_admin_operation, execute_transaction,
};

const ADMIN: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Chain stub: hands out sequential hashes and records the methods it saw.
#[derive(Default)]
struct StubChain {
    sent: RefCell<Vec<String>>,
}

struct StubTx {
    hash: String,
    finality: Result<u64, RawError>,
}

impl SubmittedTransaction for StubTx {
    type Receipt = u64;

    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self) -> Result<u64, RawError> {
        self.finality
    }
}

impl StubChain {
    fn send(&self, op: &AdminOperation, revert: Option<&str>) -> StubTx {
        let mut sent = self.sent.borrow_mut();
        sent.push(op.method().to_string());
        StubTx {
            hash: format!("0x{:064x}", sent.len()),
            finality: match revert {
                Some(name) => Err(RawError::new(serde_json::json!({
                    "code": "CALL_EXCEPTION",
                    "shortMessage": format!("execution reverted: {name}()"),
                }))),
                None => Ok(sent.len() as u64),
            },
        }
    }
}

#[tokio::test]
async fn admin_session_runs_operations_and_surfaces_toasts() {
    let config = DashboardConfig::from_lookup(|_| None)
        .unwrap_or_else(|e| panic!("default config rejected: {e}"));
    assert!(config.is_admin(&ADMIN.to_uppercase().replacen("0X", "0x", 1)));

    let chain = StubChain::default();
    let mut tracker = TransactionTracker::new();
    let mut toasts = ToastQueue::new();

    let pause = AdminOperation::Pause;
    let outcome = execute_admin_operation(&mut tracker, &pause, |op| {
        let tx = chain.send(op, None);
        async move { Ok(tx) }
    })
    .await;
    toasts.show_outcome(&outcome, &pause.success_message());
    assert!(outcome.is_success());
    assert_eq!(tracker.status(), TxStatus::Success);
    assert_eq!(tracker.state().message, "Contract paused");

    let recover = AdminOperation::RecoverErc20BySymbol {
        symbol: "USDC".into(),
        to: RECIPIENT.into(),
    };
    let outcome = execute_admin_operation(&mut tracker, &recover, |op| {
        let tx = chain.send(op, Some("CannotRecoverStakedTokens"));
        async move { Ok(tx) }
    })
    .await;
    toasts.show_outcome(&outcome, &recover.success_message());
    assert_eq!(tracker.status(), TxStatus::Error);
    assert_eq!(tracker.state().tx_hash, None);

    let bad = AdminOperation::SetTreasuryWallet {
        address: "treasury.eth".into(),
    };
    let outcome = execute_admin_operation(&mut tracker, &bad, |op| {
        let tx = chain.send(op, None);
        async move { Ok(tx) }
    })
    .await;
    toasts.show_outcome(&outcome, &bad.success_message());

    assert_eq!(
        *chain.sent.borrow(),
        vec!["pause".to_string(), "recoverERC20BySymbol".to_string()]
    );

    let shown: Vec<(ToastKind, &str)> = toasts
        .toasts()
        .iter()
        .map(|t| (t.kind, t.title.as_str()))
        .collect();
    assert_eq!(
        shown,
        vec![
            (ToastKind::Success, "Success"),
            (ToastKind::Error, "Funds Locked"),
            (ToastKind::Error, "Invalid Address"),
        ]
    );
}

#[tokio::test]
async fn submission_rejection_never_reaches_confirming() {
    let mut tracker = TransactionTracker::new();
    let outcome: TxOutcome<u64> = execute_transaction(
        &mut tracker,
        || async {
            Err::<StubTx, _>(RawError::new(serde_json::json!({
                "code": 4001,
                "message": "User rejected the request.",
            })))
        },
        "unused",
    )
    .await;

    let Some(error) = outcome.classified_error() else {
        panic!("rejection must fail");
    };
    assert_eq!(error.title, "Transaction Cancelled");
    assert_eq!(tracker.state().message, error.message);
    assert_eq!(tracker.state().tx_hash, None);
}
