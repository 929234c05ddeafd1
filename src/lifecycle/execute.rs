use std::future::Future;

use crate::classify::classify_error;
use crate::lifecycle::TransactionTracker;
use crate::types::{ClassifiedError, RawError};

/// A transaction the network has accepted, identified by its hash, whose
/// finality can be awaited.
pub trait SubmittedTransaction {
    type Receipt;

    fn hash(&self) -> &str;

    fn wait(self) -> impl Future<Output = Result<Self::Receipt, RawError>>;
}

/// Result of [`execute_transaction`]. Failure is a routine outcome, so it is
/// a variant rather than an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOutcome<R> {
    Confirmed { tx_hash: String, receipt: R },
    Failed { error: ClassifiedError, raw: RawError },
}

impl<R> TxOutcome<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    pub fn classified_error(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Confirmed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Confirmed { tx_hash, .. } => Some(tx_hash),
            Self::Failed { .. } => None,
        }
    }
}

/// Records a classified failure on the tracker and builds the outcome.
pub fn record_failure<R>(tracker: &mut TransactionTracker, raw: RawError) -> TxOutcome<R> {
    let error = classify_error(&raw);
    tracing::warn!(title = %error.title, message = %error.message, "transaction failed");
    tracker.set_error(raw.clone(), Some(&error.message));
    TxOutcome::Failed { error, raw }
}

/// Drives `tracker` through pending, confirming and success around the two
/// suspension points: `submit` (wallet signs, network accepts) and
/// [`SubmittedTransaction::wait`] (finality).
///
/// The `&mut` borrow is held across both awaits, so no other transition can
/// interleave on the same tracker.
pub async fn execute_transaction<F, Fut, T>(
    tracker: &mut TransactionTracker,
    submit: F,
    success_message: &str,
) -> TxOutcome<T::Receipt>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, RawError>>,
    T: SubmittedTransaction,
{
    tracker.set_pending(None);

    let tx = match submit().await {
        Ok(tx) => tx,
        Err(raw) => return record_failure(tracker, raw),
    };
    let tx_hash = tx.hash().to_string();
    tracker.set_confirming(tx_hash.clone(), None);

    match tx.wait().await {
        Ok(receipt) => {
            tracing::info!(%tx_hash, "transaction confirmed");
            tracker.set_success(Some(success_message), Some(tx_hash.clone()));
            TxOutcome::Confirmed { tx_hash, receipt }
        }
        Err(raw) => record_failure(tracker, raw),
    }
}
