pub mod execute;
#[cfg(feature = "native")]
pub mod timeout;

use serde::Serialize;

use crate::types::RawError;

pub const DEFAULT_PENDING_MESSAGE: &str = "Waiting for wallet confirmation...";
pub const DEFAULT_CONFIRMING_MESSAGE: &str = "Transaction submitted, waiting for confirmation...";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Transaction confirmed!";
pub const DEFAULT_ERROR_MESSAGE: &str = "Transaction failed";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TxStatus {
    #[default]
    Idle,
    Pending,
    Confirming,
    Success,
    Error,
}

impl TxStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Pending | Self::Confirming)
    }
}

/// Read model of one transaction attempt, rendered directly by a status
/// indicator.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionState {
    pub status: TxStatus,
    pub message: String,
    pub tx_hash: Option<String>,
    pub error: Option<RawError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOrder {
    Expected,
    OutOfOrder,
}

/// Whether moving from `from` to `to` follows
/// `idle -> pending -> confirming -> (success | error)`.
///
/// A new attempt may start from `idle` or from a finished attempt; `error`
/// and `idle` are reachable from anywhere.
pub fn transition_order(from: TxStatus, to: TxStatus) -> TransitionOrder {
    let expected = match to {
        TxStatus::Idle | TxStatus::Error => true,
        TxStatus::Pending => !from.is_in_flight(),
        TxStatus::Confirming => from == TxStatus::Pending,
        TxStatus::Success => from == TxStatus::Confirming,
    };
    if expected {
        TransitionOrder::Expected
    } else {
        TransitionOrder::OutOfOrder
    }
}

/// Tracks one logical operation from intent to outcome.
///
/// Transitions are independent setters: an out-of-order call is logged but
/// still applied, so callers that skip a step (e.g. report success straight
/// from `idle`) keep working. Reset with [`TransactionTracker::reset`] to
/// reuse the tracker for a new attempt.
#[derive(Debug, Default)]
pub struct TransactionTracker {
    state: TransactionState,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    pub fn snapshot(&self) -> TransactionState {
        self.state.clone()
    }

    pub fn status(&self) -> TxStatus {
        self.state.status
    }

    fn apply(&mut self, next: TransactionState) {
        let from = self.state.status;
        if transition_order(from, next.status) == TransitionOrder::OutOfOrder {
            tracing::warn!(%from, to = %next.status, "out-of-order transaction transition");
        } else {
            tracing::debug!(%from, to = %next.status, "transaction transition");
        }
        self.state = next;
    }

    pub fn set_idle(&mut self) {
        self.apply(TransactionState::default());
    }

    pub fn reset(&mut self) {
        self.set_idle();
    }

    pub fn set_pending(&mut self, message: Option<&str>) {
        self.apply(TransactionState {
            status: TxStatus::Pending,
            message: message.unwrap_or(DEFAULT_PENDING_MESSAGE).to_string(),
            tx_hash: None,
            error: None,
        });
    }

    pub fn set_confirming(&mut self, tx_hash: impl Into<String>, message: Option<&str>) {
        self.apply(TransactionState {
            status: TxStatus::Confirming,
            message: message.unwrap_or(DEFAULT_CONFIRMING_MESSAGE).to_string(),
            tx_hash: Some(tx_hash.into()),
            error: None,
        });
    }

    /// Marks the attempt finalized. Without an explicit hash the one recorded
    /// while confirming is kept.
    pub fn set_success(&mut self, message: Option<&str>, tx_hash: Option<String>) {
        let tx_hash = tx_hash.or_else(|| self.state.tx_hash.take());
        self.apply(TransactionState {
            status: TxStatus::Success,
            message: message.unwrap_or(DEFAULT_SUCCESS_MESSAGE).to_string(),
            tx_hash,
            error: None,
        });
    }

    /// Display message priority: `message`, the raw `reason`, the raw
    /// `message`, then a generic failure string.
    pub fn set_error(&mut self, error: RawError, message: Option<&str>) {
        let message = message
            .filter(|m| !m.is_empty())
            .or_else(|| error.reason().filter(|r| !r.is_empty()))
            .or_else(|| error.message().filter(|m| !m.is_empty()))
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string();
        self.apply(TransactionState {
            status: TxStatus::Error,
            message,
            tx_hash: None,
            error: Some(error),
        });
    }
}
