pub mod evidence;
pub mod patterns;

use strum::IntoEnumIterator;

use crate::taxonomy::{
    ContractError, ErrorEntry, FALLBACK_MESSAGE, FALLBACK_TITLE, USER_REJECTED_CODE, WalletError,
};
use crate::types::{ClassifiedError, RawCode, RawError};
use evidence::Evidence;

const INSUFFICIENT_FUNDS_TEXT: &str = "insufficient funds";

/// Outcome of classifying a [`RawError`]. Downstream code branches on this
/// instead of on raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Wallet(WalletError),
    Contract(ContractError),
    /// No known code matched; a cleaned free-text reason was recovered.
    Reason(String),
    Unknown,
}

impl Classification {
    pub fn entry(&self) -> Option<ErrorEntry> {
        match self {
            Self::Wallet(w) => Some(w.entry()),
            Self::Contract(c) => Some(c.entry()),
            Self::Reason(_) | Self::Unknown => None,
        }
    }

    pub fn to_classified(&self) -> ClassifiedError {
        match self {
            Self::Wallet(w) => w.entry().into(),
            Self::Contract(c) => c.entry().into(),
            Self::Reason(reason) => ClassifiedError {
                title: FALLBACK_TITLE.to_string(),
                message: reason.clone(),
            },
            Self::Unknown => ClassifiedError {
                title: FALLBACK_TITLE.to_string(),
                message: FALLBACK_MESSAGE.to_string(),
            },
        }
    }
}

impl From<Classification> for ClassifiedError {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Reason(message) => ClassifiedError {
                title: FALLBACK_TITLE.to_string(),
                message,
            },
            other => other.to_classified(),
        }
    }
}

fn is_user_rejection(raw: &RawError) -> bool {
    match raw.code() {
        Some(RawCode::Number(n)) => n == USER_REJECTED_CODE,
        Some(RawCode::Text(t)) => t == WalletError::ActionRejected.marker(),
        None => false,
    }
}

/// Maps any raw error onto the taxonomy. Total: every input, including
/// `null`, yields a classification.
///
/// Wallet codes short-circuit before any text search. After that,
/// structured revert signatures beat bare substrings, then the framework
/// heuristics, then cleaned free text.
pub fn classify(raw: &RawError) -> Classification {
    let classification = classify_raw(raw);
    tracing::debug!(?classification, "classified transaction error");
    classification
}

pub fn classify_error(raw: &RawError) -> ClassifiedError {
    classify(raw).into()
}

fn classify_raw(raw: &RawError) -> Classification {
    if is_user_rejection(raw) {
        return Classification::Wallet(WalletError::ActionRejected);
    }
    if raw.has_code(WalletError::NetworkError.marker()) {
        return Classification::Wallet(WalletError::NetworkError);
    }
    if raw.has_code(WalletError::Timeout.marker()) {
        return Classification::Wallet(WalletError::Timeout);
    }

    let evidence = Evidence::collect(raw);
    let combined = evidence.combined();

    if raw.has_code(WalletError::InsufficientFunds.marker())
        || combined.to_lowercase().contains(INSUFFICIENT_FUNDS_TEXT)
    {
        return Classification::Wallet(WalletError::InsufficientFunds);
    }

    let strict = ContractError::iter().find(|c| patterns::matches_strict(&combined, c.name()));
    if let Some(code) = strict {
        return Classification::Contract(code);
    }
    let loose = ContractError::iter().find(|c| combined.contains(c.name()));
    if let Some(code) = loose {
        return Classification::Contract(code);
    }

    if combined.contains("Ownable") && combined.contains("caller is not the owner") {
        return Classification::Contract(ContractError::OwnableUnauthorizedAccount);
    }
    if combined.contains("Pausable") && combined.contains("paused") {
        return Classification::Contract(ContractError::EnforcedPause);
    }

    if let Some(reason) = evidence.first().and_then(patterns::clean_reason) {
        return Classification::Reason(reason);
    }

    Classification::Unknown
}
