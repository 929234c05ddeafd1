#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod health;
pub mod lifecycle;
pub mod notifications;
pub mod operations;
pub mod taxonomy;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use classify::{Classification, classify, classify_error};
pub use config::DashboardConfig;
pub use error::Error;
pub use health::HealthReport;
pub use lifecycle::execute::{SubmittedTransaction, TxOutcome, execute_transaction};
#[cfg(feature = "native")]
pub use lifecycle::timeout::with_timeout;
pub use lifecycle::{TransactionState, TransactionTracker, TransitionOrder, TxStatus};
pub use notifications::{Toast, ToastKind, ToastQueue};
pub use operations::{AdminOperation, OperationCategory, execute_admin_operation};
pub use taxonomy::{ContractError, ErrorEntry, WalletError};
pub use types::{ClassifiedError, RawError};
