//! Fixed failure taxonomy: contract custom errors and wallet/transport errors.
//!
//! Both tables are `'static` and never mutated. [`ContractError`] iterates in
//! definition order, which the classifier relies on when one code is a
//! substring of another.

use serde::Serialize;

use crate::types::ClassifiedError;

pub const FALLBACK_TITLE: &str = "Error";
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Numeric code wallets use for a user rejection (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

impl From<ErrorEntry> for ClassifiedError {
    fn from(entry: ErrorEntry) -> Self {
        ClassifiedError {
            title: entry.title.to_string(),
            message: entry.message.to_string(),
        }
    }
}

/// Custom errors declared by the challenge contract, in definition order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum ContractError {
    // Ownership & Security
    TransferToZeroAddress,
    TransferToCurrentOwner,
    TransferToContract,
    TransferDelayNotMet,
    NoTransferPending,
    OnlyPendingOwner,
    OwnershipRenunciationNotInitiated,
    RenunciationDelayNotMet,
    OwnershipRenunciationInProgress,
    // Access Control
    Unauthorized,
    VerifierCannotBeOwner,
    OwnableUnauthorizedAccount,
    // Address & Config
    InvalidAddress,
    DuplicateAddresses,
    // Token
    TokenNotSupported,
    TokenAlreadySupported,
    TokenNotFound,
    InvalidTokenConfig,
    FundsLocked,
    // Fee
    NoPendingUpdate,
    UpdateNotReady,
    #[strum(serialize = "USDCFeeZero")]
    UsdcFeeZero,
    #[strum(serialize = "USDCFeeTooLow")]
    UsdcFeeTooLow,
    #[strum(serialize = "USDCFeeOverflow")]
    UsdcFeeOverflow,
    FeeChangeTooLarge,
    InsufficientFee,
    // Duration & Time
    InvalidDuration,
    DurationTooLarge,
    MinDurationAboveMax,
    MaxDurationAboveAbsolute,
    MinDurationBelowAbsolute,
    // Grace Period
    GracePeriodCannotBeLessThanADay,
    GracePeriodTooLarge,
    GracePeriodActive,
    GracePeriodTooLong,
    // Lock Multiplier
    LockMultiplierTooLow,
    LockMultiplierTooHigh,
    LockMultiplierCausesOverflow,
    // Penalty
    MinPenaltyPercentageMustBeGreaterThan5,
    MinPenaltyPercentageHigherThan50,
    InvalidPenaltyPercent,
    PenaltyPercentLessThanMinimum,
    // Recovery
    NoTokensToRecover,
    CannotRecoverLockedFunds,
    CannotRecoverStakedTokens,
    RecoveryFailed,
    // Challenge
    ChallengeNotExpired,
    ChallengeActive,
    ChallengeSuccessful,
    ChallengeAlreadySuccess,
    ChallengeAlreadyWithdrawn,
    CannotSweepLock,
    CannotSweepPartialPenalty,
    // Price & Oracle
    StalePrice,
    InvalidPriceData,
    PriceOracleNotSet,
    // Transfer
    EthTransferFailed,
    FeeTransferFailed,
    TokenTransferFailed,
    NoPendingWithdrawal,
    WithdrawalClaimFailed,
    // Contract State
    EnforcedPause,
    ExpectedPause,
    // Input Validation
    InvalidInput,
    InvalidCount,
    CountTooLarge,
}

impl ContractError {
    /// Custom error name as declared by the contract.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn entry(self) -> ErrorEntry {
        let (title, message) = match self {
            Self::TransferToZeroAddress => (
                "Invalid Transfer",
                "Cannot transfer ownership to the zero address.",
            ),
            Self::TransferToCurrentOwner => (
                "Invalid Transfer",
                "Cannot transfer ownership to the current owner.",
            ),
            Self::TransferToContract => (
                "Invalid Transfer",
                "Cannot transfer ownership to a contract address. Use a multi-sig wallet or whitelist the address first.",
            ),
            Self::TransferDelayNotMet => (
                "Delay Required",
                "The 48-hour transfer delay has not been met. Please wait for the delay period to complete.",
            ),
            Self::NoTransferPending => (
                "No Pending Transfer",
                "There is no ownership transfer currently pending.",
            ),
            Self::OnlyPendingOwner => (
                "Access Denied",
                "Only the pending owner can accept the ownership transfer.",
            ),
            Self::OwnershipRenunciationNotInitiated => (
                "Not Initiated",
                "Ownership renunciation has not been scheduled yet.",
            ),
            Self::RenunciationDelayNotMet => (
                "Delay Required",
                "The 7-day renunciation delay has not been met. Please wait for the delay period to complete.",
            ),
            Self::OwnershipRenunciationInProgress => (
                "Renunciation Pending",
                "Ownership renunciation is already in progress. Cancel it first to transfer ownership.",
            ),
            Self::Unauthorized => (
                "Access Denied",
                "You don't have permission to perform this action.",
            ),
            Self::VerifierCannotBeOwner => (
                "Invalid Configuration",
                "The verifier address cannot be the same as the owner address.",
            ),
            Self::OwnableUnauthorizedAccount => (
                "Access Denied",
                "Only the contract owner can perform this action.",
            ),
            Self::InvalidAddress => (
                "Invalid Address",
                "The provided address is invalid. Please check the format.",
            ),
            Self::DuplicateAddresses => (
                "Duplicate Addresses",
                "All addresses must be unique. Verifier, charity, and treasury cannot share addresses.",
            ),
            Self::TokenNotSupported => (
                "Token Not Supported",
                "This token is not currently supported by the contract.",
            ),
            Self::TokenAlreadySupported => (
                "Token Exists",
                "This token has already been added to the contract.",
            ),
            Self::TokenNotFound => ("Token Not Found", "The specified token could not be found."),
            Self::InvalidTokenConfig => (
                "Invalid Configuration",
                "The token configuration is invalid. Check decimals and price feed.",
            ),
            Self::FundsLocked => (
                "Funds Locked",
                "This token has locked funds in active challenges and cannot be removed.",
            ),
            Self::NoPendingUpdate => (
                "No Pending Update",
                "There is no fee update currently pending.",
            ),
            Self::UpdateNotReady => (
                "Update Not Ready",
                "The 24-hour fee update delay period has not completed yet.",
            ),
            Self::UsdcFeeZero => ("Invalid Fee", "Fee cannot be zero."),
            Self::UsdcFeeTooLow => ("Fee Too Low", "Fee must be at least 0.1 USDC."),
            Self::UsdcFeeOverflow => ("Invalid Fee", "The fee value is too large."),
            Self::FeeChangeTooLarge => (
                "Change Too Large",
                "Fee cannot be changed by more than 5x in a single update.",
            ),
            Self::InsufficientFee => (
                "Insufficient Fee",
                "The fee amount provided is insufficient.",
            ),
            Self::InvalidDuration => (
                "Invalid Duration",
                "Challenge duration must be within the allowed range.",
            ),
            Self::DurationTooLarge => (
                "Duration Too Large",
                "The specified duration exceeds the maximum allowed (2 years).",
            ),
            Self::MinDurationAboveMax => (
                "Invalid Configuration",
                "Minimum duration cannot exceed maximum duration.",
            ),
            Self::MaxDurationAboveAbsolute => (
                "Duration Too Large",
                "Maximum duration cannot exceed 2 years.",
            ),
            Self::MinDurationBelowAbsolute => (
                "Duration Too Short",
                "Minimum duration cannot be less than 1 minute.",
            ),
            Self::GracePeriodCannotBeLessThanADay => (
                "Period Too Short",
                "Grace period must be at least 1 day.",
            ),
            Self::GracePeriodTooLarge => ("Period Too Long", "Grace period cannot exceed 30 days."),
            Self::GracePeriodActive => (
                "Grace Period Active",
                "The grace period has not expired yet. Wait until it ends to sweep.",
            ),
            Self::GracePeriodTooLong => (
                "Period Too Long",
                "The specified grace period is too long.",
            ),
            Self::LockMultiplierTooLow => (
                "Multiplier Too Low",
                "Lock multiplier must be at least 3x.",
            ),
            Self::LockMultiplierTooHigh => (
                "Multiplier Too High",
                "Lock multiplier cannot exceed 15x.",
            ),
            Self::LockMultiplierCausesOverflow => (
                "Invalid Configuration",
                "The lock multiplier would cause arithmetic overflow.",
            ),
            Self::MinPenaltyPercentageMustBeGreaterThan5 => (
                "Invalid Percentage",
                "Minimum penalty percentage must be greater than 5%.",
            ),
            Self::MinPenaltyPercentageHigherThan50 => (
                "Invalid Percentage",
                "Minimum penalty percentage cannot exceed 50%.",
            ),
            Self::InvalidPenaltyPercent => (
                "Invalid Percentage",
                "Penalty percentage must be between 0 and 100.",
            ),
            Self::PenaltyPercentLessThanMinimum => (
                "Penalty Too Low",
                "Penalty percentage is below the minimum required.",
            ),
            Self::NoTokensToRecover => (
                "Nothing to Recover",
                "There are no recoverable funds available.",
            ),
            Self::CannotRecoverLockedFunds => (
                "Funds Locked",
                "Cannot recover funds that are locked in active challenges.",
            ),
            Self::CannotRecoverStakedTokens => (
                "Funds Locked",
                "Cannot recover tokens that are currently staked.",
            ),
            Self::RecoveryFailed => ("Recovery Failed", "The fund recovery operation failed."),
            Self::ChallengeNotExpired => (
                "Challenge Active",
                "This challenge has not expired yet.",
            ),
            Self::ChallengeActive => (
                "Challenge Active",
                "This challenge is still active and cannot be withdrawn.",
            ),
            Self::ChallengeSuccessful => (
                "Challenge Successful",
                "This challenge was marked successful and cannot be swept.",
            ),
            Self::ChallengeAlreadySuccess => (
                "Already Verified",
                "This challenge has already been marked as successful.",
            ),
            Self::ChallengeAlreadyWithdrawn => (
                "Already Withdrawn",
                "Funds have already been withdrawn from this challenge.",
            ),
            Self::CannotSweepLock => (
                "Cannot Sweep",
                "LOCK penalty challenges cannot be swept by admin.",
            ),
            Self::CannotSweepPartialPenalty => (
                "Cannot Sweep",
                "Cannot sweep challenges with partial penalties.",
            ),
            Self::StalePrice => ("Stale Price", "The price oracle data is stale. Try again later."),
            Self::InvalidPriceData => (
                "Invalid Price",
                "The price data from the oracle is invalid.",
            ),
            Self::PriceOracleNotSet => (
                "Oracle Not Set",
                "No price oracle has been configured for this token.",
            ),
            Self::EthTransferFailed => (
                "Transfer Failed",
                "ETH transfer failed. The recipient may not accept ETH.",
            ),
            Self::FeeTransferFailed => ("Fee Failed", "Fee transfer to treasury failed."),
            Self::TokenTransferFailed => ("Transfer Failed", "Token transfer failed."),
            Self::NoPendingWithdrawal => (
                "No Withdrawal",
                "You have no pending withdrawal to claim.",
            ),
            Self::WithdrawalClaimFailed => (
                "Claim Failed",
                "Failed to claim the pending withdrawal.",
            ),
            Self::EnforcedPause => (
                "Contract Paused",
                "The contract is currently paused. Operations are temporarily disabled.",
            ),
            Self::ExpectedPause => ("Not Paused", "The contract is not currently paused."),
            Self::InvalidInput => ("Invalid Input", "The provided input is invalid."),
            Self::InvalidCount => ("Invalid Count", "The specified count is invalid."),
            Self::CountTooLarge => (
                "Count Too Large",
                "The specified count exceeds the maximum allowed.",
            ),
        };
        ErrorEntry {
            code: self.into(),
            title,
            message,
        }
    }
}

/// Wallet and transport failures, keyed by the machine code the
/// wallet or contract-binding layer sets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletError {
    ActionRejected,
    InsufficientFunds,
    NetworkError,
    Timeout,
    CallException,
}

impl WalletError {
    pub fn marker(self) -> &'static str {
        self.into()
    }

    pub fn entry(self) -> ErrorEntry {
        let (title, message) = match self {
            Self::ActionRejected => (
                "Transaction Cancelled",
                "You rejected the transaction in your wallet.",
            ),
            Self::InsufficientFunds => (
                "Insufficient Funds",
                "Your wallet doesn't have enough ETH to pay for gas fees.",
            ),
            Self::NetworkError => (
                "Network Error",
                "Unable to connect to the network. Please check your connection.",
            ),
            Self::Timeout => ("Request Timeout", "The request timed out. Please try again."),
            Self::CallException => ("Contract Error", "The contract call failed."),
        };
        ErrorEntry {
            code: self.into(),
            title,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn contract_codes_round_trip_through_strings() {
        for code in ContractError::iter() {
            let name = code.to_string();
            assert_eq!(name.parse::<ContractError>().ok(), Some(code), "{name}");
            assert_eq!(code.entry().code, name);
        }
        assert_eq!(ContractError::UsdcFeeZero.as_ref(), "USDCFeeZero");
        assert_eq!(
            "FeeChangeTooLarge".parse::<ContractError>().ok(),
            Some(ContractError::FeeChangeTooLarge)
        );
        assert_eq!("NotARealError".parse::<ContractError>().ok(), None);
    }

    #[test]
    fn every_entry_is_renderable() {
        let entries = ContractError::iter()
            .map(ContractError::entry)
            .chain(WalletError::iter().map(WalletError::entry));
        for entry in entries {
            assert!(!entry.title.is_empty(), "{}", entry.code);
            assert!(entry.title.len() <= 30, "{}", entry.code);
            assert!(!entry.message.is_empty(), "{}", entry.code);
            assert!(entry.message.len() <= 200, "{}", entry.code);
        }
    }

    #[test]
    fn contract_codes_are_unique_and_in_definition_order() {
        let names: Vec<&'static str> = ContractError::iter().map(Into::into).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.first().copied(), Some("TransferToZeroAddress"));
        assert_eq!(names.last().copied(), Some("CountTooLarge"));

        let not_supported = names.iter().position(|n| *n == "TokenNotSupported");
        let already_supported = names.iter().position(|n| *n == "TokenAlreadySupported");
        assert!(not_supported < already_supported);
    }

    #[test]
    fn wallet_codes_use_wire_markers() {
        assert_eq!(WalletError::ActionRejected.as_ref(), "ACTION_REJECTED");
        assert_eq!(WalletError::NetworkError.as_ref(), "NETWORK_ERROR");
        assert_eq!(
            "INSUFFICIENT_FUNDS".parse::<WalletError>().ok(),
            Some(WalletError::InsufficientFunds)
        );
        assert_eq!(WalletError::Timeout.entry().title, "Request Timeout");
    }
}
