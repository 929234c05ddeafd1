//! Contract write operations issued from the admin dashboard.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::format::is_valid_address;
use crate::lifecycle::TransactionTracker;
use crate::lifecycle::execute::{
    SubmittedTransaction, TxOutcome, execute_transaction, record_failure,
};
use crate::taxonomy::ContractError;
use crate::types::RawError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display, strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    TokenManagement,
    FeeConfiguration,
    FundRecovery,
    ChallengeManagement,
    WalletSettings,
    Ownership,
}

/// One admin transaction with its arguments. The strum name is the contract
/// method it calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::IntoStaticStr)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AdminOperation {
    AddToken {
        symbol: String,
        token: String,
        price_feed: String,
        decimals: u8,
        staleness: u64,
    },
    RemoveToken {
        symbol: String,
    },
    UpdatePriceFeed {
        symbol: String,
        price_feed: String,
    },
    EnableFallbackPrice {
        symbol: String,
        price: u128,
    },
    DisableFallbackPrice {
        symbol: String,
    },
    #[strum(serialize = "scheduleUSDCFeeUpdate")]
    #[serde(rename = "scheduleUSDCFeeUpdate")]
    ScheduleUsdcFeeUpdate {
        new_fee: u128,
    },
    #[strum(serialize = "cancelUSDCFeeUpdate")]
    #[serde(rename = "cancelUSDCFeeUpdate")]
    CancelUsdcFeeUpdate,
    #[strum(serialize = "executeUSDCFeeUpdate")]
    #[serde(rename = "executeUSDCFeeUpdate")]
    ExecuteUsdcFeeUpdate,
    #[strum(serialize = "setUSDCMinStake")]
    #[serde(rename = "setUSDCMinStake")]
    SetUsdcMinStake {
        min_stake: u128,
    },
    UpdateDurationBounds {
        min_duration: u64,
        max_duration: u64,
    },
    SetGracePeriod {
        days: u64,
    },
    SetLockMultiplier {
        multiplier: u64,
    },
    SetMinPenaltyPercentage {
        percent: u64,
    },
    #[strum(serialize = "recoverETH")]
    #[serde(rename = "recoverETH")]
    RecoverEth {
        to: String,
    },
    #[strum(serialize = "recoverERC20BySymbol")]
    #[serde(rename = "recoverERC20BySymbol")]
    RecoverErc20BySymbol {
        symbol: String,
        to: String,
    },
    #[strum(serialize = "recoverERC20ByAddress")]
    #[serde(rename = "recoverERC20ByAddress")]
    RecoverErc20ByAddress {
        token: String,
        to: String,
    },
    BatchRecoverTokens {
        symbols: Vec<String>,
        to: String,
    },
    SweepPenalty {
        challenge_id: u64,
    },
    SetVerifier {
        address: String,
    },
    SetCharityWallet {
        address: String,
    },
    SetTreasuryWallet {
        address: String,
    },
    WhitelistMultiSig {
        address: String,
    },
    #[strum(serialize = "removeMultiSigWhitelist")]
    #[serde(rename = "removeMultiSigWhitelist")]
    RemoveMultiSig {
        address: String,
    },
    AddTrustedRecipient {
        address: String,
    },
    RemoveTrustedRecipient {
        address: String,
    },
    Pause,
    Unpause,
    TransferOwnership {
        new_owner: String,
    },
    AcceptOwnership,
    CancelOwnershipTransfer,
    /// The contract's `renounceOwnership` only starts the delay.
    #[strum(serialize = "renounceOwnership")]
    #[serde(rename = "renounceOwnership")]
    ScheduleOwnershipRenunciation,
    ExecuteOwnershipRenunciation,
    CancelOwnershipRenunciation,
}

impl AdminOperation {
    pub fn method(&self) -> &'static str {
        self.into()
    }

    pub fn category(&self) -> OperationCategory {
        match self {
            Self::AddToken { .. }
            | Self::RemoveToken { .. }
            | Self::UpdatePriceFeed { .. }
            | Self::EnableFallbackPrice { .. }
            | Self::DisableFallbackPrice { .. } => OperationCategory::TokenManagement,
            Self::ScheduleUsdcFeeUpdate { .. }
            | Self::CancelUsdcFeeUpdate
            | Self::ExecuteUsdcFeeUpdate
            | Self::SetUsdcMinStake { .. }
            | Self::UpdateDurationBounds { .. }
            | Self::SetGracePeriod { .. }
            | Self::SetLockMultiplier { .. }
            | Self::SetMinPenaltyPercentage { .. } => OperationCategory::FeeConfiguration,
            Self::RecoverEth { .. }
            | Self::RecoverErc20BySymbol { .. }
            | Self::RecoverErc20ByAddress { .. }
            | Self::BatchRecoverTokens { .. } => OperationCategory::FundRecovery,
            Self::SweepPenalty { .. } => OperationCategory::ChallengeManagement,
            Self::SetVerifier { .. }
            | Self::SetCharityWallet { .. }
            | Self::SetTreasuryWallet { .. }
            | Self::WhitelistMultiSig { .. }
            | Self::RemoveMultiSig { .. }
            | Self::AddTrustedRecipient { .. }
            | Self::RemoveTrustedRecipient { .. } => OperationCategory::WalletSettings,
            Self::Pause
            | Self::Unpause
            | Self::TransferOwnership { .. }
            | Self::AcceptOwnership
            | Self::CancelOwnershipTransfer
            | Self::ScheduleOwnershipRenunciation
            | Self::ExecuteOwnershipRenunciation
            | Self::CancelOwnershipRenunciation => OperationCategory::Ownership,
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::AddToken { symbol, .. } => format!("Token {symbol} added successfully"),
            Self::RemoveToken { symbol } => format!("Token {symbol} removed"),
            Self::UpdatePriceFeed { symbol, .. } => format!("Price feed updated for {symbol}"),
            Self::EnableFallbackPrice { symbol, .. } => {
                format!("Fallback price enabled for {symbol}")
            }
            Self::DisableFallbackPrice { symbol } => {
                format!("Fallback price disabled for {symbol}")
            }
            Self::ScheduleUsdcFeeUpdate { .. } => "Fee update scheduled".to_string(),
            Self::CancelUsdcFeeUpdate => "Fee update cancelled".to_string(),
            Self::ExecuteUsdcFeeUpdate => "Fee update executed".to_string(),
            Self::SetUsdcMinStake { .. } => "Min stake updated".to_string(),
            Self::UpdateDurationBounds { .. } => "Duration bounds updated".to_string(),
            Self::SetGracePeriod { .. } => "Grace period updated".to_string(),
            Self::SetLockMultiplier { .. } => "Lock multiplier updated".to_string(),
            Self::SetMinPenaltyPercentage { .. } => "Min penalty percentage updated".to_string(),
            Self::RecoverEth { .. } => "ETH recovered".to_string(),
            Self::RecoverErc20BySymbol { symbol, .. } => format!("{symbol} recovered"),
            Self::RecoverErc20ByAddress { .. } => "Token recovered".to_string(),
            Self::BatchRecoverTokens { .. } => "Batch recovery complete".to_string(),
            Self::SweepPenalty { .. } => "Penalty swept".to_string(),
            Self::SetVerifier { .. } => "Verifier updated".to_string(),
            Self::SetCharityWallet { .. } => "Charity wallet updated".to_string(),
            Self::SetTreasuryWallet { .. } => "Treasury wallet updated".to_string(),
            Self::WhitelistMultiSig { .. } => "Multi-sig whitelisted".to_string(),
            Self::RemoveMultiSig { .. } => "Multi-sig removed from whitelist".to_string(),
            Self::AddTrustedRecipient { .. } => "Trusted recipient added".to_string(),
            Self::RemoveTrustedRecipient { .. } => "Trusted recipient removed".to_string(),
            Self::Pause => "Contract paused".to_string(),
            Self::Unpause => "Contract unpaused".to_string(),
            Self::TransferOwnership { .. } => "Ownership transfer initiated".to_string(),
            Self::AcceptOwnership => "Ownership accepted".to_string(),
            Self::CancelOwnershipTransfer => "Ownership transfer cancelled".to_string(),
            Self::ScheduleOwnershipRenunciation => {
                "Renunciation scheduled. 7-day delay started.".to_string()
            }
            Self::ExecuteOwnershipRenunciation => "Ownership renounced".to_string(),
            Self::CancelOwnershipRenunciation => "Renunciation cancelled".to_string(),
        }
    }

    fn addresses(&self) -> Vec<&str> {
        match self {
            Self::AddToken {
                token, price_feed, ..
            } => vec![token.as_str(), price_feed.as_str()],
            Self::UpdatePriceFeed { price_feed, .. } => vec![price_feed.as_str()],
            Self::RecoverEth { to }
            | Self::RecoverErc20BySymbol { to, .. }
            | Self::BatchRecoverTokens { to, .. } => vec![to.as_str()],
            Self::RecoverErc20ByAddress { token, to } => vec![token.as_str(), to.as_str()],
            Self::SetVerifier { address }
            | Self::SetCharityWallet { address }
            | Self::SetTreasuryWallet { address }
            | Self::WhitelistMultiSig { address }
            | Self::RemoveMultiSig { address }
            | Self::AddTrustedRecipient { address }
            | Self::RemoveTrustedRecipient { address } => vec![address.as_str()],
            Self::TransferOwnership { new_owner } => vec![new_owner.as_str()],
            _ => Vec::new(),
        }
    }

    fn symbols(&self) -> Vec<&str> {
        match self {
            Self::AddToken { symbol, .. }
            | Self::RemoveToken { symbol }
            | Self::UpdatePriceFeed { symbol, .. }
            | Self::EnableFallbackPrice { symbol, .. }
            | Self::DisableFallbackPrice { symbol }
            | Self::RecoverErc20BySymbol { symbol, .. } => vec![symbol.as_str()],
            Self::BatchRecoverTokens { symbols, .. } => symbols.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Pre-flight checks that need no chain state. A failure names the custom
    /// error the contract would revert with, so the dashboard shows the same
    /// message without spending gas.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.addresses().iter().any(|a| !is_valid_address(a)) {
            return Err(ContractError::InvalidAddress);
        }
        if self.symbols().iter().any(|s| s.trim().is_empty()) {
            return Err(ContractError::InvalidInput);
        }
        match self {
            Self::BatchRecoverTokens { symbols, .. } if symbols.is_empty() => {
                Err(ContractError::InvalidCount)
            }
            Self::ScheduleUsdcFeeUpdate { new_fee: 0 } => Err(ContractError::UsdcFeeZero),
            Self::UpdateDurationBounds {
                min_duration,
                max_duration,
            } if min_duration > max_duration => Err(ContractError::MinDurationAboveMax),
            _ => Ok(()),
        }
    }
}

/// Revert-shaped raw error for a pre-flight failure, so it flows through the
/// classifier like any on-chain revert.
fn preflight_error(code: ContractError) -> RawError {
    RawError::new(serde_json::json!({
        "shortMessage": format!("{}()", code.name()),
        "reason": "pre-flight check failed",
    }))
}

/// Validates `op`, then runs it through [`execute_transaction`] with the
/// operation's success message. `submit` encodes and sends the call.
pub async fn execute_admin_operation<F, Fut, T>(
    tracker: &mut TransactionTracker,
    op: &AdminOperation,
    submit: F,
) -> TxOutcome<T::Receipt>
where
    F: FnOnce(&AdminOperation) -> Fut,
    Fut: Future<Output = Result<T, RawError>>,
    T: SubmittedTransaction,
{
    if let Err(code) = op.validate() {
        tracing::warn!(method = op.method(), %code, "admin operation rejected before submission");
        return record_failure(tracker, preflight_error(code));
    }
    tracing::debug!(method = op.method(), category = %op.category(), "submitting admin operation");
    let message = op.success_message();
    execute_transaction(tracker, || submit(op), &message).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::TxStatus;
    use crate::lifecycle::execute::test_support::FakeTx;

    const ADDR: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const OTHER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    #[test]
    fn method_names_match_contract_abi() {
        let cases = [
            (
                AdminOperation::AddToken {
                    symbol: "USDC".into(),
                    token: ADDR.into(),
                    price_feed: OTHER.into(),
                    decimals: 6,
                    staleness: 3600,
                },
                "addToken",
            ),
            (
                AdminOperation::ScheduleUsdcFeeUpdate { new_fee: 1 },
                "scheduleUSDCFeeUpdate",
            ),
            (AdminOperation::SetUsdcMinStake { min_stake: 5 }, "setUSDCMinStake"),
            (AdminOperation::RecoverEth { to: ADDR.into() }, "recoverETH"),
            (
                AdminOperation::RecoverErc20ByAddress {
                    token: ADDR.into(),
                    to: OTHER.into(),
                },
                "recoverERC20ByAddress",
            ),
            (
                AdminOperation::WhitelistMultiSig {
                    address: ADDR.into(),
                },
                "whitelistMultiSig",
            ),
            (
                AdminOperation::RemoveMultiSig {
                    address: ADDR.into(),
                },
                "removeMultiSigWhitelist",
            ),
            (AdminOperation::ScheduleOwnershipRenunciation, "renounceOwnership"),
            (
                AdminOperation::ExecuteOwnershipRenunciation,
                "executeOwnershipRenunciation",
            ),
            (AdminOperation::Pause, "pause"),
        ];
        for (op, method) in cases {
            assert_eq!(op.method(), method);
            let tagged = serde_json::to_value(&op).ok();
            assert_eq!(
                tagged.as_ref().and_then(|v| v["method"].as_str()),
                Some(method),
                "serde tag differs from method for {method}"
            );
        }
    }

    #[test]
    fn categories_and_messages() {
        let remove = AdminOperation::RemoveToken {
            symbol: "WETH".into(),
        };
        assert_eq!(remove.category(), OperationCategory::TokenManagement);
        assert_eq!(remove.success_message(), "Token WETH removed");

        let sweep = AdminOperation::SweepPenalty { challenge_id: 9 };
        assert_eq!(sweep.category(), OperationCategory::ChallengeManagement);
        assert_eq!(sweep.success_message(), "Penalty swept");

        let recover = AdminOperation::RecoverErc20BySymbol {
            symbol: "DAI".into(),
            to: ADDR.into(),
        };
        assert_eq!(recover.category(), OperationCategory::FundRecovery);
        assert_eq!(recover.success_message(), "DAI recovered");
        assert_eq!(OperationCategory::WalletSettings.to_string(), "wallet_settings");
    }

    #[test]
    fn validation_maps_to_contract_errors() {
        let bad_address = AdminOperation::SetVerifier {
            address: "0x1234".into(),
        };
        assert_eq!(bad_address.validate(), Err(ContractError::InvalidAddress));

        let blank_symbol = AdminOperation::RemoveToken { symbol: "  ".into() };
        assert_eq!(blank_symbol.validate(), Err(ContractError::InvalidInput));

        let empty_batch = AdminOperation::BatchRecoverTokens {
            symbols: Vec::new(),
            to: ADDR.into(),
        };
        assert_eq!(empty_batch.validate(), Err(ContractError::InvalidCount));

        let zero_fee = AdminOperation::ScheduleUsdcFeeUpdate { new_fee: 0 };
        assert_eq!(zero_fee.validate(), Err(ContractError::UsdcFeeZero));

        let inverted = AdminOperation::UpdateDurationBounds {
            min_duration: 7200,
            max_duration: 60,
        };
        assert_eq!(inverted.validate(), Err(ContractError::MinDurationAboveMax));

        assert_eq!(AdminOperation::Unpause.validate(), Ok(()));
        assert_eq!(
            AdminOperation::TransferOwnership {
                new_owner: OTHER.into()
            }
            .validate(),
            Ok(())
        );
    }

    #[test]
    fn serializes_with_method_tag() {
        let op = AdminOperation::SetGracePeriod { days: 7 };
        let json = serde_json::to_value(&op).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "method": "setGracePeriod", "days": 7 }))
        );

        let parsed: Result<AdminOperation, _> = serde_json::from_str(&format!(
            r#"{{"method":"updatePriceFeed","symbol":"WETH","priceFeed":"{OTHER}"}}"#
        ));
        assert_eq!(
            parsed.ok(),
            Some(AdminOperation::UpdatePriceFeed {
                symbol: "WETH".into(),
                price_feed: OTHER.into(),
            })
        );
        let unit: Result<AdminOperation, _> = serde_json::from_str(r#"{"method":"recoverETH","to":"0x0"}"#);
        assert!(matches!(unit, Ok(AdminOperation::RecoverEth { .. })));
    }

    #[tokio::test]
    async fn preflight_failure_never_submits() {
        let mut tracker = TransactionTracker::new();
        let op = AdminOperation::RecoverEth {
            to: "not-an-address".into(),
        };
        let mut submitted = false;
        let outcome = execute_admin_operation(&mut tracker, &op, |_| {
            submitted = true;
            async { Ok(FakeTx::confirmed("0x1", 1)) }
        })
        .await;

        assert!(!submitted);
        assert_eq!(
            outcome.classified_error().map(|e| e.title.as_str()),
            Some("Invalid Address")
        );
        assert_eq!(tracker.status(), TxStatus::Error);
    }

    #[tokio::test]
    async fn submits_and_reports_operation_message() {
        let mut tracker = TransactionTracker::new();
        let op = AdminOperation::SetLockMultiplier { multiplier: 5 };
        let outcome = execute_admin_operation(&mut tracker, &op, |op| {
            let hash = format!("0x{}", op.method().len());
            async move { Ok(FakeTx::confirmed(&hash, 10)) }
        })
        .await;

        assert_eq!(outcome.tx_hash(), Some("0x17"));
        assert_eq!(tracker.state().message, "Lock multiplier updated");
    }

    #[tokio::test]
    async fn contract_revert_surfaces_taxonomy_entry() {
        let mut tracker = TransactionTracker::new();
        let op = AdminOperation::SetMinPenaltyPercentage { percent: 3 };
        let outcome = execute_admin_operation(&mut tracker, &op, |_| async {
            Err::<FakeTx, _>(RawError::new(serde_json::json!({
                "shortMessage": "execution reverted: MinPenaltyPercentageMustBeGreaterThan5()",
                "code": "CALL_EXCEPTION",
            })))
        })
        .await;

        assert_eq!(
            outcome.classified_error().map(|e| e.message.as_str()),
            Some("Minimum penalty percentage must be greater than 5%.")
        );
        assert_eq!(
            tracker.state().message,
            "Minimum penalty percentage must be greater than 5%."
        );
    }
}
