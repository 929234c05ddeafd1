use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::format::{explorer_url, is_valid_address};

pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9";
/// Hardhat account #0.
pub const DEFAULT_ADMIN_WALLET: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const DEFAULT_VERIFIER_URL: &str = "http://localhost:3001";
pub const DEFAULT_CHAIN_ID: u64 = 31337;

pub const ENV_CONTRACT_ADDRESS: &str = "TOUCHGRASS_CONTRACT_ADDRESS";
pub const ENV_ADMIN_WALLETS: &str = "TOUCHGRASS_ADMIN_WALLETS";
pub const ENV_VERIFIER_URL: &str = "TOUCHGRASS_VERIFIER_URL";
pub const ENV_CHAIN_ID: &str = "TOUCHGRASS_CHAIN_ID";

/// Deployment settings for the dashboard. The admin list only gates the UI;
/// the contract's owner checks are the real authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub contract_address: String,
    pub admin_wallets: Vec<String>,
    #[serde(default = "default_verifier_url")]
    pub verifier_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
}

fn default_verifier_url() -> String {
    DEFAULT_VERIFIER_URL.to_string()
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            admin_wallets: vec![DEFAULT_ADMIN_WALLET.to_string()],
            verifier_url: default_verifier_url(),
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from a key lookup, falling back to the local
    /// development defaults for anything unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let contract_address = get(ENV_CONTRACT_ADDRESS).unwrap_or_else(|| {
            tracing::warn!(
                var = ENV_CONTRACT_ADDRESS,
                default = DEFAULT_CONTRACT_ADDRESS,
                "using default localhost contract address"
            );
            DEFAULT_CONTRACT_ADDRESS.to_string()
        });

        let admin_wallets = match get(ENV_ADMIN_WALLETS) {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
            None => {
                tracing::warn!(
                    var = ENV_ADMIN_WALLETS,
                    default = DEFAULT_ADMIN_WALLET,
                    "using default admin wallet"
                );
                vec![DEFAULT_ADMIN_WALLET.to_string()]
            }
        };

        let verifier_url = get(ENV_VERIFIER_URL).unwrap_or_else(default_verifier_url);

        let chain_id = match get(ENV_CHAIN_ID) {
            Some(raw) => raw.parse::<u64>().map_err(|e| Error::Config {
                reason: format!("{ENV_CHAIN_ID}={raw:?} is not a chain id: {e}"),
            })?,
            None => DEFAULT_CHAIN_ID,
        };

        Self {
            contract_address,
            admin_wallets,
            verifier_url,
            chain_id,
        }
        .normalized()
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.normalized()
    }

    /// Validates addresses and lower-cases the admin list.
    fn normalized(mut self) -> Result<Self, Error> {
        if !is_valid_address(&self.contract_address) {
            return Err(Error::Config {
                reason: format!("invalid contract address {:?}", self.contract_address),
            });
        }
        if self.admin_wallets.is_empty() {
            return Err(Error::Config {
                reason: "admin wallet list is empty".to_string(),
            });
        }
        for wallet in &mut self.admin_wallets {
            if !is_valid_address(wallet) {
                return Err(Error::Config {
                    reason: format!("invalid admin wallet {wallet:?}"),
                });
            }
            *wallet = wallet.to_lowercase();
        }
        let trimmed = self.verifier_url.trim_end_matches('/').len();
        self.verifier_url.truncate(trimmed);
        Ok(self)
    }

    pub fn is_admin(&self, address: &str) -> bool {
        !address.is_empty()
            && self
                .admin_wallets
                .iter()
                .any(|w| w.eq_ignore_ascii_case(address))
    }

    pub fn explorer_url(&self) -> Option<&'static str> {
        explorer_url(self.chain_id)
    }

    pub fn contract_url(&self) -> Option<String> {
        crate::format::address_url(self.chain_id, &self.contract_address)
    }
}
