//! Deployment target: chain metadata and the contract address.
//!
//! Every value can be overridden by a named option so a different
//! deployment is selected without a code change:
//!
//! | option | effect |
//! |---|---|
//! | `LINKTREE_CONTRACT_ADDRESS` | link registry contract address |
//! | `LINKTREE_RPC_URL` | read-only endpoint, also advertised when adding the chain |
//! | `LINKTREE_CHAIN_ID` | target chain id (decimal) |
//! | `LINKTREE_CHAIN_NAME` | chain name shown by the wallet |
//! | `LINKTREE_EXPLORER_URL` | block explorer advertised when adding the chain |

use alloy_primitives::{Address, address};
use lt_api_types::{ChainConfigResponse, NativeCurrencyInfo};
use serde_json::{Value, json};
use std::str::FromStr;

pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
pub const BASE_SEPOLIA_NAME: &str = "Base Sepolia";
pub const BASE_SEPOLIA_RPC_URL: &str = "https://sepolia.base.org";
pub const BASE_SEPOLIA_EXPLORER_URL: &str = "https://sepolia.basescan.org";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x57ae67e75d4973757090aa3931f3208a2cfc0673";
pub const DEFAULT_CONTRACT: Address = address!("57ae67e75d4973757090aa3931f3208a2cfc0673");

pub const ENV_CONTRACT_ADDRESS: &str = "LINKTREE_CONTRACT_ADDRESS";
pub const ENV_RPC_URL: &str = "LINKTREE_RPC_URL";
pub const ENV_CHAIN_ID: &str = "LINKTREE_CHAIN_ID";
pub const ENV_CHAIN_NAME: &str = "LINKTREE_CHAIN_NAME";
pub const ENV_EXPLORER_URL: &str = "LINKTREE_EXPLORER_URL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid contract address: {value}")]
    ContractAddress { key: &'static str, value: String },
    #[error("{key} is not a decimal chain id: {value}")]
    ChainId { key: &'static str, value: String },
    #[error("{key} must be an http(s) URL: {value}")]
    Url { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub block_explorer: String,
    pub native_currency: NativeCurrency,
}

impl NetworkConfig {
    pub fn base_sepolia() -> Self {
        Self {
            chain_id: BASE_SEPOLIA_CHAIN_ID,
            name: BASE_SEPOLIA_NAME.to_owned(),
            rpc_url: BASE_SEPOLIA_RPC_URL.to_owned(),
            block_explorer: BASE_SEPOLIA_EXPLORER_URL.to_owned(),
            native_currency: NativeCurrency {
                name: "ETH".to_owned(),
                symbol: "ETH".to_owned(),
                decimals: 18,
            },
        }
    }

    /// Chain id in the `0x`-prefixed form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Parameters for `wallet_switchEthereumChain`.
    pub fn switch_chain_params(&self) -> Value {
        json!([{ "chainId": self.chain_id_hex() }])
    }

    /// Parameters for `wallet_addEthereumChain` (EIP-3085).
    pub fn add_chain_params(&self) -> Value {
        json!([{
            "chainId": self.chain_id_hex(),
            "chainName": self.name,
            "nativeCurrency": {
                "name": self.native_currency.name,
                "symbol": self.native_currency.symbol,
                "decimals": self.native_currency.decimals,
            },
            "rpcUrls": [self.rpc_url],
            "blockExplorerUrls": [self.block_explorer],
        }])
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::base_sepolia()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub contract_address: Address,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            contract_address: DEFAULT_CONTRACT,
        }
    }
}

impl AppConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get(ENV_CONTRACT_ADDRESS) {
            config.contract_address =
                Address::from_str(&value).map_err(|_| ConfigError::ContractAddress {
                    key: ENV_CONTRACT_ADDRESS,
                    value,
                })?;
        }

        if let Some(value) = get(ENV_CHAIN_ID) {
            config.network.chain_id = value.parse().map_err(|_| ConfigError::ChainId {
                key: ENV_CHAIN_ID,
                value,
            })?;
        }

        if let Some(value) = get(ENV_CHAIN_NAME) {
            config.network.name = value;
        }

        if let Some(value) = get(ENV_RPC_URL) {
            config.network.rpc_url = require_http_url(ENV_RPC_URL, value)?;
        }

        if let Some(value) = get(ENV_EXPLORER_URL) {
            config.network.block_explorer = require_http_url(ENV_EXPLORER_URL, value)?;
        }

        Ok(config)
    }

    pub fn chain_config_response(&self) -> ChainConfigResponse {
        ChainConfigResponse {
            chain_id: self.network.chain_id,
            chain_id_hex: self.network.chain_id_hex(),
            chain_name: self.network.name.clone(),
            rpc_url: self.network.rpc_url.clone(),
            block_explorer: self.network.block_explorer.clone(),
            native_currency: NativeCurrencyInfo {
                name: self.network.native_currency.name.clone(),
                symbol: self.network.native_currency.symbol.clone(),
                decimals: self.network.native_currency.decimals,
            },
            contract_address: self.contract_address.to_checksum(None),
        }
    }
}

fn require_http_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_owned())
    } else {
        Err(ConfigError::Url { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_base_sepolia() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.network.chain_id, 84532);
        assert_eq!(config.network.chain_id_hex(), "0x14a34");
        assert_eq!(config.network.rpc_url, "https://sepolia.base.org");
        assert_eq!(config.network.native_currency.decimals, 18);
        assert_eq!(
            config.contract_address,
            DEFAULT_CONTRACT_ADDRESS.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_CONTRACT_ADDRESS, "0x1111111111111111111111111111111111111111"),
            (ENV_RPC_URL, "http://localhost:8545/"),
            (ENV_CHAIN_ID, "31337"),
            (ENV_CHAIN_NAME, "Anvil"),
        ]))
        .unwrap();

        assert_eq!(config.network.chain_id, 31337);
        assert_eq!(config.network.chain_id_hex(), "0x7a69");
        assert_eq!(config.network.name, "Anvil");
        assert_eq!(config.network.rpc_url, "http://localhost:8545");
        assert_eq!(
            config.contract_address,
            Address::repeat_byte(0x11)
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_CHAIN_ID, "  ")])).unwrap();
        assert_eq!(config.network.chain_id, BASE_SEPOLIA_CHAIN_ID);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_CHAIN_ID, "base")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ChainId {
                key: ENV_CHAIN_ID,
                value: "base".to_owned()
            }
        );

        let err = AppConfig::from_lookup(lookup(&[(ENV_CONTRACT_ADDRESS, "0x1234")])).unwrap_err();
        assert!(matches!(err, ConfigError::ContractAddress { .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_RPC_URL, "ws://node")])).unwrap_err();
        assert!(matches!(err, ConfigError::Url { .. }));
    }

    #[test]
    fn add_chain_params_carry_the_network_metadata() {
        let params = NetworkConfig::base_sepolia().add_chain_params();
        let entry = &params[0];
        assert_eq!(entry["chainId"], "0x14a34");
        assert_eq!(entry["chainName"], "Base Sepolia");
        assert_eq!(entry["rpcUrls"][0], "https://sepolia.base.org");
        assert_eq!(entry["blockExplorerUrls"][0], "https://sepolia.basescan.org");
        assert_eq!(entry["nativeCurrency"]["symbol"], "ETH");
        assert_eq!(entry["nativeCurrency"]["decimals"], 18);
    }
}
