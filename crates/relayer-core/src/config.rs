use crate::error::{RelayerError, Result};
use alloy_primitives::Address;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// One deployed contract, as listed in the contracts descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractRef {
    pub address: Address,
}

/// Contract addresses on both networks, loaded from a JSON descriptor.
///
/// Event topic hashes are not configured here; they are derived from the ABI
/// declarations in [`crate::events`], so the filter set cannot drift from the
/// decoder.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    pub bridge: ContractRef,
    pub exchange: ContractRef,
    pub orderbook: ContractRef,
    pub order_matcher: ContractRef,
}

/// Endpoints for one network.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkRef {
    pub ws_url: String,
    #[serde(default)]
    pub rpc_url: Option<String>,
}

/// WebSocket/RPC endpoints, loaded from a JSON descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworksConfig {
    pub bridge: NetworkRef,
    pub exchange: NetworkRef,
}

/// Complete relayer configuration.
///
/// Database and Redis settings are owned by their crates (`relayer-db`,
/// `relayer-redis`) and read from the environment separately.
#[derive(Debug, Clone)]
pub struct RelayerConfig {
    pub contracts: ContractsConfig,
    pub networks: NetworksConfig,
    pub keystore_path: PathBuf,
    pub keystore_password_path: PathBuf,
}

impl RelayerConfig {
    /// Load configuration from environment variables and descriptor files.
    pub fn load() -> Result<Self> {
        let contracts_path = require_env("CONTRACTS_FILE")?;
        let networks_path = require_env("NETWORKS_FILE")?;
        let keystore_path = require_env("KEYSTORE_FILE")?;
        let keystore_password_path = require_env("KEYSTORE_PASSWORD_FILE")?;

        let contracts: ContractsConfig = read_json(&contracts_path)?;
        let networks: NetworksConfig = read_json(&networks_path)?;

        // The matcher submits transactions over the exchange RPC endpoint.
        if networks.exchange.rpc_url.is_none() {
            return Err(RelayerError::ConfigParse(
                networks_path,
                "exchange network is missing rpc_url".to_string(),
            ));
        }

        Ok(Self {
            contracts,
            networks,
            keystore_path: PathBuf::from(keystore_path),
            keystore_password_path: PathBuf::from(keystore_password_path),
        })
    }

    /// RPC endpoint used for match transaction submission.
    pub fn exchange_rpc_url(&self) -> &str {
        self.networks
            .exchange
            .rpc_url
            .as_deref()
            .expect("validated at load time")
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| RelayerError::MissingEnvVar(name.to_string()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|_| RelayerError::ConfigFileNotFound(path.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| RelayerError::ConfigParse(path.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contracts_descriptor_parses() {
        let raw = r#"{
            "bridge": { "address": "0x1111111111111111111111111111111111111111" },
            "exchange": { "address": "0x2222222222222222222222222222222222222222" },
            "orderbook": { "address": "0x3333333333333333333333333333333333333333" },
            "order_matcher": { "address": "0x4444444444444444444444444444444444444444" }
        }"#;
        let contracts: ContractsConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(
            contracts.orderbook.address,
            "0x3333333333333333333333333333333333333333"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn networks_descriptor_parses_without_bridge_rpc() {
        let raw = r#"{
            "bridge": { "ws_url": "ws://bridge:8546" },
            "exchange": { "ws_url": "ws://exchange:8546", "rpc_url": "http://exchange:8545" }
        }"#;
        let networks: NetworksConfig = serde_json::from_str(raw).unwrap();
        assert!(networks.bridge.rpc_url.is_none());
        assert_eq!(
            networks.exchange.rpc_url.as_deref(),
            Some("http://exchange:8545")
        );
    }
}
