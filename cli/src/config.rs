//! Project configuration: environment secrets and compiler wiring.
//!
//! Secrets come from `.env` (loaded before argument parsing) and are only
//! consumed by the deployment-facing commands; the merkle tasks never touch
//! them. The compiler settings mirror what the contract build pins.

use std::env;

use serde::Serialize;

/// Compiler version the contracts are pinned to.
pub const SOLIDITY_VERSION: &str = "0.8.21";

/// Optimizer run count used for contract builds.
pub const OPTIMIZER_RUNS: u32 = 1000;

/// Secrets and endpoints read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// RPC endpoint for the target network (`SEPOLIA_RPC_URL`).
    pub rpc_url: Option<String>,
    /// Contract verification API key (`ETHERSCAN_API_KEY`).
    pub etherscan_api_key: Option<String>,
    /// Comma-separated signer keys (`PRIVATE_KEYS`).
    pub private_keys: Vec<String>,
}

impl Environment {
    /// Snapshot the recognized variables from the process environment.
    pub fn from_env() -> Self {
        Self {
            rpc_url: env::var("SEPOLIA_RPC_URL").ok(),
            etherscan_api_key: env::var("ETHERSCAN_API_KEY").ok(),
            private_keys: env::var("PRIVATE_KEYS")
                .map(|raw| parse_keys(&raw))
                .unwrap_or_default(),
        }
    }
}

/// Split a comma-separated key list, dropping empty segments.
pub fn parse_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The configuration the `config` task prints. Secrets are reduced to
/// presence flags.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    pub solidity: SolidityConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolidityConfig {
    pub version: String,
    pub settings: SoliditySettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoliditySettings {
    pub optimizer: OptimizerSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkConfig {
    pub sepolia_rpc_url: Option<String>,
    pub etherscan_api_key_set: bool,
    pub signer_count: usize,
}

impl ProjectConfig {
    /// Combine the pinned compiler settings with the loaded environment.
    pub fn effective(env: &Environment) -> Self {
        Self {
            solidity: SolidityConfig {
                version: SOLIDITY_VERSION.to_owned(),
                settings: SoliditySettings {
                    optimizer: OptimizerSettings {
                        enabled: true,
                        runs: OPTIMIZER_RUNS,
                    },
                },
            },
            network: NetworkConfig {
                sepolia_rpc_url: env.rpc_url.clone(),
                etherscan_api_key_set: env.etherscan_api_key.is_some(),
                signer_count: env.private_keys.len(),
            },
        }
    }
}
