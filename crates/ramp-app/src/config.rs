//! Application configuration.

use crate::error::{AppError, AppResult};
use ramp_core::Network;
use ramp_monitor::MonitorConfig;
use ramp_registry::{FactoryRegistry, NetworkProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Settlement monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between status polls. Default: 5.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Maximum polls before surfacing a stuck state. Default: 120.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    120
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network the payout settles from.
    #[serde(default = "default_network")]
    pub network: Network,
    /// Fiat payout currency code.
    #[serde(default = "default_fiat_currency")]
    pub fiat_currency: String,
    /// Aggregator wrapper base URL (institutions, verification, orders).
    #[serde(default = "default_aggregator_base_url")]
    pub aggregator_base_url: String,
    /// Rate service base URL.
    #[serde(default = "default_rate_base_url")]
    pub rate_base_url: String,
    /// Price API base URL.
    #[serde(default = "default_price_base_url")]
    pub price_base_url: String,
    /// JSON-RPC endpoint override. Defaults to the network's public endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Environment variable holding the payout private key.
    #[serde(default = "default_payout_key_env")]
    pub payout_key_env: String,
    /// Expected signer address; the loaded key must derive this if set.
    #[serde(default)]
    pub signer_address: Option<String>,
    /// Settlement monitor settings.
    #[serde(default)]
    pub monitor: MonitorSettings,
    /// Split-factory addresses per network.
    #[serde(default)]
    pub factories: HashMap<Network, String>,
}

fn default_network() -> Network {
    Network::Celo
}

fn default_fiat_currency() -> String {
    "NGN".to_string()
}

fn default_aggregator_base_url() -> String {
    "https://spliting-rhq3.onrender.com".to_string()
}

fn default_rate_base_url() -> String {
    "https://api.paycrest.io".to_string()
}

fn default_price_base_url() -> String {
    "https://api.coingecko.com".to_string()
}

fn default_payout_key_env() -> String {
    "RAMP_PAYOUT_KEY".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            fiat_currency: default_fiat_currency(),
            aggregator_base_url: default_aggregator_base_url(),
            rate_base_url: default_rate_base_url(),
            price_base_url: default_price_base_url(),
            rpc_url: None,
            payout_key_env: default_payout_key_env(),
            signer_address: None,
            monitor: MonitorSettings::default(),
            factories: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from a file, falling back to defaults if it does not exist.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(%path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// RPC endpoint for the configured network.
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| NetworkProfile::default_for(self.network).rpc_url)
    }

    /// Explorer profile for the configured network.
    pub fn profile(&self) -> NetworkProfile {
        NetworkProfile::default_for(self.network)
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_secs(self.monitor.poll_interval_secs),
            max_attempts: self.monitor.max_attempts,
        }
    }

    /// Parse the configured factory addresses.
    pub fn factory_registry(&self) -> AppResult<FactoryRegistry> {
        let mut registry = FactoryRegistry::new();
        for (network, address) in &self.factories {
            let address = address
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid factory address for {network}")))?;
            registry.insert(*network, address);
        }
        Ok(registry)
    }
}
