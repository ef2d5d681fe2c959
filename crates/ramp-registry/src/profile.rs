//! Per-network connection and explorer profiles.

use ramp_core::Network;
use serde::{Deserialize, Serialize};

/// RPC and explorer endpoints for one network.
///
/// Defaults point at the public endpoints; deployments override the RPC URL
/// in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network: Network,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Block explorer base URL (no trailing slash).
    pub explorer_url: String,
}

impl NetworkProfile {
    /// Default public endpoints for a network.
    pub fn default_for(network: Network) -> Self {
        let (rpc_url, explorer_url) = match network {
            Network::Celo => ("https://forno.celo.org", "https://celoscan.io"),
            Network::Base => ("https://mainnet.base.org", "https://basescan.org"),
            Network::CeloSepolia => (
                "https://forno.celo-sepolia.celo-testnet.org",
                "https://celo-sepolia.blockscout.com",
            ),
            Network::BaseSepolia => ("https://sepolia.base.org", "https://sepolia.basescan.org"),
        };
        Self {
            network,
            rpc_url: rpc_url.to_string(),
            explorer_url: explorer_url.to_string(),
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url)
    }

    /// Explorer link for an address.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{address}", self.explorer_url)
    }
}
