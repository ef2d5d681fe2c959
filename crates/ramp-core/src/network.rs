//! Supported EVM networks.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Networks the off-ramp can settle from.
///
/// Mainnets carry real payouts; the Sepolia testnets exist for rehearsal and
/// map onto the same payout network name as their mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Celo,
    Base,
    CeloSepolia,
    BaseSepolia,
}

impl Network {
    /// All supported networks, in display order.
    pub const ALL: [Network; 4] = [
        Network::Celo,
        Network::Base,
        Network::CeloSepolia,
        Network::BaseSepolia,
    ];

    /// EVM chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Celo => 42220,
            Network::Base => 8453,
            Network::CeloSepolia => 11142220,
            Network::BaseSepolia => 84532,
        }
    }

    /// Canonical lowercase identifier used in config and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Celo => "celo",
            Network::Base => "base",
            Network::CeloSepolia => "celo-sepolia",
            Network::BaseSepolia => "base-sepolia",
        }
    }

    /// Network name expected by the payout API.
    ///
    /// The aggregator only distinguishes mainnet families; testnet orders
    /// are tagged with their mainnet name.
    pub fn payout_name(&self) -> &'static str {
        match self {
            Network::Celo | Network::CeloSepolia => "celo",
            Network::Base | Network::BaseSepolia => "base",
        }
    }

    /// Human-readable display name, used in wallet prompts and errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Celo => "Celo",
            Network::Base => "Base",
            Network::CeloSepolia => "Celo Sepolia",
            Network::BaseSepolia => "Base Sepolia",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::CeloSepolia | Network::BaseSepolia)
    }

    /// Resolve a network from its chain id.
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "celo" => Ok(Network::Celo),
            "base" => Ok(Network::Base),
            "celo-sepolia" | "celosepolia" => Ok(Network::CeloSepolia),
            "base-sepolia" | "basesepolia" => Ok(Network::BaseSepolia),
            other => Err(CoreError::UnknownNetwork(other.to_string())),
        }
    }
}
