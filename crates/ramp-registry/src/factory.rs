//! Split-factory deployment addresses.
//!
//! Factory addresses are deployment-specific (set per environment rather
//! than hardcoded), so the registry is populated from config.

use crate::error::{RegistryError, RegistryResult};
use alloy::primitives::Address;
use ramp_core::Network;
use std::collections::HashMap;

/// Per-network split-factory addresses.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<Network, Address>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Network, Address)>) -> Self {
        Self {
            factories: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, network: Network, address: Address) {
        self.factories.insert(network, address);
    }

    pub fn get(&self, network: Network) -> Option<Address> {
        self.factories.get(&network).copied()
    }

    /// Look up the factory for a network, failing with the network named.
    pub fn require(&self, network: Network) -> RegistryResult<Address> {
        self.get(network)
            .ok_or(RegistryError::NoFactory(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_lookup() {
        let addr = address!("00000000000000000000000000000000000000A1");
        let reg = FactoryRegistry::from_entries([(Network::Celo, addr)]);
        assert_eq!(reg.get(Network::Celo), Some(addr));
        assert!(reg.get(Network::Base).is_none());
        assert!(reg.require(Network::Base).is_err());
    }
}
