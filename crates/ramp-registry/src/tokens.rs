//! Token contract registry and transfer-record derivation.

use crate::error::{RegistryError, RegistryResult};
use alloy::primitives::{address, Address};
use once_cell::sync::Lazy;
use ramp_core::{Amount, Network, TokenSymbol};
use std::collections::HashMap;

/// A token's on-chain identity on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEntry {
    /// ERC-20 contract address.
    pub address: Address,
    /// Token decimal precision. Stable USD tokens use 6, everything else 18.
    pub decimals: u8,
}

/// Everything needed to perform one on-chain transfer.
///
/// Derived from the registry table, used once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub token: TokenSymbol,
    pub network: Network,
    pub token_address: Address,
    pub decimals: u8,
    /// Human-unit amount.
    pub amount: Amount,
    /// `floor(amount × 10^decimals)`.
    pub amount_raw: u128,
}

static BUNDLED_TOKENS: Lazy<HashMap<Network, HashMap<TokenSymbol, TokenEntry>>> = Lazy::new(|| {
    let entry = |addr: Address, decimals: u8| TokenEntry {
        address: addr,
        decimals,
    };
    let sym = |s: &str| TokenSymbol::new(s).expect("static symbol");

    let mut celo = HashMap::new();
    celo.insert(
        sym("USDC"),
        entry(address!("cebA9300f2b948710d2653dD7B07f33A8B32118C"), 6),
    );
    celo.insert(
        sym("USDT"),
        entry(address!("48065fbBE25f71C9282ddf5e1cD6D6A887483D5e"), 6),
    );
    celo.insert(
        sym("CUSD"),
        entry(address!("765DE816845861e75A25fCA122bb6898B8B1282a"), 18),
    );

    let mut base = HashMap::new();
    base.insert(
        sym("USDC"),
        entry(address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"), 6),
    );
    base.insert(
        sym("USDT"),
        entry(address!("fde4C96c8593536E31F229EA8f37b2ADa2699bb2"), 6),
    );

    let mut map = HashMap::new();
    map.insert(Network::Celo, celo);
    map.insert(Network::Base, base);
    map
});

/// Lookup table from (network, token) to contract address and decimals.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    entries: HashMap<Network, HashMap<TokenSymbol, TokenEntry>>,
}

impl TokenRegistry {
    /// Registry of the tokens the aggregator accepts, with their mainnet
    /// contract addresses.
    pub fn bundled() -> Self {
        Self {
            entries: BUNDLED_TOKENS.clone(),
        }
    }

    /// Build from explicit entries (tests, alternative deployments).
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Network, TokenSymbol, TokenEntry)>,
    ) -> Self {
        let mut map: HashMap<Network, HashMap<TokenSymbol, TokenEntry>> = HashMap::new();
        for (network, token, entry) in entries {
            map.entry(network).or_default().insert(token, entry);
        }
        Self { entries: map }
    }

    /// Look up a token on a network.
    pub fn get(&self, network: Network, token: &TokenSymbol) -> Option<&TokenEntry> {
        self.entries.get(&network)?.get(token)
    }

    /// Look up a token, failing with the symbol and network named.
    pub fn require(&self, network: Network, token: &TokenSymbol) -> RegistryResult<&TokenEntry> {
        self.get(network, token)
            .ok_or_else(|| RegistryError::UnsupportedToken {
                token: token.clone(),
                network,
            })
    }

    /// Token symbols supported on a network.
    pub fn tokens_on(&self, network: Network) -> Vec<&TokenSymbol> {
        self.entries
            .get(&network)
            .map(|m| m.keys().collect())
            .unwrap_or_default()
    }

    /// Derive the transfer record for one payout.
    ///
    /// This is the only path from a human amount to raw on-chain units; the
    /// decimal count always comes from the table entry.
    pub fn transfer_record(
        &self,
        network: Network,
        token: &TokenSymbol,
        amount: Amount,
    ) -> RegistryResult<TransferRecord> {
        let entry = self.require(network, token)?;
        let amount_raw = amount.raw_units(entry.decimals)?;
        Ok(TransferRecord {
            token: token.clone(),
            network,
            token_address: entry.address,
            decimals: entry.decimals,
            amount,
            amount_raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> TokenSymbol {
        TokenSymbol::new(s).unwrap()
    }

    // Every supported (network, token) pair, checked individually: a wrong
    // decimals value here misrepresents transfers by a power of ten.
    #[test]
    fn test_celo_usdc_entry() {
        let reg = TokenRegistry::bundled();
        let entry = reg.get(Network::Celo, &sym("USDC")).unwrap();
        assert_eq!(
            entry.address,
            address!("cebA9300f2b948710d2653dD7B07f33A8B32118C")
        );
        assert_eq!(entry.decimals, 6);
    }

    #[test]
    fn test_celo_usdt_entry() {
        let reg = TokenRegistry::bundled();
        let entry = reg.get(Network::Celo, &sym("USDT")).unwrap();
        assert_eq!(
            entry.address,
            address!("48065fbBE25f71C9282ddf5e1cD6D6A887483D5e")
        );
        assert_eq!(entry.decimals, 6);
    }

    #[test]
    fn test_celo_cusd_entry() {
        let reg = TokenRegistry::bundled();
        let entry = reg.get(Network::Celo, &sym("CUSD")).unwrap();
        assert_eq!(
            entry.address,
            address!("765DE816845861e75A25fCA122bb6898B8B1282a")
        );
        assert_eq!(entry.decimals, 18);
    }

    #[test]
    fn test_base_usdc_entry() {
        let reg = TokenRegistry::bundled();
        let entry = reg.get(Network::Base, &sym("USDC")).unwrap();
        assert_eq!(
            entry.address,
            address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")
        );
        assert_eq!(entry.decimals, 6);
    }

    #[test]
    fn test_base_usdt_entry() {
        let reg = TokenRegistry::bundled();
        let entry = reg.get(Network::Base, &sym("USDT")).unwrap();
        assert_eq!(
            entry.address,
            address!("fde4C96c8593536E31F229EA8f37b2ADa2699bb2")
        );
        assert_eq!(entry.decimals, 6);
    }

    #[test]
    fn test_stable_tokens_are_six_decimals_everywhere() {
        let reg = TokenRegistry::bundled();
        for network in [Network::Celo, Network::Base] {
            for stable in ["USDC", "USDT"] {
                let entry = reg.get(network, &sym(stable)).unwrap();
                assert_eq!(entry.decimals, 6, "{stable} on {network}");
            }
        }
    }

    #[test]
    fn test_unsupported_pairs_are_absent() {
        let reg = TokenRegistry::bundled();
        assert!(reg.get(Network::Base, &sym("CUSD")).is_none());
        assert!(reg.get(Network::CeloSepolia, &sym("USDC")).is_none());
        assert!(reg.get(Network::Celo, &sym("DAI")).is_none());
    }

    #[test]
    fn test_require_names_token_and_network() {
        let reg = TokenRegistry::bundled();
        let err = reg.require(Network::Base, &sym("CUSD")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CUSD"));
        assert!(msg.contains("base"));
    }

    #[test]
    fn test_transfer_record_usdc() {
        let reg = TokenRegistry::bundled();
        let record = reg
            .transfer_record(Network::Celo, &sym("USDC"), Amount::new(dec!(50)))
            .unwrap();
        assert_eq!(record.decimals, 6);
        assert_eq!(record.amount_raw, 50_000_000);
        assert_eq!(
            record.token_address,
            address!("cebA9300f2b948710d2653dD7B07f33A8B32118C")
        );
    }

    #[test]
    fn test_transfer_record_cusd_eighteen_decimals() {
        let reg = TokenRegistry::bundled();
        let record = reg
            .transfer_record(Network::Celo, &sym("CUSD"), Amount::new(dec!(2.5)))
            .unwrap();
        assert_eq!(record.decimals, 18);
        assert_eq!(record.amount_raw, 2_500_000_000_000_000_000);
    }
}
