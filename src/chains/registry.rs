//! Static per-chain configuration keyed by chain id.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chains::networks::{self, WalletNetwork};

const ETH_IMAGE: &str = "https://s2.coinmarketcap.com/static/img/coins/200x200/1027.png";
const OPTIMISM_IMAGE: &str = "https://s2.coinmarketcap.com/static/img/coins/200x200/11840.png";
const ARBITRUM_IMAGE: &str = "https://s2.coinmarketcap.com/static/img/coins/200x200/11841.png";
const POLYGON_IMAGE: &str =
    "https://s3.coinmarketcap.com/static-gravity/image/b8db9a2ac5004c1685a39728cdf4e100.png";

/// Deployment environment selecting which chain table is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Testnet,
}

/// Contracts and endpoints for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub name: String,
    pub chain_id: u64,
    pub image_url: Option<String>,
    /// Merkle distributor paying out claims.
    pub merkle_address: Option<Address>,
    /// Incentive registration contract receiving deposits.
    pub incentive_address: Option<Address>,
    /// Subgraph indexing `RewardAdded` events.
    pub graph_endpoint: Option<String>,
    pub rpc_url: Option<String>,
    /// Chain name understood by the price backend.
    pub price_chain_name: Option<String>,
}

impl ChainInfo {
    /// Chain name to send to the price backend, `ethereum` when unset.
    pub fn price_chain(&self) -> &str {
        self.price_chain_name.as_deref().unwrap_or("ethereum")
    }
}

/// Lookup table of supported chains for one environment.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    environment: Environment,
    chains: BTreeMap<u64, ChainInfo>,
}

impl ChainRegistry {
    /// Build the built-in table for an environment.
    pub fn for_environment(environment: Environment) -> Self {
        let chains = match environment {
            Environment::Production => production_chains(),
            Environment::Testnet => testnet_chains(),
        };
        Self {
            environment,
            chains: chains.into_iter().map(|c| (c.chain_id, c)).collect(),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Chain info for a chain id, if supported.
    pub fn get(&self, chain_id: u64) -> Option<&ChainInfo> {
        self.chains.get(&chain_id)
    }

    /// All selectable chains, ordered by chain id.
    pub fn options(&self) -> Vec<&ChainInfo> {
        self.chains.values().collect()
    }

    /// Label shown in place of a chain name when the wallet sits on an
    /// unsupported chain.
    pub fn unsupported_label(&self) -> &'static str {
        match self.environment {
            Environment::Production => " Please connect to Ethereum Mainnet",
            Environment::Testnet => "Switch Network",
        }
    }

    /// Networks a wallet may be asked to switch to.
    pub fn wallet_networks(&self, default_rpc_url: &str) -> Vec<WalletNetwork> {
        networks::wallet_networks(self.environment, default_rpc_url)
    }

    /// Override or add a chain entry (used by config overrides).
    pub fn insert(&mut self, chain: ChainInfo) {
        self.chains.insert(chain.chain_id, chain);
    }
}

#[allow(clippy::too_many_arguments)]
fn chain(
    name: &str,
    chain_id: u64,
    image_url: &str,
    merkle: Address,
    incentive: Address,
    graph_endpoint: &str,
    rpc_url: Option<&str>,
    price_chain_name: &str,
) -> ChainInfo {
    ChainInfo {
        name: name.to_string(),
        chain_id,
        image_url: Some(image_url.to_string()),
        merkle_address: Some(merkle),
        incentive_address: Some(incentive),
        graph_endpoint: Some(graph_endpoint.to_string()),
        rpc_url: rpc_url.map(str::to_string),
        price_chain_name: Some(price_chain_name.to_string()),
    }
}

fn production_chains() -> Vec<ChainInfo> {
    vec![chain(
        "Ethereum",
        1,
        ETH_IMAGE,
        address!("B6f4b9EDdcc15B5b6eF2374bc91203A0086bc6B6"),
        address!("a5544006EACd0D5665033eBd721cAdF761a2BFF8"),
        "https://api.studio.thegraph.com/query/60882/quicksnap/version/latest/",
        None,
        "ethereum",
    )]
}

fn testnet_chains() -> Vec<ChainInfo> {
    vec![
        chain(
            "local",
            1337,
            ETH_IMAGE,
            address!("3489745eff9525ccc3d8c648102fe2cf3485e228"),
            address!("43b9ef43d415e84ad9964567002d648b11747a8f"),
            "http://localhost:8000/subgraphs/name/quicksnap",
            None,
            "ethereum",
        ),
        chain(
            "Sepolia",
            11155111,
            ETH_IMAGE,
            address!("b2fDA3e568b8658Df14712306Cc0C0A55293Dc51"),
            address!("75BB2081756833e9622B03221b096d24A42ef9e0"),
            "https://subgraph.satsuma-prod.com/ea73c8ead780/quicks-team--4476772/quicksnap-sepolia/api",
            Some("https://ethereum-sepolia.publicnode.com"),
            "ethereum",
        ),
        chain(
            "optimism-sepolia",
            11155420,
            OPTIMISM_IMAGE,
            address!("EC8B116afB4de3F954e519E6b1b490a88571BEbA"),
            address!("421C71A62d383176763d371f95A2ebCe4724B189"),
            "https://subgraph.satsuma-prod.com/ea73c8ead780/quicks-team--4476772/quicksnap-optimism-sepolia/api",
            Some("https://sepolia.optimism.io"),
            "optimistic-ethereum",
        ),
        chain(
            "arbitrum-sepolia",
            421614,
            ARBITRUM_IMAGE,
            address!("b2fDA3e568b8658Df14712306Cc0C0A55293Dc51"),
            address!("75BB2081756833e9622B03221b096d24A42ef9e0"),
            "https://subgraph.satsuma-prod.com/a7b664722611/jiverrrs-team--4501070/quicksnap-arbitrum-sepolia/api",
            Some("https://arbitrum-sepolia.blockpi.network/v1/rpc/public"),
            "arbitrum-one",
        ),
        // Listed for display only; no contracts deployed.
        ChainInfo {
            name: "Polygon".to_string(),
            chain_id: 137,
            image_url: Some(POLYGON_IMAGE.to_string()),
            merkle_address: None,
            incentive_address: None,
            graph_endpoint: None,
            rpc_url: Some("https://polygon-rpc.com/".to_string()),
            price_chain_name: Some("polygon-pos".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_table() {
        let registry = ChainRegistry::for_environment(Environment::Production);
        let mainnet = registry.get(1).unwrap();
        assert_eq!(mainnet.name, "Ethereum");
        assert_eq!(
            mainnet.incentive_address,
            Some(address!("a5544006EACd0D5665033eBd721cAdF761a2BFF8"))
        );
        assert!(registry.get(11155111).is_none());
        assert_eq!(registry.options().len(), 1);
    }

    #[test]
    fn test_testnet_table() {
        let registry = ChainRegistry::for_environment(Environment::Testnet);
        let ids: Vec<u64> = registry.options().iter().map(|c| c.chain_id).collect();
        assert_eq!(ids, vec![137, 1337, 421614, 11155111, 11155420]);

        let polygon = registry.get(137).unwrap();
        assert!(polygon.merkle_address.is_none());
        assert!(polygon.graph_endpoint.is_none());
        assert_eq!(
            registry.get(11155111).unwrap().rpc_url.as_deref(),
            Some("https://ethereum-sepolia.publicnode.com")
        );
    }

    #[test]
    fn test_unsupported_label() {
        let prod = ChainRegistry::for_environment(Environment::Production);
        let test = ChainRegistry::for_environment(Environment::Testnet);
        assert_eq!(prod.unsupported_label(), " Please connect to Ethereum Mainnet");
        assert_eq!(test.unsupported_label(), "Switch Network");
    }

    #[test]
    fn test_price_chain_default() {
        let mut info = ChainRegistry::for_environment(Environment::Production)
            .get(1)
            .cloned()
            .unwrap();
        info.price_chain_name = None;
        assert_eq!(info.price_chain(), "ethereum");
    }
}
