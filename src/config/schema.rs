//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::chains::{ChainInfo, Environment};

/// Root configuration for the incentive market client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MarketConfig {
    /// Which chain table is active.
    pub environment: Environment,

    /// External service endpoints.
    pub endpoints: EndpointConfig,

    /// Chain info used when the connected chain is not in the table.
    pub defaults: DefaultChainConfig,

    /// Extra or replacement entries for the active chain table.
    pub chains: Vec<ChainInfo>,

    /// RPC and transaction settings.
    pub blockchain: BlockchainConfig,

    /// Outbound HTTP settings (GraphQL, explorer).
    pub http: HttpConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// External service endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Governance hub base URL; GraphQL lives at `{hub_url}/graphql`.
    pub hub_url: String,

    /// Backend aggregator base URL (claims, token prices).
    pub backend_url: String,

    /// Block explorer API URL.
    pub explorer_url: String,

    /// Block explorer API key. `ETHERSCAN_API_KEY` takes precedence.
    pub explorer_api_key: Option<String>,

    /// RPC URL for chains whose table entry has none.
    pub default_rpc_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            hub_url: "https://hub.snapshot.org".to_string(),
            backend_url: "https://api.quicksnap.finance".to_string(),
            explorer_url: "https://api.etherscan.io/api".to_string(),
            explorer_api_key: None,
            default_rpc_url: "https://eth.llamarpc.com".to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn hub_graphql_url(&self) -> String {
        format!("{}/graphql", self.hub_url.trim_end_matches('/'))
    }

    pub fn backend_graphql_url(&self) -> String {
        format!("{}/graphql", self.backend_url.trim_end_matches('/'))
    }
}

/// Fallback chain info for unknown chains.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultChainConfig {
    pub name: String,
    pub image_url: String,
    pub merkle_address: Address,
    pub incentive_address: Address,
    pub graph_endpoint: String,
}

impl Default for DefaultChainConfig {
    fn default() -> Self {
        Self {
            name: "Ethereum".to_string(),
            image_url: "https://s2.coinmarketcap.com/static/img/coins/200x200/1027.png".to_string(),
            merkle_address: address!("B6f4b9EDdcc15B5b6eF2374bc91203A0086bc6B6"),
            incentive_address: address!("a5544006EACd0D5665033eBd721cAdF761a2BFF8"),
            graph_endpoint: "https://api.studio.thegraph.com/query/60882/quicksnap/version/latest/"
                .to_string(),
        }
    }
}

impl DefaultChainConfig {
    /// Chain info carrying these defaults for `chain_id`.
    pub fn to_chain_info(&self, chain_id: u64) -> ChainInfo {
        ChainInfo {
            name: self.name.clone(),
            chain_id,
            image_url: Some(self.image_url.clone()),
            merkle_address: Some(self.merkle_address),
            incentive_address: Some(self.incentive_address),
            graph_endpoint: Some(self.graph_endpoint.clone()),
            rpc_url: None,
            price_chain_name: None,
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// Chain to connect to when none is given on the command line.
    pub chain_id: u64,

    /// JSON-RPC endpoint URL overriding the chain table for `chain_id`.
    pub rpc_url: Option<String>,

    /// Failover JSON-RPC endpoint URLs for `chain_id`.
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations to wait for after sending.
    pub confirmation_blocks: u64,

    /// Maximum time to wait for a transaction receipt, in seconds.
    pub tx_timeout_secs: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            rpc_url: None,
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            tx_timeout_secs: 300,
        }
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
