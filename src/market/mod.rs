//! Incentive market orchestration.
//!
//! # Data Flow
//! ```text
//! CLI command
//!     → IncentiveMarket (session, config)
//!     → contracts (ERC-20, incentive registry, merkle distributor)
//!     → graphql (hub proposals, chain subgraph, backend prices / claims)
//!     → formatted values
//! ```
//!
//! Read helpers that only feed a display swallow their errors, log them and
//! return an empty or zeroed value. Anything that sends a transaction
//! returns a `Result`.

pub mod incentives;
pub mod rewards;
pub mod tokens;

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::blockchain::{BlockchainClient, BlockchainError, RpcSettings, TxSettings};
use crate::chains::{ChainInfo, ChainRegistry};
use crate::config::MarketConfig;
use crate::contracts::Erc20;
use crate::explorer::{ExplorerClient, ExplorerError};
use crate::graphql::{GraphQlClient, GraphQlError};
use crate::session::{Connection, Session, WalletSource};

pub use incentives::{option_label, ActiveIncentive, IncentivizedChoice, NewIncentive};
pub use rewards::{Reward, RewardsSummary};
pub use tokens::{TokenCache, TokenMarketData};

/// Errors from market operations.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    GraphQl(#[from] GraphQlError),

    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No wallet connected")]
    NotConnected,

    /// The chain table has no address for a required contract.
    #[error("No {contract} contract configured for chain {chain_id}")]
    MissingContract {
        contract: &'static str,
        chain_id: u64,
    },

    #[error("No subgraph configured for chain {0}")]
    MissingSubgraph(u64),

    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid proposal id '{0}'")]
    InvalidProposal(String),

    #[error("Could not load metadata for token {0}")]
    TokenMetadata(Address),

    #[error("Approval of token {0} failed")]
    ApprovalFailed(Address),

    #[error("No rewards to claim")]
    NothingToClaim,
}

pub type MarketResult<T> = Result<T, MarketError>;

/// Entry point for every market operation.
#[derive(Debug)]
pub struct IncentiveMarket {
    config: Arc<MarketConfig>,
    session: Arc<Session>,
    http: reqwest::Client,
    hub: GraphQlClient,
    backend: GraphQlClient,
    explorer: ExplorerClient,
    tokens: TokenCache,
}

impl IncentiveMarket {
    pub fn new(config: MarketConfig) -> MarketResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .build()?;

        let mut registry = ChainRegistry::for_environment(config.environment);
        for chain in &config.chains {
            tracing::debug!(chain = %chain.name, chain_id = chain.chain_id, "Chain table override");
            registry.insert(chain.clone());
        }
        let session = Arc::new(Session::new(registry, config.defaults.clone()));

        let hub = GraphQlClient::new(http.clone(), config.endpoints.hub_graphql_url(), "hub");
        let backend =
            GraphQlClient::new(http.clone(), config.endpoints.backend_graphql_url(), "backend");
        let explorer = ExplorerClient::new(
            http.clone(),
            config.endpoints.explorer_url.clone(),
            config.endpoints.explorer_api_key.clone(),
        );

        tracing::debug!(
            environment = ?config.environment,
            hub = %hub.endpoint(),
            backend = %backend.endpoint(),
            "Incentive market initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            session,
            http,
            hub,
            backend,
            explorer,
            tokens: TokenCache::new(),
        })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn registry(&self) -> &ChainRegistry {
        self.session.registry()
    }

    /// RPC settings for `chain_id`. On the configured chain the `rpc_url`
    /// override wins, then the chain table, then the default RPC URL.
    /// Failover URLs only apply to the configured chain.
    pub fn rpc_settings(&self, chain_id: u64) -> RpcSettings {
        let blockchain = &self.config.blockchain;
        let configured = chain_id == blockchain.chain_id;
        let rpc_url = blockchain
            .rpc_url
            .clone()
            .filter(|_| configured)
            .or_else(|| self.registry().get(chain_id).and_then(|c| c.rpc_url.clone()))
            .unwrap_or_else(|| self.config.endpoints.default_rpc_url.clone());
        let failover_urls = if configured {
            blockchain.failover_urls.clone()
        } else {
            Vec::new()
        };

        RpcSettings {
            rpc_url,
            failover_urls,
            chain_id,
            timeout_secs: blockchain.rpc_timeout_secs,
        }
    }

    pub fn tx_settings(&self) -> TxSettings {
        TxSettings {
            confirmations: self.config.blockchain.confirmation_blocks,
            timeout: Duration::from_secs(self.config.blockchain.tx_timeout_secs),
        }
    }

    /// Connect `source` on `chain_id`, replacing any current connection.
    pub async fn connect(&self, chain_id: u64, source: WalletSource) -> MarketResult<Arc<Connection>> {
        let connection = Connection::open(source, self.rpc_settings(chain_id)).await?;
        if self.registry().get(chain_id).is_none() {
            tracing::warn!(chain_id, "Connected to a chain without market contracts");
        }
        Ok(self.session.connect(connection))
    }

    pub fn disconnect(&self) -> bool {
        self.session.disconnect()
    }

    /// Move the connected wallet to `chain_id`.
    pub async fn switch_chain(&self, chain_id: u64) -> MarketResult<Arc<Connection>> {
        let current = self.connection()?;
        let client = BlockchainClient::new(self.rpc_settings(chain_id), current.wallet()).await?;
        self.session.switch_chain(client).ok_or(MarketError::NotConnected)
    }

    pub fn connection(&self) -> MarketResult<Arc<Connection>> {
        self.session.connection().ok_or(MarketError::NotConnected)
    }

    pub fn chain_info(&self) -> ChainInfo {
        self.session.chain_info()
    }

    /// ERC-20 handle on the connected chain.
    pub fn erc20(&self, token: Address) -> MarketResult<Erc20> {
        let connection = self.connection()?;
        Ok(Erc20::new(connection.client().clone(), token))
    }

    /// Subgraph client for the connected chain (or the fallback chain).
    fn subgraph(&self) -> MarketResult<GraphQlClient> {
        let info = self.chain_info();
        let endpoint = info
            .graph_endpoint
            .ok_or(MarketError::MissingSubgraph(info.chain_id))?;
        Ok(GraphQlClient::new(self.http.clone(), endpoint, "subgraph"))
    }

    /// Verified contract name from the block explorer.
    pub async fn contract_name(&self, address: Address) -> MarketResult<String> {
        Ok(self.explorer.contract_name(address).await?)
    }
}
