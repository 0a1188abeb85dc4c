//! Blockchain RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoints (primary + failovers)
//! - Run read calls with a per-call deadline, falling over on error
//! - Attach the signing wallet when the connection can send transactions
//! - Provide health check for blockchain connectivity

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

/// Where and how to reach a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcSettings {
    pub rpc_url: String,
    pub failover_urls: Vec<String>,
    pub chain_id: u64,
    pub timeout_secs: u64,
}

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    settings: RpcSettings,
    timeout_duration: Duration,
    can_sign: bool,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// When `wallet` is given every provider signs with it. An unreachable
    /// or mismatched chain is logged, not fatal.
    pub async fn new(settings: RpcSettings, wallet: Option<&Wallet>) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(settings.rpc_timeout());
        let mut providers = Vec::new();

        let primary_url: url::Url = settings.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", settings.rpc_url, e))
        })?;
        providers.push(build_provider(primary_url, wallet));

        for url_str in &settings.failover_urls {
            match url_str.parse() {
                Ok(url) => providers.push(build_provider(url, wallet)),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let client = Self {
            providers,
            settings: settings.clone(),
            timeout_duration,
            can_sign: wallet.is_some(),
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %settings.rpc_url,
                    chain_id = settings.chain_id,
                    can_sign = client.can_sign,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Run a read call against each provider in turn until one answers.
    pub async fn with_failover<T, E, F, Fut>(&self, op: &'static str, call: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc_call(op, true);
                    return Ok(result);
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, op, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, op, "RPC timeout, trying next provider");
                }
            }
        }
        metrics::record_rpc_call(op, false);
        Err(BlockchainError::Rpc(format!("All RPC providers failed ({})", op)))
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.settings.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.settings.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
    }

    /// Check if the blockchain is reachable and healthy.
    pub async fn is_healthy(&self) -> bool {
        self.get_block_number().await.is_ok()
    }

    /// Get the underlying primary provider.
    pub fn provider(&self) -> &DynProvider {
        &self.providers[0]
    }

    /// Primary provider, only if it can sign transactions.
    pub fn signing_provider(&self) -> BlockchainResult<DynProvider> {
        if !self.can_sign {
            return Err(BlockchainError::ReadOnly);
        }
        Ok(self.providers[0].clone())
    }

    pub fn can_sign(&self) -> bool {
        self.can_sign
    }

    pub fn chain_id(&self) -> u64 {
        self.settings.chain_id
    }

    pub fn settings(&self) -> &RpcSettings {
        &self.settings
    }
}

impl RpcSettings {
    fn rpc_timeout(&self) -> u64 {
        self.timeout_secs.max(1)
    }
}

fn build_provider(url: url::Url, wallet: Option<&Wallet>) -> DynProvider {
    match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased(),
        None => ProviderBuilder::new().connect_http(url).erased(),
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.settings.rpc_url)
            .field("chain_id", &self.settings.chain_id)
            .field("providers", &self.providers.len())
            .field("can_sign", &self.can_sign)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> RpcSettings {
        RpcSettings {
            // Nothing listens on port 1.
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_client_creation_tolerates_unreachable_rpc() {
        let client = BlockchainClient::new(test_settings(), None).await;
        assert!(client.is_ok());
        let client = client.unwrap();
        assert!(!client.can_sign());
        assert!(!client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_invalid_primary_url() {
        let mut settings = test_settings();
        settings.rpc_url = "not a url".to_string();
        let err = BlockchainClient::new(settings, None).await.unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut settings = test_settings();
        settings.failover_urls.push("http://127.0.0.1:2".to_string());
        settings.failover_urls.push("::not-a-url".to_string());

        let client = BlockchainClient::new(settings, None).await.unwrap();
        assert_eq!(client.providers.len(), 2);

        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All RPC providers failed"));
    }

    #[tokio::test]
    async fn test_read_only_cannot_sign() {
        let client = BlockchainClient::new(test_settings(), None).await.unwrap();
        assert!(matches!(client.signing_provider(), Err(BlockchainError::ReadOnly)));
    }
}
