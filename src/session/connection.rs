//! A live wallet connection.

use alloy::primitives::Address;

use crate::blockchain::{BlockchainClient, BlockchainResult, RpcSettings, Wallet};

/// What backs a connection.
#[derive(Debug, Clone)]
pub enum WalletSource {
    /// Local signing key.
    Key(Wallet),
    /// Address only; reads work, transactions are refused.
    Watch(Address),
}

/// Wallet label, address and provider for one chain.
#[derive(Debug, Clone)]
pub struct Connection {
    pub label: String,
    pub address: Address,
    wallet: Option<Wallet>,
    client: BlockchainClient,
}

impl Connection {
    pub fn new(label: impl Into<String>, address: Address, client: BlockchainClient) -> Self {
        Self {
            label: label.into(),
            address,
            wallet: None,
            client,
        }
    }

    /// Build the RPC client for `settings` and wrap it for `source`.
    pub async fn open(source: WalletSource, settings: RpcSettings) -> BlockchainResult<Self> {
        match source {
            WalletSource::Key(wallet) => {
                let client = BlockchainClient::new(settings, Some(&wallet)).await?;
                let mut connection = Self::new(wallet.label(), wallet.address(), client);
                connection.wallet = Some(wallet);
                Ok(connection)
            }
            WalletSource::Watch(address) => {
                let client = BlockchainClient::new(settings, None).await?;
                Ok(Self::new("Watch-only", address, client))
            }
        }
    }

    /// Same wallet on another chain's client.
    pub fn on_client(&self, client: BlockchainClient) -> Self {
        Self {
            label: self.label.clone(),
            address: self.address,
            wallet: self.wallet.clone(),
            client,
        }
    }

    /// Signing key, for rebuilding the client on another chain.
    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }

    pub fn chain_id(&self) -> u64 {
        self.client.chain_id()
    }

    pub fn can_sign(&self) -> bool {
        self.client.can_sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn settings() -> RpcSettings {
        RpcSettings {
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1337,
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_open_with_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let connection = Connection::open(WalletSource::Key(wallet.clone()), settings())
            .await
            .unwrap();
        assert_eq!(connection.address, wallet.address());
        assert!(connection.can_sign());
        assert_eq!(connection.chain_id(), 1337);
        assert_eq!(connection.wallet().map(Wallet::address), Some(wallet.address()));
    }

    #[tokio::test]
    async fn test_open_watch_only() {
        let connection = Connection::open(WalletSource::Watch(Address::ZERO), settings())
            .await
            .unwrap();
        assert_eq!(connection.label, "Watch-only");
        assert!(!connection.can_sign());
        assert!(connection.wallet().is_none());
    }
}
