//! ERC-20 token wrapper.
//!
//! Mirrors the market's token helpers: metadata lookups, formatted and raw
//! balances and allowances, and unlimited approval.

use alloy::primitives::{address, Address, U256};
use serde::Serialize;

use crate::blockchain::transaction::{self, ConfirmedTx, TxSettings};
use crate::blockchain::{BlockchainClient, BlockchainError, BlockchainResult};
use crate::contracts::abi::IERC20;
use crate::format::format_token_amount;

/// USDT refuses `approve` from a non-zero allowance to another non-zero
/// value, so its allowance is reset to zero first.
pub const USDT_ADDRESS: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

/// Symbol and decimals of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Name, symbol and holder balance of a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenNameBalance {
    pub name: String,
    pub symbol: String,
    pub balance: f64,
}

/// Handle on one ERC-20 contract.
#[derive(Debug, Clone)]
pub struct Erc20 {
    client: BlockchainClient,
    address: Address,
}

fn units_error(e: impl std::fmt::Display) -> BlockchainError {
    BlockchainError::Contract(format!("unit conversion failed: {}", e))
}

impl Erc20 {
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn name(&self) -> BlockchainResult<String> {
        let token = self.address;
        self.client
            .with_failover("erc20.name", move |p| async move {
                IERC20::new(token, p).name().call().await
            })
            .await
    }

    pub async fn symbol(&self) -> BlockchainResult<String> {
        let token = self.address;
        self.client
            .with_failover("erc20.symbol", move |p| async move {
                IERC20::new(token, p).symbol().call().await
            })
            .await
    }

    pub async fn decimals(&self) -> BlockchainResult<u8> {
        let token = self.address;
        self.client
            .with_failover("erc20.decimals", move |p| async move {
                IERC20::new(token, p).decimals().call().await
            })
            .await
    }

    /// Balance of `owner` in base units.
    pub async fn raw_token_balance(&self, owner: Address) -> BlockchainResult<U256> {
        let token = self.address;
        self.client
            .with_failover("erc20.balanceOf", move |p| async move {
                IERC20::new(token, p).balanceOf(owner).call().await
            })
            .await
    }

    /// Allowance granted by `owner` to `spender` in base units.
    pub async fn raw_allowance(&self, owner: Address, spender: Address) -> BlockchainResult<U256> {
        let token = self.address;
        self.client
            .with_failover("erc20.allowance", move |p| async move {
                IERC20::new(token, p).allowance(owner, spender).call().await
            })
            .await
    }

    /// Symbol and decimals, fetched concurrently.
    pub async fn try_token_info(&self) -> BlockchainResult<TokenInfo> {
        let (symbol, decimals) = tokio::try_join!(self.symbol(), self.decimals())?;
        Ok(TokenInfo {
            address: self.address,
            symbol,
            decimals,
        })
    }

    /// Symbol and decimals, or `None` (logged) on failure.
    pub async fn token_info(&self) -> Option<TokenInfo> {
        match self.try_token_info().await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(token = %self.address, error = %e, "Failed to load token info");
                None
            }
        }
    }

    /// Name, symbol and formatted balance of `owner`, or `None` on failure.
    pub async fn token_name_balance(&self, owner: Address) -> Option<TokenNameBalance> {
        let result = async {
            let (name, symbol, balance, decimals) = tokio::try_join!(
                self.name(),
                self.symbol(),
                self.raw_token_balance(owner),
                self.decimals()
            )?;
            let balance = crate::format::token_amount_to_f64(balance, decimals).map_err(units_error)?;
            Ok::<_, BlockchainError>(TokenNameBalance {
                name,
                symbol,
                balance,
            })
        }
        .await;

        match result {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(token = %self.address, error = %e, "Failed to load token name and balance");
                None
            }
        }
    }

    /// Allowance formatted with the token's decimals.
    pub async fn allowance(&self, owner: Address, spender: Address) -> BlockchainResult<String> {
        let (allowance, decimals) =
            tokio::try_join!(self.raw_allowance(owner, spender), self.decimals())?;
        format_token_amount(allowance, decimals).map_err(units_error)
    }

    /// Balance formatted with the token's decimals, `"0"` on failure.
    pub async fn token_balance(&self, owner: Address) -> String {
        let result = async {
            let (balance, decimals) =
                tokio::try_join!(self.raw_token_balance(owner), self.decimals())?;
            format_token_amount(balance, decimals).map_err(units_error)
        }
        .await;

        match result {
            Ok(balance) => balance,
            Err(e) => {
                tracing::warn!(token = %self.address, owner = %owner, error = %e, "Failed to load token balance");
                "0".to_string()
            }
        }
    }

    /// Grant `spender` an unlimited allowance. Returns `false` (logged) on
    /// any failure.
    pub async fn approve(&self, owner: Address, spender: Address, settings: &TxSettings) -> bool {
        match self.try_approve(owner, spender, settings).await {
            Ok(tx) => {
                tracing::info!(token = %self.address, spender = %spender, tx_hash = %tx.tx_hash, "Token approved");
                true
            }
            Err(e) => {
                tracing::error!(token = %self.address, spender = %spender, error = %e, "Token approval failed");
                false
            }
        }
    }

    async fn try_approve(
        &self,
        owner: Address,
        spender: Address,
        settings: &TxSettings,
    ) -> BlockchainResult<ConfirmedTx> {
        let provider = self.client.signing_provider()?;
        let contract = IERC20::new(self.address, provider);

        if self.address == USDT_ADDRESS {
            let current = self.raw_allowance(owner, spender).await?;
            if current > U256::ZERO {
                tracing::info!(token = %self.address, "Resetting allowance to 0 before updating it");
                transaction::submit(contract.approve(spender, U256::ZERO), "erc20.approve_reset", settings)
                    .await?;
            }
        }

        transaction::submit(contract.approve(spender, U256::MAX), "erc20.approve", settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::RpcSettings;

    async fn offline_token() -> Erc20 {
        let settings = RpcSettings {
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            timeout_secs: 2,
        };
        let client = BlockchainClient::new(settings, None).await.unwrap();
        Erc20::new(client, USDT_ADDRESS)
    }

    #[test]
    fn test_usdt_address() {
        assert_eq!(
            USDT_ADDRESS.to_string().to_lowercase(),
            "0xdac17f958d2ee523a2206206994597c13d831ec7"
        );
    }

    #[tokio::test]
    async fn test_lenient_reads_default_when_offline() {
        let token = offline_token().await;
        assert_eq!(token.token_balance(Address::ZERO).await, "0");
        assert!(token.token_info().await.is_none());
        assert!(token.token_name_balance(Address::ZERO).await.is_none());
    }

    #[tokio::test]
    async fn test_strict_reads_propagate_when_offline() {
        let token = offline_token().await;
        assert!(token.decimals().await.is_err());
        assert!(token.raw_allowance(Address::ZERO, Address::ZERO).await.is_err());
        assert!(token.allowance(Address::ZERO, Address::ZERO).await.is_err());
    }

    #[tokio::test]
    async fn test_approve_without_signer_fails_softly() {
        let token = offline_token().await;
        assert!(!token.approve(Address::ZERO, Address::ZERO, &TxSettings::default()).await);
    }
}
