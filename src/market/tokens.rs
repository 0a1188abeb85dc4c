//! Token metadata, prices, balances and allowances.

use alloy::primitives::{Address, U256};
use dashmap::DashMap;
use serde::Serialize;
use serde_json::json;

use crate::contracts::{TokenInfo, TokenNameBalance};
use crate::graphql::queries::TOKEN_DATA_FOR_CHAIN_QUERY;
use crate::graphql::TokenDataResponse;
use crate::market::{IncentiveMarket, MarketError, MarketResult};
use crate::observability::metrics;

/// Price and metadata of a token, as shown next to an incentive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenMarketData {
    /// `true` when the backend knows a positive price.
    pub success: bool,
    pub price: f64,
    pub logo: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

/// Symbol and decimals per (chain, token). Neither changes after deployment.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: DashMap<(u64, Address), TokenInfo>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chain_id: u64, token: Address) -> Option<TokenInfo> {
        self.entries.get(&(chain_id, token)).map(|e| e.value().clone())
    }

    pub fn insert(&self, chain_id: u64, info: TokenInfo) {
        self.entries.insert((chain_id, info.address), info);
        metrics::record_token_cache_size(self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IncentiveMarket {
    /// Symbol and decimals of `token` on the connected chain, cached.
    /// `None` (logged) when not connected or the calls fail.
    pub async fn token_info(&self, token: Address) -> Option<TokenInfo> {
        let chain_id = self.session.chain_id()?;
        if let Some(info) = self.tokens.get(chain_id, token) {
            return Some(info);
        }

        let info = self.erc20(token).ok()?.token_info().await?;
        self.tokens.insert(chain_id, info.clone());
        Some(info)
    }

    /// Token decimals, from the cache when possible.
    pub async fn decimals(&self, token: Address) -> MarketResult<u8> {
        let chain_id = self.session.chain_id().ok_or(MarketError::NotConnected)?;
        if let Some(info) = self.tokens.get(chain_id, token) {
            return Ok(info.decimals);
        }
        Ok(self.erc20(token)?.decimals().await?)
    }

    /// Backend price and metadata plus on-chain decimals. Zeroed, with
    /// `success = false`, on any failure.
    pub async fn token_data(&self, token: Address) -> TokenMarketData {
        match self.try_token_data(token).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Failed to load token market data");
                TokenMarketData::default()
            }
        }
    }

    async fn try_token_data(&self, token: Address) -> MarketResult<TokenMarketData> {
        let chain_name = self.chain_info().price_chain().to_string();
        let response: TokenDataResponse = self
            .backend
            .query(
                TOKEN_DATA_FOR_CHAIN_QUERY,
                &json!({ "token": token.to_string(), "chainName": chain_name }),
            )
            .await?;
        let decimals = self.decimals(token).await?;

        let data = response.token_data_for_chain.unwrap_or_default();
        tracing::debug!(token = %token, price = data.price, chain = %chain_name, "Token market data");
        Ok(TokenMarketData {
            success: data.price > 0.0,
            price: data.price,
            logo: data.logo,
            name: data.name,
            symbol: data.symbol,
            decimals: Some(decimals),
        })
    }

    /// Name, symbol and balance of the connected wallet.
    pub async fn token_name_balance(&self, token: Address) -> Option<TokenNameBalance> {
        let owner = self.session.user_address()?;
        self.erc20(token).ok()?.token_name_balance(owner).await
    }

    /// Formatted balance of the connected wallet, `"0"` on failure.
    pub async fn token_balance(&self, token: Address) -> String {
        let (Some(owner), Ok(erc20)) = (self.session.user_address(), self.erc20(token)) else {
            tracing::warn!(token = %token, "Token balance requested without a connected wallet");
            return "0".to_string();
        };
        erc20.token_balance(owner).await
    }

    pub async fn raw_token_balance(&self, token: Address) -> MarketResult<U256> {
        let owner = self.connection()?.address;
        Ok(self.erc20(token)?.raw_token_balance(owner).await?)
    }

    /// Formatted allowance granted by the connected wallet to `spender`.
    pub async fn allowance(&self, token: Address, spender: Address) -> MarketResult<String> {
        let owner = self.connection()?.address;
        Ok(self.erc20(token)?.allowance(owner, spender).await?)
    }

    pub async fn raw_allowance(&self, token: Address, spender: Address) -> MarketResult<U256> {
        let owner = self.connection()?.address;
        Ok(self.erc20(token)?.raw_allowance(owner, spender).await?)
    }

    /// Unlimited approval of `spender`. `false` on any failure.
    pub async fn approve(&self, token: Address, spender: Address) -> bool {
        let (Some(owner), Ok(erc20)) = (self.session.user_address(), self.erc20(token)) else {
            tracing::error!(token = %token, "Approval requested without a connected wallet");
            return false;
        };
        erc20.approve(owner, spender, &self.tx_settings()).await
    }

    /// Incentive contract of the connected chain, the usual approval target.
    pub fn incentive_address(&self) -> MarketResult<Address> {
        let info = self.chain_info();
        info.incentive_address.ok_or(MarketError::MissingContract {
            contract: "incentive",
            chain_id: info.chain_id,
        })
    }
}
