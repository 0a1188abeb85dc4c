//! Merkle reward lookup and claiming.

use alloy::primitives::U256;
use futures_util::future::join_all;
use serde::Serialize;
use serde_json::json;

use crate::blockchain::ConfirmedTx;
use crate::contracts::{ClaimData, MerkleDistributor, TokenInfo};
use crate::format::token_amount_to_f64;
use crate::graphql::queries::CLAIMS_QUERY;
use crate::graphql::{serde_num, ClaimInfo, ClaimsResponse};
use crate::market::{IncentiveMarket, MarketError, MarketResult};

/// Version tag the claim UI expects on every reward.
const REWARD_VERSION: u8 = 3;

/// A claimable payout for the connected wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub version: u8,
    pub claimable: f64,
    #[serde(with = "serde_num::u256")]
    pub claimable_raw: U256,
    pub can_claim: bool,
    pub has_claimed: bool,
    pub reward_token: TokenInfo,
    pub claim_data: ClaimData,
    pub reward_token_price: f64,
    pub reward_token_logo: Option<String>,
}

/// Rewards plus the account's claim totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsSummary {
    pub rewards: Vec<Reward>,
    pub claim_info: ClaimInfo,
}

impl IncentiveMarket {
    /// Rewards of the connected wallet on the connected chain. Empty when
    /// no wallet is connected or on failure.
    pub async fn get_rewards(&self) -> RewardsSummary {
        match self.try_get_rewards().await {
            Ok(summary) => summary,
            Err(MarketError::NotConnected) => RewardsSummary::default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load rewards");
                RewardsSummary::default()
            }
        }
    }

    async fn try_get_rewards(&self) -> MarketResult<RewardsSummary> {
        let connection = self.connection()?;
        let response: ClaimsResponse = self
            .backend
            .query(
                CLAIMS_QUERY,
                &json!({
                    "account": format!("{:#x}", connection.address),
                    "chainId": connection.chain_id(),
                }),
            )
            .await?;
        tracing::debug!(
            account = %connection.address,
            claims = response.claims.len(),
            "Fetched claims"
        );

        let rewards = join_all(response.claims.into_iter().map(|claim| self.enrich_claim(claim)))
            .await
            .into_iter()
            .flatten()
            .collect();

        Ok(RewardsSummary {
            rewards,
            claim_info: response.claim_info.unwrap_or_default(),
        })
    }

    /// Attach token metadata and price to a claim. Claims whose token
    /// cannot be read are dropped.
    async fn enrich_claim(&self, claim: ClaimData) -> Option<Reward> {
        let (token, market) = tokio::join!(self.token_info(claim.token), self.token_data(claim.token));
        let token = token?;
        let claimable = match token_amount_to_f64(claim.amount, token.decimals) {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!(token = %claim.token, error = %e, "Unreadable claim amount");
                return None;
            }
        };

        Some(Reward {
            version: REWARD_VERSION,
            claimable,
            claimable_raw: claim.amount,
            can_claim: true,
            has_claimed: false,
            reward_token: token,
            claim_data: claim,
            reward_token_price: market.price,
            reward_token_logo: market.logo,
        })
    }

    fn distributor(&self) -> MarketResult<MerkleDistributor> {
        let connection = self.connection()?;
        let info = self.chain_info();
        let address = info.merkle_address.ok_or(MarketError::MissingContract {
            contract: "merkle distributor",
            chain_id: info.chain_id,
        })?;
        Ok(MerkleDistributor::new(connection.client().clone(), address))
    }

    /// Claim one reward to the connected wallet.
    pub async fn claim_reward(&self, reward: &Reward) -> MarketResult<ConfirmedTx> {
        let account = self.connection()?.address;
        let tx = self
            .distributor()?
            .claim(account, &reward.claim_data, &self.tx_settings())
            .await?;
        tracing::info!(token = %reward.reward_token.symbol, tx_hash = %tx.tx_hash, "Reward claimed");
        Ok(tx)
    }

    /// Claim every reward in one transaction.
    pub async fn claim_all_rewards(&self, rewards: &[Reward]) -> MarketResult<ConfirmedTx> {
        if rewards.is_empty() {
            return Err(MarketError::NothingToClaim);
        }
        let account = self.connection()?.address;
        let claims: Vec<ClaimData> = rewards.iter().map(|r| r.claim_data.clone()).collect();
        let tx = self
            .distributor()?
            .claim_multi(account, &claims, &self.tx_settings())
            .await?;
        tracing::info!(count = claims.len(), tx_hash = %tx.tx_hash, "Rewards claimed");
        Ok(tx)
    }
}
