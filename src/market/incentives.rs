//! Browsing and depositing incentives.

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::blockchain::ConfirmedTx;
use crate::contracts::{IncentiveContract, RewardDeposit, ALL_OPTIONS};
use crate::format::{add_incentive_fee, parse_token_amount, token_amount_to_f64};
use crate::graphql::queries::{
    CURRENT_INCENTIVES_QUERY, INCENTIVES_BY_PROPOSAL_QUERY, INCENTIVES_PAGE_SIZE,
    PROPOSAL_REDUCED_QUERY,
};
use crate::graphql::{Proposal, ProposalResponse, RewardAdded, RewardAddedsResponse};
use crate::market::{IncentiveMarket, MarketError, MarketResult};

/// A currently running incentive, joined with its proposal and token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveIncentive {
    /// Token amount including the platform fee.
    pub formatted_amount: f64,
    #[serde(flatten)]
    pub reward: RewardAdded,
    #[serde(flatten)]
    pub proposal: Option<Proposal>,
    pub price: f64,
    pub symbol: String,
    pub decimals: u8,
}

/// One incentive on a proposal, labelled with the choice it backs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentivizedChoice {
    pub amount: f64,
    pub dollar_amount: f64,
    pub symbol: String,
    pub option: String,
}

/// A deposit as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncentive {
    /// Proposal id, `0x` + 32 bytes.
    pub proposal: String,
    /// 1-based choice index or [`ALL_OPTIONS`].
    pub option: U256,
    /// Human readable token amount.
    pub amount: String,
    pub token: Address,
    pub start: u64,
    pub end: u64,
}

/// Label for a choice index: `"All options"` for [`ALL_OPTIONS`], else the
/// 1-based entry of `choices`.
pub fn option_label(option: U256, choices: &[String]) -> String {
    if option == ALL_OPTIONS {
        return "All options".to_string();
    }
    usize::try_from(option)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| choices.get(index))
        .cloned()
        .unwrap_or_else(|| format!("Option #{}", option))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl IncentiveMarket {
    /// Incentives whose window contains the current time, across all
    /// proposals. Returns what was resolved before the first failure.
    pub async fn get_active_incentives(&self) -> Vec<ActiveIncentive> {
        let mut active = Vec::new();
        if let Err(e) = self.collect_active_incentives(&mut active).await {
            tracing::error!(error = %e, resolved = active.len(), "Failed to load active incentives");
        }
        active
    }

    async fn collect_active_incentives(&self, out: &mut Vec<ActiveIncentive>) -> MarketResult<()> {
        let subgraph = self.subgraph()?;
        let time = unix_now();
        let mut skip = 0usize;

        loop {
            let page: RewardAddedsResponse = subgraph
                .query(CURRENT_INCENTIVES_QUERY, &json!({ "time": time, "skip": skip }))
                .await?;
            let count = page.reward_addeds.len();
            tracing::debug!(skip, count, "Fetched active incentives page");

            for reward in page.reward_addeds {
                out.push(self.resolve_active_incentive(reward).await?);
            }

            if count < INCENTIVES_PAGE_SIZE {
                return Ok(());
            }
            skip += count;
        }
    }

    async fn resolve_active_incentive(&self, reward: RewardAdded) -> MarketResult<ActiveIncentive> {
        let proposal: ProposalResponse = self
            .hub
            .query(PROPOSAL_REDUCED_QUERY, &json!({ "id": reward.proposal }))
            .await?;
        let price = self.token_data(reward.reward_token).await.price;
        let token = self
            .token_info(reward.reward_token)
            .await
            .ok_or(MarketError::TokenMetadata(reward.reward_token))?;

        let amount = token_amount_to_f64(reward.amount, token.decimals).map_err(|e| {
            MarketError::InvalidAmount {
                amount: reward.amount.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(ActiveIncentive {
            formatted_amount: add_incentive_fee(amount),
            reward,
            proposal: proposal.proposal,
            price,
            symbol: token.symbol,
            decimals: token.decimals,
        })
    }

    /// Incentives registered on `proposal`, with fee-inclusive token and
    /// dollar amounts. Returns what was resolved before the first failure.
    pub async fn get_incentives_for_proposal(
        &self,
        proposal: &str,
        choices: &[String],
    ) -> Vec<IncentivizedChoice> {
        let mut incentivized = Vec::new();
        if let Err(e) = self
            .collect_proposal_incentives(proposal, choices, &mut incentivized)
            .await
        {
            tracing::error!(
                proposal,
                error = %e,
                resolved = incentivized.len(),
                "Failed to load proposal incentives"
            );
        }
        incentivized
    }

    async fn collect_proposal_incentives(
        &self,
        proposal: &str,
        choices: &[String],
        out: &mut Vec<IncentivizedChoice>,
    ) -> MarketResult<()> {
        let response: RewardAddedsResponse = self
            .subgraph()?
            .query(INCENTIVES_BY_PROPOSAL_QUERY, &json!({ "id": proposal }))
            .await?;
        tracing::debug!(proposal, count = response.reward_addeds.len(), "Fetched proposal incentives");

        for reward in response.reward_addeds {
            let price = self.token_data(reward.reward_token).await.price;
            let (decimals, symbol) = {
                let erc20 = self.erc20(reward.reward_token)?;
                tokio::try_join!(erc20.decimals(), erc20.symbol())?
            };
            let amount = token_amount_to_f64(reward.amount, decimals).map_err(|e| {
                MarketError::InvalidAmount {
                    amount: reward.amount.to_string(),
                    reason: e.to_string(),
                }
            })?;

            out.push(IncentivizedChoice {
                amount: add_incentive_fee(amount),
                dollar_amount: add_incentive_fee(amount * price),
                symbol,
                option: option_label(reward.option, choices),
            });
        }
        Ok(())
    }

    /// Reduced proposal from the governance hub.
    pub async fn proposal(&self, id: &str) -> MarketResult<Option<Proposal>> {
        let response: ProposalResponse = self
            .hub
            .query(PROPOSAL_REDUCED_QUERY, &json!({ "id": id }))
            .await?;
        Ok(response.proposal)
    }

    /// Deposit an incentive. The token must already be approved for the
    /// incentive contract.
    pub async fn add_reward(&self, incentive: &NewIncentive) -> MarketResult<ConfirmedTx> {
        let connection = self.connection()?;
        let proposal: B256 = incentive
            .proposal
            .parse()
            .map_err(|_| MarketError::InvalidProposal(incentive.proposal.clone()))?;
        let contract_address = self.incentive_address()?;

        let decimals = self.decimals(incentive.token).await?;
        let amount = parse_token_amount(&incentive.amount, decimals).map_err(|e| {
            MarketError::InvalidAmount {
                amount: incentive.amount.clone(),
                reason: e.to_string(),
            }
        })?;

        let deposit = RewardDeposit {
            proposal,
            option: incentive.option,
            reward_token: incentive.token,
            amount,
            start: incentive.start,
            end: incentive.end,
        };
        let contract = IncentiveContract::new(connection.client().clone(), contract_address);
        let tx = contract.add_reward_amount(&deposit, &self.tx_settings()).await?;
        tracing::info!(
            proposal = %proposal,
            tx_hash = %tx.tx_hash,
            block = ?tx.block_number,
            "Incentive added"
        );
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;

    fn choices() -> Vec<String> {
        vec!["For".to_string(), "Against".to_string(), "Abstain".to_string()]
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(ALL_OPTIONS, &choices()), "All options");
        assert_eq!(option_label(U256::from(1u64), &choices()), "For");
        assert_eq!(option_label(U256::from(3u64), &choices()), "Abstain");
    }

    #[test]
    fn test_option_label_out_of_range() {
        assert_eq!(option_label(U256::from(4u64), &choices()), "Option #4");
        assert_eq!(option_label(U256::ZERO, &choices()), "Option #0");
        assert_eq!(option_label(U256::from(2u64), &[]), "Option #2");
    }

    #[test]
    fn test_active_incentive_serializes_flat() {
        let reward: RewardAdded = serde_json::from_value(json!({
            "id": "0xabc-1",
            "time": "1700000000",
            "rewarder": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "proposal": "0x7a1b2c",
            "option": "1",
            "reward_token": "0xdac17f958d2ee523a2206206994597c13d831ec7",
            "amount": "95000000",
            "startTime": "1700000000",
            "endTime": "1700600000",
            "blockNumber": "18500000",
            "blockTimestamp": "1700000000"
        }))
        .unwrap();

        let incentive = ActiveIncentive {
            formatted_amount: 100.0,
            reward,
            proposal: None,
            price: 1.0,
            symbol: "USDT".to_string(),
            decimals: 6,
        };
        let value = serde_json::to_value(&incentive).unwrap();
        assert_eq!(value["formattedAmount"], 100.0);
        assert_eq!(value["proposal"], "0x7a1b2c");
        assert_eq!(value["symbol"], "USDT");
        assert!(value.get("title").is_none());
    }

    #[tokio::test]
    async fn test_add_reward_requires_connection() {
        let market = IncentiveMarket::new(MarketConfig::default()).unwrap();
        let incentive = NewIncentive {
            proposal: format!("0x{}", "11".repeat(32)),
            option: U256::from(1u64),
            amount: "10".to_string(),
            token: Address::repeat_byte(0xaa),
            start: 0,
            end: 1,
        };
        assert!(matches!(
            market.add_reward(&incentive).await,
            Err(MarketError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_proposal_incentives_empty_on_failure() {
        let mut config = MarketConfig::default();
        config.defaults.graph_endpoint = "http://127.0.0.1:1/subgraph".to_string();
        let market = IncentiveMarket::new(config).unwrap();
        assert!(market
            .get_incentives_for_proposal("0x01", &choices())
            .await
            .is_empty());
        assert!(market.get_active_incentives().await.is_empty());
    }
}
