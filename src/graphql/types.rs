//! Typed `data` payloads.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::contracts::ClaimData;
use crate::graphql::serde_num;

/// A `RewardAdded` event indexed by the incentive subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardAdded {
    pub id: String,
    #[serde(with = "serde_num::u64_lenient")]
    pub time: u64,
    pub rewarder: Address,
    /// Proposal id (hex).
    pub proposal: String,
    /// 1-based choice index, or `U256::MAX` for every choice.
    #[serde(with = "serde_num::u256")]
    pub option: U256,
    #[serde(rename = "reward_token")]
    pub reward_token: Address,
    /// Net amount in token base units.
    #[serde(with = "serde_num::u256")]
    pub amount: U256,
    #[serde(with = "serde_num::u64_lenient")]
    pub start_time: u64,
    #[serde(with = "serde_num::u64_lenient")]
    pub end_time: u64,
    #[serde(with = "serde_num::u64_lenient")]
    pub block_number: u64,
    #[serde(with = "serde_num::u64_lenient")]
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardAddedsResponse {
    #[serde(rename = "rewardAddeds")]
    pub reward_addeds: Vec<RewardAdded>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
}

/// Reduced proposal from the governance hub. The hub may omit or null
/// any of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalResponse {
    pub proposal: Option<Proposal>,
}

/// Claim totals reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInfo {
    #[serde(with = "serde_num::f64_lenient", default)]
    pub total_balance: f64,
    #[serde(with = "serde_num::f64_lenient", default)]
    pub total_claimed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimsResponse {
    pub claims: Vec<ClaimData>,
    #[serde(rename = "claimInfo", default)]
    pub claim_info: Option<ClaimInfo>,
}

/// Market data for a token from the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDataForChain {
    #[serde(with = "serde_num::f64_lenient", default)]
    pub price: f64,
    pub logo: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDataResponse {
    #[serde(rename = "tokenDataForChain")]
    pub token_data_for_chain: Option<TokenDataForChain>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REWARD_JSON: &str = r#"{
        "id": "0xabc-1",
        "time": "1700000000",
        "rewarder": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "proposal": "0x7a1b2c",
        "option": "2",
        "reward_token": "0xdac17f958d2ee523a2206206994597c13d831ec7",
        "amount": "95000000",
        "startTime": "1700000000",
        "endTime": "1700600000",
        "blockNumber": "18500000",
        "blockTimestamp": "1700000012"
    }"#;

    #[test]
    fn test_reward_added_decoding() {
        let reward: RewardAdded = serde_json::from_str(REWARD_JSON).unwrap();
        assert_eq!(reward.option, U256::from(2u64));
        assert_eq!(reward.amount, U256::from(95_000_000u64));
        assert_eq!(reward.end_time, 1_700_600_000);
        assert_eq!(
            reward.reward_token.to_string().to_lowercase(),
            "0xdac17f958d2ee523a2206206994597c13d831ec7"
        );
    }

    #[test]
    fn test_proposal_decoding() {
        let resp: ProposalResponse = serde_json::from_str(
            r#"{"proposal":{"title":"Gauge vote","choices":["A","B"],"network":"1","type":"weighted","space":{"id":"cvx.eth","name":"Convex"}}}"#,
        )
        .unwrap();
        let proposal = resp.proposal.unwrap();
        assert_eq!(proposal.kind.as_deref(), Some("weighted"));
        assert_eq!(proposal.choices, vec!["A", "B"]);
        assert_eq!(proposal.space.map(|s| s.name), Some("Convex".to_string()));

        let missing: ProposalResponse = serde_json::from_str(r#"{"proposal":null}"#).unwrap();
        assert!(missing.proposal.is_none());
    }

    #[test]
    fn test_proposal_with_null_space() {
        let resp: ProposalResponse = serde_json::from_str(
            r#"{"proposal":{"title":"Gauge vote","choices":["A","B"],"space":null}}"#,
        )
        .unwrap();
        let proposal = resp.proposal.unwrap();
        assert_eq!(proposal.title, "Gauge vote");
        assert!(proposal.space.is_none());
        assert!(proposal.network.is_none());
        assert!(proposal.kind.is_none());

        // Absent fields stay absent when re-serialized.
        let value = serde_json::to_value(&proposal).unwrap();
        assert!(value.get("space").is_none());
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_token_data_null_price() {
        let resp: TokenDataResponse = serde_json::from_str(
            r#"{"tokenDataForChain":{"price":null,"logo":null,"name":"Tether","symbol":"USDT"}}"#,
        )
        .unwrap();
        let data = resp.token_data_for_chain.unwrap();
        assert_eq!(data.price, 0.0);
        assert_eq!(data.symbol.as_deref(), Some("USDT"));
    }
}
