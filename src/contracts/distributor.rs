//! Merkle distributor claims.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::blockchain::transaction::{self, ConfirmedTx, TxSettings};
use crate::blockchain::{BlockchainClient, BlockchainResult};
use crate::contracts::abi::IMerkleDistributor;
use crate::graphql::serde_num;

/// One merkle leaf as served by the claims backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimData {
    pub token: Address,
    #[serde(with = "serde_num::u256")]
    pub index: U256,
    #[serde(with = "serde_num::u256")]
    pub amount: U256,
    pub merkle_proof: Vec<B256>,
}

impl From<&ClaimData> for IMerkleDistributor::Claim {
    fn from(claim: &ClaimData) -> Self {
        IMerkleDistributor::Claim {
            token: claim.token,
            index: claim.index,
            amount: claim.amount,
            merkleProof: claim.merkle_proof.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MerkleDistributor {
    client: BlockchainClient,
    address: Address,
}

impl MerkleDistributor {
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Claim a single leaf for `account`.
    pub async fn claim(
        &self,
        account: Address,
        claim: &ClaimData,
        settings: &TxSettings,
    ) -> BlockchainResult<ConfirmedTx> {
        let provider = self.client.signing_provider()?;
        let contract = IMerkleDistributor::new(self.address, provider);

        tracing::info!(token = %claim.token, index = %claim.index, account = %account, "Claiming reward");
        let call = contract.claim(
            claim.token,
            claim.index,
            account,
            claim.amount,
            claim.merkle_proof.clone(),
        );
        transaction::submit(call, "distributor.claim", settings).await
    }

    /// Claim several leaves for `account` in one transaction.
    pub async fn claim_multi(
        &self,
        account: Address,
        claims: &[ClaimData],
        settings: &TxSettings,
    ) -> BlockchainResult<ConfirmedTx> {
        let provider = self.client.signing_provider()?;
        let contract = IMerkleDistributor::new(self.address, provider);

        let leaves: Vec<IMerkleDistributor::Claim> = claims.iter().map(Into::into).collect();
        tracing::info!(count = leaves.len(), account = %account, "Claiming rewards");
        transaction::submit(contract.claimMulti(account, leaves), "distributor.claim_multi", settings)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_data_decoding() {
        let claim: ClaimData = serde_json::from_str(
            r#"{
                "token": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "index": 3,
                "amount": "2500000",
                "merkleProof": [
                    "0x1111111111111111111111111111111111111111111111111111111111111111",
                    "0x2222222222222222222222222222222222222222222222222222222222222222"
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(claim.index, U256::from(3u64));
        assert_eq!(claim.amount, U256::from(2_500_000u64));
        assert_eq!(claim.merkle_proof.len(), 2);

        let leaf = IMerkleDistributor::Claim::from(&claim);
        assert_eq!(leaf.merkleProof, claim.merkle_proof);
        assert_eq!(leaf.token, claim.token);
    }
}
