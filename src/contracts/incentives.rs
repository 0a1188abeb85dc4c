//! Incentive registration contract.

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;

use crate::blockchain::transaction::{self, ConfirmedTx, TxSettings};
use crate::blockchain::{BlockchainClient, BlockchainResult};
use crate::contracts::abi::IIncentiveRegistry;

/// Option value attaching a deposit to every choice of a proposal.
pub const ALL_OPTIONS: U256 = U256::MAX;

/// A deposit to register, in token base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardDeposit {
    pub proposal: B256,
    pub option: U256,
    pub reward_token: Address,
    pub amount: U256,
    /// Unix seconds the incentive becomes claimable by voters.
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone)]
pub struct IncentiveContract {
    client: BlockchainClient,
    address: Address,
}

impl IncentiveContract {
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Register `deposit`. The token allowance must already cover `amount`.
    pub async fn add_reward_amount(
        &self,
        deposit: &RewardDeposit,
        settings: &TxSettings,
    ) -> BlockchainResult<ConfirmedTx> {
        let provider = self.client.signing_provider()?;
        let contract = IIncentiveRegistry::new(self.address, provider);

        tracing::info!(
            proposal = %deposit.proposal,
            option = %deposit.option,
            token = %deposit.reward_token,
            amount = %deposit.amount,
            "Registering incentive"
        );

        let call = contract.add_reward_amount(
            deposit.proposal,
            deposit.option,
            deposit.reward_token,
            deposit.amount,
            U256::from(deposit.start),
            U256::from(deposit.end),
        );
        transaction::submit(call, "incentive.add_reward_amount", settings).await
    }
}
