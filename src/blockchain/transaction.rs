//! Contract call submission and confirmation.
//!
//! # Responsibilities
//! - Send a prepared contract call through the signing provider
//! - Wait for the configured number of confirmations
//! - Turn reverted receipts into errors

use alloy::contract::{CallBuilder, CallDecoder};
use alloy::primitives::TxHash;
use alloy::providers::{PendingTransactionBuilder, Provider};
use serde::Serialize;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::observability::metrics;

/// Confirmation policy for sent transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSettings {
    pub confirmations: u64,
    pub timeout: Duration,
}

impl Default for TxSettings {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(300),
        }
    }
}

/// A mined, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedTx {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Send a contract call and wait for it to be confirmed.
///
/// `kind` names the operation in logs and metrics.
pub async fn submit<P, D>(
    call: CallBuilder<P, D>,
    kind: &'static str,
    settings: &TxSettings,
) -> BlockchainResult<ConfirmedTx>
where
    P: Provider,
    D: CallDecoder,
{
    let pending = call.send().await.map_err(|e| {
        metrics::record_transaction(kind, false);
        BlockchainError::Contract(format!("{}: {}", kind, e))
    })?;

    let result = confirm(pending, kind, settings).await;
    metrics::record_transaction(kind, result.is_ok());
    result
}

/// Wait for a pending transaction's receipt.
pub async fn confirm(
    pending: PendingTransactionBuilder<alloy::network::Ethereum>,
    kind: &'static str,
    settings: &TxSettings,
) -> BlockchainResult<ConfirmedTx> {
    let tx_hash = *pending.tx_hash();
    tracing::info!(
        tx_hash = %tx_hash,
        kind,
        confirmations = settings.confirmations,
        "Transaction sent, waiting for confirmation"
    );

    let receipt = pending
        .with_required_confirmations(settings.confirmations)
        .with_timeout(Some(settings.timeout))
        .get_receipt()
        .await
        .map_err(|e| BlockchainError::Confirmation {
            tx_hash: tx_hash.to_string(),
            reason: e.to_string(),
        })?;

    if !receipt.status() {
        tracing::error!(tx_hash = %tx_hash, kind, "Transaction reverted");
        return Err(BlockchainError::Reverted(tx_hash.to_string()));
    }

    tracing::info!(
        tx_hash = %tx_hash,
        kind,
        block_number = ?receipt.block_number,
        "Transaction confirmed"
    );

    Ok(ConfirmedTx {
        tx_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_wait_for_one_block() {
        let settings = TxSettings::default();
        assert_eq!(settings.confirmations, 1);
        assert_eq!(settings.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_confirmed_tx_serializes_hash() {
        let tx = ConfirmedTx {
            tx_hash: TxHash::ZERO,
            block_number: Some(7),
            gas_used: 21000,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["block_number"], 7);
        assert!(json["tx_hash"].as_str().unwrap().starts_with("0x000"));
    }
}
