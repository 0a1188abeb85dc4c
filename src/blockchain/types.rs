//! Chain-specific types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Contract call could not be built or sent.
    #[error("Contract call failed: {0}")]
    Contract(String),

    /// Waiting for the receipt failed or timed out.
    #[error("Transaction {tx_hash} not confirmed: {reason}")]
    Confirmation { tx_hash: String, reason: String },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// The connection has no signer (watch-only address).
    #[error("Connection is read-only, a signing wallet is required")]
    ReadOnly,
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::ChainMismatch {
            expected: 1,
            actual: 11155111,
        };
        assert_eq!(err.to_string(), "Chain ID mismatch: expected 1, got 11155111");

        let err = BlockchainError::Confirmation {
            tx_hash: "0xabc".to_string(),
            reason: "timed out".to_string(),
        };
        assert!(err.to_string().contains("0xabc"));
    }
}
