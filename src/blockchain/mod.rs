//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC providers with timeouts and failover, signing filler)
//!     → transaction.rs (submit contract call, await confirmation)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{BlockchainClient, RpcSettings};
pub use transaction::{ConfirmedTx, TxSettings};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::{Wallet, PRIVATE_KEY_ENV_VAR};
