//! On-chain contract wrappers.
//!
//! # Data Flow
//! ```text
//! abi.rs (sol! bindings)
//!     → erc20.rs (metadata, balances, allowances, approve)
//!     → incentives.rs (register a deposit against a proposal option)
//!     → distributor.rs (merkle claims)
//!     → blockchain::transaction (send + confirm)
//! ```
//!
//! Read calls go through `BlockchainClient::with_failover`; writes use the
//! primary, signing provider only.

pub mod abi;
pub mod distributor;
pub mod erc20;
pub mod incentives;

pub use distributor::{ClaimData, MerkleDistributor};
pub use erc20::{Erc20, TokenInfo, TokenNameBalance, USDT_ADDRESS};
pub use incentives::{IncentiveContract, RewardDeposit, ALL_OPTIONS};
