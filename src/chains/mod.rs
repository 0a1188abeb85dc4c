//! Supported chain tables.
//!
//! # Data Flow
//! ```text
//! MarketConfig.environment
//!     → registry.rs (chain id → contracts, subgraph, rpc)
//!     → session (resolves the connected chain, falls back to defaults)
//!     → networks.rs (chains a wallet may switch to)
//! ```

pub mod networks;
pub mod registry;

pub use networks::{parse_chain_id, WalletNetwork};
pub use registry::{ChainInfo, ChainRegistry, Environment};
