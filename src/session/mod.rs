//! The connected-wallet session.
//!
//! # Data Flow
//! ```text
//! connect (key or watch address)
//!     → connection.rs (RPC client for the chosen chain)
//!     → Session (atomic swap of the current connection)
//!     → market operations read address / chain / provider from here
//! disconnect → current connection cleared
//! ```
//!
//! The session is the only state the market keeps across calls.

pub mod connection;

use alloy::primitives::Address;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::blockchain::BlockchainClient;
use crate::chains::{ChainInfo, ChainRegistry};
use crate::config::DefaultChainConfig;

pub use connection::{Connection, WalletSource};

/// Holds the current connection, if any.
#[derive(Debug)]
pub struct Session {
    registry: ChainRegistry,
    fallback: DefaultChainConfig,
    current: ArcSwapOption<Connection>,
}

impl Session {
    pub fn new(registry: ChainRegistry, fallback: DefaultChainConfig) -> Self {
        Self {
            registry,
            fallback,
            current: ArcSwapOption::empty(),
        }
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Replace the current connection.
    pub fn connect(&self, connection: Connection) -> Arc<Connection> {
        let connection = Arc::new(connection);
        tracing::info!(
            wallet = %connection.label,
            address = %connection.address,
            chain_id = connection.chain_id(),
            can_sign = connection.can_sign(),
            "Wallet connected"
        );
        self.current.store(Some(connection.clone()));
        connection
    }

    /// Clear the current connection. Returns whether one was present.
    pub fn disconnect(&self) -> bool {
        let previous = self.current.swap(None);
        if let Some(previous) = &previous {
            tracing::info!(address = %previous.address, "Wallet disconnected");
        }
        previous.is_some()
    }

    /// Keep the current wallet but move it onto `client`'s chain.
    ///
    /// Returns `None` when no wallet is connected.
    pub fn switch_chain(&self, client: BlockchainClient) -> Option<Arc<Connection>> {
        let current = self.current.load_full()?;
        let from = current.chain_id();
        let switched = Arc::new(current.on_client(client));
        tracing::info!(from, to = switched.chain_id(), "Switched chain");
        self.current.store(Some(switched.clone()));
        Some(switched)
    }

    pub fn connection(&self) -> Option<Arc<Connection>> {
        self.current.load_full()
    }

    pub fn user_address(&self) -> Option<Address> {
        self.current.load().as_ref().map(|c| c.address)
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.current.load().as_ref().map(|c| c.chain_id())
    }

    /// Chain info for the connected chain, or the configured defaults when
    /// not connected or on a chain missing from the table.
    pub fn chain_info(&self) -> ChainInfo {
        let chain_id = self.chain_id().unwrap_or(0);
        let info = match self.registry.get(chain_id) {
            Some(info) => info.clone(),
            None => self.fallback.to_chain_info(chain_id),
        };
        tracing::debug!(chain = %info.name, chain_id, "Current chain");
        info
    }

    /// Whether the connected chain is in the table.
    pub fn is_supported_chain(&self) -> bool {
        self.chain_id()
            .map(|id| self.registry.get(id).is_some())
            .unwrap_or(false)
    }

    /// Name to display for the connected chain.
    pub fn chain_label(&self) -> String {
        match self.chain_id().and_then(|id| self.registry.get(id)) {
            Some(info) => info.name.clone(),
            None => self.registry.unsupported_label().to_string(),
        }
    }
}
