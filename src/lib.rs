//! Client library for a governance vote incentive market.

pub mod blockchain;
pub mod chains;
pub mod config;
pub mod contracts;
pub mod explorer;
pub mod format;
pub mod graphql;
pub mod market;
pub mod observability;
pub mod session;

pub use config::schema::MarketConfig;
pub use market::{IncentiveMarket, MarketError};
pub use session::{Session, WalletSource};
