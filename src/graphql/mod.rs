//! GraphQL access to the governance hub, the incentive subgraphs and the
//! backend aggregator.
//!
//! # Data Flow
//! ```text
//! queries.rs (documents)
//!     → client.rs (POST {query, variables}, envelope decoding)
//!     → types.rs (typed `data` payloads)
//! ```

pub mod client;
pub mod queries;
pub mod serde_num;
pub mod types;

pub use client::{GraphQlClient, GraphQlError, GraphQlResult};
pub use types::{
    ClaimInfo, ClaimsResponse, Proposal, ProposalResponse, RewardAdded, RewardAddedsResponse,
    Space, TokenDataForChain, TokenDataResponse,
};
