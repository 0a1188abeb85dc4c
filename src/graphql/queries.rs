//! Query documents.

/// Page size of the current-incentives query.
pub const INCENTIVES_PAGE_SIZE: usize = 1000;

/// Proposal title, choices and space from the governance hub.
pub const PROPOSAL_REDUCED_QUERY: &str = r#"
query Proposal($id: String!) {
  proposal(id: $id) {
    title
    choices
    network
    type
    space {
      id
      name
    }
  }
}
"#;

/// Every incentive registered for one proposal (subgraph).
pub const INCENTIVES_BY_PROPOSAL_QUERY: &str = r#"
query RewardAddeds($id: String!) {
  rewardAddeds(where: { proposal: $id }) {
    id
    time
    rewarder
    proposal
    option
    reward_token
    amount
    startTime
    endTime
    blockNumber
    blockTimestamp
  }
}
"#;

/// Incentives whose window contains `$time` (subgraph), one page.
pub const CURRENT_INCENTIVES_QUERY: &str = r#"
query RewardAddeds($time: Int!, $skip: Int!) {
  rewardAddeds(
    first: 1000
    skip: $skip
    where: { startTime_lte: $time, endTime_gte: $time }
  ) {
    id
    time
    rewarder
    proposal
    option
    reward_token
    amount
    startTime
    endTime
    blockNumber
    blockTimestamp
  }
}
"#;

/// Merkle claims and totals for an account on a chain (backend).
pub const CLAIMS_QUERY: &str = r#"
query AccountRewards($account: String!, $chainId: Int!) {
  claims(account: $account, chainId: $chainId) {
    token
    index
    amount
    merkleProof
  }
  claimInfo {
    totalBalance
    totalClaimed
  }
}
"#;

/// Price and metadata for a token on a chain (backend).
pub const TOKEN_DATA_FOR_CHAIN_QUERY: &str = r#"
query TokenDataForChain($token: String!, $chainName: String!) {
  tokenDataForChain(token: $token, chainName: $chainName) {
    price
    logo
    name
    symbol
  }
}
"#;
