//! Incentive market CLI.
//!
//! Browse running incentives, deposit new ones and claim merkle rewards
//! from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   incentives <command>
//!        │
//!        ▼
//!   ┌──────────────┐   connect    ┌──────────────┐
//!   │   config     │─────────────▶│   session    │  key (INCENTIVES_PRIVATE_KEY)
//!   │ TOML + env   │              │  connection  │  or watch address
//!   └──────────────┘              └──────┬───────┘
//!                                        │
//!                                        ▼
//!                               ┌─────────────────┐
//!                               │ IncentiveMarket │
//!                               └───┬─────────┬───┘
//!                                   │         │
//!                     ┌─────────────┘         └──────────────┐
//!                     ▼                                      ▼
//!            ┌─────────────────┐                   ┌──────────────────┐
//!            │   contracts     │                   │     graphql      │
//!            │ ERC-20, registry│                   │ hub, subgraph,   │
//!            │ merkle claims   │                   │ backend          │
//!            └─────────────────┘                   └──────────────────┘
//! ```

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use incentive_market::blockchain::{Wallet, PRIVATE_KEY_ENV_VAR};
use incentive_market::chains::parse_chain_id;
use incentive_market::config::load_or_default;
use incentive_market::contracts::ALL_OPTIONS;
use incentive_market::format::{add_incentive_fee, commify, parse_token_amount};
use incentive_market::market::NewIncentive;
use incentive_market::observability::logging::init_logging;
use incentive_market::{IncentiveMarket, MarketError, WalletSource};

#[derive(Parser)]
#[command(name = "incentives")]
#[command(about = "Browse, fund and claim governance vote incentives", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chain to connect to, decimal or 0x-hex (defaults to blockchain.chain_id)
    #[arg(long)]
    chain: Option<String>,

    /// Connect read-only as this address instead of the private key wallet
    #[arg(long)]
    watch: Option<Address>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the chain table of the configured environment
    Chains {
        /// Show the networks a wallet may switch to instead
        #[arg(long)]
        networks: bool,
    },
    /// Amount a depositor paid for a net incentive amount
    Fee { amount: f64 },
    /// Incentives running right now
    Incentives,
    /// A proposal and the incentives attached to its choices
    Proposal { id: String },
    /// Claimable rewards of the connected wallet
    Rewards,
    /// Claim the reward paid in one token
    Claim { token: Address },
    /// Claim every reward in one transaction
    ClaimAll,
    /// Token metadata and market price
    Token { token: Address },
    /// Token balance of the connected wallet
    Balance { token: Address },
    /// Allowance granted to the incentive contract (or --spender)
    Allowance {
        token: Address,
        #[arg(long)]
        spender: Option<Address>,
    },
    /// Grant the incentive contract (or --spender) an unlimited allowance
    Approve {
        token: Address,
        #[arg(long)]
        spender: Option<Address>,
    },
    /// Deposit an incentive on a proposal choice
    AddReward {
        /// Proposal id (0x + 32 bytes)
        proposal: String,
        /// Token amount, human readable
        amount: String,
        token: Address,
        /// 1-based choice; every choice when omitted
        #[arg(long)]
        option: Option<u64>,
        /// Unix start time
        #[arg(long)]
        start: u64,
        /// Unix end time
        #[arg(long)]
        end: u64,
        /// Approve the token first when the allowance is too low
        #[arg(long)]
        approve: bool,
    },
    /// Verified contract name from the block explorer
    ContractName { address: Address },
}

/// What a command needs from the connection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    Offline,
    /// Any provider; falls back to a read-only connection.
    Read,
    /// A real account, signing or watched.
    Account,
    /// A signing wallet.
    Sign,
}

impl Commands {
    fn access(&self) -> Access {
        match self {
            Commands::Chains { .. } | Commands::Fee { .. } | Commands::ContractName { .. } => {
                Access::Offline
            }
            Commands::Incentives | Commands::Proposal { .. } | Commands::Token { .. } => {
                Access::Read
            }
            Commands::Rewards | Commands::Balance { .. } | Commands::Allowance { .. } => {
                Access::Account
            }
            Commands::Claim { .. }
            | Commands::ClaimAll
            | Commands::Approve { .. }
            | Commands::AddReward { .. } => Access::Sign,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::debug!(
        environment = ?config.environment,
        chain_id = config.blockchain.chain_id,
        "Configuration loaded"
    );

    let chain_id = match &cli.chain {
        Some(raw) => parse_chain_id(raw),
        None => config.blockchain.chain_id,
    };
    let market = IncentiveMarket::new(config)?;

    let access = cli.command.access();
    if access != Access::Offline {
        let source = wallet_source(cli.watch, access)?;
        market.connect(chain_id, source).await?;
    }

    run(&market, cli.command).await?;

    market.disconnect();
    Ok(())
}

fn wallet_source(watch: Option<Address>, access: Access) -> Result<WalletSource, MarketError> {
    if let Some(address) = watch {
        if access == Access::Sign {
            tracing::warn!("--watch connections cannot send transactions");
        }
        return Ok(WalletSource::Watch(address));
    }

    match Wallet::from_env() {
        Ok(wallet) => Ok(WalletSource::Key(wallet)),
        Err(e) if access == Access::Read => {
            tracing::debug!(error = %e, "No wallet configured, connecting read-only");
            Ok(WalletSource::Watch(Address::ZERO))
        }
        Err(e) => {
            tracing::error!("Set {} or pass --watch <address>", PRIVATE_KEY_ENV_VAR);
            Err(e.into())
        }
    }
}

async fn run(market: &IncentiveMarket, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Chains { networks } => {
            let registry = market.registry();
            if networks {
                print_json(&registry.wallet_networks(&market.config().endpoints.default_rpc_url))?;
            } else {
                print_json(&registry.options())?;
            }
        }
        Commands::Fee { amount } => {
            let total = add_incentive_fee(amount);
            print_json(&serde_json::json!({
                "net": amount,
                "total": total,
                "display": commify(total, None),
            }))?;
        }
        Commands::Incentives => {
            print_json(&market.get_active_incentives().await)?;
        }
        Commands::Proposal { id } => {
            let proposal = market.proposal(&id).await?;
            let choices = proposal.as_ref().map(|p| p.choices.clone()).unwrap_or_default();
            let incentives = market.get_incentives_for_proposal(&id, &choices).await;
            print_json(&serde_json::json!({
                "proposal": proposal,
                "incentives": incentives,
            }))?;
        }
        Commands::Rewards => {
            print_json(&market.get_rewards().await)?;
        }
        Commands::Claim { token } => {
            let summary = market.get_rewards().await;
            let reward = summary
                .rewards
                .iter()
                .find(|r| r.claim_data.token == token)
                .ok_or(MarketError::NothingToClaim)?;
            print_json(&market.claim_reward(reward).await?)?;
        }
        Commands::ClaimAll => {
            let summary = market.get_rewards().await;
            print_json(&market.claim_all_rewards(&summary.rewards).await?)?;
        }
        Commands::Token { token } => {
            let (info, data) = tokio::join!(market.token_info(token), market.token_data(token));
            print_json(&serde_json::json!({ "token": info, "market": data }))?;
        }
        Commands::Balance { token } => {
            let (balance, details) =
                tokio::join!(market.token_balance(token), market.token_name_balance(token));
            print_json(&serde_json::json!({ "balance": balance, "token": details }))?;
        }
        Commands::Allowance { token, spender } => {
            let spender = spender_or_incentive(market, spender)?;
            print_json(&serde_json::json!({
                "spender": spender,
                "allowance": market.allowance(token, spender).await?,
            }))?;
        }
        Commands::Approve { token, spender } => {
            let spender = spender_or_incentive(market, spender)?;
            print_json(&serde_json::json!({ "approved": market.approve(token, spender).await }))?;
        }
        Commands::AddReward {
            proposal,
            amount,
            token,
            option,
            start,
            end,
            approve,
        } => {
            let incentive = NewIncentive {
                proposal,
                option: option.map(U256::from).unwrap_or(ALL_OPTIONS),
                amount,
                token,
                start,
                end,
            };

            if approve {
                ensure_allowance(market, &incentive).await?;
            }
            print_json(&market.add_reward(&incentive).await?)?;
        }
        Commands::ContractName { address } => {
            print_json(&serde_json::json!({
                "address": address,
                "contractName": market.contract_name(address).await?,
            }))?;
        }
    }
    Ok(())
}

fn spender_or_incentive(
    market: &IncentiveMarket,
    spender: Option<Address>,
) -> Result<Address, MarketError> {
    match spender {
        Some(spender) => Ok(spender),
        None => market.incentive_address(),
    }
}

/// Approve the incentive contract when the current allowance cannot cover
/// the deposit.
async fn ensure_allowance(market: &IncentiveMarket, incentive: &NewIncentive) -> Result<(), MarketError> {
    let spender = market.incentive_address()?;
    let decimals = market.decimals(incentive.token).await?;
    let needed = parse_token_amount(&incentive.amount, decimals)
        .map_err(|e| MarketError::InvalidAmount {
            amount: incentive.amount.clone(),
            reason: e.to_string(),
        })?;

    let current = market.raw_allowance(incentive.token, spender).await?;
    if current >= needed {
        tracing::debug!(allowance = %current, "Allowance already sufficient");
        return Ok(());
    }

    if !market.approve(incentive.token, spender).await {
        return Err(MarketError::ApprovalFailed(incentive.token));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
