//! Networks a connected wallet may be switched to.

use serde::Serialize;

use crate::chains::registry::Environment;

/// A network entry offered to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletNetwork {
    pub chain_id: u64,
    /// Native token symbol.
    pub token: &'static str,
    pub label: &'static str,
    pub rpc_url: String,
}

impl WalletNetwork {
    /// Chain id in the `0x`-prefixed hex form wallets expect.
    pub fn hex_id(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

pub(crate) fn wallet_networks(environment: Environment, default_rpc_url: &str) -> Vec<WalletNetwork> {
    let net = |chain_id, token, label, rpc_url: &str| WalletNetwork {
        chain_id,
        token,
        label,
        rpc_url: rpc_url.to_string(),
    };

    match environment {
        Environment::Production => vec![
            net(1, "ETH", "Ethereum Mainnet", default_rpc_url),
            net(42161, "ARB-ETH", "Arbitrum One", "https://arb1.arbitrum.io/rpc"),
            net(10, "OP-ETH", "Optimism", "https://mainnet.optimism.io"),
        ],
        Environment::Testnet => vec![
            net(1337, "ETH", "Local fork", default_rpc_url),
            net(11155111, "SepoliaETH", "Ethereum Sepolia", "https://ethereum-sepolia.publicnode.com"),
            net(
                421614,
                "ARB-ETH",
                "Arbitrum Sepolia",
                "https://arbitrum-sepolia.blockpi.network/v1/rpc/public",
            ),
            net(11155420, "OP-ETH", "Optimism Sepolia", "https://sepolia.optimism.io"),
        ],
    }
}

/// Parse a wallet-reported chain id (`"0x1"` or `"1"`).
///
/// Unparseable ids map to 0, which no table contains.
pub fn parse_chain_id(raw: &str) -> u64 {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).unwrap_or(0),
        None => raw.parse().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_networks_use_default_rpc() {
        let nets = wallet_networks(Environment::Production, "https://eth.llamarpc.com");
        assert_eq!(nets[0].rpc_url, "https://eth.llamarpc.com");
        assert_eq!(nets.iter().map(|n| n.chain_id).collect::<Vec<_>>(), vec![1, 42161, 10]);
    }

    #[test]
    fn test_hex_id() {
        let nets = wallet_networks(Environment::Testnet, "http://localhost:8545");
        assert_eq!(nets[1].hex_id(), "0xaa36a7");
        assert_eq!(nets[0].hex_id(), "0x539");
    }

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x1"), 1);
        assert_eq!(parse_chain_id("0xa4ba"), 42170);
        assert_eq!(parse_chain_id("137"), 137);
        assert_eq!(parse_chain_id(""), 0);
        assert_eq!(parse_chain_id("0xzz"), 0);
    }
}
