//! Networks the dashboard is prepared to work with

use crate::config::FaucetConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub testnet: bool,
}

pub const MAINNET: Chain = Chain { id: 1, name: "Ethereum", testnet: false };
pub const POLYGON: Chain = Chain { id: 137, name: "Polygon", testnet: false };
pub const OPTIMISM: Chain = Chain { id: 10, name: "OP Mainnet", testnet: false };
pub const ARBITRUM: Chain = Chain { id: 42161, name: "Arbitrum One", testnet: false };
pub const BASE: Chain = Chain { id: 8453, name: "Base", testnet: false };
pub const SEPOLIA: Chain = Chain { id: 11155111, name: "Sepolia", testnet: true };
pub const ANVIL: Chain = Chain { id: 31337, name: "Anvil", testnet: true };

/// Production chains, plus Sepolia and Anvil when their flags are set
pub fn supported_chains(config: &FaucetConfig) -> Vec<Chain> {
    let mut chains = vec![MAINNET, POLYGON, OPTIMISM, ARBITRUM, BASE];
    if config.enable_testnets {
        chains.push(SEPOLIA);
    }
    if config.enable_local_net {
        chains.push(ANVIL);
    }
    chains
}

pub fn find_chain(chains: &[Chain], id: u64) -> Option<Chain> {
    chains.iter().copied().find(|c| c.id == id)
}
