use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mtk")]
#[command(version, about = "MTK Token Faucet dashboard", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", env = "FAUCET_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the node
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Account to act as (must be managed by the node)
    #[arg(long, value_name = "ADDRESS")]
    pub account: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Listen address
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
    /// Print the faucet status for the connected account
    Status,
    /// Claim tokens from the faucet
    Drip { amount: String },
    /// Mint tokens to the connected account (owner only)
    Mint { amount: String },
    /// Allow the faucet to transfer tokens from the connected account (owner only)
    Approve { amount: String },
    /// Move tokens into the faucet (owner only)
    Deposit { amount: String },
    /// Set the minimum seconds between claims (owner only)
    SetInterval { seconds: String },
    /// Set the maximum amount per claim (owner only)
    SetLimit { amount: String },
    /// List the chains the dashboard accepts
    Chains,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_command() {
        let cli =
            Cli::try_parse_from(["mtk", "--account", "0xabc", "set-interval", "3600"]).unwrap();
        assert_eq!(cli.account.as_deref(), Some("0xabc"));
        match cli.command {
            Commands::SetInterval { seconds } => assert_eq!(seconds, "3600"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_amount_is_required() {
        assert!(Cli::try_parse_from(["mtk", "drip"]).is_err());
    }
}
