mod cli;
mod config_loader;

use clap::Parser;
use mtk_common::utils::logging::init_logging;
use mtk_faucet::dashboard::api::router;
use mtk_faucet::{Action, Dashboard, FaucetConfig, TxStatus};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse CLI and load config
    let args = cli::Cli::parse();
    let config = config_loader::load_faucet_config(&args)?;

    // 2. Setup Logging
    let _log_guard = init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let (action, input) = match args.command {
        cli::Commands::Serve { addr } => return serve(config, addr).await,
        cli::Commands::Chains => {
            for chain in mtk_faucet::chains::supported_chains(&config) {
                let kind = if chain.testnet { " (test network)" } else { "" };
                println!("{:>9}  {}{}", chain.id, chain.name, kind);
            }
            return Ok(());
        }
        cli::Commands::Status => {
            let dashboard = Dashboard::connect(&config).await?;
            let view = dashboard.snapshot().await.view();
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }
        cli::Commands::Drip { amount } => (Action::Drip, amount),
        cli::Commands::Mint { amount } => (Action::Mint, amount),
        cli::Commands::Approve { amount } => (Action::Approve, amount),
        cli::Commands::Deposit { amount } => (Action::Deposit, amount),
        cli::Commands::SetInterval { seconds } => (Action::SetDripInterval, seconds),
        cli::Commands::SetLimit { amount } => (Action::SetDripLimit, amount),
    };

    // 3. Submit a single action
    let dashboard = Dashboard::connect(&config).await?;
    let outcome = dashboard
        .submit(action, &input)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no amount given for {}", action))?;

    match outcome.status {
        TxStatus::Confirmed => println!("{} ({})", action.success_message(), outcome.hash),
        TxStatus::Pending => println!("Transaction {} is pending", outcome.hash),
        TxStatus::Reverted => anyhow::bail!("Transaction {} reverted", outcome.hash),
    }
    Ok(())
}

async fn serve(mut config: FaucetConfig, addr: Option<String>) -> anyhow::Result<()> {
    if let Some(addr) = addr {
        config.server_addr = addr;
    }

    info!("Starting {} v{}", config.app_name, env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Server address: {}", config.server_addr);
    info!("  RPC URL: {}", config.rpc_url);
    info!("  Token contract: {}", config.token_address.to_checksum());
    info!("  Faucet contract: {}", config.faucet_address.to_checksum());

    let dashboard = Arc::new(Dashboard::connect(&config).await?);
    let app = router(dashboard, config.cors_enabled);

    let addr: SocketAddr = config.server_addr.parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully");
    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
