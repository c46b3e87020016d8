//! Wallet shop command line client

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_api::{AuthApi, GiftCardApi};
use shop_common::Network;
use shop_http_client::HttpClient;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod sub_commands;

use crate::config::Settings;

/// Command line client for the wallet shop
#[derive(Parser)]
#[command(name = "wallet-shop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Network, overriding the config file
    #[arg(short, long)]
    network: Option<Network>,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current account session
    Session,
    /// Log in to the account API
    Login(sub_commands::login::LoginSubCommand),
    /// Pair this device and print its API token
    Pair(sub_commands::pair::PairSubCommand),
    /// Gift cards bought earlier
    #[command(subcommand)]
    GiftCard(sub_commands::gift_card::GiftCardSubCommand),
    /// Print the effective settings
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let env_filter = EnvFilter::new(format!("{},hyper=warn,reqwest=warn", args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut settings = Settings::new(args.config.clone());
    if let Some(network) = args.network {
        settings.network = network;
        settings.purchase.network = network;
    }

    let http_client = http_client(&settings)?;
    let base_url = settings.network.base_url();

    match &args.command {
        Commands::Session => {
            let auth = AuthApi::with_base_url(base_url).with_http_client(http_client);
            sub_commands::session::session(&auth).await
        }
        Commands::Login(sub_command_args) => {
            let auth = AuthApi::with_base_url(base_url).with_http_client(http_client);
            sub_commands::login::login(&auth, sub_command_args).await
        }
        Commands::Pair(sub_command_args) => {
            let auth = AuthApi::with_base_url(base_url)
                .with_http_client(http_client)
                .with_device_name(settings.device_name.clone());
            sub_commands::pair::pair(&auth, sub_command_args).await
        }
        Commands::GiftCard(sub_command) => {
            let shop = Arc::new(GiftCardApi::with_base_url(base_url).with_http_client(http_client));
            sub_commands::gift_card::gift_card(shop, &settings, sub_command).await
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

/// One client per process so the session cookie survives between calls
fn http_client(settings: &Settings) -> Result<HttpClient> {
    let mut builder = HttpClient::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(settings.http.timeout_secs))
        .user_agent(concat!("wallet-shop/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = &settings.http.proxy {
        builder = builder.proxy(proxy.parse()?);
    }

    Ok(builder.build()?)
}
