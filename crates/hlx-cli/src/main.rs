//! hlx - sign and submit Hyperliquid exchange actions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlx_exchange::{Exchange, ExchangeOption, InfoClient, InfoRequest};
use tracing::info;

/// Sign and submit Hyperliquid exchange actions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via HLX_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging, including request and response bodies
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign and submit an action, print the response
    Submit {
        /// Action JSON, or @path to read it from a file
        #[arg(long)]
        action: String,

        /// Trade on behalf of this vault (overrides the config file)
        #[arg(long)]
        vault: Option<String>,

        /// Expiry in ms since epoch (overrides the config file)
        #[arg(long)]
        expires_after: Option<u64>,
    },
    /// Run an unsigned /info query, print the response
    Info {
        /// Request type, e.g. "meta" or "openOrders"
        #[arg(long = "type")]
        request_type: String,

        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        dex: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    hlx_telemetry::init_logging(args.debug)?;

    // Config path: CLI arg > HLX_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("HLX_CONFIG").ok())
        .unwrap_or_else(|| hlx_cli::DEFAULT_CONFIG_PATH.to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = hlx_cli::CliConfig::from_file(&config_path)?;

    let mut options = Vec::new();
    if args.debug {
        options.push(ExchangeOption::DebugMode);
    }

    let response = match args.command {
        Command::Submit {
            action,
            vault,
            expires_after,
        } => {
            if let Some(vault) = vault {
                options.push(ExchangeOption::VaultAddress(vault));
            }
            if expires_after.is_some() {
                options.push(ExchangeOption::ExpiresAfter(expires_after));
            }

            let action_json = match action.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path)?,
                None => action,
            };
            let action = hlx_cli::commands::parse_action(&action_json)?;

            let exchange_config = config.exchange.apply(options);
            let exchange = Exchange::with_key(
                &exchange_config,
                &config.key.source(),
                config.key.expected_address()?,
            )?;

            hlx_cli::commands::submit(&exchange, action).await?
        }
        Command::Info {
            request_type,
            user,
            dex,
        } => {
            let mut request = InfoRequest::new(request_type);
            request.user = user;
            request.dex = dex;

            let client = InfoClient::from_config(&config.exchange.apply(options))?;
            hlx_cli::commands::query_info(&client, &request).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
