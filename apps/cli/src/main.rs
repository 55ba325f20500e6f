mod commands;
mod config;
mod main_lib;

use anyhow::Result;
use carteira_core::assets::{AssetClass, AssetUpdate};
use carteira_core::portfolio::OperationKind;
use clap::{Parser, Subcommand};

use config::Config;
use main_lib::{build_state, init_tracing};

#[derive(Parser)]
#[command(name = "carteira", about = "Personal investment portfolio tracker")]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open positions with market value and profit/loss
    Positions,

    /// Every ticker ever traded, closed positions included
    History,

    /// Totals and allocation by asset class
    Summary,

    /// Record a purchase
    Buy {
        ticker: String,
        /// Units bought (accepts `10`, `10.5` or `10,5`)
        quantity: String,
        /// Price per unit
        price: String,
    },

    /// Record a sale
    Sell {
        ticker: String,
        quantity: String,
        price: String,
    },

    /// Asset registry
    Assets {
        #[command(subcommand)]
        cmd: AssetsCmd,
    },
}

#[derive(Subcommand)]
enum AssetsCmd {
    /// Registered assets with their latest quote
    List,

    /// Register an asset (class: ACAO, FII, ETF or BDR)
    Add { ticker: String, class: AssetClass },

    /// Change an asset's ticker or class
    Update {
        ticker: String,
        #[arg(long)]
        new_ticker: Option<String>,
        #[arg(long)]
        class: Option<AssetClass>,
    },

    /// Remove an asset from the registry
    Remove { ticker: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let state = build_state(&config)?;
    commands::load(&state).await;

    let json = cli.json;
    match cli.cmd {
        Commands::Positions => commands::positions(&state, json),
        Commands::History => commands::history(&state, json),
        Commands::Summary => commands::summary(&state, json),
        Commands::Buy {
            ticker,
            quantity,
            price,
        } => commands::operate(&state, OperationKind::Buy, &ticker, &quantity, &price, json).await,
        Commands::Sell {
            ticker,
            quantity,
            price,
        } => commands::operate(&state, OperationKind::Sell, &ticker, &quantity, &price, json).await,
        Commands::Assets { cmd } => match cmd {
            AssetsCmd::List => commands::list_assets(&state, json),
            AssetsCmd::Add { ticker, class } => {
                commands::add_asset(&state, &ticker, class, json).await
            }
            AssetsCmd::Update {
                ticker,
                new_ticker,
                class,
            } => {
                let update = AssetUpdate {
                    ticker: new_ticker,
                    asset_class: class,
                };
                commands::update_asset(&state, &ticker, update, json).await
            }
            AssetsCmd::Remove { ticker } => commands::remove_asset(&state, &ticker).await,
        },
    }
}
