#![forbid(unsafe_code)]
//! Command line front end for the wallet metadata store

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walletmeta::api::HttpApi;
use walletmeta::config::{load_config_from, Config, DEFAULT_CONFIG_PATH};
use walletmeta::effects::{check_version, init_settings, sync_block_height, VersionStatus};
use walletmeta::explorer::BlockExplorer;
use walletmeta::notification::TracingNotifier;
use walletmeta::price::CurrencyState;
use walletmeta::selectors::{get_block_explorer, get_block_height, get_network_id, get_networks};
use walletmeta::settings::SETTINGS_NAMESPACE;
use walletmeta::store::Store;

#[derive(Parser)]
#[command(name = "walletmeta", version, about = "Wallet network and metadata tool")]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the selected network, explorer and known networks
    Status,
    /// Compare this build against the latest advertised release
    CheckVersion {
        /// Version to check instead of this build's
        #[arg(long)]
        local: Option<String>,
    },
    /// Fetch the chain height of the selected network
    SyncHeight,
    /// Select a network by id and persist the choice
    UseNetwork { id: String },
    /// Persist the preferred block explorer (Neotracker, Neoscan or Antchain)
    UseExplorer { explorer: BlockExplorer },
}

struct App {
    config: Config,
    store: Arc<Store>,
    price: CurrencyState,
}

impl App {
    async fn load(config: Config) -> Self {
        let store = Arc::new(Store::new());
        let price = CurrencyState::new();
        init_settings(&config.settings_store(), store.as_ref(), &price).await;
        Self { config, store, price }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config_from(&cli.config)?;
    init_logging(&config.logging.level);

    let app = App::load(config).await;

    match cli.command {
        Command::Status => show_status(&app),
        Command::CheckVersion { local } => {
            let local = local.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
            run_check_version(&app, &local).await?
        }
        Command::SyncHeight => run_sync_height(&app).await?,
        Command::UseNetwork { id } => use_network(&app, &id).await?,
        Command::UseExplorer { explorer } => use_explorer(&app, explorer).await?,
    }

    Ok(())
}

fn show_status(app: &App) {
    let state = app.store.state();
    let network = match app.store.network() {
        Ok(value) => value.green().to_string(),
        Err(e) => e.to_string().red().to_string(),
    };

    println!("{}", "Wallet Metadata".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Network:      {} (id {})", network, get_network_id(&state));
    println!("Explorer:     {}", get_block_explorer(&state));
    println!("Block height: {}", get_block_height(&state));
    println!("Currency:     {}", app.price.currency());
    println!();
    println!("{}", "Networks".bold());
    for net in get_networks(&state) {
        let marker = if net.id == get_network_id(&state) { "*" } else { " " };
        println!(" {} {:>3}  {}", marker.cyan(), net.id, net);
    }
}

async fn run_check_version(app: &App, local: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpApi::new(app.config.api_timeout())?;
    let resolver = api.resolver();
    let status = check_version(&app.store, &api, resolver.as_ref(), local, &TracingNotifier).await?;

    match status {
        VersionStatus::UpToDate => println!("{} {} is the latest version", "✓".green(), local),
        VersionStatus::OutOfDate { latest } => {
            println!("{} {} is out of date, latest is {}", "!".yellow(), local, latest)
        }
        VersionStatus::CheckFailed { reason } => {
            println!("{} Could not check version: {}", "✗".red(), reason)
        }
    }
    Ok(())
}

async fn run_sync_height(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let network = app.store.network()?;
    let api = HttpApi::new(app.config.api_timeout())?;
    let height = sync_block_height(&network, &api, app.store.as_ref()).await?;
    println!("{} height: {}", network, height.to_string().green());
    Ok(())
}

async fn use_network(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let state = app.store.state();
    let Some(net) = get_networks(&state).into_iter().find(|n| n.id == id) else {
        return Err(format!("no network with id {}", id).into());
    };

    app.config
        .settings_store()
        .update(SETTINGS_NAMESPACE, |settings| {
            settings.network_id = Some(net.id.clone())
        })
        .await?;

    println!("{} Selected {}", "✓".green(), net);
    Ok(())
}

async fn use_explorer(app: &App, explorer: BlockExplorer) -> Result<(), Box<dyn std::error::Error>> {
    app.config
        .settings_store()
        .update(SETTINGS_NAMESPACE, |settings| {
            settings.block_explorer = Some(explorer)
        })
        .await?;

    println!("{} Block explorer set to {}", "✓".green(), explorer);
    Ok(())
}
