use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use rigforge_application::RigForgeUseCase;
use rigforge_core::catalog::CategoryFilter;
use rigforge_infrastructure::{ConfigService, RigForgePaths};

mod gateway;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "rigforge")]
#[command(about = "RigForge - plan a PC build with an AI assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Keep config, secrets, logs and saved builds under this directory
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Print logs to stderr instead of the log file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Repl,
    /// Print the component catalog
    Catalog {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category label or code (ALL, CPU, "Graphics Card", ...)
        #[arg(short, long, default_value = "ALL")]
        category: CategoryFilter,
    },
    /// Inspect saved builds
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand)]
enum SavedAction {
    /// List saved builds, newest first
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RigForgePaths::new(cli.home.as_deref());
    let config = ConfigService::new(&paths)
        .context("Failed to locate config.toml")?
        .get_config()
        .context("Failed to read config.toml")?;

    let _log_guard = logging::init(&config.logging, &paths.logs_dir()?, cli.verbose)?;
    info!(version = env!("CARGO_PKG_VERSION"), "rigforge starting");

    let data_dir = match &config.storage.data_dir {
        Some(dir) => dir.clone(),
        None => paths.data_dir()?,
    };
    let gateway = gateway::connect(&paths, &config.gemini).await;
    let app = Arc::new(RigForgeUseCase::with_data_dir(gateway, &data_dir));

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run(app).await?,
        Commands::Catalog { search, category } => {
            app.set_search_term(&search).await;
            app.set_category_filter(category).await;
            let visible = app.visible_catalog().await;
            println!("{}", render::catalog(&visible));
        }
        Commands::Saved { action } => match action {
            SavedAction::List => {
                let builds = app.saved_builds().await?;
                println!("{}", render::saved_builds(&builds));
            }
        },
    }

    Ok(())
}
