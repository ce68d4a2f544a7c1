mod adapters;
mod commands;
mod events;
mod logging;
mod tui;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use dockview_core::client::{ResourceClient, StaticClient};
use dockview_core::config::DockviewConfig;
use dockview_core::feature::Feature;
use dockview_core::format::SizeMode;
use dockview_core::menu::MenuController;

use adapters::DockerClient;

#[derive(Parser)]
#[command(name = "dockview")]
#[command(about = "Browse Docker containers, images and volumes", long_about = None)]
struct Cli {
    /// Config file (default: dockview.yml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use built-in sample data instead of a Docker engine
    #[arg(long, global = true)]
    demo: bool,

    /// Print image sizes with one exact decimal
    #[arg(long, global = true)]
    fractional_sizes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the three-pane menu (default)
    Tui,
    /// Print one listing and exit
    Ls {
        #[arg(value_enum)]
        resource: Resource,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check config and engine connectivity
    Doctor,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Resource {
    Containers,
    Images,
    Volumes,
}

impl From<Resource> for Feature {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Containers => Feature::Containers,
            Resource::Images => Feature::Images,
            Resource::Volumes => Feature::Volumes,
        }
    }
}

/// The explicit config, else one discovered in the working directory,
/// else defaults.
fn load_config(explicit: Option<&Path>) -> Result<(DockviewConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| DockviewConfig::discover(&dir)),
    };

    match path {
        Some(path) => {
            let config = DockviewConfig::load(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            Ok((config, Some(path)))
        }
        None => Ok((DockviewConfig::default(), None)),
    }
}

async fn open_client(config: &DockviewConfig, demo: bool) -> Result<Box<dyn ResourceClient>> {
    if demo {
        return Ok(Box::new(StaticClient::demo()?));
    }
    let client = DockerClient::connect(&config.docker).await?;
    Ok(Box::new(client))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = load_config(cli.config.as_deref())?;
    let size_mode = if cli.fractional_sizes {
        SizeMode::Fractional
    } else {
        config.size_mode()
    };

    match cli.command {
        Some(Commands::Ls { resource, json }) => {
            logging::init(&config.log, logging::Target::Stderr)?;
            let client = open_client(&config, cli.demo).await?;
            let mut stdout = std::io::stdout().lock();
            commands::write_listing(&mut stdout, client.as_ref(), resource.into(), size_mode, json)
                .await?;
            client.close();
            return Ok(());
        }
        Some(Commands::Doctor) => {
            logging::init(&config.log, logging::Target::Stderr)?;
            if let Err(e) = commands::run_doctor(&config, config_path.as_deref()).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            return Ok(());
        }
        Some(Commands::Tui) | None => {
            // Fall through to TUI
        }
    }

    run_tui(&config, cli.demo, size_mode).await
}

async fn run_tui(config: &DockviewConfig, demo: bool, size_mode: SizeMode) -> Result<()> {
    let log_path = logging::init(&config.log, logging::Target::File)?;
    let client = open_client(config, demo).await?;

    let mut controller = MenuController::new(client, size_mode);
    if let Some(path) = &log_path {
        controller.log(&format!("Logging to {}", path.display()));
    }

    let controller = tui::run(controller).await?;
    controller.into_client().close();
    Ok(())
}
