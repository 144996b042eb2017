//! court-calendar library root.
//! Exposes the CLI parser, the high-level run() function and the layout
//! pipeline modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod sheet;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::{Config, LoggingConfig};
use errors::AppResult;
use tracing::{debug, error};

/// Central command dispatcher for commands that need a loaded configuration
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Generate { .. } => cli::commands::generate::handle(&cli.command, cfg),
        Commands::Lanes { .. } => cli::commands::lanes::handle(&cli.command, cfg),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // init and config work on the file itself, not on a loaded config
    match &cli.command {
        Commands::Init => {
            logging::init_logging(&LoggingConfig::default(), None)?;
            return cli::commands::init::handle(&cli);
        }
        Commands::Config { .. } => {
            logging::init_logging(&LoggingConfig::default(), None)?;
            let path = Config::resolve_path(cli.config.as_deref());
            return cli::commands::config::handle(&cli.command, &path);
        }
        _ => {}
    }

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    cfg.ensure_folders()?;

    let log_file = logging::init_logging(&cfg.logging, cfg.logs_dir().as_deref())?;
    if let Some(path) = log_file {
        debug!(path = %path.display(), "file logging enabled");
    }

    let result = dispatch(&cli, &cfg);
    if let Err(e) = &result {
        error!(error = %e, "run failed");
    }
    result
}
