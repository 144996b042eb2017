use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::DbPool;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (never overwritten)
///  - the output and log folders
///  - the SQLite session database schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let config_path = Config::resolve_path(cli.config.as_deref());

    let default_db = match &cli.config {
        Some(p) => p
            .parent()
            .map(|d| d.join("court_sessions.sqlite"))
            .unwrap_or_else(|| PathBuf::from("court_sessions.sqlite")),
        None => Config::database_file(),
    };
    let db_path = cli.db.as_deref().map(expand_tilde).unwrap_or(default_db);

    if Config::init_file(&config_path, &db_path)? {
        success(format!("Configuration written: {}", config_path.display()));
    } else {
        info(format!("Configuration already present: {}", config_path.display()));
    }

    let mut cfg = Config::load(Some(&config_path))?;
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }
    cfg.ensure_folders()?;

    let pool = DbPool::create(&cfg.database_path())?;
    init_db(&pool.conn)?;

    success(format!("Database initialized at {}", cfg.database_path().display()));
    Ok(())
}
