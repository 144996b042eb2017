use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::RunContext;
use crate::core::calendar;
use crate::db::DbPool;
use crate::db::queries::load_raw_sessions;
use crate::errors::{AppError, AppResult};
use crate::export::{calendar_file_name, ensure_writable, notify_export_success};
use crate::ui::messages::info;
use chrono::NaiveDate;

/// Handle the `generate` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Generate {
        year,
        run_id,
        output,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let run_id = run_id.clone().unwrap_or_else(|| year.to_string());
    let output = output
        .clone()
        .unwrap_or_else(|| cfg.output_dir().join(calendar_file_name(&run_id)));
    ensure_writable(&output, *force)?;

    let ctx = RunContext::new(cfg, *year, run_id)?;

    let from = NaiveDate::from_ymd_opt(*year, 1, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-01-01")))?;
    let to = NaiveDate::from_ymd_opt(*year, 12, 31)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-12-31")))?;

    let mut pool = DbPool::open(&cfg.database_path())?;
    let raw = load_raw_sessions(&mut pool, from, to)?;
    info(format!("Loaded {} sessions for {year}", raw.len()));

    calendar::generate(&ctx, &raw, &output)?;

    notify_export_success("Calendar", &output);
    Ok(())
}
