use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::RunContext;
use crate::core::calendar::prepare;
use crate::db::DbPool;
use crate::db::queries::load_raw_sessions;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::table::Table;
use chrono::NaiveDate;

/// Handle the `lanes` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Lanes { year } = cmd else {
        return Ok(());
    };

    let ctx = RunContext::new(cfg, *year, year.to_string())?;

    let from = NaiveDate::from_ymd_opt(*year, 1, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-01-01")))?;
    let to = NaiveDate::from_ymd_opt(*year, 12, 31)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-12-31")))?;

    let mut pool = DbPool::open(&cfg.database_path())?;
    let raw = load_raw_sessions(&mut pool, from, to)?;
    let prepared = prepare(&ctx, &raw)?;

    if prepared.lanes.is_empty() {
        info(format!("No untimed sessions in {year}"));
        return Ok(());
    }

    let mut table = Table::new(vec!["Week", "Rank", "Order", "Description"]);
    for lane in prepared.lanes.iter() {
        table.add_row(vec![
            lane.week.to_string(),
            lane.rank.to_string(),
            lane.display_order.to_string(),
            lane.description.clone(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
