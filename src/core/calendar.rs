//! Calendar orchestration: normalize, assign lanes, plan days, then take
//! each month sheet through its phases in order.

use crate::core::context::RunContext;
use crate::core::day_grid::{DayPlan, build_day_plans};
use crate::core::finish::{merge_identical_neighbours, resolve_colors};
use crate::core::lanes::assign_lanes;
use crate::core::normalizer::normalize_all;
use crate::core::placement::{clear_placeholders, close_table, place_day, remove_blank_rows};
use crate::core::skeleton::build_month_skeleton;
use crate::errors::{AppError, AppResult};
use crate::export::{TextMode, save_workbook, write_debug_snapshot};
use crate::models::{LaneTable, RawSession, SessionRecord};
use crate::sheet::{MemSheet, Sheet};
use crate::utils::date::{date_range, first_of_month, is_weekday, last_of_month};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{error, info};

/// Per-sheet lifecycle. Transitions are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SheetPhase {
    Skeleton,
    SessionsPlaced,
    PlaceholdersCleared,
    BlankRowsRemoved,
    Bordered,
    Merged,
    Colored,
}

impl SheetPhase {
    fn next(self) -> Option<Self> {
        use SheetPhase::*;
        match self {
            Skeleton => Some(SessionsPlaced),
            SessionsPlaced => Some(PlaceholdersCleared),
            PlaceholdersCleared => Some(BlankRowsRemoved),
            BlankRowsRemoved => Some(Bordered),
            Bordered => Some(Merged),
            Merged => Some(Colored),
            Colored => None,
        }
    }
}

impl fmt::Display for SheetPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSheet {
    pub month: u32,
    pub phase: SheetPhase,
    /// First row below the header blocks.
    pub data_start: usize,
    pub sheet: MemSheet,
}

impl MonthSheet {
    /// Move to `to`, which must directly follow the current phase.
    pub fn advance(&mut self, to: SheetPhase) -> AppResult<()> {
        if self.phase.next() != Some(to) {
            return Err(AppError::Phase {
                sheet: self.sheet.name().to_string(),
                current: self.phase.to_string(),
                requested: to.to_string(),
                expected: self.phase.next().map(|p| p.to_string()).unwrap_or_else(|| "none".into()),
            });
        }
        self.phase = to;
        Ok(())
    }
}

/// Month sheets in calendar order. Sheets are appended as soon as their
/// skeleton exists, so a failed run still holds the sheet it stopped on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarWorkbook {
    pub sheets: Vec<MonthSheet>,
}

impl CalendarWorkbook {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Normalized input of the layout stages.
pub struct Prepared {
    pub records: Vec<SessionRecord>,
    pub lanes: LaneTable,
    pub plans: BTreeMap<NaiveDate, DayPlan>,
}

/// Normalize raw sessions and special dates of the run year, compute the
/// lanes over the complete record set, then plan every weekday.
pub fn prepare(ctx: &RunContext<'_>, raw: &[RawSession]) -> AppResult<Prepared> {
    let cfg = ctx.config;
    let mut records = normalize_all(
        raw,
        &cfg.special_dates,
        &ctx.mappings,
        &ctx.judge_colors,
        &cfg.colors(),
        &ctx.abbreviations,
    )?;
    records.retain(|r| r.date.year() == ctx.year);
    records.sort_by(|a, b| {
        (a.date, a.display_order, &a.start_time, &a.description)
            .cmp(&(b.date, b.display_order, &b.start_time, &b.description))
    });

    let lanes = assign_lanes(&records);
    let plans = build_day_plans(&records, &lanes);
    info!(
        records = records.len(),
        lanes = lanes.len(),
        days = plans.len(),
        "prepared calendar input"
    );

    Ok(Prepared {
        records,
        lanes,
        plans,
    })
}

/// Build one month through every phase. The sheet is pushed onto
/// `workbook` before placement starts.
pub fn build_month(
    ctx: &RunContext<'_>,
    month: u32,
    plans: &BTreeMap<NaiveDate, DayPlan>,
    workbook: &mut CalendarWorkbook,
) -> AppResult<()> {
    let skeleton = build_month_skeleton(ctx, month)?;
    workbook.sheets.push(MonthSheet {
        month,
        phase: SheetPhase::Skeleton,
        data_start: skeleton.data_start,
        sheet: skeleton.sheet,
    });
    let ms = workbook
        .sheets
        .last_mut()
        .ok_or_else(|| AppError::Other("month sheet vanished".into()))?;

    let first = first_of_month(ctx.year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{}-{month:02}", ctx.year)))?;
    let last = last_of_month(ctx.year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{}-{month:02}", ctx.year)))?;

    let mut inserted = 0;
    for date in date_range(first, last).filter(|d| is_weekday(*d)) {
        let plan = plans.get(&date).cloned().unwrap_or(DayPlan {
            date,
            slots: Vec::new(),
        });
        inserted += place_day(&mut ms.sheet, &plan, &ctx.default_color)?;
    }
    ms.advance(SheetPhase::SessionsPlaced)?;

    let cleared = clear_placeholders(&mut ms.sheet);
    ms.advance(SheetPhase::PlaceholdersCleared)?;

    let removed = remove_blank_rows(&mut ms.sheet, ms.data_start);
    ms.advance(SheetPhase::BlankRowsRemoved)?;

    close_table(&mut ms.sheet, &ctx.heavy_border);
    ms.advance(SheetPhase::Bordered)?;

    let merges = merge_identical_neighbours(
        &mut ms.sheet,
        ms.data_start,
        ctx.blank_day_text(),
        &ctx.heavy_border,
    )?;
    ms.advance(SheetPhase::Merged)?;

    resolve_colors(&mut ms.sheet, ctx.block_font_size(), &ctx.heavy_border);
    ms.advance(SheetPhase::Colored)?;

    info!(
        sheet = ms.sheet.name(),
        rows = ms.sheet.max_row(),
        inserted,
        cleared,
        removed,
        merges,
        "month sheet finished"
    );
    Ok(())
}

/// All twelve months, sequentially.
pub fn build_calendar(
    ctx: &RunContext<'_>,
    plans: &BTreeMap<NaiveDate, DayPlan>,
    workbook: &mut CalendarWorkbook,
) -> AppResult<()> {
    for month in 1..=12 {
        build_month(ctx, month, plans, workbook)?;
    }
    Ok(())
}

/// Error path of a run. A placement failure first dumps the in-progress
/// workbook into the output folder; a failing dump is logged and the
/// original error is still the one returned.
pub fn fail_with_snapshot(ctx: &RunContext<'_>, workbook: &CalendarWorkbook, e: AppError) -> AppError {
    if e.is_placement() {
        error!(error = %e, "placement failed, writing debug snapshot");
        if let Err(dump_err) = write_debug_snapshot(&ctx.run_id, workbook, &ctx.config.output_dir()) {
            error!(error = %dump_err, "debug snapshot could not be written");
        }
    }
    e
}

/// Full run: prepare, build all months and save the workbook to `output`.
/// A placement failure dumps the in-progress workbook into the output
/// folder before the error is returned.
pub fn generate(ctx: &RunContext<'_>, raw: &[RawSession], output: &Path) -> AppResult<CalendarWorkbook> {
    let prepared = prepare(ctx, raw)?;
    let mut workbook = CalendarWorkbook::new();

    if let Err(e) = build_calendar(ctx, &prepared.plans, &mut workbook) {
        return Err(fail_with_snapshot(ctx, &workbook, e));
    }

    save_workbook(&workbook, output, TextMode::Display)?;
    info!(path = %output.display(), sheets = workbook.sheets.len(), "calendar saved");
    Ok(workbook)
}
