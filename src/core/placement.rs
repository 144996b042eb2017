//! Sheet placement engine: writes each day's slots under its day number,
//! growing the week block row by row, then clears what is left over.

use crate::core::day_grid::{DayPlan, Slot};
use crate::core::skeleton::fill_placeholders;
use crate::errors::{AppError, AppResult};
use crate::sheet::{BorderSide, CellValue, Sheet, WEEKDAY_COLUMNS, find_in_column, is_blank_row};
use crate::utils::date::weekday_column;
use chrono::Datelike;
use tracing::debug;

fn precondition<S: Sheet + ?Sized>(sheet: &S, plan: &DayPlan, reason: &str) -> AppError {
    AppError::Placement {
        sheet: sheet.name().to_string(),
        date: plan.date.to_string(),
        reason: reason.to_string(),
    }
}

fn slot_value(slot: &Slot, default_color: &str) -> CellValue {
    match &slot.record {
        Some(r) => CellValue::entry(
            r.description.clone(),
            Some(r.color.clone().unwrap_or_else(|| default_color.to_string())),
        ),
        None => CellValue::Empty,
    }
}

/// Place one day's slots. Returns the number of rows inserted.
///
/// Fails when the day-number cell or the first placeholder below it cannot
/// be found: the skeleton is corrupt and the run cannot continue.
pub fn place_day<S: Sheet + ?Sized>(sheet: &mut S, plan: &DayPlan, default_color: &str) -> AppResult<usize> {
    let col = weekday_column(plan.date)
        .ok_or_else(|| precondition(sheet, plan, "date is not a weekday"))?;
    let day = plan.date.day();

    let day_row = find_in_column(sheet, col, 0, |v| matches!(v, CellValue::DayNumber(n) if *n == day))
        .ok_or_else(|| precondition(sheet, plan, "day number cell not found"))?;
    let first = find_in_column(sheet, col, day_row + 1, CellValue::is_placeholder)
        .ok_or_else(|| precondition(sheet, plan, "no placeholder below the day number"))?;

    // leftovers of earlier days of this week that had fewer slots
    for c in 0..col {
        if sheet.get_cell(first, c).is_some_and(CellValue::is_placeholder) {
            sheet.clear_cell(first, c);
        }
    }

    if plan.slots.is_empty() {
        return Ok(0);
    }

    let mut row = first;
    let mut inserted = 0;
    for (i, slot) in plan.slots.iter().enumerate() {
        if i > 0 {
            row += 1;
            if !sheet.get_cell(row, col).is_some_and(CellValue::is_placeholder) {
                sheet.insert_rows(row, 1);
                sheet.copy_row_style(row - 1, row);
                fill_placeholders(sheet, row);
                inserted += 1;
            }
        }
        sheet.set_cell(row, col, slot_value(slot, default_color));
    }

    if sheet.get_cell(row + 1, col).is_some_and(CellValue::is_placeholder) {
        sheet.clear_cell(row + 1, col);
    }

    debug!(
        sheet = sheet.name(),
        date = %plan.date,
        slots = plan.slots.len(),
        inserted,
        "placed day"
    );
    Ok(inserted)
}

/// Replace every remaining placeholder with an empty cell, bottom-up.
pub fn clear_placeholders<S: Sheet + ?Sized>(sheet: &mut S) -> usize {
    let mut cleared = 0;
    for row in (0..sheet.max_row()).rev() {
        for col in 0..WEEKDAY_COLUMNS {
            if sheet.get_cell(row, col).is_some_and(CellValue::is_placeholder) {
                sheet.clear_cell(row, col);
                cleared += 1;
            }
        }
    }
    cleared
}

/// Delete blank rows at or below `from`, scanning bottom-up so rows not yet
/// visited keep their indices.
pub fn remove_blank_rows<S: Sheet + ?Sized>(sheet: &mut S, from: usize) -> usize {
    let mut removed = 0;
    for row in (from..sheet.max_row()).rev() {
        if is_blank_row(sheet, row) {
            sheet.delete_rows(row, 1);
            removed += 1;
        }
    }
    removed
}

/// Heavy bottom border under the last non-blank row. Returns that row.
pub fn close_table<S: Sheet + ?Sized>(sheet: &mut S, heavy: &BorderSide) -> Option<usize> {
    let last = (0..sheet.max_row()).rev().find(|&row| !is_blank_row(sheet, row))?;
    for col in 0..WEEKDAY_COLUMNS {
        sheet.style_mut(last, col).border.bottom = Some(heavy.clone());
    }
    Some(last)
}
