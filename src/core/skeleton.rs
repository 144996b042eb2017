//! Month skeleton: header blocks, then per week a day-number row and one
//! placeholder row, produced by expanding a two-row template block.

use crate::config::MergeMode;
use crate::core::context::{ResolvedHeader, RunContext};
use crate::errors::{AppError, AppResult};
use crate::sheet::{CellValue, MemSheet, Sheet, WEEKDAY_COLUMNS};
use crate::utils::cell_ref::parse_a1;
use crate::utils::date::{first_of_month, last_of_month, month_name, week_start};
use chrono::{Datelike, Duration, NaiveDate};

/// A freshly built month sheet and the first row below its header.
pub struct Skeleton {
    pub sheet: MemSheet,
    pub data_start: usize,
    pub weeks: usize,
}

/// Sundays starting the weeks shown on the month sheet: every week with at
/// least one weekday inside the month.
pub fn month_weeks(year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
    let first = first_of_month(year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    let last = last_of_month(year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;

    let mut weeks = Vec::new();
    let mut sunday = week_start(first);
    while sunday <= last {
        let has_weekday = (1..=5)
            .map(|i| sunday + Duration::days(i))
            .any(|d| d.month() == month && d.year() == year);
        if has_weekday {
            weeks.push(sunday);
        }
        sunday += Duration::days(7);
    }
    Ok(weeks)
}

pub fn build_month_skeleton(ctx: &RunContext<'_>, month: u32) -> AppResult<Skeleton> {
    let name = month_name(month);
    let mut sheet = MemSheet::new(name, WEEKDAY_COLUMNS);
    for col in 0..WEEKDAY_COLUMNS {
        sheet.set_column_width(col, ctx.column_width());
    }

    let mut data_start = 0;
    for header in &ctx.headers {
        let bottom = write_header(&mut sheet, header, month, ctx.year)?;
        data_start = data_start.max(bottom + 1);
    }

    let weeks = month_weeks(ctx.year, month)?;
    write_template(&mut sheet, ctx, data_start);

    for (i, sunday) in weeks.iter().enumerate() {
        let day_row = data_start + i * 2;
        if i > 0 {
            sheet.insert_rows(day_row, 2);
            sheet.copy_row_style(data_start, day_row);
            sheet.copy_row_style(data_start + 1, day_row + 1);
            fill_placeholders(&mut sheet, day_row + 1);
        }
        write_day_numbers(&mut sheet, ctx, day_row, *sunday, month);
    }

    Ok(Skeleton {
        sheet,
        data_start,
        weeks: weeks.len(),
    })
}

/// Returns the bottom row of the block.
fn write_header<S: Sheet>(
    sheet: &mut S,
    header: &ResolvedHeader,
    month: u32,
    year: i32,
) -> AppResult<usize> {
    let block = &header.block;
    let (r1, c1) = parse_a1(&block.top_left_cell)?;
    let (r2, c2) = parse_a1(&block.bottom_right_cell)?;
    let text = |i: usize| {
        let raw = block.text.get(i).cloned().unwrap_or_default();
        CellValue::Text(
            raw.replace("{month}", &month_name(month).to_uppercase())
                .replace("{year}", &year.to_string()),
        )
    };

    match block.merge_cells {
        MergeMode::ByColumn | MergeMode::ByBoth => {
            sheet.merge_range(r1, c1, r2, c2)?;
            sheet.set_cell(r1, c1, text(0));
        }
        MergeMode::ByRow => {
            for (i, col) in (c1..=c2).enumerate() {
                sheet.merge_range(r1, col, r2, col)?;
                sheet.set_cell(r1, col, text(i));
            }
        }
    }

    // borders must cover every cell of a merged area
    for row in r1..=r2 {
        for col in c1..=c2 {
            *sheet.style_mut(row, col) = header.style.clone();
        }
    }
    Ok(r2)
}

fn write_template<S: Sheet>(sheet: &mut S, ctx: &RunContext<'_>, day_row: usize) {
    for col in 0..WEEKDAY_COLUMNS {
        *sheet.style_mut(day_row, col) = ctx.day_number_style.clone();
        *sheet.style_mut(day_row + 1, col) = ctx.session_style.clone();
    }
    if let Some(h) = ctx.config.layout.session_row_height {
        sheet.set_row_height(day_row + 1, h);
    }
    fill_placeholders(sheet, day_row + 1);
}

pub(crate) fn fill_placeholders<S: Sheet + ?Sized>(sheet: &mut S, row: usize) {
    for col in 0..WEEKDAY_COLUMNS {
        sheet.set_cell(row, col, CellValue::Placeholder);
    }
}

fn write_day_numbers<S: Sheet>(
    sheet: &mut S,
    ctx: &RunContext<'_>,
    row: usize,
    sunday: NaiveDate,
    month: u32,
) {
    for col in 0..WEEKDAY_COLUMNS {
        let date = sunday + Duration::days(col as i64 + 1);
        if date.month() == month && date.year() == ctx.year {
            sheet.set_cell(row, col, CellValue::DayNumber(date.day()));
        } else {
            let marker = ctx.blank_day_text();
            let value = if marker.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(marker.to_string())
            };
            sheet.set_cell(row, col, value);
            *sheet.style_mut(row, col) = ctx.blank_day_style.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_cover_every_weekday_of_the_month() {
        // March 2025 starts on a Saturday and ends on a Monday.
        let weeks = month_weeks(2025, 3).unwrap();
        assert_eq!(weeks.first(), Some(&NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()));
        assert_eq!(weeks.last(), Some(&NaiveDate::from_ymd_opt(2025, 3, 30).unwrap()));
        assert_eq!(weeks.len(), 5);
    }

    #[test]
    fn weekend_only_overlap_is_not_a_week() {
        // November 2025 starts on a Saturday: the week of Oct 26 is skipped.
        let weeks = month_weeks(2025, 11).unwrap();
        assert_eq!(weeks[0], NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
    }
}
