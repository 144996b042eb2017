//! Final passes over a laid-out month: merge identical neighbours, then
//! turn entry colors into fills and font colors.

use crate::errors::AppResult;
use crate::sheet::{Alignment, BorderSide, Borders, CellValue, Sheet, WEEKDAY_COLUMNS};

/// Day numbers and timed entries start with a digit and never merge.
fn mergeable(value: &CellValue, blank_day_text: &str) -> bool {
    match value {
        CellValue::Text(t) | CellValue::Entry { text: t, .. } => {
            !t.trim().is_empty() && t != blank_day_text && !value.starts_with_digit()
        }
        _ => false,
    }
}

/// Merge horizontal runs of identical entries on rows at or below `from`.
/// Returns the number of merged ranges created.
pub fn merge_identical_neighbours<S: Sheet + ?Sized>(
    sheet: &mut S,
    from: usize,
    blank_day_text: &str,
    heavy: &BorderSide,
) -> AppResult<usize> {
    let mut merged = 0;
    for row in from..sheet.max_row() {
        let values: Vec<CellValue> = (0..WEEKDAY_COLUMNS)
            .map(|col| sheet.get_cell(row, col).cloned().unwrap_or_default())
            .collect();

        let mut run_start = 0;
        for col in 1..=WEEKDAY_COLUMNS {
            let continues = col < WEEKDAY_COLUMNS
                && mergeable(&values[col - 1], blank_day_text)
                && values[col] == values[col - 1]
                && !sheet.is_merged(row, col);
            if continues {
                continue;
            }
            let run_end = col - 1;
            if run_end > run_start {
                sheet.merge_range(row, run_start, row, run_end)?;
                for c in run_start..=run_end {
                    sheet.style_mut(row, c).border = Borders::uniform(heavy);
                }
                merged += 1;
            }
            run_start = col;
        }
    }
    Ok(merged)
}

/// Apply entry colors. Block entries get the color as fill plus bold,
/// centered, wrapped text and a heavy border; timed entries (leading digit)
/// only get it as font color. Text still carrying a legacy `-[hex]` tag is
/// converted to an entry first. Running the pass twice changes nothing.
pub fn resolve_colors<S: Sheet + ?Sized>(sheet: &mut S, block_font_size: f64, heavy: &BorderSide) -> usize {
    let mut styled = 0;
    for row in 0..sheet.max_row() {
        for col in 0..WEEKDAY_COLUMNS {
            let Some(value) = sheet.get_cell(row, col).cloned() else {
                continue;
            };

            let value = match value {
                CellValue::Text(t) => match CellValue::from_tagged(&t) {
                    entry @ CellValue::Entry { .. } => {
                        sheet.set_cell(row, col, entry.clone());
                        entry
                    }
                    _ => CellValue::Text(t),
                },
                other => other,
            };

            let CellValue::Entry {
                color: Some(hex), ..
            } = &value
            else {
                continue;
            };

            let style = sheet.style_mut(row, col);
            if value.starts_with_digit() {
                style.font.color = hex.clone();
            } else {
                style.fill = Some(hex.clone());
                style.font.bold = true;
                style.font.size = block_font_size;
                style.alignment = Alignment::centered_wrapped();
                style.border = Borders::uniform(heavy);
            }
            styled += 1;
        }
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{LineStyle, MemSheet, HAlign};

    fn heavy() -> BorderSide {
        BorderSide {
            style: LineStyle::Medium,
            color: "FF000000".into(),
        }
    }

    fn civil() -> CellValue {
        CellValue::entry("SUPERIOR COURT CIVIL JURY TRIALS (JSB-101)", Some("FFBDD7EE".into()))
    }

    #[test]
    fn adjacent_identical_blocks_merge() {
        let mut s = MemSheet::new("t", WEEKDAY_COLUMNS);
        s.set_cell(0, 1, civil());
        s.set_cell(0, 2, civil());
        assert_eq!(merge_identical_neighbours(&mut s, 0, "", &heavy()).unwrap(), 1);

        let bounds = s.merge_at(0, 2).unwrap();
        assert_eq!((bounds.first_col, bounds.last_col), (1, 2));
        assert_eq!(s.get_cell(0, 1).unwrap().display_text(), "SUPERIOR COURT CIVIL JURY TRIALS (JSB-101)");
        assert_eq!(s.style(0, 1).unwrap().border, s.style(0, 2).unwrap().border);
        assert_eq!(s.style(0, 2).unwrap().border.top, Some(heavy()));
        assert!(!s.is_merged(0, 0));
        assert!(!s.is_merged(0, 3));
    }

    #[test]
    fn run_reaching_friday_merges() {
        let mut s = MemSheet::new("t", WEEKDAY_COLUMNS);
        for col in 0..WEEKDAY_COLUMNS {
            s.set_cell(0, col, civil());
        }
        merge_identical_neighbours(&mut s, 0, "", &heavy()).unwrap();
        let b = s.merge_at(0, 0).unwrap();
        assert_eq!((b.first_col, b.last_col), (0, 4));
    }

    #[test]
    fn digits_blanks_and_other_colors_stay_apart() {
        let mut s = MemSheet::new("t", WEEKDAY_COLUMNS);
        let timed = CellValue::entry("9:00 Motion Hearing (B)", Some("FF000000".into()));
        s.set_cell(0, 0, timed.clone());
        s.set_cell(0, 1, timed);
        s.set_cell(1, 0, CellValue::DayNumber(1));
        s.set_cell(1, 1, CellValue::DayNumber(1));
        s.set_cell(2, 0, CellValue::Text("-".into()));
        s.set_cell(2, 1, CellValue::Text("-".into()));
        s.set_cell(3, 0, civil());
        s.set_cell(3, 1, CellValue::entry("SUPERIOR COURT CIVIL JURY TRIALS (JSB-101)", Some("FFC6EFCE".into())));
        assert_eq!(merge_identical_neighbours(&mut s, 0, "-", &heavy()).unwrap(), 0);
    }

    #[test]
    fn block_and_timed_colors() {
        let mut s = MemSheet::new("t", WEEKDAY_COLUMNS);
        s.set_cell(0, 0, civil());
        s.set_cell(0, 1, CellValue::Text("9:00 Motion Hearing (B)-[FFC00000]".into()));
        assert_eq!(resolve_colors(&mut s, 9.0, &heavy()), 2);

        let block = s.style(0, 0).unwrap();
        assert_eq!(block.fill.as_deref(), Some("FFBDD7EE"));
        assert!(block.font.bold);
        assert_eq!(block.font.size, 9.0);
        assert_eq!(block.alignment.horizontal, HAlign::Center);
        assert!(block.alignment.wrap);

        let timed = s.style(0, 1).unwrap();
        assert_eq!(timed.font.color, "FFC00000");
        assert_eq!(timed.fill, None);
        assert_eq!(s.get_cell(0, 1).unwrap().display_text(), "9:00 Motion Hearing (B)");
    }

    #[test]
    fn color_pass_is_idempotent() {
        let mut s = MemSheet::new("t", WEEKDAY_COLUMNS);
        s.set_cell(0, 0, CellValue::Text("HOLIDAY-[FFFFFFFF]".into()));
        s.set_cell(0, 1, CellValue::Text("PLAIN".into()));
        resolve_colors(&mut s, 9.0, &heavy());
        let first = s.clone();
        resolve_colors(&mut s, 9.0, &heavy());
        assert_eq!(first.texts(), s.texts());
        assert_eq!(first.style(0, 0), s.style(0, 0));
        assert_eq!(s.get_cell(0, 1), Some(&CellValue::Text("PLAIN".into())));
    }
}
