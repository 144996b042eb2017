// src/export/xlsx.rs

use crate::core::CalendarWorkbook;
use crate::errors::{AppError, AppResult};
use crate::sheet::{BorderSide, CellStyle, CellValue, HAlign, LineStyle, MemSheet, Sheet, VAlign};
use crate::utils::colors::parse_hex_rgb;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;

/// How entry cells are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Plain session text; color lives in the cell fill.
    Display,
    /// Legacy `text-[hex]` form, used by debug snapshots.
    Tagged,
}

/// Render every month sheet into one workbook file.
pub fn save_workbook(book: &CalendarWorkbook, path: &Path, mode: TextMode) -> AppResult<()> {
    let mut workbook = Workbook::new();

    for ms in &book.sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, &ms.sheet, mode)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet(ws: &mut Worksheet, sheet: &MemSheet, mode: TextMode) -> AppResult<()> {
    ws.set_name(sheet.name())?;

    for col in 0..sheet.width() {
        if let Some(w) = sheet.column_width(col) {
            ws.set_column_width(col_index(col)?, w)?;
        }
    }

    let merges = sheet.merged_ranges();

    for row in 0..sheet.max_row() {
        let r = row_index(row)?;
        if let Some(h) = sheet.row_height(row) {
            ws.set_row_height(r, h)?;
        }
        for col in 0..sheet.width() {
            // merged cells are written once, below
            if merges.iter().any(|m| m.contains(row, col)) {
                continue;
            }
            let Some(cell) = sheet.cell(row, col) else {
                continue;
            };
            let c = col_index(col)?;
            let format = to_format(&cell.style);
            match &cell.value {
                CellValue::Empty => {
                    ws.write_blank(r, c, &format)?;
                }
                CellValue::DayNumber(n) => {
                    ws.write_number_with_format(r, c, f64::from(*n), &format)?;
                }
                other => {
                    ws.write_string_with_format(r, c, cell_text(other, mode), &format)?;
                }
            }
        }
    }

    for m in &merges {
        let Some(cell) = sheet.cell(m.first_row, m.first_col) else {
            continue;
        };
        let format = to_format(&cell.style);
        let text = cell_text(&cell.value, mode);
        if m.first_row == m.last_row && m.first_col == m.last_col {
            ws.write_string_with_format(row_index(m.first_row)?, col_index(m.first_col)?, text, &format)?;
            continue;
        }
        ws.merge_range(
            row_index(m.first_row)?,
            col_index(m.first_col)?,
            row_index(m.last_row)?,
            col_index(m.last_col)?,
            &text,
            &format,
        )?;
    }

    Ok(())
}

fn cell_text(value: &CellValue, mode: TextMode) -> String {
    match mode {
        TextMode::Display => value.display_text(),
        TextMode::Tagged => value.tagged_text(),
    }
}

fn to_format(style: &CellStyle) -> Format {
    let font = &style.font;
    let mut format = Format::new()
        .set_font_name(&font.name)
        .set_font_size(font.size);
    if let Some(rgb) = parse_hex_rgb(&font.color) {
        format = format.set_font_color(Color::RGB(rgb));
    }
    if font.bold {
        format = format.set_bold();
    }
    if font.italic {
        format = format.set_italic();
    }

    if let Some(rgb) = style.fill.as_deref().and_then(parse_hex_rgb) {
        format = format
            .set_background_color(Color::RGB(rgb))
            .set_pattern(FormatPattern::Solid);
    }

    let b = &style.border;
    if let Some(side) = &b.left {
        let (kind, color) = border(side);
        format = format.set_border_left(kind).set_border_left_color(color);
    }
    if let Some(side) = &b.right {
        let (kind, color) = border(side);
        format = format.set_border_right(kind).set_border_right_color(color);
    }
    if let Some(side) = &b.top {
        let (kind, color) = border(side);
        format = format.set_border_top(kind).set_border_top_color(color);
    }
    if let Some(side) = &b.bottom {
        let (kind, color) = border(side);
        format = format.set_border_bottom(kind).set_border_bottom_color(color);
    }

    let a = &style.alignment;
    format = match a.horizontal {
        HAlign::General => format,
        HAlign::Left => format.set_align(FormatAlign::Left),
        HAlign::Center => format.set_align(FormatAlign::Center),
        HAlign::Right => format.set_align(FormatAlign::Right),
    };
    format = match a.vertical {
        VAlign::Top => format.set_align(FormatAlign::Top),
        VAlign::Center => format.set_align(FormatAlign::VerticalCenter),
        VAlign::Bottom => format,
    };
    if a.wrap {
        format = format.set_text_wrap();
    }

    format
}

fn border(side: &BorderSide) -> (FormatBorder, Color) {
    let kind = match side.style {
        LineStyle::Thin => FormatBorder::Thin,
        LineStyle::Medium => FormatBorder::Medium,
        LineStyle::Thick => FormatBorder::Thick,
        LineStyle::Dashed => FormatBorder::Dashed,
        LineStyle::Dotted => FormatBorder::Dotted,
        LineStyle::Double => FormatBorder::Double,
        LineStyle::Hair => FormatBorder::Hair,
    };
    let color = parse_hex_rgb(&side.color).map(Color::RGB).unwrap_or(Color::Black);
    (kind, color)
}

fn row_index(row: usize) -> AppResult<u32> {
    u32::try_from(row).map_err(|_| AppError::Export(format!("row {row} out of range")))
}

fn col_index(col: usize) -> AppResult<u16> {
    u16::try_from(col).map_err(|_| AppError::Export(format!("column {col} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MonthSheet, SheetPhase};
    use crate::sheet::Borders;

    fn book() -> CalendarWorkbook {
        let mut s = MemSheet::new("January", 5);
        s.set_cell(0, 0, CellValue::Text("JANUARY 2025".into()));
        s.merge_range(0, 0, 0, 4).unwrap();
        s.set_cell(1, 0, CellValue::DayNumber(6));
        s.set_cell(2, 0, CellValue::entry("SU CR JURY", Some("FFBDD7EE".into())));
        s.style_mut(2, 0).fill = Some("FFBDD7EE".into());
        s.style_mut(2, 0).border = Borders::uniform(&BorderSide {
            style: LineStyle::Medium,
            color: "FF000000".into(),
        });
        s.set_column_width(0, 26.0);
        CalendarWorkbook {
            sheets: vec![MonthSheet {
                month: 1,
                phase: SheetPhase::Colored,
                data_start: 1,
                sheet: s,
            }],
        }
    }

    #[test]
    fn writes_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cal.xlsx");
        save_workbook(&book(), &path, TextMode::Display).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn tagged_mode_keeps_color_suffix() {
        let b = book();
        let cell = b.sheets[0].sheet.cell(2, 0).unwrap();
        assert_eq!(cell_text(&cell.value, TextMode::Tagged), "SU CR JURY-[FFBDD7EE]");
        assert_eq!(cell_text(&cell.value, TextMode::Display), "SU CR JURY");
    }
}
