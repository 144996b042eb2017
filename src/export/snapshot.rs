// src/export/snapshot.rs

use crate::core::{CalendarWorkbook, SheetPhase};
use crate::errors::AppResult;
use crate::export::xlsx::{TextMode, save_workbook};
use crate::sheet::{MemSheet, Sheet};
use rust_xlsxwriter::utility::cell_range;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct SheetDump {
    pub name: String,
    pub phase: SheetPhase,
    /// Tagged cell texts, row by row.
    pub rows: Vec<Vec<String>>,
    /// Merged regions in A1 notation.
    pub merges: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkbookDump {
    pub run_id: String,
    pub sheets: Vec<SheetDump>,
}

impl WorkbookDump {
    pub fn from_workbook(run_id: &str, book: &CalendarWorkbook) -> Self {
        Self {
            run_id: run_id.to_string(),
            sheets: book
                .sheets
                .iter()
                .map(|ms| SheetDump {
                    name: ms.sheet.name().to_string(),
                    phase: ms.phase,
                    rows: tagged_rows(&ms.sheet),
                    merges: ms
                        .sheet
                        .merged_ranges()
                        .iter()
                        .map(|m| {
                            cell_range(
                                m.first_row as u32,
                                m.first_col as u16,
                                m.last_row as u32,
                                m.last_col as u16,
                            )
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn tagged_rows(sheet: &MemSheet) -> Vec<Vec<String>> {
    (0..sheet.max_row())
        .map(|row| {
            (0..sheet.width())
                .map(|col| {
                    sheet
                        .get_cell(row, col)
                        .map(|v| v.tagged_text())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

/// Write the JSON grid dump.
pub fn write_json(run_id: &str, book: &CalendarWorkbook, path: &Path) -> AppResult<()> {
    let dump = WorkbookDump::from_workbook(run_id, book);
    let json = serde_json::to_string_pretty(&dump)?;
    fs::write(path, json)?;
    Ok(())
}

/// Dump an in-progress workbook as `<run_id>_debug.xlsx` and
/// `<run_id>_debug.json` into `dir`. Returns the paths written.
pub fn write_debug_snapshot(
    run_id: &str,
    book: &CalendarWorkbook,
    dir: &Path,
) -> AppResult<(PathBuf, PathBuf)> {
    let xlsx = dir.join(format!("{run_id}_debug.xlsx"));
    let json = dir.join(format!("{run_id}_debug.json"));

    save_workbook(book, &xlsx, TextMode::Tagged)?;
    write_json(run_id, book, &json)?;

    warn!(xlsx = %xlsx.display(), json = %json.display(), "debug snapshot written");
    Ok((xlsx, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MonthSheet;
    use crate::sheet::CellValue;

    #[test]
    fn dump_contains_tags_and_merges() {
        let mut s = MemSheet::new("March", 5);
        s.set_cell(0, 0, CellValue::entry("CIVIL", Some("FFC6EFCE".into())));
        s.set_cell(0, 1, CellValue::entry("CIVIL", Some("FFC6EFCE".into())));
        s.merge_range(0, 0, 0, 1).unwrap();
        s.set_cell(1, 2, CellValue::Placeholder);
        s.merge_range(2, 3, 3, 4).unwrap();

        let book = CalendarWorkbook {
            sheets: vec![MonthSheet {
                month: 3,
                phase: SheetPhase::SessionsPlaced,
                data_start: 0,
                sheet: s,
            }],
        };
        let dump = WorkbookDump::from_workbook("2025", &book);
        let sheet = &dump.sheets[0];
        assert_eq!(sheet.rows[0][0], "CIVIL-[FFC6EFCE]");
        assert_eq!(sheet.rows[1][2], "${court_session}$");
        assert_eq!(sheet.merges, vec!["A1:B1".to_string(), "D3:E4".to_string()]);
        assert_eq!(sheet.phase, SheetPhase::SessionsPlaced);
    }

    #[test]
    fn debug_snapshot_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let book = CalendarWorkbook {
            sheets: vec![MonthSheet {
                month: 1,
                phase: SheetPhase::Skeleton,
                data_start: 0,
                sheet: MemSheet::new("January", 5),
            }],
        };
        let (xlsx, json) = write_debug_snapshot("run7", &book, dir.path()).unwrap();
        assert!(xlsx.ends_with("run7_debug.xlsx"));
        let text = std::fs::read_to_string(json).unwrap();
        assert!(text.contains("\"January\""));
    }
}
