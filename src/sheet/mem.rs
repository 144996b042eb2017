//! In-memory sheet. Rows carry a stable [`RowId`] so merged regions stay
//! attached to the right rows while rows are inserted and deleted around
//! them.

use crate::errors::{AppError, AppResult};
use crate::sheet::cell::CellValue;
use crate::sheet::style::CellStyle;
use crate::sheet::Sheet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowId(u64);

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, Serialize)]
struct Row {
    id: RowId,
    cells: Vec<Cell>,
    height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRange {
    pub first_row: RowId,
    pub last_row: RowId,
    pub first_col: usize,
    pub last_col: usize,
}

/// Resolved position of a merged region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeBounds {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl MergeBounds {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    fn overlaps(&self, other: &MergeBounds) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemSheet {
    name: String,
    width: usize,
    rows: Vec<Row>,
    merges: Vec<MergedRange>,
    column_widths: Vec<Option<f64>>,
    next_id: u64,
}

impl MemSheet {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
            rows: Vec::new(),
            merges: Vec::new(),
            column_widths: vec![None; width],
            next_id: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn new_row(&mut self) -> Row {
        let id = RowId(self.next_id);
        self.next_id += 1;
        Row {
            id,
            cells: vec![Cell::default(); self.width],
            height: None,
        }
    }

    fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            let r = self.new_row();
            self.rows.push(r);
        }
    }

    pub fn row_id(&self, row: usize) -> Option<RowId> {
        self.rows.get(row).map(|r| r.id)
    }

    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn row_height(&self, row: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.height)
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) {
        if let Some(w) = self.column_widths.get_mut(col) {
            *w = Some(width);
        }
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(col).copied().flatten()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Current positions of all merged regions whose rows still exist.
    pub fn merged_ranges(&self) -> Vec<MergeBounds> {
        self.merges
            .iter()
            .filter_map(|m| {
                Some(MergeBounds {
                    first_row: self.position_of(m.first_row)?,
                    last_row: self.position_of(m.last_row)?,
                    first_col: m.first_col,
                    last_col: m.last_col,
                })
            })
            .collect()
    }

    pub fn merge_at(&self, row: usize, col: usize) -> Option<MergeBounds> {
        self.merged_ranges()
            .into_iter()
            .find(|b| b.contains(row, col))
    }

    /// Display text of every cell, row by row.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.value.display_text()).collect())
            .collect()
    }
}

impl Sheet for MemSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_row(&self) -> usize {
        self.rows.len()
    }

    fn get_cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if col >= self.width {
            return;
        }
        self.ensure_row(row);
        self.rows[row].cells[col].value = value;
    }

    fn insert_rows(&mut self, at: usize, count: usize) {
        let at = at.min(self.rows.len());
        for i in 0..count {
            let r = self.new_row();
            self.rows.insert(at + i, r);
        }
    }

    fn delete_rows(&mut self, at: usize, count: usize) {
        if at >= self.rows.len() {
            return;
        }
        let end = (at + count).min(self.rows.len());
        let removed: Vec<RowId> = self.rows.drain(at..end).map(|r| r.id).collect();
        self.merges
            .retain(|m| !removed.contains(&m.first_row) && !removed.contains(&m.last_row));
    }

    fn merge_range(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> AppResult<()> {
        let bounds = MergeBounds {
            first_row: r1.min(r2),
            last_row: r1.max(r2),
            first_col: c1.min(c2),
            last_col: c1.max(c2),
        };
        if bounds.last_col >= self.width {
            return Err(AppError::Merge {
                sheet: self.name.clone(),
                reason: format!("column {} is outside the sheet", bounds.last_col),
            });
        }
        if self.merged_ranges().iter().any(|m| m.overlaps(&bounds)) {
            return Err(AppError::Merge {
                sheet: self.name.clone(),
                reason: format!(
                    "rows {}..={} cols {}..={} overlap an existing merge",
                    bounds.first_row, bounds.last_row, bounds.first_col, bounds.last_col
                ),
            });
        }
        self.ensure_row(bounds.last_row);
        self.merges.push(MergedRange {
            first_row: self.rows[bounds.first_row].id,
            last_row: self.rows[bounds.last_row].id,
            first_col: bounds.first_col,
            last_col: bounds.last_col,
        });
        Ok(())
    }

    fn is_merged(&self, row: usize, col: usize) -> bool {
        self.merge_at(row, col).is_some()
    }

    fn style(&self, row: usize, col: usize) -> Option<&CellStyle> {
        self.cell(row, col).map(|c| &c.style)
    }

    fn style_mut(&mut self, row: usize, col: usize) -> &mut CellStyle {
        self.ensure_row(row);
        let col = col.min(self.width.saturating_sub(1));
        &mut self.rows[row].cells[col].style
    }

    fn copy_row_style(&mut self, from: usize, to: usize) {
        if from >= self.rows.len() || to >= self.rows.len() {
            return;
        }
        let styles: Vec<CellStyle> = self.rows[from].cells.iter().map(|c| c.style.clone()).collect();
        let height = self.rows[from].height;
        let target = &mut self.rows[to];
        for (cell, style) in target.cells.iter_mut().zip(styles) {
            cell.style = style;
        }
        target.height = height;
    }

    fn set_row_height(&mut self, row: usize, height: f64) {
        self.ensure_row(row);
        self.rows[row].height = Some(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{is_blank_row, find_in_column};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn insert_shifts_rows_down() {
        let mut s = MemSheet::new("t", 5);
        s.set_cell(0, 0, text("a"));
        s.set_cell(1, 0, text("b"));
        s.insert_rows(1, 2);
        assert_eq!(s.max_row(), 4);
        assert_eq!(s.get_cell(3, 0), Some(&text("b")));
        assert_eq!(s.get_cell(1, 0), Some(&CellValue::Empty));
    }

    #[test]
    fn merges_follow_their_rows() {
        let mut s = MemSheet::new("t", 5);
        s.set_cell(2, 0, text("x"));
        s.merge_range(2, 0, 2, 4).unwrap();
        s.insert_rows(0, 3);
        assert!(s.is_merged(5, 3));
        assert!(!s.is_merged(2, 3));
        s.delete_rows(0, 1);
        assert!(s.is_merged(4, 0));
    }

    #[test]
    fn deleting_a_merged_row_drops_the_merge() {
        let mut s = MemSheet::new("t", 5);
        s.merge_range(0, 0, 0, 1).unwrap();
        s.delete_rows(0, 1);
        assert!(s.merged_ranges().is_empty());
    }

    #[test]
    fn overlapping_merge_is_rejected() {
        let mut s = MemSheet::new("t", 5);
        s.merge_range(0, 0, 0, 2).unwrap();
        assert!(matches!(
            s.merge_range(0, 2, 0, 4),
            Err(AppError::Merge { .. })
        ));
    }

    #[test]
    fn copy_row_style_keeps_values() {
        let mut s = MemSheet::new("t", 5);
        s.style_mut(0, 1).font.bold = true;
        s.set_row_height(0, 30.0);
        s.set_cell(1, 1, text("keep"));
        s.copy_row_style(0, 1);
        assert!(s.style(1, 1).unwrap().font.bold);
        assert_eq!(s.row_height(1), Some(30.0));
        assert_eq!(s.get_cell(1, 1), Some(&text("keep")));
    }

    #[test]
    fn column_scan_and_blank_rows() {
        let mut s = MemSheet::new("t", 5);
        s.set_cell(0, 2, CellValue::DayNumber(7));
        s.set_cell(3, 2, CellValue::Placeholder);
        assert_eq!(find_in_column(&s, 2, 0, CellValue::is_placeholder), Some(3));
        assert_eq!(find_in_column(&s, 2, 4, CellValue::is_placeholder), None);
        assert!(is_blank_row(&s, 1));
        assert!(!is_blank_row(&s, 0));

        s.merge_range(1, 0, 1, 4).unwrap();
        assert!(!is_blank_row(&s, 1));
    }
}
