//! Abstract worksheet grid and its in-memory implementation.
//!
//! The calendar pipeline only talks to [`Sheet`]; cell lookups by value are
//! explicit linear scans (see [`find_in_column`]) so their cost stays visible.

pub mod cell;
pub mod mem;
pub mod style;

pub use cell::{CellValue, PLACEHOLDER_TOKEN};
pub use mem::{MemSheet, MergedRange, RowId};
pub use style::{Alignment, BorderSide, Borders, CellStyle, Font, HAlign, LineStyle, VAlign};

use crate::errors::AppResult;

/// Monday..Friday columns of every calendar sheet.
pub const WEEKDAY_COLUMNS: usize = 5;

/// Grid operations the layout engine needs. Rows and columns are
/// zero-based; reads outside the grid return `None`.
pub trait Sheet {
    fn name(&self) -> &str;

    /// Number of rows (one past the last row index).
    fn max_row(&self) -> usize;

    fn get_cell(&self, row: usize, col: usize) -> Option<&CellValue>;

    /// Writes a value, growing the grid when `row` is past the end.
    fn set_cell(&mut self, row: usize, col: usize, value: CellValue);

    fn clear_cell(&mut self, row: usize, col: usize) {
        self.set_cell(row, col, CellValue::Empty);
    }

    /// Inserts `count` empty, unstyled rows before `at`.
    fn insert_rows(&mut self, at: usize, count: usize);

    fn delete_rows(&mut self, at: usize, count: usize);

    fn merge_range(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> AppResult<()>;

    fn is_merged(&self, row: usize, col: usize) -> bool;

    fn style(&self, row: usize, col: usize) -> Option<&CellStyle>;

    fn style_mut(&mut self, row: usize, col: usize) -> &mut CellStyle;

    /// Copies styles and row height (not values) of row `from` onto row `to`.
    fn copy_row_style(&mut self, from: usize, to: usize);

    fn set_row_height(&mut self, row: usize, height: f64);

    fn set_fill(&mut self, row: usize, col: usize, color: Option<String>) {
        self.style_mut(row, col).fill = color;
    }

    fn set_font(&mut self, row: usize, col: usize, font: Font) {
        self.style_mut(row, col).font = font;
    }

    fn set_border(&mut self, row: usize, col: usize, border: Borders) {
        self.style_mut(row, col).border = border;
    }

    fn set_alignment(&mut self, row: usize, col: usize, alignment: Alignment) {
        self.style_mut(row, col).alignment = alignment;
    }
}

/// First row at or below `from` whose cell in `col` satisfies `pred`.
/// O(height): a plain top-down scan of the column.
pub fn find_in_column<S, P>(sheet: &S, col: usize, from: usize, pred: P) -> Option<usize>
where
    S: Sheet + ?Sized,
    P: Fn(&CellValue) -> bool,
{
    (from..sheet.max_row()).find(|&row| sheet.get_cell(row, col).is_some_and(&pred))
}

/// A row is blank when every weekday cell is empty and its first cell is
/// not part of a merged region.
pub fn is_blank_row<S: Sheet + ?Sized>(sheet: &S, row: usize) -> bool {
    let all_empty = (0..WEEKDAY_COLUMNS)
        .all(|col| sheet.get_cell(row, col).is_none_or(CellValue::is_empty));
    all_empty && !sheet.is_merged(row, 0)
}
