//! Calendar layout pipeline.

pub mod abbreviate;
pub mod calendar;
pub mod context;
pub mod day_grid;
pub mod finish;
pub mod lanes;
pub mod normalizer;
pub mod placement;
pub mod skeleton;

pub use calendar::{CalendarWorkbook, MonthSheet, SheetPhase};
pub use context::RunContext;
