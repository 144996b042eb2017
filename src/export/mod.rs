// src/export/mod.rs

pub mod fs_utils;
pub mod snapshot;
pub mod xlsx;

pub use fs_utils::ensure_writable;
pub use snapshot::{write_debug_snapshot, write_json};
pub use xlsx::{TextMode, save_workbook};

use crate::ui::messages::success;
use std::path::Path;

/// Output file of a run.
pub fn calendar_file_name(run_id: &str) -> String {
    format!("court_session_calendar_{run_id}.xlsx")
}

/// Common completion message.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} written: {}", path.display()));
}
