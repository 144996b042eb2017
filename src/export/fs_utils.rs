// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Check that `path` may be created.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → Export error
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }
    Err(AppError::Export(format!(
        "'{}' already exists (use --force to overwrite)",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        assert!(ensure_writable(&path, false).is_ok());

        std::fs::write(&path, b"x").unwrap();
        assert!(matches!(ensure_writable(&path, false), Err(AppError::Export(_))));
        assert!(ensure_writable(&path, true).is_ok());
    }
}
