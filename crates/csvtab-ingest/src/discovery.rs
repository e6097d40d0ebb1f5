//! Finding table files in a directory.

use std::path::{Path, PathBuf};

use crate::error::{Result, TableError};

/// File extension of table files.
pub const TABLE_EXTENSION: &str = "csv";

/// Returns true if `path` has the table file extension (case-insensitive).
pub fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TABLE_EXTENSION))
}

/// Lists the table files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn list_table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TableError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| TableError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| TableError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && is_table_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), files = files.len(), "listed table files");
    Ok(files)
}
