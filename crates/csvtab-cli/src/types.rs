use std::path::PathBuf;

/// Outcome of one conversion run.
#[derive(Debug, Default)]
pub struct ConvertResult {
    pub tables: Vec<TableSummary>,
    /// Set when every table went into one combined file.
    pub combined_output: Option<PathBuf>,
}

impl ConvertResult {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|table| table.rows).sum()
    }
}

/// One converted table.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub name: String,
    pub source: PathBuf,
    /// Rows written: data rows for records, all rows for lines, 0 for text.
    pub rows: usize,
    pub output: PathBuf,
}
