//! Data rows as a stream of fields.

use std::io::Read;
use std::path::Path;

use csvtab_model::{ColumnDescriptor, Field, Row, SourceEncoding};

use crate::csv::{
    HEADER_ROWS, TableHeader, read_numbered, read_numbered_from_reader, tokenize_numbered,
};
use crate::error::{Result, TableError};

/// A tokenized table: its interpreted header and the raw data rows.
///
/// A `Table` holds everything a decode call needs, so every binder reads
/// from it without touching the source again.
#[derive(Debug, Clone)]
pub struct Table {
    header: TableHeader,
    rows: Vec<Row>,
    /// Source line of each data row.
    lines: Vec<u64>,
}

impl Table {
    /// Splits tokenized rows into header and data rows.
    ///
    /// The rows are taken to be consecutive source lines starting at line 1.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        Self::from_numbered_rows((1..).zip(rows).collect())
    }

    /// Splits rows paired with their source lines, as produced by
    /// [`tokenize_numbered`](crate::tokenize_numbered).
    pub fn from_numbered_rows(numbered: Vec<(u64, Row)>) -> Result<Self> {
        let (lines, mut rows): (Vec<u64>, Vec<Row>) = numbered.into_iter().unzip();
        let header = TableHeader::from_rows(&rows)?;
        let data = rows.split_off(HEADER_ROWS);
        tracing::debug!(
            columns = header.len(),
            data_rows = data.len(),
            "interpreted table header"
        );
        Ok(Self {
            header,
            rows: data,
            lines: lines[HEADER_ROWS..].to_vec(),
        })
    }

    /// Tokenizes already-decoded text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_numbered_rows(tokenize_numbered(text)?)
    }

    /// Reads a table from any byte source.
    pub fn from_reader<R: Read>(reader: R, encoding: SourceEncoding) -> Result<Self> {
        Self::from_numbered_rows(read_numbered_from_reader(reader, encoding)?)
    }

    /// Reads a table file.
    pub fn open(path: impl AsRef<Path>, encoding: SourceEncoding) -> Result<Self> {
        Self::from_numbered_rows(read_numbered(path.as_ref(), encoding)?)
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.header.columns()
    }

    /// Number of rows after the three header rows.
    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Untrimmed data rows.
    pub fn data_rows(&self) -> &[Row] {
        &self.rows
    }

    /// One-based source line of the data row at `index`.
    pub fn source_line(&self, index: usize) -> Option<u64> {
        self.lines.get(index).copied()
    }

    /// Feeds each data row to `handle` as fields in column order.
    ///
    /// Cell values are trimmed. A row whose cell count differs from the
    /// column count stops iteration with [`TableError::RowShape`]; so does
    /// the first error returned by `handle`, which becomes the result.
    pub fn for_each_row<F>(&self, mut handle: F) -> Result<()>
    where
        F: FnMut(&[Field]) -> Result<()>,
    {
        self.for_each_numbered_row(|_, fields| handle(fields))
    }

    /// Like [`Table::for_each_row`], also passing each row's source line.
    pub(crate) fn for_each_numbered_row<F>(&self, mut handle: F) -> Result<()>
    where
        F: FnMut(u64, &[Field]) -> Result<()>,
    {
        let columns = self.header.columns();
        let mut fields: Vec<Field> = Vec::with_capacity(columns.len());
        for (row, &line) in self.rows.iter().zip(&self.lines) {
            if row.len() != columns.len() {
                return Err(TableError::RowShape {
                    line,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            fields.clear();
            fields.extend(
                columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| Field::new(column, cell.trim())),
            );
            tracing::trace!(line, "dispatching row");
            handle(line, &fields)?;
        }
        Ok(())
    }
}
