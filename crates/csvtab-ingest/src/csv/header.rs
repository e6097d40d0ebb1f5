//! Interpretation of the three header rows.

use csvtab_model::{ColumnDescriptor, Row, TypeKind};

use crate::error::{Result, TableError};

/// Number of header rows before the first data row: title, names, kinds.
pub const HEADER_ROWS: usize = 3;

/// Column layout of a table, derived from its header rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    title: Row,
    columns: Vec<ColumnDescriptor>,
}

impl TableHeader {
    /// Builds the header from the first three rows of a table.
    ///
    /// Row 0 is kept only as the title. The column count is fixed by the
    /// name row; names and kind tokens are trimmed.
    pub fn from_rows(rows: &[Row]) -> Result<Self> {
        let [title, names, kinds, ..] = rows else {
            return Err(TableError::TooFewRows { rows: rows.len() });
        };
        if kinds.len() < names.len() {
            return Err(TableError::HeaderShape {
                names: names.len(),
                kinds: kinds.len(),
            });
        }
        let columns = names
            .iter()
            .zip(kinds)
            .map(|(name, kind)| ColumnDescriptor::new(name.trim(), TypeKind::from_token(kind)))
            .collect();
        Ok(Self {
            title: title.clone(),
            columns,
        })
    }

    /// Title row cells, untouched.
    pub fn title(&self) -> &[String] {
        &self.title
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a column by its trimmed header name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<Row> {
        lines
            .iter()
            .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_from_rows() {
        let rows = rows(&[
            &["Goods table"],
            &[" id ", "name", "price"],
            &["int", "string", " double "],
        ]);
        let header = TableHeader::from_rows(&rows).unwrap();
        assert_eq!(header.len(), 3);
        assert_eq!(header.title(), ["Goods table"]);
        assert_eq!(header.names().collect::<Vec<_>>(), vec!["id", "name", "price"]);
        assert_eq!(header.column("id").unwrap().kind, TypeKind::Int);
        assert_eq!(header.column("price").unwrap().kind, TypeKind::Float);
        assert!(header.column("missing").is_none());
    }

    #[test]
    fn test_header_requires_three_rows() {
        let rows = rows(&[&["title"], &["id"]]);
        let result = TableHeader::from_rows(&rows);
        assert!(matches!(result, Err(TableError::TooFewRows { rows: 2 })));
        assert!(matches!(
            TableHeader::from_rows(&[]),
            Err(TableError::TooFewRows { rows: 0 })
        ));
    }

    #[test]
    fn test_header_rejects_short_kind_row() {
        let rows = rows(&[&["title"], &["id", "name"], &["int"]]);
        let result = TableHeader::from_rows(&rows);
        assert!(matches!(
            result,
            Err(TableError::HeaderShape { names: 2, kinds: 1 })
        ));
    }

    #[test]
    fn test_header_ignores_extra_kinds() {
        let rows = rows(&[&["title"], &["id"], &["int", "bool"]]);
        let header = TableHeader::from_rows(&rows).unwrap();
        assert_eq!(header.len(), 1);
    }
}
