use serde::{Deserialize, Serialize};

use crate::kind::TypeKind;

/// One tokenized line of the source: its cells in column order.
pub type Row = Vec<String>;

/// Name and declared kind of one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: TypeKind,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A single cell of a data row paired with its column.
///
/// Fields live for one row only; handlers receive them as a slice in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: TypeKind,
}

impl Field {
    pub fn new(column: &ColumnDescriptor, value: impl Into<String>) -> Self {
        Self {
            name: column.name.clone(),
            value: value.into(),
            kind: column.kind,
        }
    }
}
