//! Data model for three-header-row CSV tables.
//!
//! A table file carries a free-text title row, a column-name row and a
//! column-kind row before its data rows. The types here describe the pieces
//! the decoding engine in `csvtab-ingest` passes around.

pub mod encoding;
pub mod kind;
pub mod table;
pub mod value;

pub use encoding::SourceEncoding;
pub use kind::TypeKind;
pub use table::{ColumnDescriptor, Field, Row};
pub use value::{LooseRecord, Value};
