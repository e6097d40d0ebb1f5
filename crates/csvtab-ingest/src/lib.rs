//! Decoding engine for three-header-row CSV tables.
//!
//! A table file starts with a title row, a column-name row and a column-kind
//! row (`int`, `float`, `bool`, anything else is text). Every later row is
//! data. This crate reads such files, optionally transcoding GBK, and decodes
//! the data rows into one of several shapes:
//!
//! - **Loose records**: `BTreeMap<String, Value>` per row ([`read`])
//! - **Records**: structs declared with [`record_shape!`] ([`read_list`])
//! - **Keyed records**: a map from one column's value to its row ([`read_map`])
//! - **Raw fields**: a callback per row, no coercion ([`read_raw`])
//!
//! Malformed numbers and booleans never fail a decode; they become 0, 0.0 or
//! false. Structural problems (too few rows, ragged rows, a missing key) fail
//! the whole call and no partial output is returned.
//!
//! # Example
//!
//! ```ignore
//! use csvtab_ingest::{SourceEncoding, read_list, record_shape};
//!
//! #[derive(Debug, Default)]
//! struct Goods {
//!     id: i64,
//!     name: String,
//!     cost: f64,
//! }
//!
//! record_shape!(Goods { id, name, cost => "price" });
//!
//! let goods: Vec<Goods> = read_list("data/goods.csv", SourceEncoding::Gbk)?;
//! ```

mod bind;
mod coerce;
mod csv;
mod discovery;
mod error;
mod read;
mod stream;

// === Error Types ===
pub use error::{HandlerError, Result, TableError};

// === Model ===
pub use csvtab_model::{ColumnDescriptor, Field, LooseRecord, Row, SourceEncoding, TypeKind, Value};

// === CSV Reading ===
pub use self::csv::{
    HEADER_ROWS, TableHeader, decode_text, read_lines, read_lines_from_reader, read_source, tokenize,
    tokenize_numbered,
};
pub use stream::Table;

// === Binding ===
pub use bind::{Record, RecordShape, Slot, SlotValue, normalize_name};
pub use coerce::{coerce_bool, coerce_float, coerce_int, coerce_loose, coerce_typed, parse_bool_literal};
pub use read::{read, read_list, read_list_as, read_map, read_map_as, read_raw};

// === File Discovery ===
pub use discovery::{TABLE_EXTENSION, is_table_file, list_table_files};
