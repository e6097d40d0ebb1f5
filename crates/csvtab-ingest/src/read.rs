//! One-call decoding of table files.
//!
//! Each function opens the file, decodes it in full and returns the whole
//! result or the first error. Nothing is cached between calls.

use std::collections::BTreeMap;
use std::path::Path;

use csvtab_model::{Field, LooseRecord, SourceEncoding};

use crate::bind::{Record, SlotValue};
use crate::error::{HandlerError, Result};
use crate::stream::Table;

/// Decodes a table file into loose records.
pub fn read(path: impl AsRef<Path>, encoding: SourceEncoding) -> Result<Vec<LooseRecord>> {
    Table::open(path, encoding)?.to_loose()
}

/// Decodes a table file into records of type `R`.
pub fn read_list<R: Record>(path: impl AsRef<Path>, encoding: SourceEncoding) -> Result<Vec<R>> {
    Table::open(path, encoding)?.to_records()
}

/// Decodes a table file into wrapped records, e.g. `Vec<Rc<R>>`.
pub fn read_list_as<R, E>(path: impl AsRef<Path>, encoding: SourceEncoding) -> Result<Vec<E>>
where
    R: Record,
    E: From<R>,
{
    Table::open(path, encoding)?.to_records_as::<R, E>()
}

/// Decodes a table file into records keyed by `key_field`.
pub fn read_map<R, K>(
    path: impl AsRef<Path>,
    encoding: SourceEncoding,
    key_field: &str,
) -> Result<BTreeMap<K, R>>
where
    R: Record,
    K: SlotValue + Ord,
{
    Table::open(path, encoding)?.to_keyed(key_field)
}

/// Decodes a table file into wrapped records keyed by `key_field`.
pub fn read_map_as<R, K, E>(
    path: impl AsRef<Path>,
    encoding: SourceEncoding,
    key_field: &str,
) -> Result<BTreeMap<K, E>>
where
    R: Record,
    K: SlotValue + Ord,
    E: From<R>,
{
    Table::open(path, encoding)?.to_keyed_as::<R, K, E>(key_field)
}

/// Streams the raw fields of each data row of a table file to `handler`.
pub fn read_raw<F>(path: impl AsRef<Path>, encoding: SourceEncoding, handler: F) -> Result<()>
where
    F: FnMut(&[Field]) -> std::result::Result<(), HandlerError>,
{
    Table::open(path, encoding)?.for_each_raw(handler)
}
