//! Decoding rows into records with a declared shape.

use std::collections::BTreeMap;

use csvtab_model::{Field, Value};

use crate::bind::shape::{Record, RecordShape, Slot, SlotValue};
use crate::coerce::coerce_typed;
use crate::error::{Result, TableError};
use crate::stream::Table;

/// Fills a fresh record from one row of fields.
///
/// Returns the record and, when `key_slot` is given, the last value stored
/// in that slot by any column.
fn bind_row<R: Record>(
    shape: &RecordShape<R>,
    fields: &[Field],
    key_slot: Option<&Slot<R>>,
) -> Result<(R, Option<Value>)> {
    let mut record = R::default();
    let mut key = None;
    for field in fields {
        if field.name.is_empty() {
            continue;
        }
        let Some(slot) = shape.lookup(&field.name) else {
            continue;
        };
        let value = coerce_typed(field);
        if key_slot.is_some_and(|key_slot| std::ptr::eq(key_slot, slot)) {
            key = Some(value.clone());
        }
        slot.assign(&mut record, value)?;
    }
    Ok((record, key))
}

fn checked_shape<R: Record>() -> Result<RecordShape<R>> {
    let shape = R::shape();
    shape.validate()?;
    Ok(shape)
}

impl Table {
    /// Decodes every data row into an `R`, in row order.
    ///
    /// Columns are matched to slots by name; unmatched columns are ignored
    /// and unmatched slots keep their default. Values are coerced by the
    /// column's declared kind.
    pub fn to_records<R: Record>(&self) -> Result<Vec<R>> {
        self.to_records_as::<R, R>()
    }

    /// Like [`Table::to_records`], wrapping each record, e.g. in `Rc<R>` or `Arc<R>`.
    pub fn to_records_as<R, E>(&self) -> Result<Vec<E>>
    where
        R: Record,
        E: From<R>,
    {
        let shape = checked_shape::<R>()?;
        let mut records = Vec::with_capacity(self.data_row_count());
        self.for_each_row(|fields| {
            let (record, _) = bind_row(&shape, fields, None)?;
            records.push(E::from(record));
            Ok(())
        })?;
        Ok(records)
    }

    /// Decodes every data row into an `R`, keyed by the value of `key_field`.
    ///
    /// `key_field` must name a column exactly and that column must bind to a
    /// slot of `R`; the first row without it fails the decode with
    /// [`TableError::KeyFieldMissing`]. A repeated key keeps the last row.
    pub fn to_keyed<R, K>(&self, key_field: &str) -> Result<BTreeMap<K, R>>
    where
        R: Record,
        K: SlotValue + Ord,
    {
        self.to_keyed_as::<R, K, R>(key_field)
    }

    /// Like [`Table::to_keyed`], wrapping each record.
    pub fn to_keyed_as<R, K, E>(&self, key_field: &str) -> Result<BTreeMap<K, E>>
    where
        R: Record,
        K: SlotValue + Ord,
        E: From<R>,
    {
        if key_field.is_empty() {
            return Err(TableError::InvalidTarget {
                reason: "key field name is empty".to_string(),
            });
        }
        let shape = checked_shape::<R>()?;
        // The key column must exist by exact name and bind to a slot.
        let key_slot = self
            .columns()
            .iter()
            .any(|column| column.name == key_field)
            .then(|| shape.lookup(key_field))
            .flatten();
        let mut records = BTreeMap::new();
        self.for_each_numbered_row(|line, fields| {
            let (record, key) = bind_row(&shape, fields, key_slot)?;
            let Some(key) = key else {
                return Err(TableError::KeyFieldMissing {
                    key: key_field.to_string(),
                    line,
                });
            };
            let column = key.kind();
            let key = K::from_value(key).ok_or_else(|| TableError::Binding {
                slot: key_field.to_string(),
                column,
                target: K::KIND,
            })?;
            if records.insert(key, E::from(record)).is_some() {
                tracing::trace!(line, key_field, "duplicate key replaced earlier row");
            }
            Ok(())
        })?;
        Ok(records)
    }
}
