//! Decoding rows into name to value maps.

use csvtab_model::LooseRecord;

use crate::coerce::coerce_loose;
use crate::error::Result;
use crate::stream::Table;

impl Table {
    /// Decodes every data row into a [`LooseRecord`], in row order.
    ///
    /// Int and float columns are parsed with zero defaults; every other
    /// column, bool included, is kept as its trimmed text. Columns with an
    /// empty name are skipped and a repeated name keeps its last value.
    pub fn to_loose(&self) -> Result<Vec<LooseRecord>> {
        let mut records = Vec::with_capacity(self.data_row_count());
        self.for_each_row(|fields| {
            let record: LooseRecord = fields
                .iter()
                .filter(|field| !field.name.is_empty())
                .map(|field| (field.name.clone(), coerce_loose(field)))
                .collect();
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }
}
