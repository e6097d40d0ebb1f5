//! Handing fields straight to caller code.

use csvtab_model::Field;

use crate::error::{HandlerError, Result, TableError};
use crate::stream::Table;

impl Table {
    /// Calls `handler` with the uncoerced fields of each data row.
    ///
    /// An error from `handler` stops decoding and is returned as
    /// [`TableError::HandlerAbort`].
    pub fn for_each_raw<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(&[Field]) -> std::result::Result<(), HandlerError>,
    {
        self.for_each_row(|fields| handler(fields).map_err(TableError::HandlerAbort))
    }
}
