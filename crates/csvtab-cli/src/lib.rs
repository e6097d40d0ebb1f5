//! Library components of the `csvtab` converter.

pub mod convert;
pub mod logging;
pub mod naming;
pub mod types;
