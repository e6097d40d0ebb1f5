//! Binders: turning the field stream into output collections.
//!
//! - [`loose`]: name to value maps, no declared shape.
//! - [`schema`]: records with a declared [`RecordShape`], as a list or keyed map.
//! - [`raw`]: fields handed straight to caller code.

pub mod loose;
pub mod raw;
pub mod schema;
pub mod shape;

pub use shape::{Record, RecordShape, Slot, SlotValue, normalize_name};
