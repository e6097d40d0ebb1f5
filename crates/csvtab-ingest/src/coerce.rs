//! Lenient conversion of cell text to typed values.
//!
//! Malformed text never fails a decode: it becomes the zero value of the
//! column kind.

use csvtab_model::{Field, TypeKind, Value};

/// Parses a base-10 signed 64-bit integer, or 0.
pub fn coerce_int(text: &str) -> i64 {
    text.parse().unwrap_or_else(|_| {
        tracing::trace!(value = text, "integer cell fell back to 0");
        0
    })
}

/// Parses a 64-bit float, or 0.0.
pub fn coerce_float(text: &str) -> f64 {
    text.parse().unwrap_or_else(|_| {
        tracing::trace!(value = text, "float cell fell back to 0.0");
        0.0
    })
}

/// Boolean literal grammar: `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses a boolean literal, or false.
pub fn coerce_bool(text: &str) -> bool {
    parse_bool_literal(text).unwrap_or_else(|| {
        tracing::trace!(value = text, "bool cell fell back to false");
        false
    })
}

/// Coercion used for loose records. Bool columns stay strings here.
pub fn coerce_loose(field: &Field) -> Value {
    match field.kind {
        TypeKind::Int => Value::Int(coerce_int(&field.value)),
        TypeKind::Float => Value::Float(coerce_float(&field.value)),
        TypeKind::Bool | TypeKind::String => Value::String(field.value.clone()),
    }
}

/// Coercion used when binding onto record slots.
pub fn coerce_typed(field: &Field) -> Value {
    match field.kind {
        TypeKind::Bool => Value::Bool(coerce_bool(&field.value)),
        _ => coerce_loose(field),
    }
}
