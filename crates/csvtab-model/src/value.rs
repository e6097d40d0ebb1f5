//! Coerced cell values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::TypeKind;

/// A cell value after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Value {
    /// The column kind this value was produced for.
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::Int(_) => TypeKind::Int,
            Value::Float(_) => TypeKind::Float,
            Value::Bool(_) => TypeKind::Bool,
            Value::String(_) => TypeKind::String,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
        }
    }
}

/// A data row decoded without a predeclared shape: column name to value.
pub type LooseRecord = BTreeMap<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Int(1).kind(), TypeKind::Int);
        assert_eq!(Value::Float(1.0).kind(), TypeKind::Float);
        assert_eq!(Value::Bool(true).kind(), TypeKind::Bool);
        assert_eq!(Value::String("x".into()).kind(), TypeKind::String);
    }

    #[test]
    fn test_accessors_match_variant_only() {
        assert_eq!(Value::Int(3).as_i64(), Some(3));
        assert_eq!(Value::Int(3).as_f64(), None);
        assert_eq!(Value::String("3".into()).as_i64(), None);
        assert_eq!(Value::String("abc".into()).as_str(), Some("abc"));
    }
}
