//! Column kinds declared in the third header row.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Declared kind of a table column.
///
/// Kind tokens are matched case-sensitively; anything that is not a known
/// numeric or boolean token is treated as a string column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Free text. Also the fallback for unrecognized tokens.
    #[default]
    String,
    /// Signed 64-bit integer (`int`, `int64`, `long`).
    Int,
    /// 64-bit float (`float`, `float64`, `double`).
    Float,
    /// Boolean (`bool`).
    Bool,
}

impl TypeKind {
    /// Interprets a kind token from the header. Surrounding whitespace is ignored.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "int" | "int64" | "long" => TypeKind::Int,
            "float" | "float64" | "double" => TypeKind::Float,
            "bool" => TypeKind::Bool,
            _ => TypeKind::String,
        }
    }

    /// Returns the canonical token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::String => "string",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Bool => "bool",
        }
    }

    /// Returns true for integer and float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeKind::Int | TypeKind::Float)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}
