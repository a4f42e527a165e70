mod compare;


use crate::schema::ColumnType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Value
///
/// One logical datum as it appears in a constraint key or a table row.
/// Null is SQL NULL; `Array` is the only container kind and is only
/// key-encodable through an inverted index.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable label used in diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Array(_) => "array",
        }
    }

    /// Whether this value may be stored in a column of type `ty`.
    /// Null fits every type; array elements are checked recursively.
    #[must_use]
    pub fn fits(&self, ty: &ColumnType) -> bool {
        match (self, ty) {
            (Self::Null, _)
            | (Self::Bool(_), ColumnType::Bool)
            | (Self::Int(_), ColumnType::Int)
            | (Self::Float(_), ColumnType::Float)
            | (Self::Bytes(_), ColumnType::Bytes)
            | (Self::Text(_), ColumnType::Text) => true,
            (Self::Array(elements), ColumnType::Array(element_ty)) => {
                elements.iter().all(|element| element.fits(element_ty))
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::canonical_cmp(self, other)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
