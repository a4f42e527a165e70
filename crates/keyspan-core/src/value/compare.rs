use crate::value::Value;
use std::cmp::Ordering;

// Columns are homogeneously typed, so cross-kind order only needs to be
// total. NULL must still sort first to match its key marker.
const fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) => 2,
        Value::Float(_) => 3,
        Value::Bytes(_) => 4,
        Value::Text(_) => 5,
        Value::Array(_) => 6,
    }
}

/// Total order over values, matching ascending key-byte order for every
/// key-encodable kind.
pub(super) fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => float_cmp(*a, *b),
        (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
        (Value::Array(a), Value::Array(b)) => {
            for (l, r) in a.iter().zip(b.iter()) {
                let order = canonical_cmp(l, r);
                if order != Ordering::Equal {
                    return order;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => kind_rank(left).cmp(&kind_rank(right)),
    }
}

// NaN sorts below every number; -0.0 and 0.0 are equal.
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
