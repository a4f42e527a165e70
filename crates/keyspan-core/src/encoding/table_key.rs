use crate::{
    encoding::{
        Direction, ENCODED_NULL, ENCODED_NULL_DESC, KeyDecodeError, KeyEncodeError,
        primitives::{
            decode_bytes_into, decode_float, decode_varint, encode_bytes_ascending,
            encode_bytes_descending, encode_float_ascending, encode_float_descending,
            encode_null_ascending, encode_null_descending, encode_varint_ascending,
            encode_varint_descending,
        },
    },
    schema::ColumnType,
    value::Value,
};

///
/// ValueAlloc
///
/// Reusable scratch space for decoding key datums. Owned by exactly one
/// span builder; reset between calls, never reallocated once warm.
///

#[derive(Debug, Default)]
pub struct ValueAlloc {
    bytes: Vec<u8>,
}

impl ValueAlloc {
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Drop scratch contents but keep the capacity.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }
}

/// Append the key encoding of one datum in the requested direction.
pub fn encode_table_key(
    out: &mut Vec<u8>,
    value: &Value,
    dir: Direction,
) -> Result<(), KeyEncodeError> {
    let desc = dir.is_descending();

    match value {
        Value::Null => {
            if desc {
                encode_null_descending(out);
            } else {
                encode_null_ascending(out);
            }
        }
        Value::Bool(v) => encode_varint(out, i64::from(*v), desc),
        Value::Int(v) => encode_varint(out, *v, desc),
        Value::Float(v) => {
            if desc {
                encode_float_descending(out, *v);
            } else {
                encode_float_ascending(out, *v);
            }
        }
        Value::Bytes(v) => encode_bytes(out, v, desc),
        Value::Text(v) => encode_bytes(out, v.as_bytes(), desc),
        Value::Array(_) => {
            return Err(KeyEncodeError::UnsupportedValueKind {
                kind: value.kind_label(),
            });
        }
    }

    Ok(())
}

/// Decode one datum of type `ty` from the front of `bytes`.
pub fn decode_table_key<'a>(
    bytes: &'a [u8],
    ty: &ColumnType,
    dir: Direction,
    alloc: &mut ValueAlloc,
) -> Result<(Value, &'a [u8]), KeyDecodeError> {
    let desc = dir.is_descending();
    let null_marker = if desc {
        ENCODED_NULL_DESC
    } else {
        ENCODED_NULL
    };

    match bytes.split_first() {
        None => return Err(KeyDecodeError::Truncated),
        Some((&marker, rest)) if marker == null_marker => return Ok((Value::Null, rest)),
        Some(_) => {}
    }

    match ty {
        ColumnType::Bool => {
            let (v, rest) = decode_varint(bytes, desc)?;
            Ok((Value::Bool(v != 0), rest))
        }
        ColumnType::Int => {
            let (v, rest) = decode_varint(bytes, desc)?;
            Ok((Value::Int(v), rest))
        }
        ColumnType::Float => {
            let (v, rest) = decode_float(bytes, desc)?;
            Ok((Value::Float(v), rest))
        }
        ColumnType::Bytes => {
            let rest = decode_bytes_into(bytes, desc, &mut alloc.bytes)?;
            Ok((Value::Bytes(alloc.bytes.clone()), rest))
        }
        ColumnType::Text => {
            let rest = decode_bytes_into(bytes, desc, &mut alloc.bytes)?;
            let text = std::str::from_utf8(&alloc.bytes)
                .map_err(|_| KeyDecodeError::InvalidUtf8)?
                .to_string();
            Ok((Value::Text(text), rest))
        }
        ColumnType::Array(_) => Err(KeyDecodeError::UnsupportedType { ty: ty.to_string() }),
    }
}

fn encode_varint(out: &mut Vec<u8>, v: i64, desc: bool) {
    if desc {
        encode_varint_descending(out, v);
    } else {
        encode_varint_ascending(out, v);
    }
}

fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8], desc: bool) {
    if desc {
        encode_bytes_descending(out, bytes);
    } else {
        encode_bytes_ascending(out, bytes);
    }
}
