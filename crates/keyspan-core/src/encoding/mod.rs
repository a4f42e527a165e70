//! Module: encoding
//! Responsibility: order-preserving byte encodings for key datums.
//! Does not own: key layout (prefixes, interstices, families).
//! Boundary: the span builder and key helpers call into this module; nothing
//! here knows about schema descriptors.

mod inverted;
mod primitives;
mod table_key;


use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

pub use inverted::encode_inverted_index_table_keys;
pub use primitives::{
    decode_uvarint_ascending, encode_bytes_ascending, encode_bytes_descending,
    encode_float_ascending, encode_float_descending, encode_interleaved_sentinel,
    encode_null_ascending, encode_null_descending, encode_uvarint_ascending,
    encode_uvarint_descending, encode_varint_ascending, encode_varint_descending,
};
pub use table_key::{ValueAlloc, decode_table_key, encode_table_key};

///
/// MARKERS
///

pub(crate) const ENCODED_NULL: u8 = 0x00;
pub(crate) const ENCODED_NOT_NULL: u8 = 0x01;
pub(crate) const FLOAT_NAN: u8 = ENCODED_NOT_NULL + 1;
pub(crate) const FLOAT_NEG: u8 = FLOAT_NAN + 1;
pub(crate) const FLOAT_ZERO: u8 = FLOAT_NEG + 1;
pub(crate) const FLOAT_POS: u8 = FLOAT_ZERO + 1;
pub(crate) const FLOAT_NAN_DESC: u8 = FLOAT_POS + 1;
pub(crate) const BYTES_MARKER: u8 = 0x12;
pub(crate) const BYTES_DESC_MARKER: u8 = BYTES_MARKER + 1;
pub(crate) const EMPTY_ARRAY_MARKER: u8 = 0x31;

pub(crate) const INT_MIN: u8 = 0x80;
pub(crate) const INT_MAX: u8 = 0xfd;
pub(crate) const INT_MAX_WIDTH: u8 = 8;
pub(crate) const INT_ZERO: u8 = INT_MIN + INT_MAX_WIDTH;
pub(crate) const INT_SMALL: u64 = (INT_MAX - INT_ZERO - INT_MAX_WIDTH) as u64;

pub(crate) const ENCODED_NOT_NULL_DESC: u8 = 0xfe;
pub(crate) const ENCODED_NULL_DESC: u8 = 0xff;

/// Byte separating an interleaved parent row from its nested children.
/// Every family suffix and ascending column encoding sorts below it.
pub const INTERLEAVED_SENTINEL: u8 = ENCODED_NOT_NULL_DESC;

///
/// Direction
///
/// Sort direction of one key column. Descending encodings invert the byte
/// order of their ascending counterparts.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Desc)
    }
}

///
/// KeyEncodeError
///
/// A value/direction combination the key encoder rejects.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeyEncodeError {
    #[error("value kind '{kind}' cannot be encoded into a forward key")]
    UnsupportedValueKind { kind: &'static str },

    #[error("value of kind '{kind}' does not fit column type {expected}")]
    TypeMismatch {
        kind: &'static str,
        expected: String,
    },
}

///
/// KeyDecodeError
///
/// Structural failures while decoding a key datum.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeyDecodeError {
    #[error("truncated key datum")]
    Truncated,

    #[error("unexpected marker {marker:#04x} while decoding {expected}")]
    UnexpectedMarker { marker: u8, expected: &'static str },

    #[error("malformed byte-string escape")]
    MalformedEscape,

    #[error("text datum is not valid utf-8")]
    InvalidUtf8,

    #[error("column type {ty} is not decodable from a forward key")]
    UnsupportedType { ty: String },
}
