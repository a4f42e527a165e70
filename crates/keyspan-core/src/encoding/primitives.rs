use crate::encoding::{
    BYTES_DESC_MARKER, BYTES_MARKER, ENCODED_NULL, ENCODED_NULL_DESC, FLOAT_NAN, FLOAT_NAN_DESC,
    FLOAT_NEG, FLOAT_POS, FLOAT_ZERO, INT_MAX, INT_MIN, INT_SMALL, INT_ZERO, INTERLEAVED_SENTINEL,
    KeyDecodeError,
};

const ESCAPE: u8 = 0x00;
const ESCAPED_TERM: u8 = 0x01;
const ESCAPED_00: u8 = 0xff;

///
/// NULL
///

pub fn encode_null_ascending(out: &mut Vec<u8>) {
    out.push(ENCODED_NULL);
}

pub fn encode_null_descending(out: &mut Vec<u8>) {
    out.push(ENCODED_NULL_DESC);
}

pub fn encode_interleaved_sentinel(out: &mut Vec<u8>) {
    out.push(INTERLEAVED_SENTINEL);
}

///
/// UVARINT
///

// Number of significant big-endian bytes in `v`; zero needs none.
#[expect(clippy::cast_possible_truncation)]
const fn significant_bytes(v: u64) -> usize {
    8 - (v.leading_zeros() / 8) as usize
}

/// Append `v` so that byte order matches numeric order.
/// Values up to 109 take one byte; larger values carry a width marker.
#[expect(clippy::cast_possible_truncation)]
pub fn encode_uvarint_ascending(out: &mut Vec<u8>, v: u64) {
    if v <= INT_SMALL {
        out.push(INT_ZERO + v as u8);
        return;
    }

    let width = significant_bytes(v);
    out.push(INT_MAX - 8 + width as u8);
    out.extend_from_slice(&v.to_be_bytes()[8 - width..]);
}

/// Append `v` so that byte order is the reverse of numeric order.
#[expect(clippy::cast_possible_truncation)]
pub fn encode_uvarint_descending(out: &mut Vec<u8>, v: u64) {
    let width = significant_bytes(v);
    out.push(INT_MIN + 8 - width as u8);
    out.extend_from_slice(&(!v).to_be_bytes()[8 - width..]);
}

pub fn decode_uvarint_ascending(bytes: &[u8]) -> Result<(u64, &[u8]), KeyDecodeError> {
    let (&marker, rest) = bytes.split_first().ok_or(KeyDecodeError::Truncated)?;
    if marker < INT_ZERO || marker > INT_MAX {
        return Err(KeyDecodeError::UnexpectedMarker {
            marker,
            expected: "ascending uvarint",
        });
    }

    let small = u64::from(marker - INT_ZERO);
    if small <= INT_SMALL {
        return Ok((small, rest));
    }

    let width = usize::from(marker - (INT_MAX - 8));
    let (payload, rest) = take(rest, width)?;

    Ok((be_u64(payload, 0), rest))
}

fn decode_uvarint_descending(bytes: &[u8]) -> Result<(u64, &[u8]), KeyDecodeError> {
    let (&marker, rest) = bytes.split_first().ok_or(KeyDecodeError::Truncated)?;
    if marker < INT_MIN || marker > INT_ZERO {
        return Err(KeyDecodeError::UnexpectedMarker {
            marker,
            expected: "descending uvarint",
        });
    }

    let width = usize::from(INT_ZERO - marker);
    let (payload, rest) = take(rest, width)?;

    Ok((!be_u64(payload, 0xff), rest))
}

///
/// VARINT
///

/// Append a signed integer in ascending order. Negative values take a
/// width marker below the uvarint range, so they sort before zero.
#[expect(clippy::cast_possible_truncation)]
pub fn encode_varint_ascending(out: &mut Vec<u8>, v: i64) {
    if v >= 0 {
        encode_uvarint_ascending(out, v.cast_unsigned());
        return;
    }

    let width = significant_bytes(v.unsigned_abs()).max(1);
    out.push(INT_MIN + 8 - width as u8);
    out.extend_from_slice(&v.cast_unsigned().to_be_bytes()[8 - width..]);
}

pub fn encode_varint_descending(out: &mut Vec<u8>, v: i64) {
    encode_varint_ascending(out, !v);
}

fn decode_varint_ascending(bytes: &[u8]) -> Result<(i64, &[u8]), KeyDecodeError> {
    let (&marker, rest) = bytes.split_first().ok_or(KeyDecodeError::Truncated)?;
    if marker >= INT_ZERO {
        let (v, rest) = decode_uvarint_ascending(bytes)?;
        return Ok((v.cast_signed(), rest));
    }
    if marker < INT_MIN {
        return Err(KeyDecodeError::UnexpectedMarker {
            marker,
            expected: "ascending varint",
        });
    }

    let width = usize::from(INT_ZERO - marker);
    let (payload, rest) = take(rest, width)?;

    Ok((be_u64(payload, 0xff).cast_signed(), rest))
}

fn decode_varint_descending(bytes: &[u8]) -> Result<(i64, &[u8]), KeyDecodeError> {
    let (v, rest) = decode_varint_ascending(bytes)?;
    Ok((!v, rest))
}

pub(super) fn decode_varint(
    bytes: &[u8],
    descending: bool,
) -> Result<(i64, &[u8]), KeyDecodeError> {
    if descending {
        decode_varint_descending(bytes)
    } else {
        decode_varint_ascending(bytes)
    }
}

#[cfg(test)]
pub(super) fn decode_uvarint(
    bytes: &[u8],
    descending: bool,
) -> Result<(u64, &[u8]), KeyDecodeError> {
    if descending {
        decode_uvarint_descending(bytes)
    } else {
        decode_uvarint_ascending(bytes)
    }
}

///
/// FLOAT
///

/// NaN sorts first; -0.0 and 0.0 share one byte.
pub fn encode_float_ascending(out: &mut Vec<u8>, f: f64) {
    if f.is_nan() {
        out.push(FLOAT_NAN);
        return;
    }
    if f == 0.0 {
        out.push(FLOAT_ZERO);
        return;
    }

    let bits = f.to_bits();
    if f.is_sign_negative() {
        out.push(FLOAT_NEG);
        out.extend_from_slice(&(!bits).to_be_bytes());
    } else {
        out.push(FLOAT_POS);
        out.extend_from_slice(&bits.to_be_bytes());
    }
}

pub fn encode_float_descending(out: &mut Vec<u8>, f: f64) {
    if f.is_nan() {
        out.push(FLOAT_NAN_DESC);
        return;
    }

    encode_float_ascending(out, -f);
}

pub(super) fn decode_float(bytes: &[u8], descending: bool) -> Result<(f64, &[u8]), KeyDecodeError> {
    let (&marker, rest) = bytes.split_first().ok_or(KeyDecodeError::Truncated)?;

    let (f, rest) = match marker {
        FLOAT_NAN | FLOAT_NAN_DESC => (f64::NAN, rest),
        FLOAT_ZERO => (0.0, rest),
        FLOAT_NEG => {
            let (payload, rest) = take(rest, 8)?;
            (f64::from_bits(!be_u64(payload, 0)), rest)
        }
        FLOAT_POS => {
            let (payload, rest) = take(rest, 8)?;
            (f64::from_bits(be_u64(payload, 0)), rest)
        }
        marker => {
            return Err(KeyDecodeError::UnexpectedMarker {
                marker,
                expected: "float",
            });
        }
    };

    if descending && !f.is_nan() {
        return Ok((-f, rest));
    }

    Ok((f, rest))
}

///
/// BYTES
///

/// Append a byte string with `0x00` escaped as `0x00 0xff` and terminated
/// by `0x00 0x01`, so shorter strings sort before their extensions.
pub fn encode_bytes_ascending(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(BYTES_MARKER);
    for &byte in bytes {
        if byte == ESCAPE {
            out.extend_from_slice(&[ESCAPE, ESCAPED_00]);
        } else {
            out.push(byte);
        }
    }
    out.extend_from_slice(&[ESCAPE, ESCAPED_TERM]);
}

/// Descending byte strings are the ascending payload with every bit inverted.
pub fn encode_bytes_descending(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(BYTES_DESC_MARKER);
    for &byte in bytes {
        if byte == ESCAPE {
            out.extend_from_slice(&[!ESCAPE, !ESCAPED_00]);
        } else {
            out.push(!byte);
        }
    }
    out.extend_from_slice(&[!ESCAPE, !ESCAPED_TERM]);
}

/// Decode one escaped byte string into `scratch`, returning the remainder.
pub(super) fn decode_bytes_into<'a>(
    bytes: &'a [u8],
    descending: bool,
    scratch: &mut Vec<u8>,
) -> Result<&'a [u8], KeyDecodeError> {
    let (&marker, mut rest) = bytes.split_first().ok_or(KeyDecodeError::Truncated)?;
    let expected_marker = if descending {
        BYTES_DESC_MARKER
    } else {
        BYTES_MARKER
    };
    if marker != expected_marker {
        return Err(KeyDecodeError::UnexpectedMarker {
            marker,
            expected: "byte string",
        });
    }

    let flip = |byte: u8| if descending { !byte } else { byte };
    scratch.clear();

    loop {
        let (&byte, tail) = rest.split_first().ok_or(KeyDecodeError::Truncated)?;
        let byte = flip(byte);
        if byte != ESCAPE {
            scratch.push(byte);
            rest = tail;
            continue;
        }

        let (&next, tail) = tail.split_first().ok_or(KeyDecodeError::Truncated)?;
        match flip(next) {
            ESCAPED_TERM => return Ok(tail),
            ESCAPED_00 => {
                scratch.push(ESCAPE);
                rest = tail;
            }
            _ => return Err(KeyDecodeError::MalformedEscape),
        }
    }
}

///
/// HELPERS
///

fn take(bytes: &[u8], len: usize) -> Result<(&[u8], &[u8]), KeyDecodeError> {
    if bytes.len() < len {
        return Err(KeyDecodeError::Truncated);
    }

    Ok(bytes.split_at(len))
}

// Big-endian read of up to eight bytes, left-padded with `fill`.
fn be_u64(payload: &[u8], fill: u8) -> u64 {
    let mut buf = [fill; 8];
    buf[8 - payload.len()..].copy_from_slice(payload);
    u64::from_be_bytes(buf)
}
