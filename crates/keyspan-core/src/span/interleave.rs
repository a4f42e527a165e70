use crate::{
    encoding::encode_interleaved_sentinel,
    key::Key,
    schema::IndexSchema,
};

/// Tighten the end key of a span whose end key encodes `end_len` columns of
/// `index` followed by `interstice_len` bytes of the interstice after the
/// last column, so the span stops before rows it does not own.
///
/// Inverted indexes always advance to the prefix end. Their keys hold one
/// fragment per column and carry no interleaving, so the bound is only ever
/// widened and rows are filtered above the span layer.
///
/// An exclusive end past at least one column is cut back to the encoded
/// column values: the trailing interstice would otherwise reach into the
/// ancestor row of the next value and its other children. An inclusive end
/// is advanced past the bounded value: for a full key of an index with
/// interleaved children only up to the descent sentinel (the row's own
/// family entries sort below it), otherwise to the prefix end.
#[must_use]
pub fn adjust_end_key_for_interleave<I: IndexSchema + ?Sized>(
    index: &I,
    end: Key,
    end_len: usize,
    interstice_len: usize,
    inclusive: bool,
) -> Key {
    if index.is_inverted() {
        return end.prefix_end();
    }

    if !inclusive {
        if end_len == 0 || interstice_len == 0 {
            return end;
        }
        let mut end = end.into_bytes();
        end.truncate(end.len().saturating_sub(interstice_len));

        return Key::from(end);
    }

    let full_key = end_len == index.columns().len();
    if full_key && !index.interleaved_by().is_empty() {
        let mut end = end.into_bytes();
        encode_interleaved_sentinel(&mut end);

        return Key::from(end);
    }

    end.prefix_end()
}
