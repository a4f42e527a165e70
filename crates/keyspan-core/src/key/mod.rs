//! Module: key
//! Responsibility: physical key bytes, spans, and the fixed key layout
//! pieces (index prefixes, family suffixes).
//! Does not own: datum encoding or constraint lowering.


use crate::{
    encoding::encode_uvarint_ascending,
    schema::{FamilyId, IndexSchema, TableSchema},
};
use derive_more::{Deref, From};
use std::fmt;

/// Largest key in the key space; the prefix end of the empty key.
pub const KEY_MAX: [u8; 2] = [0xff, 0xff];

///
/// Key
///
/// Physical key bytes. Ordering is plain lexicographic byte order.
///

#[derive(Clone, Default, Deref, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key(Vec<u8>);

impl Key {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub(crate) const fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Smallest key strictly greater than every key with `self` as a prefix.
    ///
    /// The empty key maps to [`KEY_MAX`]; a key made only of `0xff` bytes has
    /// no successor prefix and is returned unchanged.
    #[must_use]
    pub fn prefix_end(&self) -> Self {
        if self.0.is_empty() {
            return Self(KEY_MAX.to_vec());
        }

        let mut end = self.0.clone();
        while let Some(last) = end.last_mut() {
            if *last == 0xff {
                end.pop();
                continue;
            }

            *last += 1;
            return Self(end);
        }

        self.clone()
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

///
/// Span
///
/// Half-open key range `[key, end_key)`.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Span {
    pub key: Key,
    pub end_key: Key,
}

impl Span {
    #[must_use]
    pub const fn new(key: Key, end_key: Key) -> Self {
        Self { key, end_key }
    }

    /// Span covering exactly the keys that have `key` as a prefix.
    #[must_use]
    pub fn prefix(key: Key) -> Self {
        let end_key = key.prefix_end();
        Self { key, end_key }
    }

    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.key.as_bytes() <= key && key < self.end_key.as_bytes()
    }
}

/// Ordered list of spans handed to the storage read path.
pub type Spans = Vec<Span>;

/// Append the column-family suffix to a row key.
///
/// Family 0 is a bare uvarint 0; other families carry the uvarint family id
/// followed by the uvarint length of that id encoding.
#[must_use]
pub fn make_family_key(key: &[u8], family: FamilyId) -> Key {
    let mut out = key.to_vec();
    if family.get() == 0 {
        encode_uvarint_ascending(&mut out, 0);
        return Key::from(out);
    }

    let size = out.len();
    encode_uvarint_ascending(&mut out, u64::from(family.get()));
    let suffix_len = (out.len() - size) as u64;
    encode_uvarint_ascending(&mut out, suffix_len);

    Key::from(out)
}

/// Key prefix shared by every entry of `index`.
///
/// Interleaved indexes live inside their root ancestor's key space, so the
/// prefix names that ancestor rather than the index itself.
#[must_use]
pub fn make_index_key_prefix<T: TableSchema>(table: &T, index: &T::Index) -> Key {
    let mut out = Vec::new();
    if let Some(root) = index.interleave_ancestors().first() {
        encode_uvarint_ascending(&mut out, u64::from(root.table_id.get()));
        encode_uvarint_ascending(&mut out, u64::from(root.index_id.get()));
        return Key::from(out);
    }

    encode_uvarint_ascending(&mut out, u64::from(table.id().get()));
    encode_uvarint_ascending(&mut out, u64::from(index.id().get()));

    Key::from(out)
}
