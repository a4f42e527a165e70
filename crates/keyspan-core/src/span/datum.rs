use crate::{
    encoding::{
        Direction, ENCODED_NULL, ENCODED_NULL_DESC, KeyEncodeError, ValueAlloc, decode_table_key,
        encode_table_key,
    },
    error::InternalError,
    key::{Key, Span},
    obs::sink::{self, MetricsEvent, SpanKind},
    schema::{ColumnIdMap, ColumnType, IndexSchema, TableSchema},
    span::{Builder, adjust_end_key_for_interleave},
    value::Value,
};

static NULL_DATUM: Value = Value::Null;

///
/// EncDatum
///
/// One datum held in key-encoded form, decoded form, or both. Encoded
/// bytes are reused verbatim when their direction matches the target
/// column; otherwise the datum is decoded and re-encoded.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncDatum {
    encoded: Option<(Direction, Vec<u8>)>,
    decoded: Option<Value>,
}

impl EncDatum {
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self {
            encoded: None,
            decoded: Some(value),
        }
    }

    /// Wrap the key encoding of exactly one datum.
    #[must_use]
    pub const fn from_encoded(dir: Direction, bytes: Vec<u8>) -> Self {
        Self {
            encoded: Some((dir, bytes)),
            decoded: None,
        }
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::from_value(Value::Null)
    }

    #[must_use]
    pub fn encoded(&self) -> Option<(Direction, &[u8])> {
        self.encoded.as_ref().map(|(dir, bytes)| (*dir, bytes.as_slice()))
    }

    #[must_use]
    pub const fn decoded(&self) -> Option<&Value> {
        self.decoded.as_ref()
    }

    /// Append this datum's key encoding in `dir`, returning whether it is
    /// NULL.
    fn encode_into(
        &self,
        out: &mut Vec<u8>,
        ty: &ColumnType,
        dir: Direction,
        alloc: &mut ValueAlloc,
    ) -> Result<bool, InternalError> {
        if let Some((enc_dir, bytes)) = &self.encoded
            && *enc_dir == dir
        {
            let null_marker = if dir.is_descending() {
                ENCODED_NULL_DESC
            } else {
                ENCODED_NULL
            };
            out.extend_from_slice(bytes);

            return Ok(bytes.first() == Some(&null_marker));
        }

        let decoded;
        let value = match (&self.decoded, &self.encoded) {
            (Some(value), _) => value,
            (None, Some((enc_dir, bytes))) => {
                alloc.reset();
                let (value, rest) = decode_table_key(bytes, ty, *enc_dir, alloc)?;
                if !rest.is_empty() {
                    return Err(InternalError::encoding_corruption(format!(
                        "encoded datum has {} trailing bytes",
                        rest.len()
                    )));
                }
                decoded = value;
                &decoded
            }
            (None, None) => &NULL_DATUM,
        };

        if !value.fits(ty) {
            return Err(KeyEncodeError::TypeMismatch {
                kind: value.kind_label(),
                expected: ty.to_string(),
            }
            .into());
        }
        encode_table_key(out, value, dir)?;

        Ok(value.is_null())
    }
}

impl From<Value> for EncDatum {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// A row of datums in index column order.
pub type EncDatumRow = Vec<EncDatum>;

impl<T: TableSchema> Builder<'_, T> {
    /// Span of the index entries whose first `prefix_len` key columns equal
    /// the leading datums of `values`, plus whether any of them is NULL.
    pub fn span_from_enc_datums(
        &mut self,
        values: &[EncDatum],
        prefix_len: usize,
    ) -> Result<(Span, bool), InternalError> {
        if prefix_len > values.len() {
            return Err(self.record_failure(InternalError::builder_invariant(format!(
                "span prefix of {prefix_len} columns exceeds row of {} datums",
                values.len(),
            ))));
        }

        self.encode_row_span(prefix_len, |builder, i, out| {
            let (ty, dir) = (&builder.index_col_types[i], builder.index_col_dirs[i]);
            values[i].encode_into(out, ty, dir, &mut builder.alloc)
        })
    }

    /// Span of the index entries matching the first `prefix_len` key columns
    /// of a full table row. `col_map` maps column ids to row positions; a
    /// key column missing from it encodes as NULL.
    pub fn span_from_datum_row(
        &mut self,
        values: &[Value],
        prefix_len: usize,
        col_map: &ColumnIdMap,
    ) -> Result<(Span, bool), InternalError> {
        self.encode_row_span(prefix_len, |builder, i, out| {
            let value = col_map
                .get(&builder.index_col_ids[i])
                .and_then(|&pos| values.get(pos))
                .unwrap_or(&NULL_DATUM);

            let ty = &builder.index_col_types[i];
            if !value.fits(ty) {
                return Err(KeyEncodeError::TypeMismatch {
                    kind: value.kind_label(),
                    expected: ty.to_string(),
                }
                .into());
            }
            encode_table_key(out, value, builder.index_col_dirs[i])?;

            Ok(value.is_null())
        })
    }

    // Shared row-span skeleton: interstice, datum, ..., closing interstice.
    fn encode_row_span(
        &mut self,
        prefix_len: usize,
        mut encode: impl FnMut(&mut Self, usize, &mut Vec<u8>) -> Result<bool, InternalError>,
    ) -> Result<(Span, bool), InternalError> {
        if prefix_len > self.index_col_types.len() {
            return Err(self.record_failure(InternalError::builder_invariant(format!(
                "span prefix of {prefix_len} columns exceeds index {} with {} key columns",
                self.index.id(),
                self.index_col_types.len(),
            ))));
        }

        let mut key = Vec::new();
        let mut contains_null = false;
        for i in 0..prefix_len {
            key.extend_from_slice(&self.interstices[i]);
            match encode(self, i, &mut key) {
                Ok(is_null) => contains_null |= is_null,
                Err(err) => return Err(self.record_failure(err)),
            }
        }
        key.extend_from_slice(&self.interstices[prefix_len]);

        sink::record(MetricsEvent::SpansBuilt {
            table_id: self.table.id(),
            kind: SpanKind::Row,
            spans: 1,
        });

        // Same end as an inclusive point constraint on the prefix, so a full
        // key on a parent stops at the sentinel before its children.
        let key = Key::from(key);
        let end_key = adjust_end_key_for_interleave(self.index, key.clone(), prefix_len, 0, true);

        Ok((Span::new(key, end_key), contains_null))
    }

    fn record_failure(&self, err: InternalError) -> InternalError {
        sink::record(MetricsEvent::EncodeFailure { class: err.class });
        err
    }
}
