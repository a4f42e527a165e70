use crate::{
    constraint::ConstraintKey,
    encoding::{Direction, KeyEncodeError, encode_inverted_index_table_keys, encode_table_key},
    error::InternalError,
    key::Key,
    schema::{IndexSchema, TableSchema},
    span::Builder,
};

impl<T: TableSchema> Builder<'_, T> {
    /// Encode each value of a constraint key, writing interstice `i` before
    /// the i-th value. Also reports whether any value was NULL.
    ///
    /// Inverted indexes must produce exactly one key fragment per value;
    /// anything else is an invariant violation, since nulls and multi-valued
    /// probes are filtered out before span building.
    pub fn encode_constraint_key(
        &self,
        ck: &ConstraintKey,
    ) -> Result<(Key, bool), InternalError> {
        if ck.len() > self.index_col_types.len() {
            return Err(InternalError::builder_invariant(format!(
                "constraint key has {} values but index {} has {} key columns",
                ck.len(),
                self.index.id(),
                self.index_col_types.len(),
            )));
        }

        let mut key = Vec::new();
        let mut contains_null = false;
        for (i, value) in ck.iter().enumerate() {
            contains_null |= value.is_null();
            key.extend_from_slice(&self.interstices[i]);

            if self.index.is_inverted() {
                let mut fragments = encode_inverted_index_table_keys(value, &key)?;
                key = match fragments.len() {
                    0 => {
                        tracing::warn!(index = %self.index.id(), "null value in inverted index lookup");
                        return Err(InternalError::builder_invariant(
                            "trying to use null key in inverted index lookup",
                        ));
                    }
                    1 => fragments.swap_remove(0).into_bytes(),
                    n => {
                        tracing::warn!(
                            index = %self.index.id(),
                            fragments = n,
                            "multiple keys in inverted index lookup"
                        );
                        return Err(InternalError::builder_invariant(format!(
                            "trying to use {n} keys in inverted index lookup",
                        )));
                    }
                };
                continue;
            }

            let ty = &self.index_col_types[i];
            if !value.fits(ty) {
                return Err(KeyEncodeError::TypeMismatch {
                    kind: value.kind_label(),
                    expected: ty.to_string(),
                }
                .into());
            }

            // Extra columns are always ascending.
            let dir = self.index_col_dirs.get(i).copied().unwrap_or(Direction::Asc);
            encode_table_key(&mut key, value, dir)?;
        }

        Ok((Key::from(key), contains_null))
    }
}
