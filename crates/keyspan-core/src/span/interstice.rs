use crate::{
    encoding::{encode_interleaved_sentinel, encode_uvarint_ascending},
    error::InternalError,
    key::Key,
    schema::{IndexSchema, TableSchema},
};

/// Build the interstice table for `index`: entry `i` is written before the
/// i-th key column, entry `key_columns` closes a full key.
///
/// Entry 0 is the key prefix. Each interleave ancestor boundary carries the
/// descent sentinel followed by the next ancestor's ids; the final boundary
/// carries this index's own table and index ids.
pub(super) fn build<T: TableSchema>(
    table: &T,
    index: &T::Index,
    key_prefix: &Key,
    key_columns: usize,
) -> Result<Vec<Vec<u8>>, InternalError> {
    let mut interstices = vec![Vec::new(); key_columns + 1];
    interstices[0] = key_prefix.to_vec();

    let ancestors = index.interleave_ancestors();
    if ancestors.is_empty() {
        return Ok(interstices);
    }

    let mut shared_prefix_len = 0usize;
    for (i, ancestor) in ancestors.iter().enumerate() {
        // The root ancestor is already encoded in the key prefix.
        if i != 0 {
            let slot = &mut interstices[shared_prefix_len];
            encode_uvarint_ascending(slot, u64::from(ancestor.table_id.get()));
            encode_uvarint_ascending(slot, u64::from(ancestor.index_id.get()));
        }

        shared_prefix_len += ancestor.shared_prefix_len as usize;
        let Some(slot) = interstices.get_mut(shared_prefix_len) else {
            return Err(InternalError::schema_configuration(format!(
                "interleave ancestor {}/{} of index {} shares {shared_prefix_len} columns \
                 but the index has only {key_columns}",
                ancestor.table_id,
                ancestor.index_id,
                index.id(),
            )));
        };
        encode_interleaved_sentinel(slot);
    }

    let slot = &mut interstices[shared_prefix_len];
    encode_uvarint_ascending(slot, u64::from(table.id().get()));
    encode_uvarint_ascending(slot, u64::from(index.id().get()));

    Ok(interstices)
}
