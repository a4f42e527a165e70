use crate::{
    encoding::{Direction, EMPTY_ARRAY_MARKER, KeyEncodeError, encode_table_key},
    key::Key,
    value::Value,
};

/// Encode the physical inverted-index keys one datum contributes, each
/// prefixed by `in_key`.
///
/// - NULL contributes no keys.
/// - An array contributes one key per distinct non-null element, in
///   ascending element order; an empty array contributes a single
///   empty-array key.
/// - A scalar contributes exactly one key.
pub fn encode_inverted_index_table_keys(
    value: &Value,
    in_key: &[u8],
) -> Result<Vec<Key>, KeyEncodeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(elements) if elements.is_empty() => {
            let mut key = in_key.to_vec();
            key.push(EMPTY_ARRAY_MARKER);

            Ok(vec![Key::from(key)])
        }
        Value::Array(elements) => {
            let mut distinct: Vec<&Value> = elements.iter().filter(|v| !v.is_null()).collect();
            distinct.sort();
            distinct.dedup();

            distinct
                .into_iter()
                .map(|element| encode_one(element, in_key))
                .collect()
        }
        scalar => Ok(vec![encode_one(scalar, in_key)?]),
    }
}

fn encode_one(value: &Value, in_key: &[u8]) -> Result<Key, KeyEncodeError> {
    let mut key = in_key.to_vec();
    encode_table_key(&mut key, value, Direction::Asc)?;

    Ok(Key::from(key))
}
