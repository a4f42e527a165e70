use crate::schema::{ColumnId, ColumnOrdinalSet, FamilyId, IndexSchema, TableSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// FamilyDescriptor
///
/// A group of columns stored under one key suffix of the row key.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FamilyDescriptor {
    pub id: FamilyId,
    pub name: String,
    pub column_ids: Vec<ColumnId>,
}

impl FamilyDescriptor {
    #[must_use]
    pub fn new(id: u32, name: &str, column_ids: &[u32]) -> Self {
        Self {
            id: FamilyId::new(id),
            name: name.to_string(),
            column_ids: column_ids.iter().copied().map(ColumnId::new).collect(),
        }
    }
}

/// Minimal set of families that must be read to produce `needed` columns
/// from rows of `index`, in family declaration order.
///
/// Columns decodable from the index key need no family. The primary family
/// always has an entry per row, so it is added as an existence sentinel
/// whenever every other needed family could be absent for a row whose
/// columns are all NULL.
pub fn needed_column_family_ids<T: TableSchema>(
    needed: &ColumnOrdinalSet,
    table: &T,
    index: &T::Index,
) -> Vec<FamilyId> {
    let families = table.families();
    let Some(sentinel) = families
        .iter()
        .find(|family| family.id.is_primary())
        .or_else(|| families.first())
    else {
        return Vec::new();
    };
    if families.len() == 1 {
        return vec![sentinel.id];
    }

    let ordinals_of = |ids: &[ColumnId]| -> BTreeSet<usize> {
        ids.iter()
            .filter_map(|id| table.column_ordinal(*id))
            .collect()
    };
    let key_ids: Vec<ColumnId> = index.columns().iter().map(|column| column.id).collect();
    let key_ordinals = ordinals_of(&key_ids);
    let extra_ordinals = ordinals_of(index.extra_column_ids());
    let secondary = !table.is_primary(index);

    // Phase 1: drop columns the key already provides. Secondary indexes keep
    // extra column values in the primary family.
    let mut sentinel_needed = false;
    let mut remaining = BTreeSet::new();
    for &ordinal in needed.iter() {
        if secondary && extra_ordinals.contains(&ordinal) {
            sentinel_needed = true;
            continue;
        }
        if key_ordinals.contains(&ordinal) {
            continue;
        }
        remaining.insert(ordinal);
    }

    // Phase 2: collect families holding remaining columns, tracking whether
    // any of them is guaranteed to have an entry for every row.
    let columns = table.columns();
    let mut needed_ids = Vec::new();
    let mut all_nullable = true;
    for family in families {
        let is_sentinel = family.id == sentinel.id;
        let mut is_needed = is_sentinel && sentinel_needed;
        let mut nullable = !is_sentinel;

        for column_id in &family.column_ids {
            if is_needed && !nullable {
                break;
            }
            let Some(ordinal) = table.column_ordinal(*column_id) else {
                continue;
            };
            if remaining.contains(&ordinal) {
                is_needed = true;
            }
            if !columns[ordinal].nullable && !key_ordinals.contains(&ordinal) {
                nullable = false;
            }
        }

        if is_needed {
            needed_ids.push(family.id);
            all_nullable &= nullable;
        }
    }

    if all_nullable {
        needed_ids.insert(0, sentinel.id);
    }

    needed_ids
}
