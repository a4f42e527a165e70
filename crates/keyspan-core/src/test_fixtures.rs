use crate::schema::{
    ColumnDescriptor, ColumnType, FamilyDescriptor, IndexColumn, IndexDescriptor, IndexVersion,
    InterleaveAncestor, TableDescriptor,
};

///
/// TABLES
///

/// Table 51: `a INT NOT NULL, b INT NOT NULL, c TEXT`, families
/// `f0: [a]`, `f1: [b, c]`, unique primary index 1 on `a`.
pub(crate) fn two_family_table() -> TableDescriptor {
    TableDescriptor::new(
        51,
        "t",
        vec![
            ColumnDescriptor::new(1, "a", ColumnType::Int, false),
            ColumnDescriptor::new(2, "b", ColumnType::Int, false),
            ColumnDescriptor::new(3, "c", ColumnType::Text, true),
        ],
        vec![
            FamilyDescriptor::new(0, "f0", &[1]),
            FamilyDescriptor::new(1, "f1", &[2, 3]),
        ],
        IndexDescriptor::new(1, "primary", vec![IndexColumn::asc(1)]).unique(),
    )
}

/// Table 52 with one family per column and two secondary indexes:
/// - index 2: unique on `v1`, per-family format, stores `v2, v3`;
/// - index 3: non-unique on `v2 DESC`, with the primary key as extra column.
pub(crate) fn wide_table() -> TableDescriptor {
    TableDescriptor::new(
        52,
        "wide",
        vec![
            ColumnDescriptor::new(1, "k", ColumnType::Int, false),
            ColumnDescriptor::new(2, "v1", ColumnType::Text, true),
            ColumnDescriptor::new(3, "v2", ColumnType::Int, true),
            ColumnDescriptor::new(4, "v3", ColumnType::Float, true),
        ],
        vec![
            FamilyDescriptor::new(0, "primary", &[1]),
            FamilyDescriptor::new(1, "f1", &[2]),
            FamilyDescriptor::new(2, "f2", &[3]),
            FamilyDescriptor::new(3, "f3", &[4]),
        ],
        IndexDescriptor::new(1, "primary", vec![IndexColumn::asc(1)]).unique(),
    )
    .with_index(
        IndexDescriptor::new(2, "by_v1", vec![IndexColumn::asc(2)])
            .unique()
            .with_version(IndexVersion::SecondaryFamilies)
            .with_extra_columns(&[1])
            .with_stored_columns(&[3, 4]),
    )
    .with_index(
        IndexDescriptor::new(3, "by_v2", vec![IndexColumn::desc(3)]).with_extra_columns(&[1]),
    )
}

/// Table 53 with an inverted index 2 on the `tags TEXT[]` column.
pub(crate) fn tagged_table() -> TableDescriptor {
    TableDescriptor::new(
        53,
        "tagged",
        vec![
            ColumnDescriptor::new(1, "id", ColumnType::Int, false),
            ColumnDescriptor::new(2, "tags", ColumnType::Array(Box::new(ColumnType::Text)), true),
        ],
        vec![FamilyDescriptor::new(0, "primary", &[1, 2])],
        IndexDescriptor::new(1, "primary", vec![IndexColumn::asc(1)]).unique(),
    )
    .with_index(
        IndexDescriptor::new(2, "by_tag", vec![IndexColumn::asc(2)])
            .inverted()
            .with_extra_columns(&[1]),
    )
}

///
/// INTERLEAVED HIERARCHY
///
/// parent (60, index 1) <- child (61, index 1) <- grandchild (62, index 1)
///

/// Parent table 60: `p INT` primary key, interleaved into by table 61.
pub(crate) fn parent_table() -> TableDescriptor {
    TableDescriptor::new(
        60,
        "parent",
        vec![
            ColumnDescriptor::new(1, "p", ColumnType::Int, false),
            ColumnDescriptor::new(2, "name", ColumnType::Text, true),
        ],
        vec![FamilyDescriptor::new(0, "primary", &[1, 2])],
        IndexDescriptor::new(1, "primary", vec![IndexColumn::asc(1)])
            .unique()
            .with_descendant(61, 1),
    )
}

/// Child table 61: primary key `(p, c)` interleaved into the parent on `p`.
pub(crate) fn child_table() -> TableDescriptor {
    TableDescriptor::new(
        61,
        "child",
        vec![
            ColumnDescriptor::new(1, "p", ColumnType::Int, false),
            ColumnDescriptor::new(2, "c", ColumnType::Int, false),
        ],
        vec![FamilyDescriptor::new(0, "primary", &[1, 2])],
        IndexDescriptor::new(1, "primary", vec![IndexColumn::asc(1), IndexColumn::asc(2)])
            .unique()
            .interleaved_in(vec![InterleaveAncestor::new(60, 1, 1)])
            .with_descendant(62, 1),
    )
}

/// Grandchild table 62: primary key `(p, c, g DESC)` interleaved into the
/// child, with an ancestor chain of length 2.
pub(crate) fn grandchild_table() -> TableDescriptor {
    TableDescriptor::new(
        62,
        "grandchild",
        vec![
            ColumnDescriptor::new(1, "p", ColumnType::Int, false),
            ColumnDescriptor::new(2, "c", ColumnType::Int, false),
            ColumnDescriptor::new(3, "g", ColumnType::Text, false),
        ],
        vec![FamilyDescriptor::new(0, "primary", &[1, 2, 3])],
        IndexDescriptor::new(
            1,
            "primary",
            vec![
                IndexColumn::asc(1),
                IndexColumn::asc(2),
                IndexColumn::desc(3),
            ],
        )
        .unique()
        .interleaved_in(vec![
            InterleaveAncestor::new(60, 1, 1),
            InterleaveAncestor::new(61, 1, 1),
        ]),
    )
}
