#![allow(dead_code)]

use keyspan::{
    prelude::*,
    schema::{IndexId, TableId},
};

pub const ACCOUNTS: &str = include_str!("../fixtures/accounts.json");
pub const POSTS: &str = include_str!("../fixtures/posts.json");
pub const INTERLEAVED: &str = include_str!("../fixtures/interleaved.json");

/// Parse a fixture file into its table descriptors.
pub fn load(json: &str) -> Vec<TableDescriptor> {
    serde_json::from_str(json).expect("fixture should parse")
}

pub fn table(tables: &[TableDescriptor], id: u32) -> &TableDescriptor {
    tables
        .iter()
        .find(|table| table.id == TableId::new(id))
        .unwrap_or_else(|| panic!("fixture table {id} should exist"))
}

pub fn index(table: &TableDescriptor, id: u32) -> &IndexDescriptor {
    table
        .find_index(IndexId::new(id))
        .unwrap_or_else(|| panic!("fixture index {}/{id} should exist", table.id))
}

pub fn span(start: &[u8], end: &[u8]) -> Span {
    Span::new(Key::from(start), Key::from(end))
}

pub fn point(values: impl IntoIterator<Item = i64>) -> Constraint {
    Constraint::new(vec![ConstraintSpan::point(values.into_iter().collect())])
}

pub fn needed(ordinals: &[usize]) -> ColumnOrdinalSet {
    ordinals.iter().copied().collect()
}
