mod common;

use common::{INTERLEAVED, load, point, span, table};
use keyspan::{key::make_family_key, prelude::*, schema::ColumnIdMap};

// orgs (70) <- teams (71) <- team_settings (72), all on primary index 1.
const ORG_ROW: [u8; 3] = [0xce, 0x89, 0x89];
const TEAM_ROW: [u8; 7] = [0xce, 0x89, 0x89, 0xfe, 0xcf, 0x89, 0x8a];
const SETTINGS_ROW: [u8; 10] = [0xce, 0x89, 0x89, 0xfe, 0xcf, 0x89, 0x8a, 0xfe, 0xd0, 0x89];

#[test]
fn two_level_interleave_has_three_interstices() {
    let tables = load(INTERLEAVED);
    let settings = table(&tables, 72);
    let builder = Builder::new(settings, settings.primary_index()).expect("builder");

    assert_eq!(builder.key_prefix(), &Key::from(&[0xce, 0x89][..]));
    assert_eq!(
        builder.interstices(),
        &[
            vec![0xce, 0x89],
            vec![0xfe, 0xcf, 0x89],
            vec![0xfe, 0xd0, 0x89],
        ]
    );
}

#[test]
fn full_key_interleaves_ancestor_boundaries_between_columns() {
    let tables = load(INTERLEAVED);
    let settings = table(&tables, 72);
    let mut builder = Builder::new(settings, settings.primary_index()).expect("builder");

    let spans = builder
        .spans_from_constraint(Some(&point([1, 2])), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    let mut end = SETTINGS_ROW;
    end[9] += 1;
    assert_eq!(spans, vec![span(&SETTINGS_ROW, &end)]);
}

#[test]
fn row_entry_point_matches_the_point_constraint() {
    let tables = load(INTERLEAVED);
    let settings = table(&tables, 72);
    let mut builder = Builder::new(settings, settings.primary_index()).expect("builder");

    let row = [Value::Int(1), Value::Int(2), Value::Bytes(vec![0xab])];
    let col_map: ColumnIdMap = settings
        .columns
        .iter()
        .enumerate()
        .map(|(pos, column)| (column.id, pos))
        .collect();

    let (row_span, contains_null) = builder
        .span_from_datum_row(&row, 2, &col_map)
        .expect("row span");
    assert!(!contains_null);

    let spans = builder
        .spans_from_constraint(Some(&point([1, 2])), &ColumnOrdinalSet::new(), false)
        .expect("spans");
    assert_eq!(spans, vec![row_span]);
}

#[test]
fn parent_point_span_stops_at_its_children() {
    let tables = load(INTERLEAVED);
    let orgs = table(&tables, 70);
    let mut builder = Builder::new(orgs, orgs.primary_index()).expect("builder");

    let spans = builder
        .spans_from_constraint(Some(&point([1])), &ColumnOrdinalSet::new(), false)
        .expect("spans");
    assert_eq!(spans, vec![span(&ORG_ROW, &[0xce, 0x89, 0x89, 0xfe])]);

    let org_span = &spans[0];
    assert!(org_span.contains(&make_family_key(&ORG_ROW, FamilyId::new(0))));
    assert!(!org_span.contains(&TEAM_ROW));
    assert!(!org_span.contains(&SETTINGS_ROW));
}

#[test]
fn middle_table_point_span_excludes_grandchildren() {
    let tables = load(INTERLEAVED);
    let teams = table(&tables, 71);
    let mut builder = Builder::new(teams, teams.primary_index()).expect("builder");

    let spans = builder
        .spans_from_constraint(Some(&point([1, 2])), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    let mut end = TEAM_ROW.to_vec();
    end.push(0xfe);
    assert_eq!(spans, vec![span(&TEAM_ROW, &end)]);
    assert!(spans[0].contains(&make_family_key(&TEAM_ROW, FamilyId::new(0))));
    assert!(!spans[0].contains(&SETTINGS_ROW));
}

#[test]
fn partial_key_of_child_ends_at_its_prefix_end() {
    let tables = load(INTERLEAVED);
    let teams = table(&tables, 71);
    let mut builder = Builder::new(teams, teams.primary_index()).expect("builder");

    let spans = builder
        .spans_from_constraint(Some(&point([1])), &ColumnOrdinalSet::new(), false)
        .expect("spans");
    assert_eq!(
        spans,
        vec![span(
            &[0xce, 0x89, 0x89, 0xfe, 0xcf, 0x89],
            &[0xce, 0x89, 0x89, 0xfe, 0xcf, 0x8a]
        )]
    );
    assert!(spans[0].contains(&TEAM_ROW));
}

#[test]
fn parent_row_entry_points_stop_at_children() {
    let tables = load(INTERLEAVED);
    let orgs = table(&tables, 70);
    let mut builder = Builder::new(orgs, orgs.primary_index()).expect("builder");

    let expected = span(&ORG_ROW, &[0xce, 0x89, 0x89, 0xfe]);

    let datums = [EncDatum::from_value(Value::Int(1))];
    let (enc_span, _) = builder
        .span_from_enc_datums(&datums, 1)
        .expect("enc datum span");
    assert_eq!(enc_span, expected);

    let row = [Value::Int(1), Value::Null];
    let col_map: ColumnIdMap = orgs
        .columns
        .iter()
        .enumerate()
        .map(|(pos, column)| (column.id, pos))
        .collect();
    let (row_span, _) = builder
        .span_from_datum_row(&row, 1, &col_map)
        .expect("datum row span");
    assert_eq!(row_span, expected);

    let spans = builder
        .spans_from_constraint(Some(&point([1])), &ColumnOrdinalSet::new(), false)
        .expect("spans");
    assert_eq!(spans, vec![row_span.clone()]);

    assert!(row_span.contains(&make_family_key(&ORG_ROW, FamilyId::new(0))));
    assert!(!row_span.contains(&TEAM_ROW));
    assert!(!row_span.contains(&SETTINGS_ROW));
}

#[test]
fn exclusive_full_key_end_stops_at_the_bounded_row() {
    let tables = load(INTERLEAVED);
    let teams = table(&tables, 71);
    let mut builder = Builder::new(teams, teams.primary_index()).expect("builder");

    let constraint = Constraint::new(vec![ConstraintSpan::new(
        ConstraintKey::from_iter([1i64, 1]),
        Boundary::Include,
        ConstraintKey::from_iter([1i64, 2]),
        Boundary::Exclude,
    )]);
    let spans = builder
        .spans_from_constraint(Some(&constraint), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    let mut start = TEAM_ROW;
    start[6] -= 1;
    assert_eq!(spans, vec![span(&start, &TEAM_ROW)]);
}

#[test]
fn exclusive_partial_end_of_child_skips_the_next_parent_row() {
    let tables = load(INTERLEAVED);
    let teams = table(&tables, 71);
    let mut builder = Builder::new(teams, teams.primary_index()).expect("builder");

    let constraint = Constraint::new(vec![ConstraintSpan::new(
        ConstraintKey::from_iter([1i64]),
        Boundary::Include,
        ConstraintKey::from_iter([2i64]),
        Boundary::Exclude,
    )]);
    let spans = builder
        .spans_from_constraint(Some(&constraint), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    assert_eq!(
        spans,
        vec![span(&[0xce, 0x89, 0x89, 0xfe, 0xcf, 0x89], &[0xce, 0x89, 0x8a])]
    );

    let next_org_row = make_family_key(&[0xce, 0x89, 0x8a], FamilyId::new(0));
    assert!(spans[0].contains(&TEAM_ROW));
    assert!(!spans[0].contains(&next_org_row));
    assert!(!spans[0].contains(&[0xce, 0x89, 0x8a, 0xfe, 0xcf, 0x89, 0x89]));
}

#[test]
fn exclusive_partial_end_of_grandchild_skips_the_next_ancestor_rows() {
    let tables = load(INTERLEAVED);
    let settings = table(&tables, 72);
    let mut builder = Builder::new(settings, settings.primary_index()).expect("builder");

    // Bounded at the team: stops before team (1, 2) and its settings.
    let by_team = Constraint::new(vec![ConstraintSpan::new(
        ConstraintKey::from_iter([1i64, 1]),
        Boundary::Include,
        ConstraintKey::from_iter([1i64, 2]),
        Boundary::Exclude,
    )]);
    let spans = builder
        .spans_from_constraint(Some(&by_team), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    let mut start = SETTINGS_ROW;
    start[6] -= 1;
    assert_eq!(spans, vec![span(&start, &TEAM_ROW)]);
    assert!(!spans[0].contains(&make_family_key(&TEAM_ROW, FamilyId::new(0))));
    assert!(!spans[0].contains(&SETTINGS_ROW));

    // Bounded at the org: stops before org 2's row.
    let by_org = Constraint::new(vec![ConstraintSpan::new(
        ConstraintKey::from_iter([1i64]),
        Boundary::Include,
        ConstraintKey::from_iter([2i64]),
        Boundary::Exclude,
    )]);
    let spans = builder
        .spans_from_constraint(Some(&by_org), &ColumnOrdinalSet::new(), false)
        .expect("spans");

    assert_eq!(
        spans,
        vec![span(&[0xce, 0x89, 0x89, 0xfe, 0xcf, 0x89], &[0xce, 0x89, 0x8a])]
    );
    assert!(spans[0].contains(&SETTINGS_ROW));
    assert!(!spans[0].contains(&make_family_key(&[0xce, 0x89, 0x8a], FamilyId::new(0))));
}

#[test]
fn interleave_chain_longer_than_the_key_is_a_configuration_error() {
    let tables = load(INTERLEAVED);
    let broken = table(&tables, 73);

    let err = Builder::new(broken, broken.primary_index()).expect_err("chain overruns the key");
    assert!(err.is_configuration(), "unexpected error: {}", err.display_with_class());
}
