use strata_core::Value;

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::linearize::linearize;
use crate::test_utils::{ctx, graph, region_device};
use crate::trim::Restrictions;

fn specs(items: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    items
        .iter()
        .map(|(d, vs)| {
            (
                d.to_string(),
                vs.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn empty_restrictions_are_a_noop() {
    let mut table = region_device();
    let us = ctx(&mut table, &[("region", "us")]);
    let mut tree = linearize(graph(Value::string("d"), vec![(us, Value::string("us"))]));

    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(&table, &[], &mut diagnostics);
    assert!(restrictions.is_empty());

    let before = tree.clone();
    restrictions.trim(&mut tree);
    assert_eq!(tree, before);
    assert!(diagnostics.is_empty());
}

#[test]
fn disallowed_branch_is_pruned_with_its_subtree() {
    let mut table = region_device();
    let us = ctx(&mut table, &[("region", "us")]);
    let eu = ctx(&mut table, &[("region", "eu")]);
    let eu_mobile = ctx(&mut table, &[("region", "eu"), ("device", "mobile")]);

    let mut tree = linearize(graph(
        Value::string("d"),
        vec![
            (us, Value::string("us")),
            (eu, Value::string("eu")),
            (eu_mobile, Value::string("eu-mobile")),
        ],
    ));

    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(&table, &specs(&[("region", &["us"])]), &mut diagnostics);
    restrictions.trim(&mut tree);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.root.children[0].value.content(), Some("us"));
}

#[test]
fn unset_slot_within_degree_is_still_judged() {
    let mut table = region_device();
    let mobile = ctx(&mut table, &[("device", "mobile")]);
    let mut tree = linearize(graph(
        Value::string("d"),
        vec![(mobile, Value::string("mobile"))],
    ));

    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(&table, &specs(&[("region", &["us"])]), &mut diagnostics);
    restrictions.trim(&mut tree);

    // {device:mobile} has degree 2, so its unset region slot falls inside
    // the checked range and NONE is not on the allow-list.
    assert_eq!(tree.len(), 1);
}

#[test]
fn trailing_slots_escape_the_allow_list() {
    let mut table = region_device();
    let us = ctx(&mut table, &[("region", "us")]);
    let mut tree = linearize(graph(Value::string("d"), vec![(us, Value::string("us"))]));

    let mut diagnostics = Diagnostics::new();
    let restrictions =
        Restrictions::parse(&table, &specs(&[("device", &["mobile"])]), &mut diagnostics);
    restrictions.trim(&mut tree);

    // {region:us} has degree 1; the device allow-list never sees it.
    assert_eq!(tree.len(), 2);
}

#[test]
fn single_value_allow_list_marks_skip() {
    let mut table = region_device();
    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(
        &table,
        &specs(&[("region", &["us"]), ("device", &["mobile", "tablet"])]),
        &mut diagnostics,
    );
    restrictions.mark_skip(&mut table);

    let region = table.get("region").unwrap();
    let device = table.get("device").unwrap();
    assert!(table.entry(region).skip);
    assert!(!table.entry(device).skip);
}

#[test]
fn unknown_dimension_warns_and_restricts_nothing() {
    let table = region_device();
    let mut diagnostics = Diagnostics::new();
    let restrictions =
        Restrictions::parse(&table, &specs(&[("tier", &["gold"])]), &mut diagnostics);

    assert!(restrictions.is_empty());
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
    let warning = diagnostics.iter().next().unwrap();
    assert_eq!(
        warning.error,
        CompileError::InvalidFilter {
            what: "dimension",
            name: "tier".to_string(),
        }
    );
}

#[test]
fn unknown_value_warns_per_value() {
    let table = region_device();
    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(
        &table,
        &specs(&[("region", &["us", "mars"])]),
        &mut diagnostics,
    );

    assert!(!restrictions.is_empty());
    assert_eq!(diagnostics.warning_count(), 1);
}
