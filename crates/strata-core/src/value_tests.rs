use crate::ir::Kind;
use crate::value::{Constraint, Value};

#[test]
fn scalar_builders_record_source_content() {
    assert_eq!(Value::boolean(true).content(), Some("true"));
    assert_eq!(Value::integer(10).content(), Some("10"));
    assert_eq!(Value::string("Hello").content(), Some("Hello"));
    assert_eq!(Value::object(vec![]).content(), None);
}

#[test]
fn kind_tracks_container_shape() {
    assert_eq!(Value::string("x").kind(), Kind::None);
    assert_eq!(Value::object(vec![]).kind(), Kind::None);
    assert_eq!(Value::array(vec![Value::integer(1)]).kind(), Kind::Array);
    assert_eq!(
        Value::dynamic(vec![("a".into(), Value::integer(1))]).kind(),
        Kind::Dynamic
    );
}

#[test]
fn regex_constraint_requires_full_match() {
    let constraint = Constraint::regex("[a-z]+").unwrap();
    assert!(constraint.is_satisfied_by("hello"));
    assert!(!constraint.is_satisfied_by("hello1"));
    assert!(!constraint.is_satisfied_by("1hello"));
    assert!(!constraint.is_satisfied_by(""));
}

#[test]
fn set_constraint_matches_members_only() {
    let constraint = Constraint::one_of(["us", "eu"]);
    assert!(constraint.is_satisfied_by("us"));
    assert!(!constraint.is_satisfied_by("apac"));
}

#[test]
fn invalid_regex_is_a_build_error() {
    assert!(Constraint::regex("(unclosed").is_err());
}

#[test]
fn snapshot_serialization_includes_constraint_pattern() {
    let value = Value::string("us").with_constraint(Constraint::regex("us|eu").unwrap());
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["constraint"]["regex"], "us|eu");
    assert_eq!(json["scalar"]["content"], "us");
}

#[test]
fn alias_survives_serialization() {
    let value = Value::object(vec![("a".into(), Value::integer(1))]).with_alias("Options");
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["alias"], "Options");
}
