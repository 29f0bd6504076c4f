use indoc::indoc;
use strata_compiler::compile;
use strata_core::{Constraint, Kind, Node, Scalar, ValueId};

use super::manifest::{ManifestError, parse};

const SCHEMA: &str = indoc! {r#"
    {
      "namespaces": ["acme", "settings"],
      "dimensions": [
        {"dimension": "region", "values": ["us", "eu"]},
        {"dimension": "device", "values": ["mobile", "tablet"]}
      ],
      "keys": {
        "title": {
          "default": "Hello",
          "overrides": [
            {"context": {"region": "us"}, "value": "Hi"},
            {"context": {"region": "us", "device": "mobile"}, "value": "Hey"}
          ]
        }
      }
    }
"#};

#[test]
fn full_manifest_round_trips_through_the_compiler() {
    let unit = parse(SCHEMA).unwrap();
    assert_eq!(unit.namespaces, vec!["acme", "settings"]);
    assert_eq!(unit.dimensions.len(), 2);
    assert_eq!(unit.keys.len(), 1);

    let outcome = compile(unit, &[]);
    assert!(!outcome.has_errors());

    let key = outcome.snapshot.key("title").expect("title compiled");
    assert_eq!(key.value.content(), Some("Hello"));
    let region = key.dimension.as_ref().expect("region dispatch");
    assert_eq!(region.dimension, "region");
}

#[test]
fn override_contexts_come_out_at_full_width() {
    let unit = parse(SCHEMA).unwrap();
    let graph = &unit.keys[0].graph;
    assert_eq!(graph.len(), 3);

    let device = unit.dimensions.get("device").unwrap();
    let us_edge = &graph.edges()[0];
    assert_eq!(us_edge.context.width(), 2);
    assert_eq!(us_edge.context.get(device), ValueId::NONE);
}

#[test]
fn context_naming_an_undeclared_dimension_is_rejected() {
    let text = indoc! {r#"
        {
          "dimensions": [{"dimension": "region", "values": ["us"]}],
          "keys": {
            "title": {
              "default": "Hello",
              "overrides": [{"context": {"tier": "gold"}, "value": "Hi"}]
            }
          }
        }
    "#};
    let error = parse(text).unwrap_err();
    assert!(matches!(
        error,
        ManifestError::UnknownDimension { ref dimension, .. } if dimension == "tier"
    ));
}

#[test]
fn context_naming_an_undeclared_value_is_rejected() {
    let text = indoc! {r#"
        {
          "dimensions": [{"dimension": "region", "values": ["us"]}],
          "keys": {
            "title": {
              "default": "Hello",
              "overrides": [{"context": {"region": "mars"}, "value": "Hi"}]
            }
          }
        }
    "#};
    let error = parse(text).unwrap_err();
    assert!(matches!(
        error,
        ManifestError::UnknownValue { ref value, .. } if value == "mars"
    ));
}

#[test]
fn scalars_convert_by_json_type() {
    let text = indoc! {r#"
        {
          "keys": {
            "flag": {"default": true},
            "count": {"default": 3},
            "ratio": {"default": 1.5},
            "name": {"default": "x"}
          }
        }
    "#};
    let unit = parse(text).unwrap();
    let labels: Vec<&str> = unit
        .keys
        .iter()
        .map(|k| k.graph.root_value().type_label())
        .collect();
    // serde_json::Map iterates keys alphabetically.
    assert_eq!(labels, vec!["integer", "boolean", "string", "float"]);
}

#[test]
fn null_is_not_a_value() {
    let text = r#"{"keys": {"title": {"default": null}}}"#;
    assert!(matches!(
        parse(text).unwrap_err(),
        ManifestError::InvalidValue { .. }
    ));
}

#[test]
fn regex_annotation_attaches_a_constraint() {
    let text = indoc! {r#"
        {
          "keys": {
            "lang": {"default": {"$value": "en", "$regex": "[a-z]{2}"}}
          }
        }
    "#};
    let unit = parse(text).unwrap();
    let value = unit.keys[0].graph.root_value();
    assert_eq!(value.content(), Some("en"));
    let constraint = value.constraint.as_ref().expect("regex constraint");
    assert!(constraint.is_satisfied_by("fr"));
    assert!(!constraint.is_satisfied_by("en-GB"));
}

#[test]
fn in_annotation_attaches_a_set_constraint() {
    let text = indoc! {r#"
        {
          "keys": {
            "level": {"default": {"$value": "info", "$in": ["info", "debug"]}}
          }
        }
    "#};
    let unit = parse(text).unwrap();
    let value = unit.keys[0].graph.root_value();
    assert_eq!(
        value.constraint,
        Some(Constraint::one_of(["info", "debug"]))
    );
}

#[test]
fn alias_and_dynamic_annotations_apply() {
    let text = indoc! {r#"
        {
          "keys": {
            "endpoints": {
              "default": {
                "$value": {"primary": {"host": "a", "port": 1}},
                "$dynamic": true,
                "$alias": "Endpoints"
              }
            }
          }
        }
    "#};
    let unit = parse(text).unwrap();
    let value = unit.keys[0].graph.root_value();
    assert_eq!(value.kind(), Kind::Dynamic);
    assert_eq!(value.alias.as_deref(), Some("Endpoints"));
    let Node::Dynamic { properties } = &value.node else {
        panic!("expected dynamic map");
    };
    assert_eq!(properties[0].0, "primary");
}

#[test]
fn invalid_regex_pattern_is_reported() {
    let text = r#"{"keys": {"lang": {"default": {"$value": "en", "$regex": "["}}}}"#;
    assert!(matches!(
        parse(text).unwrap_err(),
        ManifestError::InvalidPattern { .. }
    ));
}

#[test]
fn conflicting_constraints_are_rejected() {
    let text = r#"{"keys": {"k": {"default": {"$value": "a", "$regex": "a", "$in": ["a"]}}}}"#;
    assert!(matches!(
        parse(text).unwrap_err(),
        ManifestError::InvalidValue { .. }
    ));
}

#[test]
fn unknown_annotation_is_rejected() {
    let text = r#"{"keys": {"k": {"default": {"$value": "a", "$bogus": 1}}}}"#;
    assert!(matches!(
        parse(text).unwrap_err(),
        ManifestError::InvalidValue { .. }
    ));
}

#[test]
fn dynamic_requires_an_object() {
    let text = r#"{"keys": {"k": {"default": {"$value": [1], "$dynamic": true}}}}"#;
    assert!(matches!(
        parse(text).unwrap_err(),
        ManifestError::InvalidValue { .. }
    ));
}

#[test]
fn float_content_preserves_the_source_text() {
    let text = r#"{"keys": {"ratio": {"default": 2.25}}}"#;
    let unit = parse(text).unwrap();
    let value = unit.keys[0].graph.root_value();
    let Node::Scalar { scalar, content } = &value.node else {
        panic!("expected scalar");
    };
    assert_eq!(*scalar, Scalar::Float);
    assert_eq!(content, "2.25");
}
