//! Shared fixtures for pipeline tests.

use strata_core::{Context, DimensionTable, Value};

use crate::graph::OverrideGraph;
use crate::pipeline::KeyInput;

/// Registry with the given dimensions and their enumerated values.
pub fn dimensions(spec: &[(&str, &[&str])]) -> DimensionTable {
    let mut table = DimensionTable::new();
    for (dimension, values) in spec {
        let id = table.intern(dimension);
        for value in *values {
            table.entry_mut(id).values.intern(value);
        }
    }
    table
}

/// The registry most scenarios use: `region:{us,eu}`, `device:{mobile,tablet}`.
pub fn region_device() -> DimensionTable {
    dimensions(&[("region", &["us", "eu"]), ("device", &["mobile", "tablet"])])
}

/// Full-width context from `(dimension, value)` name pairs.
pub fn ctx(table: &mut DimensionTable, pairs: &[(&str, &str)]) -> Context {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(d, v)| (d.to_string(), v.to_string()))
        .collect();
    table.context(&pairs)
}

/// Override graph with a default and `(context, value)` override pairs.
pub fn graph(default: Value, overrides: Vec<(Context, Value)>) -> OverrideGraph {
    let mut graph = OverrideGraph::new(default);
    for (context, value) in overrides {
        graph.add_override(context, value);
    }
    graph
}

pub fn key_input(name: &str, default: Value, overrides: Vec<(Context, Value)>) -> KeyInput {
    KeyInput::new(name, graph(default, overrides))
}

/// A `title` key with a region override and a nested region+device
/// override: default "Hello", `{region:us}` -> "Hi",
/// `{region:us, device:mobile}` -> "Hey".
pub fn nested_title_key(table: &mut DimensionTable) -> KeyInput {
    let us = ctx(table, &[("region", "us")]);
    let us_mobile = ctx(table, &[("region", "us"), ("device", "mobile")]);
    key_input(
        "title",
        Value::string("Hello"),
        vec![
            (us, Value::string("Hi")),
            (us_mobile, Value::string("Hey")),
        ],
    )
}
