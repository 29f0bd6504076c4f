//! The raw per-key override graph.
//!
//! One node per literal value; node 0 is the key's unconditional default.
//! Every raw edge runs from the root to an override node, labeled with that
//! override's context. The linearizer is responsible for reducing this to a
//! proper single-parent tree.

use strata_core::{Context, Value};

/// A context-labeled edge between two value nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub context: Context,
}

/// The override graph for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideGraph {
    values: Vec<Value>,
    edges: Vec<Edge>,
}

impl OverrideGraph {
    /// Root node index.
    pub const ROOT: usize = 0;

    pub fn new(default: Value) -> Self {
        Self {
            values: vec![default],
            edges: Vec::new(),
        }
    }

    /// Add an override. An unconditional context replaces the root default
    /// instead of adding a node; later settings win.
    pub fn add_override(&mut self, context: Context, value: Value) {
        if context.is_unconditional() {
            self.values[Self::ROOT] = value;
            return;
        }
        let target = self.values.len();
        self.values.push(value);
        self.edges.push(Edge {
            source: Self::ROOT,
            target,
            context,
        });
    }

    pub fn root_value(&self) -> &Value {
        &self.values[Self::ROOT]
    }

    pub fn value(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of value nodes, root included (always at least 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, Vec<Edge>) {
        (self.values, self.edges)
    }
}
