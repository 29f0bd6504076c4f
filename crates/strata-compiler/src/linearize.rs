//! Specificity linearization.
//!
//! Reduces a key's raw override graph to a single-parent tree: every
//! override hangs off the *most specific* context that still contains it,
//! so the decision-tree builder can nest branches with correct fallback.
//!
//! The algorithm mirrors the containment algebra exactly:
//! 1. sort the raw edges by context order;
//! 2. for every ordered pair (i before j) where `context(i)` contains
//!    `context(j)`, synthesize an edge `target(i) -> target(j)` carrying
//!    `context(j)` - this materializes every generalizer -> specializer
//!    relationship, including ones absent from the raw input;
//! 3. walk the synthesized edges in reverse insertion order, then the raw
//!    edges in reverse sorted order, keeping only the first edge seen into
//!    each target.
//!
//! Because containers of a context are exactly its zero-padded prefixes,
//! competing parents always form a chain and the reverse walk lands on the
//! most specific one.

use strata_core::{Context, Value};

use crate::graph::{Edge, OverrideGraph};

/// One node of the linearized tree. Children are kept sorted by context
/// order so depth-first traversal is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideNode {
    pub context: Context,
    pub value: Value,
    pub children: Vec<OverrideNode>,
}

impl OverrideNode {
    fn leaf(context: Context, value: Value) -> Self {
        Self {
            context,
            value,
            children: Vec::new(),
        }
    }

    /// Depth-first preorder visit of every node.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a OverrideNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A key's overrides as a specificity tree rooted at the unconditional
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideTree {
    pub root: OverrideNode,
}

impl OverrideTree {
    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.root.walk(&mut |_| count += 1);
        count
    }
}

/// Linearize a raw override graph into a specificity tree.
pub fn linearize(graph: OverrideGraph) -> OverrideTree {
    let (values, raw_edges) = graph.into_parts();

    let mut edges: Vec<Edge> = raw_edges;
    edges.sort_by(|a, b| a.context.cmp(&b.context));

    // Step 2: materialize generalizer -> specializer edges.
    let mut synthesized: Vec<Edge> = Vec::new();
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if edges[i].context.contains(&edges[j].context) {
                synthesized.push(Edge {
                    source: edges[i].target,
                    target: edges[j].target,
                    context: edges[j].context.clone(),
                });
            }
        }
    }

    // Step 3: single most-specific parent per target. Synthesized edges in
    // reverse insertion order first, raw edges after; first in wins.
    let mut parent: Vec<Option<usize>> = vec![None; values.len()];
    for edge in synthesized.iter().rev().chain(edges.iter().rev()) {
        if parent[edge.target].is_none() {
            parent[edge.target] = Some(edge.source);
        }
    }

    assemble(values, edges, parent)
}

fn assemble(values: Vec<Value>, edges: Vec<Edge>, parent: Vec<Option<usize>>) -> OverrideTree {
    let mut contexts: Vec<Context> = vec![Context::unconditional(); values.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); values.len()];
    for edge in edges {
        contexts[edge.target] = edge.context;
    }
    for (target, source) in parent.iter().enumerate() {
        if let Some(source) = source {
            children[*source].push(target);
        }
    }

    let mut values: Vec<Option<Value>> = values.into_iter().map(Some).collect();
    let root = collect(
        OverrideGraph::ROOT,
        &mut values,
        &contexts,
        &children,
    );
    OverrideTree { root }
}

fn collect(
    index: usize,
    values: &mut Vec<Option<Value>>,
    contexts: &[Context],
    children: &[Vec<usize>],
) -> OverrideNode {
    let value = values[index]
        .take()
        .unwrap_or_else(|| panic!("linearize: node {index} visited twice"));
    let mut node = OverrideNode::leaf(contexts[index].clone(), value);
    let mut child_indices = children[index].clone();
    child_indices.sort_by(|a, b| contexts[*a].cmp(&contexts[*b]));
    for child in child_indices {
        node.children.push(collect(child, values, contexts, children));
    }
    node
}
