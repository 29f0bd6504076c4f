//! Per-key orchestration and snapshot assembly.
//!
//! Keys are compiled strictly sequentially: the dimension and structure
//! registries are plain mutable state owned by this pass, so nothing needs
//! locking. A failing key contributes one diagnostic and is left out of the
//! snapshot; every other key still compiles.

use strata_core::{DimensionTable, Node, Scalar, StructureTable, TypeId, Value, ir};

use crate::build::build_key;
use crate::diagnostics::Diagnostics;
use crate::error::{CompileError, TreePath};
use crate::extract::extract;
use crate::graph::OverrideGraph;
use crate::linearize::{OverrideTree, linearize};
use crate::propagate::propagate;
use crate::trim::Restrictions;

/// Reserved pseudo-key enumerating the schema's key names. It bypasses
/// extraction and propagation and is always a string array.
pub const KEYS_PSEUDO_KEY: &str = "keys";

/// One key's raw input: its name and override graph.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInput {
    pub name: String,
    pub graph: OverrideGraph,
}

impl KeyInput {
    pub fn new(name: impl Into<String>, graph: OverrideGraph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }
}

/// Everything the front-end hands the compiler for one run.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub dimensions: DimensionTable,
    pub keys: Vec<KeyInput>,
    /// Namespace path segments emitters scope generated code under.
    pub namespaces: Vec<String>,
}

/// Result of a compilation run: the snapshot for every key that compiled,
/// plus the diagnostics for every key that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutcome {
    pub snapshot: ir::Snapshot,
    pub diagnostics: Diagnostics,
}

impl CompileOutcome {
    /// Whether any key failed to compile.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Compile a unit under the given `(dimension, values)` restriction pairs.
pub fn compile(unit: CompilationUnit, restrictions: &[(String, Vec<String>)]) -> CompileOutcome {
    let CompilationUnit {
        mut dimensions,
        keys,
        namespaces,
    } = unit;

    let mut diagnostics = Diagnostics::new();
    let restrictions = Restrictions::parse(&dimensions, restrictions, &mut diagnostics);
    restrictions.mark_skip(&mut dimensions);

    let mut structures = StructureTable::new();
    let mut compiled = Vec::with_capacity(keys.len());

    for KeyInput { name, graph } in keys {
        let mut tree = linearize(graph);
        restrictions.trim(&mut tree);

        match compile_key(&name, tree, &dimensions, &mut structures) {
            Ok(key) => compiled.push(key),
            Err(error) => diagnostics.error(name, error),
        }
    }

    CompileOutcome {
        snapshot: ir::Snapshot {
            dimensions: dimensions.enumerate(),
            structures: structures.enumerate(),
            keys: compiled,
            namespaces,
        },
        diagnostics,
    }
}

fn compile_key(
    name: &str,
    mut tree: OverrideTree,
    dimensions: &DimensionTable,
    structures: &mut StructureTable,
) -> Result<ir::Key, CompileError> {
    if name == KEYS_PSEUDO_KEY {
        return compile_keys_pseudo_key(name, tree, dimensions);
    }

    let extraction = extract(&mut tree.root.value, structures)?;
    propagate(&tree)?;

    let mut key = build_key(name, tree, dimensions);
    key.type_id = extraction.type_id;
    key.type_name = structures.type_name(extraction.type_id);
    key.kind = extraction.kind;
    key.alias = extraction.alias;
    Ok(key)
}

/// The reserved key skips type inference but not shape validation: every
/// branch must be an array of strings.
fn compile_keys_pseudo_key(
    name: &str,
    tree: OverrideTree,
    dimensions: &DimensionTable,
) -> Result<ir::Key, CompileError> {
    let mut shape_error = None;
    tree.root.walk(&mut |node| {
        if shape_error.is_none()
            && let Err(error) = check_string_array(&node.value)
        {
            shape_error = Some(error);
        }
    });
    if let Some(error) = shape_error {
        return Err(error);
    }

    let mut key = build_key(name, tree, dimensions);
    key.type_id = TypeId::STRING;
    key.type_name = "string".to_owned();
    key.kind = ir::Kind::Array;
    Ok(key)
}

fn check_string_array(value: &Value) -> Result<(), CompileError> {
    let Node::Array { elements } = &value.node else {
        return Err(CompileError::MalformedSchema {
            path: TreePath::root(),
            reason: format!(
                "reserved key `{KEYS_PSEUDO_KEY}` must be an array of strings, found {}",
                value.type_label()
            ),
        });
    };
    for (index, element) in elements.iter().enumerate() {
        if !matches!(
            &element.node,
            Node::Scalar {
                scalar: Scalar::String,
                ..
            }
        ) {
            let mut path = TreePath::root();
            path.push_index(index);
            return Err(CompileError::MalformedSchema {
                path,
                reason: format!(
                    "reserved key `{KEYS_PSEUDO_KEY}` must hold strings, found {}",
                    element.type_label()
                ),
            });
        }
    }
    Ok(())
}
