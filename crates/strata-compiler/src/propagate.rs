//! Structural propagation.
//!
//! Validates every non-representative branch of a key against the
//! representative (the unconditional default): same scalar types, no extra
//! or mismatched properties, element-uniform containers, and constraint
//! checks against the representative position. A property absent on a
//! branch is legal - the decision tree falls back to the enclosing default,
//! so emitters always resolve a complete value.
//!
//! The walk is lock-step and read-only: branch and ancestor chain are
//! traversed together, and nothing is mutated.

use strata_core::{Node, Scalar, Value};

use crate::error::{CompileError, TreePath};
use crate::linearize::{OverrideNode, OverrideTree};

/// Validate every override branch of a linearized key tree.
pub fn propagate(tree: &OverrideTree) -> Result<(), CompileError> {
    let mut ancestors: Vec<&Value> = vec![&tree.root.value];
    for child in &tree.root.children {
        visit(child, &mut ancestors)?;
    }
    Ok(())
}

fn visit<'a>(node: &'a OverrideNode, ancestors: &mut Vec<&'a Value>) -> Result<(), CompileError> {
    let mut path = TreePath::root();
    check_value(&node.value, ancestors, true, &mut path)?;
    ancestors.push(&node.value);
    for child in &node.children {
        visit(child, ancestors)?;
    }
    ancestors.pop();
    Ok(())
}

/// Check one branch value against its ancestor chain (representative
/// first). `merge` is true while ancestors beyond the representative are
/// allowed to contribute property positions; element checks inside
/// containers compare against the representative element alone.
fn check_value(
    value: &Value,
    ancestors: &[&Value],
    merge: bool,
    path: &mut TreePath,
) -> Result<(), CompileError> {
    let representative = ancestors[0];

    match (&representative.node, &value.node) {
        (Node::Scalar { scalar, .. }, Node::Scalar { scalar: found, content }) => {
            if scalar != found {
                return Err(mismatch(path, scalar.name(), value));
            }
            check_constraint(representative, *found, content, path)
        }

        (Node::Array { elements }, Node::Array { elements: found }) => {
            let element = representative_element(elements, path)?;
            for (index, item) in found.iter().enumerate() {
                path.push_index(index);
                check_value(item, &[element], false, path)?;
                path.pop();
            }
            Ok(())
        }

        // An object literal on a branch is welcome where the
        // representative is a dynamic map; its entries are checked as map
        // entries.
        (Node::Dynamic { properties }, Node::Dynamic { properties: found })
        | (Node::Dynamic { properties }, Node::Object { properties: found, .. }) => {
            let (_, element) = representative_entry(properties, path)?;
            for (name, entry) in found {
                path.push(name.as_str());
                let chain = property_chain(ancestors, name, merge);
                if chain.is_empty() {
                    check_value(entry, &[element], false, path)?;
                } else {
                    check_value(entry, &chain, merge, path)?;
                }
                path.pop();
            }
            Ok(())
        }

        (Node::Object { .. }, Node::Object { properties: found, .. }) => {
            for (name, entry) in found {
                path.push(name.as_str());
                let chain = property_chain(ancestors, name, true);
                if chain.is_empty() {
                    // Not a position the representative (or any ancestor
                    // between) knows about.
                    return Err(CompileError::TypeMismatch {
                        path: path.clone(),
                        expected: "no such property on the default value".to_owned(),
                        actual: entry.type_label().to_owned(),
                    });
                }
                check_value(entry, &chain, merge, path)?;
                path.pop();
            }
            Ok(())
        }

        _ => Err(mismatch(path, representative.type_label(), value)),
    }
}

/// Matching property positions across the ancestor chain, representative
/// first. Empty when no ancestor carries the property.
fn property_chain<'a>(ancestors: &[&'a Value], name: &str, merge: bool) -> Vec<&'a Value> {
    if !merge {
        return match find_property(ancestors[0], name) {
            Some(value) => vec![value],
            None => Vec::new(),
        };
    }
    ancestors
        .iter()
        .filter_map(|ancestor| find_property(ancestor, name))
        .collect()
}

fn find_property<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let properties = match &value.node {
        Node::Object { properties, .. } | Node::Dynamic { properties } => properties,
        _ => return None,
    };
    properties
        .iter()
        .find(|(property, _)| property == name)
        .map(|(_, value)| value)
}

fn check_constraint(
    representative: &Value,
    scalar: Scalar,
    content: &str,
    path: &TreePath,
) -> Result<(), CompileError> {
    // Booleans carry no useful constraint surface.
    if scalar == Scalar::Boolean {
        return Ok(());
    }
    if let Some(constraint) = &representative.constraint
        && !constraint.is_satisfied_by(content)
    {
        return Err(CompileError::ConstraintViolation {
            path: path.clone(),
            content: content.to_owned(),
            constraint: constraint.describe(),
        });
    }
    Ok(())
}

fn mismatch(path: &TreePath, expected: &str, actual: &Value) -> CompileError {
    CompileError::TypeMismatch {
        path: path.clone(),
        expected: expected.to_owned(),
        actual: actual.type_label().to_owned(),
    }
}

fn representative_element<'a>(
    elements: &'a [Value],
    path: &TreePath,
) -> Result<&'a Value, CompileError> {
    elements.first().ok_or_else(|| CompileError::MalformedSchema {
        path: path.clone(),
        reason: "default array literal has no elements".to_owned(),
    })
}

fn representative_entry<'a>(
    properties: &'a [(String, Value)],
    path: &TreePath,
) -> Result<&'a (String, Value), CompileError> {
    properties.first().ok_or_else(|| CompileError::MalformedSchema {
        path: path.clone(),
        reason: "default dynamic map has no entries".to_owned(),
    })
}
