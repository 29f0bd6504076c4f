//! Composite type extraction.
//!
//! Types the representative (default) branch of a key: scalars map to the
//! primitive ids, objects intern their canonical signature into the shared
//! structure table, arrays and dynamic maps must be element-uniform. The
//! pass annotates each typed object node with its interned id so emitters
//! can name the generated type at that position.

use strata_core::{Kind, Node, Structure, StructureTable, TypeId, Value};

use crate::error::{CompileError, TreePath};

/// Result of typing a key's representative value.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub type_id: TypeId,
    pub kind: Kind,
    pub alias: Option<String>,
}

/// Type the representative value, interning composites along the way.
pub fn extract(value: &mut Value, structures: &mut StructureTable) -> Result<Extraction, CompileError> {
    let kind = value.kind();
    let alias = value.alias.clone();
    let mut path = TreePath::root();
    let type_id = process_value(value, structures, &mut path)?;
    Ok(Extraction {
        type_id,
        kind,
        alias,
    })
}

/// Post-order type of one value node. For containers the returned id is
/// the *element* type; the container kind travels separately.
pub fn process_value(
    value: &mut Value,
    structures: &mut StructureTable,
    path: &mut TreePath,
) -> Result<TypeId, CompileError> {
    let alias = value.alias.clone();
    match &mut value.node {
        Node::Scalar { scalar, .. } => Ok(scalar.type_id()),

        Node::Array { elements } => {
            let (first, rest) = split_elements(elements, path)?;
            path.push_index(0);
            let element_type = process_value(first, structures, path)?;
            path.pop();
            for (index, element) in rest.iter_mut().enumerate() {
                path.push_index(index + 1);
                let other = process_value(element, structures, path)?;
                if other != element_type {
                    return Err(mismatch(path, structures, element_type, element));
                }
                path.pop();
            }
            Ok(element_type)
        }

        Node::Dynamic { properties } => {
            let (first, rest) = split_properties(properties, path)?;
            let (first_name, first_value) = first;
            path.push(first_name.as_str());
            let element_type = process_value(first_value, structures, path)?;
            path.pop();
            for (name, property) in rest.iter_mut() {
                path.push(name.as_str());
                let other = process_value(property, structures, path)?;
                if other != element_type {
                    return Err(mismatch(path, structures, element_type, property));
                }
                path.pop();
            }
            Ok(element_type)
        }

        Node::Object {
            properties,
            structure,
        } => {
            let mut signature = Structure::new();
            for (name, property) in properties.iter_mut() {
                path.push(name.as_str());
                let property_type = process_value(property, structures, path)?;
                path.pop();
                if !signature.add_property(name, property_type, property.kind()) {
                    return Err(CompileError::MalformedSchema {
                        path: path.clone(),
                        reason: format!("duplicate property `{name}`"),
                    });
                }
            }
            if signature.is_empty() {
                return Err(CompileError::MalformedSchema {
                    path: path.clone(),
                    reason: "object literal has no properties".to_owned(),
                });
            }

            let id = structures.intern(signature);
            *structure = Some(id);
            if let Some(alias) = alias
                && !structures.bind_alias(id, &alias)
            {
                return Err(CompileError::RegistrationConflict {
                    alias,
                    path: path.clone(),
                });
            }
            Ok(id)
        }
    }
}

fn mismatch(
    path: &TreePath,
    structures: &StructureTable,
    expected: TypeId,
    actual: &Value,
) -> CompileError {
    CompileError::TypeMismatch {
        path: path.clone(),
        expected: structures.type_name(expected),
        actual: actual.type_label().to_owned(),
    }
}

fn split_elements<'a>(
    elements: &'a mut [Value],
    path: &TreePath,
) -> Result<(&'a mut Value, &'a mut [Value]), CompileError> {
    match elements.split_first_mut() {
        Some(split) => Ok(split),
        None => Err(CompileError::MalformedSchema {
            path: path.clone(),
            reason: "array literal has no elements to derive a type from".to_owned(),
        }),
    }
}

fn split_properties<'a>(
    properties: &'a mut [(String, Value)],
    path: &TreePath,
) -> Result<(&'a mut (String, Value), &'a mut [(String, Value)]), CompileError> {
    match properties.split_first_mut() {
        Some(split) => Ok(split),
        None => Err(CompileError::MalformedSchema {
            path: path.clone(),
            reason: "dynamic map has no entries to derive a type from".to_owned(),
        }),
    }
}
