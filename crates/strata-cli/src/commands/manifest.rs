//! JSON schema manifest loader.
//!
//! The manifest is the CLI's input boundary: dimension declarations with
//! their enumerated values, per-key defaults and contextual overrides, and
//! optional namespace segments. Values are plain JSON; an object carrying
//! `$value` is an annotation wrapper that attaches a constraint, an alias,
//! or the dynamic-map marker to the inner value.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value as Json};
use strata_compiler::{CompilationUnit, KeyInput, OverrideGraph};
use strata_core::{Constraint, Context, DimensionTable, Node, Scalar, Value};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("key `{key}`: override context names unknown dimension `{dimension}`")]
    UnknownDimension { key: String, dimension: String },

    #[error("key `{key}`: `{value}` is not a declared value of dimension `{dimension}`")]
    UnknownValue {
        key: String,
        dimension: String,
        value: String,
    },

    #[error("key `{key}`: invalid regex `{pattern}`: {reason}")]
    InvalidPattern {
        key: String,
        pattern: String,
        reason: String,
    },

    #[error("key `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDoc {
    #[serde(default)]
    namespaces: Vec<String>,
    #[serde(default)]
    dimensions: Vec<DimensionDecl>,
    #[serde(default)]
    keys: Map<String, Json>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DimensionDecl {
    dimension: String,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyDecl {
    default: Json,
    #[serde(default)]
    overrides: Vec<OverrideDecl>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideDecl {
    #[serde(default)]
    context: BTreeMap<String, String>,
    value: Json,
}

/// Read the manifest text from a file, or stdin when the path is `-`.
pub fn load_manifest_text(path: Option<&Path>) -> Result<String, String> {
    let Some(path) = path else {
        return Err("manifest is required: pass a file path or '-' for stdin".to_owned());
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Parse a manifest into a compilation unit.
///
/// Dimensions are interned before any context is built, so every override
/// context comes out at full width. Contexts may only name declared
/// dimensions and values.
pub fn parse(text: &str) -> Result<CompilationUnit, ManifestError> {
    let doc: ManifestDoc = serde_json::from_str(text)?;

    let mut dimensions = DimensionTable::new();
    for decl in &doc.dimensions {
        let id = dimensions.intern(&decl.dimension);
        for value in &decl.values {
            dimensions.entry_mut(id).values.intern(value);
        }
    }

    let mut keys = Vec::with_capacity(doc.keys.len());
    for (name, decl) in doc.keys {
        let decl: KeyDecl = serde_json::from_value(decl)?;
        let mut graph = OverrideGraph::new(convert_value(&decl.default, &name)?);
        for entry in &decl.overrides {
            let context = resolve_context(&dimensions, &entry.context, &name)?;
            graph.add_override(context, convert_value(&entry.value, &name)?);
        }
        keys.push(KeyInput::new(name, graph));
    }

    Ok(CompilationUnit {
        dimensions,
        keys,
        namespaces: doc.namespaces,
    })
}

fn resolve_context(
    dimensions: &DimensionTable,
    pairs: &BTreeMap<String, String>,
    key: &str,
) -> Result<Context, ManifestError> {
    let mut context = Context::with_width(dimensions.len());
    for (dimension, value) in pairs {
        let id = dimensions
            .get(dimension)
            .ok_or_else(|| ManifestError::UnknownDimension {
                key: key.to_owned(),
                dimension: dimension.clone(),
            })?;
        let value_id = dimensions.entry(id).values.get(value).ok_or_else(|| {
            ManifestError::UnknownValue {
                key: key.to_owned(),
                dimension: dimension.clone(),
                value: value.clone(),
            }
        })?;
        context.set(id, value_id);
    }
    Ok(context)
}

fn convert_value(json: &Json, key: &str) -> Result<Value, ManifestError> {
    match json {
        Json::Bool(content) => Ok(Value::boolean(*content)),
        Json::String(content) => Ok(Value::string(content)),
        Json::Number(number) => match number.as_i64() {
            Some(content) => Ok(Value::integer(content)),
            None => Ok(Value::scalar(Scalar::Float, number.to_string())),
        },
        Json::Array(items) => {
            let elements: Vec<Value> = items
                .iter()
                .map(|item| convert_value(item, key))
                .collect::<Result<_, _>>()?;
            Ok(Value::array(elements))
        }
        Json::Object(map) => {
            if map.keys().any(|k| k.starts_with('$')) {
                convert_annotated(map, key)
            } else {
                let properties: Vec<(String, Value)> = map
                    .iter()
                    .map(|(name, property)| Ok((name.clone(), convert_value(property, key)?)))
                    .collect::<Result<_, ManifestError>>()?;
                Ok(Value::object(properties))
            }
        }
        Json::Null => Err(ManifestError::InvalidValue {
            key: key.to_owned(),
            reason: "null is not a configuration value".to_owned(),
        }),
    }
}

/// An object with `$`-prefixed keys is an annotation wrapper around the
/// value under `$value`.
fn convert_annotated(map: &Map<String, Json>, key: &str) -> Result<Value, ManifestError> {
    for name in map.keys() {
        if !matches!(
            name.as_str(),
            "$value" | "$dynamic" | "$regex" | "$in" | "$alias"
        ) {
            return Err(ManifestError::InvalidValue {
                key: key.to_owned(),
                reason: format!("unknown annotation `{name}`"),
            });
        }
    }
    let inner = map.get("$value").ok_or_else(|| ManifestError::InvalidValue {
        key: key.to_owned(),
        reason: "annotated value is missing `$value`".to_owned(),
    })?;
    let mut value = convert_value(inner, key)?;

    if matches!(map.get("$dynamic"), Some(Json::Bool(true))) {
        let Node::Object { properties, .. } = value.node else {
            return Err(ManifestError::InvalidValue {
                key: key.to_owned(),
                reason: "`$dynamic` requires an object value".to_owned(),
            });
        };
        value = Value::dynamic(properties);
    }

    if map.contains_key("$regex") && map.contains_key("$in") {
        return Err(ManifestError::InvalidValue {
            key: key.to_owned(),
            reason: "`$regex` and `$in` are mutually exclusive".to_owned(),
        });
    }

    match map.get("$regex") {
        None => {}
        Some(Json::String(pattern)) => {
            let constraint =
                Constraint::regex(pattern).map_err(|e| ManifestError::InvalidPattern {
                    key: key.to_owned(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            value = value.with_constraint(constraint);
        }
        Some(_) => {
            return Err(ManifestError::InvalidValue {
                key: key.to_owned(),
                reason: "`$regex` must be a string".to_owned(),
            });
        }
    }

    match map.get("$in") {
        None => {}
        Some(Json::Array(items)) => {
            let allowed: Vec<&str> = items
                .iter()
                .map(|item| item.as_str())
                .collect::<Option<_>>()
                .ok_or_else(|| ManifestError::InvalidValue {
                    key: key.to_owned(),
                    reason: "`$in` must be an array of strings".to_owned(),
                })?;
            value = value.with_constraint(Constraint::one_of(allowed));
        }
        Some(_) => {
            return Err(ManifestError::InvalidValue {
                key: key.to_owned(),
                reason: "`$in` must be an array of strings".to_owned(),
            });
        }
    }

    match map.get("$alias") {
        None => {}
        Some(Json::String(alias)) => value = value.with_alias(alias),
        Some(_) => {
            return Err(ManifestError::InvalidValue {
                key: key.to_owned(),
                reason: "`$alias` must be a string".to_owned(),
            });
        }
    }

    Ok(value)
}
