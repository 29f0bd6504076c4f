//! The compiled intermediate representation.
//!
//! Defines the contract between the compiler core and the source emitters:
//! a `Snapshot` holding the dimension enumeration, the interned structure
//! table, and one `Key` per compiled configuration key. Emitters walk the
//! per-key `Dimension` tree to produce nested conditionals; the compiler
//! never looks at a snapshot again once it is built.

use crate::registry::ValueId;
use crate::structure::TypeId;
use crate::value::Value;

/// Container kind of a value: plain, array, or string-keyed dynamic map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    None,
    Array,
    Dynamic,
}

/// One dimension with its enumerated values, as emitted into the snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DimensionEnumeration {
    pub dimension: String,
    /// `(value name, value id)` in id order.
    pub values: Vec<(String, u32)>,
}

/// One branch of a dimension node: the value id it matches, the literal
/// attached at this depth (if any), and deeper overrides nested beneath it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DimensionValue {
    pub index: ValueId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Box<Dimension>>,
}

impl DimensionValue {
    pub fn new(index: ValueId) -> Self {
        Self {
            index,
            value: None,
            dimension: None,
        }
    }
}

/// A branch point over one dimension.
///
/// `values` lists the live branches; `next` chains straight through to the
/// following dimension for overrides that leave this one unset. `skip`
/// mirrors the registry flag: a skipped dimension has one legal outcome and
/// emitters elide its dispatch.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Dimension {
    pub dimension: String,
    pub skip: bool,
    pub values: Vec<DimensionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Dimension>>,
}

impl Dimension {
    pub fn new(dimension: impl Into<String>, skip: bool) -> Self {
        Self {
            dimension: dimension.into(),
            skip,
            values: Vec::new(),
            next: None,
        }
    }
}

/// One compiled key.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Key {
    pub key: String,
    /// The unconditional default value.
    pub value: Value,
    pub type_id: TypeId,
    pub type_name: String,
    pub kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Decision tree over the key's overrides; absent when only the
    /// default exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Box<Dimension>>,
}

/// One interned composite in snapshot form.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StructureIr {
    pub identifier: String,
    pub properties: Vec<PropertyIr>,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PropertyIr {
    pub property: String,
    pub type_name: String,
    pub kind: Kind,
}

/// The compiled artifact handed downstream. The sole contract between the
/// compiler core and the emitters.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Snapshot {
    pub dimensions: Vec<DimensionEnumeration>,
    pub structures: Vec<StructureIr>,
    pub keys: Vec<Key>,
    pub namespaces: Vec<String>,
}

impl Snapshot {
    /// Look up a compiled key by name.
    pub fn key(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|key| key.key == name)
    }
}
