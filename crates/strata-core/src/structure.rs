//! Interned composite types.
//!
//! Every object literal the extractor encounters is canonicalized into a
//! sorted (property, type id, kind) signature and interned here. Two
//! structurally identical objects, in the same key or across keys, resolve
//! to the same `TypeId` and produce exactly one generated type.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::ir::{self, Kind};

/// Resolved type of a value position.
///
/// Small fixed ids name the primitives; composite ids are assigned from
/// `TypeId::USER_MIN` upward in interning order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOLEAN: TypeId = TypeId(2);
    pub const FLOAT: TypeId = TypeId(3);
    pub const INTEGER: TypeId = TypeId(4);
    pub const STRING: TypeId = TypeId(5);

    /// First id available to interned composites.
    pub const USER_MIN: TypeId = TypeId(100);

    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn is_primitive(self) -> bool {
        self.0 < Self::USER_MIN.0
    }

    /// Name of a primitive type id, `None` for composites.
    pub fn primitive_name(self) -> Option<&'static str> {
        match self {
            TypeId::BOOLEAN => Some("boolean"),
            TypeId::FLOAT => Some("float"),
            TypeId::INTEGER => Some("integer"),
            TypeId::STRING => Some("string"),
            _ => None,
        }
    }
}

/// Type and container kind of one named property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySignature {
    pub type_id: TypeId,
    pub kind: Kind,
}

/// An object type under construction: named properties, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    properties: BTreeMap<String, PropertySignature>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Returns false if the name is already present.
    pub fn add_property(&mut self, name: &str, type_id: TypeId, kind: Kind) -> bool {
        if self.properties.contains_key(name) {
            return false;
        }
        self.properties
            .insert(name.to_owned(), PropertySignature { type_id, kind });
        true
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, PropertySignature)> {
        self.properties.iter().map(|(name, sig)| (name.as_str(), *sig))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Canonical signature: properties in sorted order, each with its kind
    /// marker and type id. Structurally identical objects canonicalize to
    /// the same string.
    pub fn canonical(&self) -> String {
        let mut signature = String::new();
        for (name, sig) in &self.properties {
            signature.push('&');
            signature.push_str(name);
            match sig.kind {
                Kind::Array => signature.push_str("[]"),
                Kind::Dynamic => signature.push_str("{}"),
                Kind::None => {}
            }
            signature.push('=');
            signature.push_str(&sig.type_id.as_u32().to_string());
        }
        signature
    }
}

/// One interned composite with its assigned id and bound aliases.
#[derive(Debug, Clone)]
pub struct StructureEntry {
    pub structure: Structure,
    pub id: TypeId,
    pub aliases: Vec<String>,
}

impl StructureEntry {
    /// Generated type name for this composite.
    pub fn name(&self) -> String {
        format!("Class_{}", self.id.as_u32())
    }
}

/// The composite type table, shared across the whole compilation.
///
/// Keyed by canonical signature; iteration order is interning order, which
/// is also id order.
#[derive(Debug, Clone, Default)]
pub struct StructureTable {
    entries: IndexMap<String, StructureEntry>,
    aliases: IndexMap<String, TypeId>,
}

impl StructureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a structure, returning the existing id when an identical
    /// signature was seen before.
    pub fn intern(&mut self, structure: Structure) -> TypeId {
        let next = TypeId(TypeId::USER_MIN.0 + self.entries.len() as u32);
        self.entries
            .entry(structure.canonical())
            .or_insert(StructureEntry {
                structure,
                id: next,
                aliases: Vec::new(),
            })
            .id
    }

    pub fn get(&self, id: TypeId) -> Option<&StructureEntry> {
        let index = id.as_u32().checked_sub(TypeId::USER_MIN.0)? as usize;
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// Bind a user-chosen alias to a composite. Idempotent for the same id;
    /// returns false when the alias already names a different composite.
    pub fn bind_alias(&mut self, id: TypeId, alias: &str) -> bool {
        match self.aliases.get(alias) {
            Some(bound) => *bound == id,
            None => {
                self.aliases.insert(alias.to_owned(), id);
                let index = (id.as_u32() - TypeId::USER_MIN.0) as usize;
                let (_, entry) = self
                    .entries
                    .get_index_mut(index)
                    .unwrap_or_else(|| panic!("StructureTable: type id {} not interned", id.as_u32()));
                entry.aliases.push(alias.to_owned());
                true
            }
        }
    }

    pub fn alias(&self, alias: &str) -> Option<TypeId> {
        self.aliases.get(alias).copied()
    }

    /// Name of any type id: primitive names for builtins, generated names
    /// for composites.
    ///
    /// # Panics
    /// Panics if a composite id was not interned by this table.
    pub fn type_name(&self, id: TypeId) -> String {
        if let Some(name) = id.primitive_name() {
            return name.to_owned();
        }
        self.get(id)
            .map(StructureEntry::name)
            .unwrap_or_else(|| panic!("StructureTable: type id {} not interned", id.as_u32()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureEntry> {
        self.entries.values()
    }

    /// Snapshot form of the table, in id order.
    pub fn enumerate(&self) -> Vec<ir::StructureIr> {
        self.entries
            .values()
            .map(|entry| ir::StructureIr {
                identifier: entry.name(),
                properties: entry
                    .structure
                    .properties()
                    .map(|(name, sig)| ir::PropertyIr {
                        property: name.to_owned(),
                        type_name: self.type_name(sig.type_id),
                        kind: sig.kind,
                    })
                    .collect(),
                aliases: entry.aliases.clone(),
            })
            .collect()
    }
}
