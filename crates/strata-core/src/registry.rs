//! Dimension and value registries.
//!
//! Both tables intern names to dense integer ids in first-seen order and
//! never remove entries. Every dimension owns its value table, with the
//! implicit `"NONE"` value pre-interned at id 0 so that a zero context slot
//! always reads back as "unset".

use indexmap::IndexMap;

use crate::context::Context;
use crate::ir;

/// Dense id of a dimension, assigned in first-seen order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
pub struct DimensionId(u32);

impl DimensionId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense id of a value within one dimension. Id 0 is the implicit
/// "unset/default" entry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
pub struct ValueId(u32);

impl ValueId {
    /// The implicit "unset" value every dimension starts with.
    pub const NONE: ValueId = ValueId(0);

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Name the "unset" value is registered under.
pub const NONE_VALUE: &str = "NONE";

#[derive(Debug, Clone)]
struct ValueEntry {
    id: ValueId,
    count: u32,
}

/// Per-dimension value registry. Insertion order is id order.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    entries: IndexMap<String, ValueEntry>,
}

impl ValueTable {
    /// Intern a value name, returning its id. Idempotent; bumps the
    /// reference count on every call.
    pub fn intern(&mut self, name: &str) -> ValueId {
        let next = ValueId(self.entries.len() as u32);
        let entry = self
            .entries
            .entry(name.to_owned())
            .or_insert(ValueEntry { id: next, count: 0 });
        entry.count += 1;
        entry.id
    }

    pub fn get(&self, name: &str) -> Option<ValueId> {
        self.entries.get(name).map(|e| e.id)
    }

    /// Resolve an id back to its name.
    ///
    /// # Panics
    /// Panics if the id was not interned by this table.
    pub fn name(&self, id: ValueId) -> &str {
        self.entries
            .get_index(id.index())
            .map(|(name, _)| name.as_str())
            .unwrap_or_else(|| panic!("ValueTable: value id {} not interned", id.as_u32()))
    }

    pub fn count(&self, id: ValueId) -> u32 {
        self.entries[id.index()].count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueId, &str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (entry.id, name.as_str()))
    }
}

/// One registered dimension: dense id, reference count, value table, and
/// the skip flag the trimmer sets once only one legal value remains.
#[derive(Debug, Clone)]
pub struct DimensionEntry {
    pub id: DimensionId,
    pub count: u32,
    pub values: ValueTable,
    pub skip: bool,
}

/// The dimension registry. Insertion order is id order, which is also the
/// nesting order of the generated decision trees.
#[derive(Debug, Clone, Default)]
pub struct DimensionTable {
    entries: IndexMap<String, DimensionEntry>,
}

impl DimensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a dimension name, returning its id. First insertion creates
    /// the `"NONE"` value at id 0.
    pub fn intern(&mut self, name: &str) -> DimensionId {
        let next = DimensionId(self.entries.len() as u32);
        let entry = self.entries.entry(name.to_owned()).or_insert_with(|| {
            let mut values = ValueTable::default();
            values.intern(NONE_VALUE);
            DimensionEntry {
                id: next,
                count: 0,
                values,
                skip: false,
            }
        });
        entry.count += 1;
        entry.id
    }

    pub fn get(&self, name: &str) -> Option<DimensionId> {
        self.entries.get(name).map(|e| e.id)
    }

    /// Entry for an interned dimension.
    ///
    /// # Panics
    /// Panics if the id was not interned by this table.
    pub fn entry(&self, id: DimensionId) -> &DimensionEntry {
        self.entries
            .get_index(id.index())
            .map(|(_, entry)| entry)
            .unwrap_or_else(|| panic!("DimensionTable: dimension id {} not interned", id.as_u32()))
    }

    pub fn entry_mut(&mut self, id: DimensionId) -> &mut DimensionEntry {
        self.entries
            .get_index_mut(id.index())
            .map(|(_, entry)| entry)
            .unwrap_or_else(|| panic!("DimensionTable: dimension id {} not interned", id.as_u32()))
    }

    pub fn name(&self, id: DimensionId) -> &str {
        self.entries
            .get_index(id.index())
            .map(|(name, _)| name.as_str())
            .unwrap_or_else(|| panic!("DimensionTable: dimension id {} not interned", id.as_u32()))
    }

    pub fn mark_skip(&mut self, id: DimensionId) {
        self.entry_mut(id).skip = true;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DimensionEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Build a full-width context from `(dimension, value)` name pairs,
    /// interning names on first reference.
    ///
    /// Contexts are positional, so this should only run once every
    /// dimension the schema mentions has been interned; a dimension first
    /// seen here widens the table and leaves earlier contexts short (they
    /// read as `NONE` in the new slots).
    pub fn context(&mut self, pairs: &[(String, String)]) -> Context {
        for (dimension, value) in pairs {
            let id = self.intern(dimension);
            self.entry_mut(id).values.intern(value);
        }

        let mut context = Context::with_width(self.entries.len());
        for (dimension, value) in pairs {
            let id = self.entries[dimension.as_str()].id;
            let value_id = self.entries[dimension.as_str()]
                .values
                .get(value)
                .unwrap_or(ValueId::NONE);
            context.set(id, value_id);
        }
        context
    }

    /// Resolve a context back to `(dimension, value)` name pairs, one per
    /// slot. Mostly useful for debug output.
    pub fn resolve(&self, context: &Context) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, entry)| {
                let value = context.get(entry.id);
                (name.clone(), entry.values.name(value).to_owned())
            })
            .collect()
    }

    /// Snapshot form of the registry, sorted by dimension name.
    pub fn enumerate(&self) -> Vec<ir::DimensionEnumeration> {
        let mut dimensions: Vec<ir::DimensionEnumeration> = self
            .entries
            .iter()
            .map(|(name, entry)| ir::DimensionEnumeration {
                dimension: name.clone(),
                values: entry
                    .values
                    .iter()
                    .map(|(id, value)| (value.to_owned(), id.as_u32()))
                    .collect(),
            })
            .collect();
        dimensions.sort_by(|a, b| a.dimension.cmp(&b.dimension));
        dimensions
    }
}
