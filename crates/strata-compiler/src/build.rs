//! Decision-tree builder.
//!
//! Rebuilds a trimmed, linearized override tree into the nested IR form
//! emitters walk: one `Dimension` level per context slot, in dimension id
//! order, with `next` chains passing through dimensions an override leaves
//! unset. Most specific match wins; absent branches fall through to the
//! nearest enclosing default.

use strata_core::{DimensionTable, TypeId, ValueId, ir};

use crate::linearize::{OverrideNode, OverrideTree};

/// Build the IR key for one compiled override tree.
///
/// The root value seeds the key's unconditional default; every descendant
/// override is inserted along the path its context spells out. Children are
/// visited in context order (the linearizer guarantees it), which makes the
/// "reuse the most recent branch with the same value id" rule below exact:
/// overrides sharing a prefix are adjacent in the traversal.
pub fn build_key(name: &str, tree: OverrideTree, dimensions: &DimensionTable) -> ir::Key {
    let mut builder = Builder {
        dimensions,
        root: None,
    };

    let OverrideNode {
        value: default,
        children,
        ..
    } = tree.root;
    for child in children {
        builder.insert_subtree(child);
    }

    ir::Key {
        key: name.to_owned(),
        alias: default.alias.clone(),
        value: default,
        // Resolved by the pipeline once extraction has run.
        type_id: TypeId::STRING,
        type_name: String::new(),
        kind: ir::Kind::None,
        dimension: builder.root,
    }
}

struct Builder<'a> {
    dimensions: &'a DimensionTable,
    root: Option<Box<ir::Dimension>>,
}

impl Builder<'_> {
    fn insert_subtree(&mut self, node: OverrideNode) {
        let OverrideNode {
            context,
            value,
            children,
        } = node;
        self.insert(&context, value);
        for child in children {
            self.insert_subtree(child);
        }
    }

    /// Descend one IR level per context slot up to the context's degree,
    /// then attach the value at the innermost branch.
    fn insert(&mut self, context: &strata_core::Context, value: strata_core::Value) {
        let depth = context.degree();
        debug_assert!(depth > 0, "unconditional overrides belong to the root");

        let mut cursor = &mut self.root;
        for i in 0..depth {
            let entry = self.dimensions.entry(strata_core::DimensionId::from_raw(i as u32));
            let name = self.dimensions.name(entry.id);
            let skip = entry.skip;
            let dimension = cursor
                .get_or_insert_with(|| Box::new(ir::Dimension::new(name, skip)));

            let slot = context.slot(i);
            if slot == ValueId::NONE {
                // Pass through a dimension this override leaves unset.
                cursor = &mut dimension.next;
                continue;
            }

            if dimension.values.last().map(|v| v.index) != Some(slot) {
                dimension.values.push(ir::DimensionValue::new(slot));
            }
            let branch = dimension
                .values
                .last_mut()
                .unwrap_or_else(|| unreachable!("branch pushed above"));
            if i + 1 == depth {
                branch.value = Some(value);
                return;
            }
            cursor = &mut branch.dimension;
        }
    }
}
