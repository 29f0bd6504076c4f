//! Restriction trimming.
//!
//! Build-time directives like `--set region:us` narrow a dimension to an
//! allow-list of values. Trimming removes every override branch that can no
//! longer apply; a dimension left with exactly one legal value is marked
//! `skip` so no dispatch code is generated for it.

use strata_core::{Context, DimensionTable, ValueId};

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::linearize::{OverrideNode, OverrideTree};

/// Per-dimension value allow-lists, indexed by dimension id. An empty list
/// leaves the dimension unrestricted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Restrictions {
    allow: Vec<Vec<ValueId>>,
}

impl Restrictions {
    pub fn none() -> Self {
        Self::default()
    }

    /// Build allow-lists from `(dimension, values)` name pairs.
    ///
    /// Unknown dimension or value names restrict nothing; they surface as
    /// `InvalidFilter` warnings so the typo is visible without changing
    /// what gets trimmed.
    pub fn parse(
        dimensions: &DimensionTable,
        specs: &[(String, Vec<String>)],
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut allow = vec![Vec::new(); dimensions.len()];

        for (dimension, values) in specs {
            let Some(id) = dimensions.get(dimension) else {
                diagnostics.warning(CompileError::InvalidFilter {
                    what: "dimension",
                    name: dimension.clone(),
                });
                continue;
            };
            let entry = dimensions.entry(id);
            for value in values {
                match entry.values.get(value) {
                    Some(value_id) => allow[id.index()].push(value_id),
                    None => diagnostics.warning(CompileError::InvalidFilter {
                        what: "value",
                        name: format!("{dimension}:{value}"),
                    }),
                }
            }
        }

        Self { allow }
    }

    pub fn is_empty(&self) -> bool {
        self.allow.iter().all(Vec::is_empty)
    }

    /// Whether a context survives the allow-lists. Only slots within the
    /// context's degree are checked: an unset trailing dimension is never a
    /// reason to drop a branch.
    pub fn permits(&self, context: &Context) -> bool {
        let depth = context.degree().min(self.allow.len());
        for i in 0..depth {
            let allowed = &self.allow[i];
            if !allowed.is_empty() && !allowed.contains(&context.slot(i)) {
                return false;
            }
        }
        true
    }

    /// Remove every subtree whose context violates an allow-list.
    pub fn trim(&self, tree: &mut OverrideTree) {
        if self.is_empty() {
            return;
        }
        trim_children(&mut tree.root, self);
    }

    /// Mark dimensions narrowed to a single legal value as `skip`.
    pub fn mark_skip(&self, dimensions: &mut DimensionTable) {
        for (index, allowed) in self.allow.iter().enumerate() {
            if allowed.len() == 1 {
                dimensions.mark_skip(strata_core::DimensionId::from_raw(index as u32));
            }
        }
    }
}

fn trim_children(node: &mut OverrideNode, restrictions: &Restrictions) {
    node.children
        .retain(|child| restrictions.permits(&child.context));
    for child in &mut node.children {
        trim_children(child, restrictions);
    }
}
