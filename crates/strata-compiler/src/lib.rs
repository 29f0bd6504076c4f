#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compilation pipeline for strata multi-dimensional configuration.
//!
//! Turns a flat set of per-key (context, literal value) overrides into the
//! snapshot IR the source emitters consume:
//! - `graph` - the raw per-key override graph
//! - `linearize` - specificity linearization into a single-parent tree
//! - `trim` - dimension-value restriction trimming
//! - `build` - DFS rebuild into the nested decision-tree IR
//! - `extract` - composite type inference over the representative branch
//! - `propagate` - structural validation of every other branch
//! - `pipeline` - per-key orchestration and snapshot assembly
//! - `diagnostics` - per-key error collection and rendering

pub mod build;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod graph;
pub mod linearize;
pub mod pipeline;
pub mod propagate;
pub mod trim;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod trim_tests;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{CompileError, TreePath};
pub use graph::OverrideGraph;
pub use linearize::{OverrideNode, OverrideTree, linearize};
pub use pipeline::{CompilationUnit, CompileOutcome, KeyInput, compile};
pub use trim::Restrictions;
