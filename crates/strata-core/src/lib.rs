#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the strata configuration compiler.
//!
//! Three layers:
//! - **Registries** (`registry`, `structure`): interning tables that map
//!   dimension names, per-dimension value names, and composite type
//!   signatures to dense integer ids
//! - **Source values** (`context`, `value`): the context vector and the
//!   literal value trees attached to override edges
//! - **IR** (`ir`): the compiled snapshot handed to source emitters

pub mod context;
pub mod ir;
pub mod registry;
pub mod structure;
pub mod value;

#[cfg(test)]
mod structure_tests;
#[cfg(test)]
mod value_tests;

pub use context::Context;
pub use ir::{Kind, Snapshot};
pub use registry::{DimensionId, DimensionTable, ValueId, ValueTable};
pub use structure::{Structure, StructureTable, TypeId};
pub use value::{Constraint, Node, Scalar, Value};
