//! Typed compile errors.
//!
//! Every invariant that depends on *input* data surfaces as a
//! `CompileError` collected per key; invariants over internal bookkeeping
//! (ids that were never interned) panic instead.

use std::fmt;

/// Path from a key's value root down to the node an error refers to.
///
/// Segments are property names or array indices; rendered as
/// `options/retries/0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath(Vec<String>);

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(index.to_string());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join("/"))
    }
}

/// The compile error taxonomy.
///
/// `InvalidFilter` is the one warning-level entry: restrictions naming
/// unknown dimensions or values never trimmed anything in practice, and
/// downgrading that silence to a visible warning keeps existing build
/// scripts working while surfacing the typo.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// An alias bound to two structurally distinct composites.
    #[error("alias `{alias}` at {path} is already bound to a different structure")]
    RegistrationConflict { alias: String, path: TreePath },

    /// A branch disagrees with the representative on type or property set.
    #[error("type mismatch at {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: TreePath,
        expected: String,
        actual: String,
    },

    /// A branch literal fails a regex or set constraint on the
    /// representative position.
    #[error("value `{content}` at {path} does not satisfy {constraint}")]
    ConstraintViolation {
        path: TreePath,
        content: String,
        constraint: String,
    },

    /// Structurally invalid input, e.g. a reserved pseudo-key with the
    /// wrong shape.
    #[error("malformed schema at {path}: {reason}")]
    MalformedSchema { path: TreePath, reason: String },

    /// A restriction names an unknown dimension or value.
    #[error("restriction names unknown {what} `{name}`")]
    InvalidFilter { what: &'static str, name: String },
}
