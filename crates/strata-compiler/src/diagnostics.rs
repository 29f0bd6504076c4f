//! Per-key diagnostic collection.
//!
//! A failing key contributes one error here and drops out of the snapshot;
//! the rest of the schema still compiles. Warnings never block anything.

use std::fmt;

use crate::error::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic: severity, the key it concerns (restriction warnings are
/// not key-scoped), and the underlying typed error.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub key: Option<String>,
    pub error: CompileError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.key {
            Some(key) => write!(f, "{severity}: key `{key}`: {}", self.error),
            None => write!(f, "{severity}: {}", self.error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, key: impl Into<String>, error: CompileError) {
        self.messages.push(Diagnostic {
            severity: Severity::Error,
            key: Some(key.into()),
            error,
        });
    }

    pub fn warning(&mut self, error: CompileError) {
        self.messages.push(Diagnostic {
            severity: Severity::Warning,
            key: None,
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    /// Plain-text rendering, one line per diagnostic plus a summary line
    /// when any key failed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            out.push_str(&message.to_string());
            out.push('\n');
        }
        let errors = self.error_count();
        if errors > 0 {
            out.push_str(&format!(
                "{errors} key{} failed to compile\n",
                if errors == 1 { "" } else { "s" }
            ));
        }
        out
    }
}
