//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch into command handlers
//! - The `--set` spec parser shared by both commands

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;

pub struct CompileParams {
    pub manifest_path: Option<PathBuf>,
    pub sets: Vec<String>,
    pub output: Option<PathBuf>,
    pub compact: bool,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest_path: m.get_one::<PathBuf>("manifest_path").cloned(),
            sets: collect_sets(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            manifest_path: p.manifest_path,
            sets: p.sets,
            output: p.output,
            pretty,
        }
    }
}

pub struct CheckParams {
    pub manifest_path: Option<PathBuf>,
    pub sets: Vec<String>,
    pub strict: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest_path: m.get_one::<PathBuf>("manifest_path").cloned(),
            sets: collect_sets(m),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            manifest_path: p.manifest_path,
            sets: p.sets,
            strict: p.strict,
        }
    }
}

fn collect_sets(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("set")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Parse one `--set` spec: `dimension:value[,value...]`.
///
/// Returns `None` when the spec has no colon, an empty dimension, or an
/// empty value list.
pub fn parse_set_spec(spec: &str) -> Option<(String, Vec<String>)> {
    let (dimension, values) = spec.split_once(':')?;
    if dimension.is_empty() {
        return None;
    }
    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some((dimension.to_owned(), values))
}
