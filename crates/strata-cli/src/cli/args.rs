//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so `compile` and `check` stay consistent without repeating definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema manifest file (positional).
pub fn manifest_path_arg() -> Arg {
    Arg::new("manifest_path")
        .value_name("MANIFEST")
        .value_parser(value_parser!(PathBuf))
        .help("Schema manifest file, or '-' for stdin")
}

/// Dimension restriction (--set).
pub fn set_arg() -> Arg {
    Arg::new("set")
        .long("set")
        .value_name("DIM:VALUE[,VALUE...]")
        .action(ArgAction::Append)
        .help("Restrict a dimension to the given values (repeatable)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the snapshot to a file")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}
