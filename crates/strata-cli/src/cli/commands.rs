//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("strata")
        .about("Multi-dimensional configuration compiler")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
}

/// Compile a manifest to a snapshot.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a schema manifest to a snapshot")
        .override_usage(
            "\
  strata compile <MANIFEST>
  strata compile <MANIFEST> --set <DIM:VALUE,...>
  strata compile - < manifest.json",
        )
        .after_help(
            r#"EXAMPLES:
  strata compile schema.json                    # snapshot to stdout
  strata compile schema.json -o snapshot.json   # snapshot to file
  strata compile schema.json --set region:us    # restrict and skip a dimension
  strata compile schema.json --set region:us,eu --set device:mobile"#,
        )
        .arg(manifest_path_arg())
        .arg(set_arg())
        .arg(output_file_arg())
        .arg(compact_arg())
}

/// Validate a manifest without emitting a snapshot.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a schema manifest")
        .override_usage(
            "\
  strata check <MANIFEST>
  strata check <MANIFEST> --strict",
        )
        .after_help(
            r#"EXAMPLES:
  strata check schema.json             # validate, silent on success
  strata check schema.json --strict    # restriction typos fail too
  strata check schema.json --set region:us"#,
        )
        .arg(manifest_path_arg())
        .arg(set_arg())
        .arg(strict_arg())
}
