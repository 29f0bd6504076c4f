use std::fs;
use std::path::PathBuf;

use strata_compiler::{CompilationUnit, compile};

use super::manifest;
use crate::cli::parse_set_spec;

pub struct CompileArgs {
    pub manifest_path: Option<PathBuf>,
    pub sets: Vec<String>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// Rendered result of one compilation run. The snapshot is present even
/// when keys failed: it covers every key that compiled.
pub struct CompileOutput {
    pub snapshot_json: String,
    pub diagnostics: String,
    pub failed: bool,
}

pub fn run(args: CompileArgs) {
    let text = match manifest::load_manifest_text(args.manifest_path.as_deref()) {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let unit = match manifest::parse(&text) {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let restrictions = parse_restrictions(&args.sets);
    let output = match compile_unit(unit, &restrictions, args.pretty) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: failed to serialize snapshot: {}", e);
            std::process::exit(1);
        }
    };

    if !output.diagnostics.is_empty() {
        eprint!("{}", output.diagnostics);
    }

    // The snapshot always goes out, failures or not: it holds every key
    // that compiled, and the exit status carries the failure summary.
    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output.snapshot_json + "\n") {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", output.snapshot_json),
    }

    if output.failed {
        std::process::exit(1);
    }
}

/// Compile a unit and render the snapshot and diagnostics for output.
pub fn compile_unit(
    unit: CompilationUnit,
    restrictions: &[(String, Vec<String>)],
    pretty: bool,
) -> Result<CompileOutput, serde_json::Error> {
    let outcome = compile(unit, restrictions);
    let snapshot_json = if pretty {
        serde_json::to_string_pretty(&outcome.snapshot)?
    } else {
        serde_json::to_string(&outcome.snapshot)?
    };
    Ok(CompileOutput {
        snapshot_json,
        diagnostics: outcome.diagnostics.render(),
        failed: outcome.has_errors(),
    })
}

/// Parse every `--set` spec, exiting on the first malformed one.
pub fn parse_restrictions(sets: &[String]) -> Vec<(String, Vec<String>)> {
    sets.iter()
        .map(|spec| match parse_set_spec(spec) {
            Some(pair) => pair,
            None => {
                eprintln!("error: invalid --set spec '{}': expected DIM:VALUE[,VALUE...]", spec);
                std::process::exit(1);
            }
        })
        .collect()
}
