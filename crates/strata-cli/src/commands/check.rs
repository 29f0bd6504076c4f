use std::path::PathBuf;

use strata_compiler::compile;

use super::compile::parse_restrictions;
use super::manifest;

pub struct CheckArgs {
    pub manifest_path: Option<PathBuf>,
    pub sets: Vec<String>,
    pub strict: bool,
}

pub fn run(args: CheckArgs) {
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
    let outcome = compile(unit, &restrictions);

    let failed = if args.strict {
        !outcome.diagnostics.is_empty()
    } else {
        outcome.has_errors()
    };

    if failed {
        eprint!("{}", outcome.diagnostics.render());
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
