use std::path::PathBuf;

use groqgen_compiler::parse_schema;

use super::schema_loader::load_or_exit;

pub struct ParseArgs {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub compact: bool,
}

/// Prints the schema description as JSON, the unparsed sentinel included.
/// Use `check` to see why a schema did not parse.
pub fn run(args: ParseArgs) {
    let schema = load_or_exit(args.schema_path.as_deref(), args.schema_text.as_deref());

    let description = match parse_schema(&schema.text) {
        Ok((description, diagnostics)) => {
            tracing::debug!(
                errors = diagnostics.error_count(),
                warnings = diagnostics.warning_count(),
                "parsed schema"
            );
            description
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let json = if args.compact {
        serde_json::to_string(&description)
    } else {
        serde_json::to_string_pretty(&description)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: failed to serialize schema: {}", e);
            std::process::exit(1);
        }
    }
}
