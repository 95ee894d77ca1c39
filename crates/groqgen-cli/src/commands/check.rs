use std::path::PathBuf;

use groqgen_compiler::parse_schema;
use groqgen_core::Colors;

use super::render_diagnostics;
use super::schema_loader::load_or_exit;

pub struct CheckArgs {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let schema = load_or_exit(args.schema_path.as_deref(), args.schema_text.as_deref());

    if schema.text.trim().is_empty() {
        eprintln!("error: schema cannot be empty");
        std::process::exit(1);
    }

    let (description, diagnostics) = match parse_schema(&schema.text) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !diagnostics.is_empty() {
        eprint!("{}", render_diagnostics(&diagnostics, &schema, args.color));
    }

    let is_valid = if args.strict {
        diagnostics.is_empty()
    } else {
        !diagnostics.has_errors()
    };
    if !is_valid {
        std::process::exit(1);
    }

    let c = Colors::new(args.color);
    eprintln!(
        "{}ok{} {}{}{} {}({} fields, {} warnings){}",
        c.green,
        c.reset,
        c.blue,
        description.type_name,
        c.reset,
        c.dim,
        description.fields.len(),
        diagnostics.warning_count(),
        c.reset
    );
}
