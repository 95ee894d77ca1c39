use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use groqgen_compiler::{Config, Error, OutputFormat, generate_snippets};
use groqgen_core::Colors;

use super::render_diagnostics;
use super::schema_loader::load_or_exit;

pub struct GenerateArgs {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub format: OutputFormat,
    pub config: Config,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let schema = load_or_exit(args.schema_path.as_deref(), args.schema_text.as_deref());

    let snippets = match generate_snippets(&schema.text, &args.config, args.format) {
        Ok(snippets) => snippets,
        Err(Error::UnparsedSchema(diagnostics)) => {
            eprint!("{}", render_diagnostics(&diagnostics, &schema, args.color));
            eprintln!("error: could not parse schema correctly, please check your input");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !snippets.diagnostics.is_empty() {
        eprint!(
            "{}",
            render_diagnostics(&snippets.diagnostics, &schema, args.color)
        );
    }
    for warning in &snippets.warnings {
        eprintln!("warning: {}", warning);
    }
    let has_warnings = !snippets.diagnostics.is_empty() || !snippets.warnings.is_empty();
    if args.strict && has_warnings {
        eprintln!("error: warnings are treated as errors (--strict)");
        std::process::exit(1);
    }

    let mut output = snippets.join();
    output.push('\n');

    match &args.output {
        Some(path) => {
            fs::write(path, &output).unwrap_or_else(|e| {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            });

            let c = Colors::new(args.color);
            eprintln!(
                "{}Generated{} {} queries for {}{}{} into {}",
                c.green,
                c.reset,
                snippets.snippets.len(),
                c.blue,
                snippets.schema.type_name,
                c.reset,
                path.display()
            );
        }
        None => {
            io::stdout()
                .write_all(output.as_bytes())
                .unwrap_or_else(|e| {
                    eprintln!("error: failed to write output: {}", e);
                    std::process::exit(1);
                });
        }
    }
}
