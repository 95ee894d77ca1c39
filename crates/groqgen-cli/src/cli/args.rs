//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use groqgen_compiler::OutputFormat;
use groqgen_compiler::formatter::{DEFAULT_HELPER, DEFAULT_IMPORT_SOURCE};

/// Schema file (positional). `-` reads stdin.
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .value_parser(value_parser!(PathBuf))
        .help("Schema file (`-` for stdin)")
}

/// Inline schema text (-s/--schema).
pub fn schema_text_arg() -> Arg {
    Arg::new("schema_text")
        .short('s')
        .long("schema")
        .value_name("TEXT")
        .conflicts_with("schema_path")
        .help("Inline schema text")
}

/// Snippet format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value(OutputFormat::default().as_str())
        .value_parser(OutputFormat::NAMES)
        .help("Snippet format")
}

/// Query helper name (--helper).
pub fn helper_arg() -> Arg {
    Arg::new("helper")
        .long("helper")
        .value_name("NAME")
        .help(format!("Helper wrapping each query (default: {DEFAULT_HELPER})"))
}

/// Module the helper is imported from (--import-source).
pub fn import_source_arg() -> Arg {
    Arg::new("import_source")
        .long("import-source")
        .value_name("MODULE")
        .help(format!(
            "Module the helper is imported from (default: {DEFAULT_IMPORT_SOURCE})"
        ))
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Verbosity level (-v, -vv). Global, so it works before or after the subcommand.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug logs, -vv for trace)")
}
