//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("groqgen")
        .about("Generate GROQ queries from Sanity schema definitions")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(parse_command())
        .subcommand(check_command())
}

/// Generate query snippets for every query kind.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate GROQ query snippets from a schema")
        .override_usage(
            "\
  groqgen generate <SCHEMA> [--format <FORMAT>]
  groqgen generate -s <TEXT> [--format <FORMAT>]
  groqgen generate - < post.ts",
        )
        .after_help(
            r#"EXAMPLES:
  groqgen generate post.ts                        # JavaScript snippets
  groqgen generate post.ts --format ts            # TypeScript snippets
  groqgen generate post.ts --format groq          # bare GROQ queries
  groqgen generate post.ts --helper groq \
      --import-source next-sanity                 # custom query helper
  groqgen generate post.ts -o queries.js          # write to file"#,
        )
        .arg(schema_path_arg())
        .arg(schema_text_arg())
        .arg(format_arg())
        .arg(helper_arg())
        .arg(import_source_arg())
        .arg(output_file_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the extracted schema description.
pub fn parse_command() -> Command {
    Command::new("parse")
        .about("Show the schema description as JSON")
        .override_usage(
            "\
  groqgen parse <SCHEMA> [--compact]
  groqgen parse -s <TEXT> [--compact]",
        )
        .after_help(
            r#"EXAMPLES:
  groqgen parse post.ts                           # pretty JSON
  groqgen parse post.ts --compact                 # single line
  groqgen parse -s "defineType({ name: 'tag', fields: [] })""#,
        )
        .arg(schema_path_arg())
        .arg(schema_text_arg())
        .arg(compact_arg())
}

/// Validate a schema.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a schema and report diagnostics")
        .override_usage(
            "\
  groqgen check <SCHEMA> [--strict]
  groqgen check -s <TEXT> [--strict]",
        )
        .after_help(
            r#"EXAMPLES:
  groqgen check post.ts                           # errors fail, warnings reported
  groqgen check post.ts --strict                  # warnings fail too
  groqgen check post.ts --color never             # plain output"#,
        )
        .arg(schema_path_arg())
        .arg(schema_text_arg())
        .arg(strict_arg())
        .arg(color_arg())
}
