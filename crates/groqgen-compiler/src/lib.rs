//! groqgen compiler: schema parser, GROQ query generator, and snippet formatter.
//!
//! This crate provides the generation pipeline for Sanity schemas:
//! - `parser` - lexer, token scanner, and schema extraction
//! - `diagnostics` - warnings and errors about the schema source
//! - `generate` - GROQ query generation
//! - `formatter` - snippet formatting (`ts`, `js`, `groq`)
//! - `pipeline` - all three stages for every query kind

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod formatter;
pub mod generate;
pub mod parser;
pub mod pipeline;

#[cfg(test)]
mod pipeline_tests;

use groqgen_core::SchemaDescription;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use formatter::{
    Config, OutputFormat, format_query_code, format_query_code_with_config, query_identifier,
};
pub use generate::{GenerateWarning, GeneratedQueries, QueryKind, generate_groq_queries};
pub use parser::{DEFAULT_EXEC_FUEL, SchemaParser};
pub use pipeline::{Snippet, Snippets, generate_snippets, generate_snippets_with};

/// Errors that can occur while turning a schema into snippets.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many scanner steps).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    #[error("schema source is empty")]
    EmptySchema,

    #[error("schema parsing failed with {} errors", .0.error_count())]
    UnparsedSchema(Diagnostics),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses schema source, returning diagnostics alongside the description.
///
/// Returns Err only on fuel exhaustion.
pub fn parse_schema(source: &str) -> PassResult<SchemaDescription> {
    parser::parse(source)
}

/// Parses schema source. Never fails: unparseable input and internal failures yield
/// [`SchemaDescription::unknown`].
pub fn parse_sanity_schema(source: &str) -> SchemaDescription {
    SchemaParser::new(source).describe()
}
