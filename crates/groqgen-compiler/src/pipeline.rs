//! End-to-end generation: schema source in, formatted snippets out.
//!
//! Mirrors what a front end does with the three stages: reject blank input, parse,
//! reject the unparsed sentinel, then format `Single`, `List` and (when present)
//! `BySlug` queries.

use groqgen_core::SchemaDescription;

use crate::diagnostics::Diagnostics;
use crate::formatter::{Config, OutputFormat, format_query_code_with_config, query_identifier};
use crate::generate::{GenerateWarning, QueryKind, generate_groq_queries};
use crate::parser::SchemaParser;
use crate::{Error, Result};

/// One formatted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub kind: QueryKind,
    /// Exported constant name, also meaningful for `groq` output.
    pub identifier: String,
    pub code: String,
}

/// Everything produced for one schema.
#[derive(Debug, Clone)]
pub struct Snippets {
    pub schema: SchemaDescription,
    pub snippets: Vec<Snippet>,
    pub warnings: Vec<GenerateWarning>,
    /// Parser warnings. Never contains errors.
    pub diagnostics: Diagnostics,
}

impl Snippets {
    pub fn get(&self, kind: QueryKind) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.kind == kind)
    }

    /// Snippet code joined by blank lines.
    pub fn join(&self) -> String {
        self.snippets
            .iter()
            .map(|s| s.code.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub fn generate_snippets(source: &str, config: &Config, format: OutputFormat) -> Result<Snippets> {
    generate_snippets_with(SchemaParser::new(source), config, format)
}

/// Like [`generate_snippets`], with a pre-configured parser (for custom fuel limits).
pub fn generate_snippets_with(
    parser: SchemaParser<'_>,
    config: &Config,
    format: OutputFormat,
) -> Result<Snippets> {
    if parser.source().trim().is_empty() {
        return Err(Error::EmptySchema);
    }

    let (schema, diagnostics) = parser.parse()?;
    if schema.is_unparsed() {
        return Err(Error::UnparsedSchema(diagnostics));
    }

    let queries = generate_groq_queries(&schema);
    let snippets = queries
        .entries()
        .into_iter()
        .map(|(kind, query)| Snippet {
            kind,
            identifier: query_identifier(&schema.type_name, kind.as_str()),
            code: format_query_code_with_config(
                query,
                format,
                &schema.type_name,
                kind.as_str(),
                config,
            ),
        })
        .collect();

    Ok(Snippets {
        schema,
        snippets,
        warnings: queries.warnings,
        diagnostics,
    })
}
