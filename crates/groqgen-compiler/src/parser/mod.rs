//! Schema source parsing.
//!
//! # Architecture
//!
//! - `lexer`: zero-copy `logos` tokens over the JavaScript/TypeScript subset Sanity schemas use
//! - `scanner`: delimiter pairing plus lazy, fuel-bounded property and block lookups
//!   over token windows
//! - `schema`: the layered extraction passes that build a [`SchemaDescription`]
//!
//! # Recovery Strategy
//!
//! The parser never rejects input. Unknown characters become `Garbage` tokens, unbalanced
//! delimiters are paired best-effort, and declarations missing a `name` or `type` are
//! skipped. Each of these is reported as a warning diagnostic.
//!
//! However, fuel exhaustion returns an actual error immediately.

pub mod lexer;
pub mod scanner;

mod schema;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod schema_tests;

pub use schema::{DEFAULT_EXEC_FUEL, SchemaParser};

use groqgen_core::SchemaDescription;

use crate::PassResult;

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str) -> PassResult<SchemaDescription> {
    SchemaParser::new(source).parse()
}
