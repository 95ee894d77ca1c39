//! Snippet formatting: wraps a generated query as an exported constant or bare GROQ.

mod config;


pub use config::{Config, DEFAULT_HELPER, DEFAULT_IMPORT_SOURCE};

use groqgen_core::utils::upper_first;

/// Snippet flavor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// TypeScript module
    Ts,
    /// JavaScript module
    #[default]
    Js,
    /// The query text alone
    Groq,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["ts", "js", "groq"];

    /// Resolves a format name. Anything unrecognized formats as bare GROQ.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ts" => Self::Ts,
            "js" => Self::Js,
            "groq" => Self::Groq,
            other => {
                tracing::debug!(format = other, "unknown output format, using groq");
                Self::Groq
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
            Self::Groq => "groq",
        }
    }

    /// True for formats that wrap the query in module code.
    pub fn is_code(self) -> bool {
        matches!(self, Self::Ts | Self::Js)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exported constant name: `get` + type name (first char upper-cased) + kind + `Query`.
pub fn query_identifier(type_name: &str, query_kind: &str) -> String {
    format!("get{}{}Query", upper_first(type_name), query_kind)
}

/// Formats `query` with the default [`Config`]. `format` is resolved with
/// [`OutputFormat::from_name`]; pass `""` as `query_kind` when there is none.
pub fn format_query_code(query: &str, format: &str, type_name: &str, query_kind: &str) -> String {
    format_query_code_with_config(
        query,
        OutputFormat::from_name(format),
        type_name,
        query_kind,
        &Config::default(),
    )
}

pub fn format_query_code_with_config(
    query: &str,
    format: OutputFormat,
    type_name: &str,
    query_kind: &str,
    config: &Config,
) -> String {
    let query = query.trim();
    if !format.is_code() {
        return query.to_string();
    }

    let helper = &config.helper;
    let import_source = &config.import_source;
    let identifier = query_identifier(type_name, query_kind);
    format!(
        "import {{ {helper} }} from '{import_source}';\n\nexport const {identifier} = {helper}(`\n{query}\n`);"
    )
}
