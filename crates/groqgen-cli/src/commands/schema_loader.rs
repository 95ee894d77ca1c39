use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Schema text plus the name shown in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    pub text: String,
    /// File path as given, `<stdin>`, or `None` for inline text.
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("schema is required: use positional argument, `-` for stdin, or -s/--schema")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_schema_source(
    schema_path: Option<&Path>,
    schema_text: Option<&str>,
) -> Result<SchemaSource, LoadError> {
    if let Some(text) = schema_text {
        return Ok(SchemaSource {
            text: text.to_string(),
            name: None,
        });
    }

    match schema_path {
        Some(path) if path.as_os_str() == "-" => load_stdin(),
        Some(path) => load_file(path),
        None => Err(LoadError::Missing),
    }
}

fn load_stdin() -> Result<SchemaSource, LoadError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(LoadError::Stdin)?;
    Ok(SchemaSource {
        text,
        name: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<SchemaSource, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded schema");
    Ok(SchemaSource {
        text,
        name: Some(path.to_string_lossy().into_owned()),
    })
}

/// Loads the schema or exits with an error message.
pub fn load_or_exit(schema_path: Option<&Path>, schema_text: Option<&str>) -> SchemaSource {
    load_schema_source(schema_path, schema_text).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
