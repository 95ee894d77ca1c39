//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but hold clap-level values (color choice,
//! format name). `From<*Params>` resolves them for the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;
use groqgen_compiler::{Config, OutputFormat};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::parse::ParseArgs;

pub struct GenerateParams {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub format: OutputFormat,
    pub helper: Option<String>,
    pub import_source: Option<String>,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = m
            .get_one::<String>("format")
            .map(|name| OutputFormat::from_name(name))
            .unwrap_or_default();

        Self {
            schema_path: m.get_one::<PathBuf>("schema_path").cloned(),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            format,
            helper: m.get_one::<String>("helper").cloned(),
            import_source: m.get_one::<String>("import_source").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }

    /// Builder config with only the overridden settings applied.
    pub fn config(&self) -> Config {
        let mut config = Config::new();
        if let Some(helper) = &self.helper {
            config = config.helper(helper);
        }
        if let Some(source) = &self.import_source {
            config = config.import_source(source);
        }
        config
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            config: p.config(),
            schema_path: p.schema_path,
            schema_text: p.schema_text,
            format: p.format,
            output: p.output,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub compact: bool,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: m.get_one::<PathBuf>("schema_path").cloned(),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            schema_path: p.schema_path,
            schema_text: p.schema_text,
            compact: p.compact,
        }
    }
}

pub struct CheckParams {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: m.get_one::<PathBuf>("schema_path").cloned(),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            schema_path: p.schema_path,
            schema_text: p.schema_text,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    m.get_one::<String>("color")
        .map(|name| ColorChoice::from_name(name))
        .unwrap_or_default()
}
