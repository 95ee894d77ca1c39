pub mod check;
pub mod generate;
pub mod parse;
pub mod schema_loader;


use groqgen_compiler::Diagnostics;

use schema_loader::SchemaSource;

/// Renders diagnostics against the loaded schema, with its path in the header when known.
pub fn render_diagnostics(
    diagnostics: &Diagnostics,
    schema: &SchemaSource,
    color: bool,
) -> String {
    let printer = diagnostics.printer(&schema.text).colored(color);
    match &schema.name {
        Some(name) => printer.path(name).render(),
        None => printer.render(),
    }
}
