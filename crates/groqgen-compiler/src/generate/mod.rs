//! GROQ query generation from a [`SchemaDescription`].
//!
//! Every query projects the same body: non-array fields by name, then array fields,
//! where object arrays expand into an inner projection of their nested fields.

use std::collections::HashSet;

use serde::Serialize;

use groqgen_core::utils::camel_join;
use groqgen_core::{FieldDescriptor, NestedFieldDescriptor, SchemaDescription};


/// Joins top-level projection entries.
const FIELD_SEPARATOR: &str = ",\n    ";
/// Joins entries inside an object-array projection.
const NESTED_SEPARATOR: &str = ",\n        ";

/// The three read queries generated for one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQueries {
    pub single_document_query: String,
    pub multiple_documents_query: String,
    /// Present iff the schema has a top-level `slug` field.
    pub slug_query: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<GenerateWarning>,
}

impl GeneratedQueries {
    /// Queries paired with their kind, in `Single`, `List`, `BySlug` order.
    pub fn entries(&self) -> Vec<(QueryKind, &str)> {
        let mut entries = vec![
            (QueryKind::Single, self.single_document_query.as_str()),
            (QueryKind::List, self.multiple_documents_query.as_str()),
        ];
        if let Some(slug) = &self.slug_query {
            entries.push((QueryKind::BySlug, slug.as_str()));
        }
        entries
    }

    pub fn get(&self, kind: QueryKind) -> Option<&str> {
        match kind {
            QueryKind::Single => Some(self.single_document_query.as_str()),
            QueryKind::List => Some(self.multiple_documents_query.as_str()),
            QueryKind::BySlug => self.slug_query.as_deref(),
        }
    }
}

/// Non-fatal findings while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerateWarning {
    /// A nested field name repeated inside one object array; only the first is projected.
    #[serde(rename_all = "camelCase")]
    DuplicateNestedField { array_field: String, name: String },
}

impl std::fmt::Display for GenerateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateNestedField { array_field, name } => write!(
                f,
                "nested field `{name}` appears more than once in `{array_field}`; only the first is projected"
            ),
        }
    }
}

/// Which document selection a query performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Single,
    List,
    BySlug,
}

impl QueryKind {
    /// Name used in generated identifiers, e.g. `getPostBySlugQuery`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::List => "List",
            Self::BySlug => "BySlug",
        }
    }

    /// Filter and slice appended after the `_type` filter.
    fn selector(self) -> &'static str {
        match self {
            Self::Single => "[0]",
            Self::List => "",
            Self::BySlug => "[slug.current == $slug][0]",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the single, list and (when a `slug` field exists) slug queries.
pub fn generate_groq_queries(schema: &SchemaDescription) -> GeneratedQueries {
    let mut warnings = Vec::new();

    let basic = schema
        .fields
        .iter()
        .filter(|f| !f.is_array())
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR);
    let arrays = schema
        .fields
        .iter()
        .filter(|f| f.is_array())
        .map(|f| array_projection(f, &mut warnings))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR);

    let separator = if basic.is_empty() || arrays.is_empty() {
        ""
    } else {
        FIELD_SEPARATOR
    };
    let body = format!("{basic}{separator}{arrays}");
    let query = |kind: QueryKind| {
        format!(
            "*[_type == \"{}\"]{} {{\n    {}\n  }}",
            schema.type_name,
            kind.selector(),
            body
        )
    };

    tracing::debug!(
        type_name = %schema.type_name,
        slug = schema.has_slug(),
        warnings = warnings.len(),
        "generated queries"
    );

    GeneratedQueries {
        single_document_query: query(QueryKind::Single),
        multiple_documents_query: query(QueryKind::List),
        slug_query: schema.has_slug().then(|| query(QueryKind::BySlug)),
        warnings,
    }
}

fn array_projection(field: &FieldDescriptor, warnings: &mut Vec<GenerateWarning>) -> String {
    if !field.is_object_array() {
        return format!("{}[]", field.name);
    }

    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for nested in &field.nested_fields {
        if !seen.insert(nested.name.as_str()) {
            warnings.push(GenerateWarning::DuplicateNestedField {
                array_field: field.name.clone(),
                name: nested.name.clone(),
            });
            continue;
        }
        lines.extend(nested_projection(nested));
    }

    format!(
        "{}[] {{\n        {}\n      }}",
        field.name,
        lines.join(NESTED_SEPARATOR)
    )
}

/// Projection lines for one nested field. Images resolve their asset URL and alias
/// each sub-field, e.g. `"heroAlt": hero.alt`.
fn nested_projection(nested: &NestedFieldDescriptor) -> Vec<String> {
    if !nested.is_image() {
        return vec![nested.name.clone()];
    }

    let name = &nested.name;
    let mut lines = vec![format!("\"{name}\": {name}.asset->url")];
    lines.extend(nested.sub_fields.iter().map(|sub| {
        format!("\"{}\": {name}.{}", camel_join(name, &sub.name), sub.name)
    }));
    lines
}
