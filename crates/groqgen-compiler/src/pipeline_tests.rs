use indoc::indoc;

use groqgen_core::SchemaDescription;

use crate::{
    Config, DiagnosticKind, Error, GenerateWarning, OutputFormat, QueryKind, SchemaParser,
    format_query_code, generate_groq_queries, generate_snippets, generate_snippets_with,
    parse_sanity_schema, parse_schema,
};

const POST_SCHEMA: &str = indoc! {r#"
    export default defineType({
      name: 'post',
      type: 'document',
      fields: [
        defineField({ name: 'title', type: 'string' }),
        defineField({ name: 'slug', type: 'slug' }),
        defineField({
          name: 'gallery',
          type: 'array',
          of: [{ type: 'object', fields: [{ name: 'caption', type: 'string' }] }],
        }),
      ],
    })
"#};

#[test]
fn post_end_to_end() {
    let schema = parse_sanity_schema(POST_SCHEMA);
    assert_eq!(schema.type_name, "post");

    let queries = generate_groq_queries(&schema);
    assert!(queries.single_document_query.contains("title,\n    slug"));
    assert!(
        queries
            .single_document_query
            .contains("gallery[] {\n        caption\n      }")
    );
    let slug = queries.slug_query.as_deref().unwrap();
    assert!(slug.contains("slug.current == $slug"));

    insta::assert_snapshot!(format_query_code(slug, "ts", &schema.type_name, "BySlug"), @r#"
    import { defineQuery } from 'sanity';

    export const getPostBySlugQuery = defineQuery(`
    *[_type == "post"][slug.current == $slug][0] {
        title,
        slug,
        gallery[] {
            caption
          }
      }
    `);
    "#);
}

#[test]
fn unparseable_text_is_unknown() {
    assert_eq!(
        parse_sanity_schema("just some words"),
        SchemaDescription::unknown()
    );
    assert_eq!(parse_sanity_schema(""), SchemaDescription::unknown());
}

#[test]
fn parse_schema_reports_diagnostics() {
    let (schema, diagnostics) = parse_schema("name: 'post'").unwrap();

    assert!(schema.is_unparsed());
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::NoFields]);
}

#[test]
fn snippets_for_every_kind() {
    let snippets = generate_snippets(POST_SCHEMA, &Config::default(), OutputFormat::Js).unwrap();
    let identifiers: Vec<_> = snippets
        .snippets
        .iter()
        .map(|s| s.identifier.as_str())
        .collect();

    assert_eq!(
        identifiers,
        vec!["getPostSingleQuery", "getPostListQuery", "getPostBySlugQuery"]
    );
    assert!(snippets.warnings.is_empty());
    assert!(snippets.diagnostics.is_empty());
    assert_eq!(snippets.schema.fields.len(), 3);
}

#[test]
fn groq_snippets_join() {
    let source = "defineType({ name: 'tag', fields: [defineField({ name: 'label', type: 'string' })] })";
    let snippets = generate_snippets(source, &Config::default(), OutputFormat::Groq).unwrap();

    assert!(snippets.get(QueryKind::BySlug).is_none());
    insta::assert_snapshot!(snippets.join(), @r#"
    *[_type == "tag"][0] {
        label
      }

    *[_type == "tag"] {
        label
      }
    "#);
}

#[test]
fn custom_config_reaches_snippets() {
    let config = Config::new().helper("groq").import_source("next-sanity");
    let snippets = generate_snippets(POST_SCHEMA, &config, OutputFormat::Ts).unwrap();
    let single = snippets.get(QueryKind::Single).unwrap();

    assert!(single.code.starts_with("import { groq } from 'next-sanity';\n\n"));
    assert!(single.code.contains("export const getPostSingleQuery = groq(`"));
}

#[test]
fn blank_source_is_rejected() {
    let result = generate_snippets("  \n\t", &Config::default(), OutputFormat::Js);

    assert!(matches!(result, Err(Error::EmptySchema)));
}

#[test]
fn unparsed_source_is_rejected() {
    let result = generate_snippets("const x = 1;", &Config::default(), OutputFormat::Js);

    let Err(Error::UnparsedSchema(diagnostics)) = result else {
        panic!("expected UnparsedSchema");
    };
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::MissingTypeName]);
    insta::assert_snapshot!(
        Error::UnparsedSchema(diagnostics).to_string(),
        @"schema parsing failed with 1 errors"
    );
}

#[test]
fn fuel_exhaustion_is_propagated() {
    let parser = SchemaParser::new(POST_SCHEMA).with_exec_fuel(Some(3));
    let result = generate_snippets_with(parser, &Config::default(), OutputFormat::Js);

    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn duplicate_warnings_surface() {
    let source = indoc! {r#"
        defineType({
          name: 'menu',
          fields: [
            defineField({
              name: 'links',
              type: 'array',
              of: [{
                type: 'object',
                fields: [
                  { name: 'label', type: 'string' },
                  { name: 'label', type: 'string' },
                ],
              }],
            }),
          ],
        })
    "#};
    let snippets = generate_snippets(source, &Config::default(), OutputFormat::Groq).unwrap();

    assert_eq!(
        snippets.diagnostics.kinds(),
        vec![DiagnosticKind::DuplicateNestedField]
    );
    // The parser already collapsed the duplicate, so generation sees one entry.
    assert!(snippets.warnings.is_empty());

    let mut schema = snippets.schema.clone();
    let first = schema.fields[0].nested_fields[0].clone();
    schema.fields[0].nested_fields.push(first);
    assert_eq!(
        generate_groq_queries(&schema).warnings,
        vec![GenerateWarning::DuplicateNestedField {
            array_field: "links".to_string(),
            name: "label".to_string(),
        }]
    );
}
