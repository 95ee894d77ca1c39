use indoc::indoc;

use groqgen_core::{ArrayOf, SchemaDescription};

use super::SchemaParser;
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

const POST_SCHEMA: &str = indoc! {r#"
    import { defineField, defineType } from 'sanity'

    export default defineType({
      name: 'post',
      title: 'Post',
      type: 'document',
      fields: [
        defineField({
          name: 'title',
          title: 'Title',
          type: 'string',
          validation: (Rule) => Rule.required(),
        }),
        defineField({
          name: 'slug',
          title: 'Slug',
          type: 'slug',
          options: { source: 'title', maxLength: 96 },
        }),
        defineField({
          name: 'gallery',
          title: 'Gallery',
          type: 'array',
          of: [
            {
              type: 'object',
              fields: [
                { name: 'caption', type: 'string' },
              ],
            },
          ],
        }),
      ],
    })
"#};

fn parse(source: &str) -> (SchemaDescription, Diagnostics) {
    SchemaParser::new(source).parse().unwrap()
}

fn to_json(schema: &SchemaDescription) -> String {
    serde_json::to_string_pretty(schema).unwrap()
}

#[test]
fn post_schema() {
    let (schema, diagnostics) = parse(POST_SCHEMA);

    assert!(diagnostics.is_empty());
    insta::assert_snapshot!(to_json(&schema), @r#"
    {
      "typeName": "post",
      "fields": [
        {
          "name": "title",
          "type": "string",
          "title": "Title",
          "validation": true
        },
        {
          "name": "slug",
          "type": "slug",
          "title": "Slug",
          "validation": false
        },
        {
          "name": "gallery",
          "type": "array",
          "title": "Gallery",
          "validation": false,
          "of": "object",
          "nestedFields": [
            {
              "name": "caption",
              "type": "string",
              "validation": false
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn no_type_name_yields_unknown() {
    let (schema, diagnostics) = parse("export default { title: 'Post' }");

    assert_eq!(schema, SchemaDescription::unknown());
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::MissingTypeName]);
    assert!(diagnostics.has_errors());
}

#[test]
fn type_name_without_fields() {
    let (schema, diagnostics) = parse("defineType({ name: 'post', type: 'document', fields: [] })");

    assert_eq!(schema.type_name, "post");
    assert!(schema.fields.is_empty());
    assert!(schema.is_unparsed());
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::NoFields]);
}

#[test]
fn empty_type_name_is_skipped() {
    let source = indoc! {r#"
        defineType({
          name: "",
          fields: [defineField({ name: "author", type: "reference" })],
        })
    "#};
    let (schema, _) = parse(source);

    assert_eq!(schema.type_name, "author");
}

#[test]
fn comments_are_ignored() {
    let source = indoc! {r#"
        // name: 'draft'
        defineType({
          /* defineField({ name: 'hidden', type: 'string' }) */
          name: 'post',
          fields: [defineField({ name: 'title', type: 'string' })],
        })
    "#};
    let (schema, diagnostics) = parse(source);

    assert_eq!(schema.type_name, "post");
    assert_eq!(schema.fields.len(), 1);
    assert_eq!(schema.fields[0].name, "title");
    assert!(diagnostics.is_empty());
}

#[test]
fn fields_keep_declaration_order() {
    let source = indoc! {r#"
        defineType({
          name: 'author',
          fields: [
            defineField({ type: 'string', name: 'name' }),
            defineField({ name: 'bio', type: 'text' }),
            defineField({ name: 'avatar', type: 'image' }),
          ],
        })
    "#};
    let (schema, _) = parse(source);
    let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["name", "bio", "avatar"]);
}

#[test]
fn incomplete_field_is_skipped() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({ name: 'broken', title: 'Broken' }),
            defineField({ name: 'title', type: 'string' }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);

    assert_eq!(schema.fields.len(), 1);
    assert_eq!(schema.fields[0].name, "title");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::IncompleteField]);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(
        diag.message(),
        "field declaration needs both `name` and `type`: missing `type`"
    );
}

#[test]
fn nested_properties_do_not_leak_into_field() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({
              name: 'category',
              type: 'reference',
              to: [{ type: 'category', title: 'Nested' }],
            }),
          ],
        })
    "#};
    let (schema, _) = parse(source);
    let field = &schema.fields[0];

    assert_eq!(field.type_name, "reference");
    assert_eq!(field.title, None);
    assert!(!field.validation);
}

#[test]
fn array_of_references_is_not_expanded() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({
              name: 'authors',
              type: 'array',
              of: [{ type: 'reference', to: [{ type: 'author' }] }],
            }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);
    let field = schema.field("authors").unwrap();

    assert!(field.is_array());
    assert_eq!(field.of, None);
    assert!(field.nested_fields.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn object_array_without_fields_stays_plain() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({
              name: 'blocks',
              type: 'array',
              of: [{ type: 'object', fields: [] }],
            }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);
    let field = schema.field("blocks").unwrap();

    assert_eq!(field.of, None);
    assert!(!field.is_object_array());
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::EmptyObjectArray]);
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "object array `blocks` has no nested fields"
    );
}

#[test]
fn array_member_helpers() {
    let source = indoc! {r#"
        defineType({
          name: 'page',
          fields: [
            defineField({
              name: 'sections',
              type: 'array',
              of: [
                defineArrayMember({
                  type: 'object',
                  name: 'section',
                  fields: [
                    defineField({ name: 'heading', type: 'string', validation: (r) => r.required() }),
                    defineField({ name: 'body', type: 'text' }),
                  ],
                }),
              ],
            }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);

    assert!(diagnostics.is_empty());
    assert_eq!(schema.fields.len(), 1);
    let field = &schema.fields[0];
    assert_eq!(field.of, Some(ArrayOf::Object));
    let nested: Vec<_> = field
        .nested_fields
        .iter()
        .map(|n| (n.name.as_str(), n.type_name.as_str(), n.validation))
        .collect();
    assert_eq!(
        nested,
        vec![("heading", "string", true), ("body", "text", false)]
    );
}

#[test]
fn duplicate_nested_fields_keep_first() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({
              name: 'items',
              type: 'array',
              of: [{
                type: 'object',
                fields: [
                  { name: 'label', type: 'string' },
                  { name: 'url', type: 'url' },
                  { name: 'label', type: 'text', validation: (r) => r.required() },
                ],
              }],
            }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);
    let nested = &schema.field("items").unwrap().nested_fields;

    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].name, "label");
    assert_eq!(nested[0].type_name, "string");
    assert!(!nested[0].validation);
    assert_eq!(nested[1].name, "url");

    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DuplicateNestedField]);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "nested field `label` is declared more than once");
    assert!(!diag.is_error());
}

#[test]
fn image_sub_fields() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({
              name: 'slides',
              type: 'array',
              of: [{
                type: 'object',
                fields: [
                  {
                    name: 'hero',
                    type: 'image',
                    options: { hotspot: true },
                    fields: [
                      { name: 'alt', type: 'string', validation: (r) => r.required() },
                      { name: 'credit', type: 'string' },
                    ],
                  },
                  { name: 'caption', type: 'string' },
                ],
              }],
            }),
          ],
        })
    "#};
    let (schema, diagnostics) = parse(source);
    let nested = &schema.field("slides").unwrap().nested_fields;

    assert!(diagnostics.is_empty());
    assert_eq!(nested.len(), 2);
    let hero = &nested[0];
    assert!(hero.is_image());
    let sub: Vec<_> = hero
        .sub_fields
        .iter()
        .map(|s| (s.name.as_str(), s.validation))
        .collect();
    assert_eq!(sub, vec![("alt", true), ("credit", false)]);
    assert!(nested[1].sub_fields.is_empty());
}

#[test]
fn unclosed_source_still_yields_fields() {
    let source = indoc! {r#"
        defineType({
          name: 'post',
          fields: [
            defineField({ name: 'title', type: 'string' }),
            defineField({ name: 'body', type: 'text'
    "#};
    let (schema, diagnostics) = parse(source);
    let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["title", "body"]);
    assert_eq!(diagnostics.len(), 5);
    assert!(
        diagnostics
            .iter()
            .all(|d| d.kind() == DiagnosticKind::UnclosedDelimiter)
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn stray_input_is_reported() {
    let source = "defineType({ name: 'post', fields: [defineField({ name: 'a', type: 'string' })] }) ) §";
    let (schema, diagnostics) = parse(source);

    assert_eq!(schema.fields.len(), 1);
    assert_eq!(
        diagnostics.kinds(),
        vec![
            DiagnosticKind::MismatchedDelimiter,
            DiagnosticKind::UnrecognizedInput,
        ]
    );
}

#[test]
fn exhausted_fuel_is_fatal() {
    let result = SchemaParser::new(POST_SCHEMA).with_exec_fuel(Some(10)).parse();

    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn exhausted_fuel_describes_unknown() {
    let schema = SchemaParser::new(POST_SCHEMA)
        .with_exec_fuel(Some(10))
        .describe();

    assert_eq!(schema, SchemaDescription::unknown());
}

#[test]
fn unlimited_fuel() {
    let (schema, _) = SchemaParser::new(POST_SCHEMA)
        .with_exec_fuel(None)
        .parse()
        .unwrap();

    assert_eq!(schema.fields.len(), 3);
}

#[test]
fn many_array_fields_fit_the_default_budget() {
    let fields: String = (0..1000)
        .map(|i| {
            format!(
                "defineField({{ name: 'list{i}', type: 'array', of: [{{ type: 'object', \
                 fields: [{{ name: 'label', type: 'string' }}] }}] }}),\n"
            )
        })
        .collect();
    let source = format!("defineType({{ name: 'big', fields: [\n{fields}] }})");

    let (schema, diagnostics) = parse(&source);

    assert!(diagnostics.is_empty());
    assert_eq!(schema.type_name, "big");
    assert_eq!(schema.fields.len(), 1000);
    assert!(schema.fields.iter().all(|f| f.is_object_array()));
    assert_eq!(schema.fields[999].name, "list999");
}
