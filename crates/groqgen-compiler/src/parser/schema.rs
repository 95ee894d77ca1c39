//! Schema extraction: layered scans over the token scanner.
//!
//! 1. The type name is the first non-empty `name:` string anywhere.
//! 2. Fields are the `defineField({ ... })` blocks in source order.
//! 3. Array fields are looked up again by name; an `of: [...]` section holding an
//!    object member contributes that member's `fields: [...]` as nested fields.
//! 4. Image nested fields contribute the blocks of their own `fields: [...]` as sub-fields.
//!
//! Nothing here fails on malformed input. Skipped or degraded declarations are
//! reported as warnings; only fuel exhaustion is fatal.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rowan::TextRange;

use groqgen_core::{
    FieldDescriptor, NestedFieldDescriptor, SchemaDescription, SubFieldDescriptor,
    UNKNOWN_TYPE_NAME,
};

use super::lexer::lex;
use super::scanner::{DelimiterIssue, Group, Scanner, Scope, Window};
use crate::PassResult;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Minimum token-step budget for one schema.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;

/// Whole-stream passes charged per field declaration, plus a fixed base.
/// Each array field rescans the token stream to find its members.
const PASSES_PER_FIELD: u64 = 8;
const BASE_PASSES: u64 = 8;

const FIELD_CALLEE: &str = "defineField";
const OBJECT_TYPE: &str = "object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecFuel {
    /// Grows with the input, see [`scaled_exec_fuel`].
    Scaled,
    /// `None` is unlimited.
    Fixed(Option<u32>),
}

/// Configurable entry point, mirrors [`crate::parse_schema`] with custom limits.
#[derive(Debug, Clone)]
pub struct SchemaParser<'src> {
    source: &'src str,
    exec_fuel: ExecFuel,
}

impl<'src> SchemaParser<'src> {
    /// Parser whose fuel budget scales with the token count and the number of
    /// field declarations, never below [`DEFAULT_EXEC_FUEL`].
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            exec_fuel: ExecFuel::Scaled,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Fixed budget instead of the scaled one. `None` removes the limit.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = ExecFuel::Fixed(limit);
        self
    }

    pub fn parse(self) -> PassResult<SchemaDescription> {
        let scanner = Scanner::new(self.source, lex(self.source));
        let limit = match self.exec_fuel {
            ExecFuel::Scaled => Some(scaled_exec_fuel(&scanner)),
            ExecFuel::Fixed(limit) => limit,
        };
        let scanner = scanner.with_exec_fuel(limit);
        let mut pass = SchemaPass {
            scanner: &scanner,
            diagnostics: Diagnostics::new(),
        };

        pass.report_structure();
        let type_name = pass.type_name();
        let fields = pass.fields();

        let consumed = scanner.finish()?;
        tracing::debug!(
            type_name = type_name.as_deref().unwrap_or(UNKNOWN_TYPE_NAME),
            fields = fields.len(),
            exec_fuel_consumed = consumed,
            "schema scanned"
        );

        let mut diagnostics = pass.diagnostics;
        let Some(type_name) = type_name else {
            diagnostics
                .report(DiagnosticKind::MissingTypeName, TextRange::empty(0.into()))
                .emit();
            return Ok((SchemaDescription::unknown(), diagnostics));
        };
        if fields.is_empty() {
            diagnostics
                .report(DiagnosticKind::NoFields, scanner.window_span(scanner.all()))
                .emit();
        }

        Ok((SchemaDescription::new(type_name, fields), diagnostics))
    }

    /// Infallible variant of [`parse`](Self::parse): a fatal error yields
    /// [`SchemaDescription::unknown`] and diagnostics are dropped.
    pub fn describe(self) -> SchemaDescription {
        match self.parse() {
            Ok((schema, _)) => schema,
            Err(err) => {
                tracing::warn!(error = %err, "schema parsing aborted, using the unknown schema");
                SchemaDescription::unknown()
            }
        }
    }
}

/// `tokens * (fields * PASSES_PER_FIELD + BASE_PASSES)`, saturating, floored at
/// [`DEFAULT_EXEC_FUEL`]. Still finite for any input.
fn scaled_exec_fuel(scanner: &Scanner<'_>) -> u32 {
    let tokens = scanner.len() as u64;
    let fields = (0..scanner.len())
        .filter(|&index| scanner.text(index) == FIELD_CALLEE)
        .count() as u64;
    let passes = fields
        .saturating_mul(PASSES_PER_FIELD)
        .saturating_add(BASE_PASSES);
    let budget = u32::try_from(tokens.saturating_mul(passes)).unwrap_or(u32::MAX);
    budget.max(DEFAULT_EXEC_FUEL)
}

/// A declaration block with its `name` and `type` resolved.
struct Declaration<'src> {
    block: Group,
    name: &'src str,
    name_span: TextRange,
    type_name: &'src str,
    validation: bool,
}

struct SchemaPass<'s, 'src> {
    scanner: &'s Scanner<'src>,
    diagnostics: Diagnostics,
}

impl<'src> SchemaPass<'_, 'src> {
    fn report_structure(&mut self) {
        let scanner = self.scanner;
        for issue in scanner.delimiter_issues() {
            let (kind, index) = match *issue {
                DelimiterIssue::Unclosed(index) => (DiagnosticKind::UnclosedDelimiter, index),
                DelimiterIssue::Unexpected(index) => (DiagnosticKind::MismatchedDelimiter, index),
            };
            self.diagnostics
                .report(kind, scanner.span(index))
                .message(scanner.text(index))
                .emit();
        }
        for index in scanner.garbage() {
            self.diagnostics
                .report(DiagnosticKind::UnrecognizedInput, scanner.span(index))
                .emit();
        }
    }

    fn type_name(&self) -> Option<String> {
        let scanner = self.scanner;
        scanner
            .string_property(scanner.all(), "name", Scope::Anywhere)
            .map(|(_, name)| name.to_string())
    }

    fn fields(&mut self) -> Vec<FieldDescriptor> {
        let scanner = self.scanner;
        let mut declared = Vec::new();

        for block in scanner.call_blocks(scanner.all(), FIELD_CALLEE) {
            let Some(decl) = self.declaration(block) else {
                continue;
            };
            let mut field = FieldDescriptor::new(decl.name, decl.type_name)
                .with_validation(decl.validation);
            let title = scanner.string_property(block.inner, "title", Scope::Shallow);
            if let Some((_, title)) = title {
                field = field.with_title(title);
            }
            declared.push(field);
        }

        declared
            .into_iter()
            .map(|field| {
                if !field.is_array() {
                    return field;
                }
                let nested = self.nested_fields(&field.name);
                if nested.is_empty() {
                    field
                } else {
                    field.with_nested_fields(nested)
                }
            })
            .collect()
    }

    /// Resolves a block's own `name` and `type`. Reports and skips incomplete blocks.
    fn declaration(&mut self, block: Group) -> Option<Declaration<'src>> {
        let scanner = self.scanner;
        let name = scanner.string_property(block.inner, "name", Scope::Shallow);
        let type_name = scanner.string_property(block.inner, "type", Scope::Shallow);

        let (Some((name_index, name)), Some((_, type_name))) = (name, type_name) else {
            let missing = match name {
                None => "missing `name`",
                Some(_) => "missing `type`",
            };
            self.diagnostics
                .report(DiagnosticKind::IncompleteField, scanner.group_span(&block))
                .message(missing)
                .emit();
            return None;
        };

        Some(Declaration {
            block,
            name,
            name_span: scanner.span(name_index),
            type_name,
            validation: scanner.has_key(block.inner, "validation"),
        })
    }

    /// First field block with the given `name` that declares an `of: [...]` list.
    fn find_array_members(&self, field_name: &str) -> Option<Group> {
        let scanner = self.scanner;
        scanner
            .call_blocks(scanner.all(), FIELD_CALLEE)
            .filter(|block| {
                scanner
                    .string_property(block.inner, "name", Scope::Shallow)
                    .is_some_and(|(_, name)| name == field_name)
            })
            .find_map(|block| scanner.list_property(block.inner, "of", Scope::Shallow))
    }

    /// The `fields: [...]` list of the object member in an `of` section.
    fn object_fields(&self, members: Window) -> Option<Group> {
        let scanner = self.scanner;
        scanner
            .element_blocks(members)
            .find(|block| {
                scanner.has_string_property(block.inner, "type", OBJECT_TYPE, Scope::Shallow)
            })
            .and_then(|object| scanner.list_property(object.inner, "fields", Scope::Shallow))
            .or_else(|| scanner.list_property(members, "fields", Scope::Anywhere))
    }

    fn nested_fields(&mut self, field_name: &str) -> Vec<NestedFieldDescriptor> {
        let scanner = self.scanner;
        let Some(members) = self.find_array_members(field_name) else {
            return Vec::new();
        };
        if !scanner.has_string_property(members.inner, "type", OBJECT_TYPE, Scope::Anywhere) {
            return Vec::new();
        }

        let mut seen: IndexMap<&'src str, (TextRange, NestedFieldDescriptor)> = IndexMap::new();
        if let Some(list) = self.object_fields(members.inner) {
            for block in scanner.element_blocks(list.inner) {
                let Some(decl) = self.declaration(block) else {
                    continue;
                };
                match seen.entry(decl.name) {
                    Entry::Occupied(first) => {
                        tracing::debug!(
                            array_field = field_name,
                            nested_field = decl.name,
                            "dropping duplicate nested field"
                        );
                        self.diagnostics
                            .report(DiagnosticKind::DuplicateNestedField, decl.name_span)
                            .message(decl.name)
                            .related_to("first declared here", first.get().0)
                            .emit();
                    }
                    Entry::Vacant(slot) => {
                        let span = decl.name_span;
                        slot.insert((span, self.nested_field(&decl)));
                    }
                }
            }
        }

        if seen.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::EmptyObjectArray, scanner.group_span(&members))
                .message(field_name)
                .emit();
        }

        seen.into_values().map(|(_, nested)| nested).collect()
    }

    fn nested_field(&mut self, decl: &Declaration<'src>) -> NestedFieldDescriptor {
        let nested = NestedFieldDescriptor::new(decl.name, decl.type_name)
            .with_validation(decl.validation);
        if !nested.is_image() {
            return nested;
        }
        let sub_fields = self.sub_fields(decl.block.inner);
        nested.with_sub_fields(sub_fields)
    }

    fn sub_fields(&mut self, image: Window) -> Vec<SubFieldDescriptor> {
        let scanner = self.scanner;
        let Some(list) = scanner.list_property(image, "fields", Scope::Shallow) else {
            return Vec::new();
        };
        let mut sub_fields = Vec::new();
        for block in scanner.element_blocks(list.inner) {
            if let Some(decl) = self.declaration(block) {
                sub_fields.push(
                    SubFieldDescriptor::new(decl.name, decl.type_name)
                        .with_validation(decl.validation),
                );
            }
        }
        sub_fields
    }
}
