#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for groqgen.
//!
//! The schema description is the hand-off point between the schema parser and the
//! query generator. Every value here is an immutable snapshot built once per
//! generation request.
//!
//! Serialized field names follow the camelCase shape of Sanity tooling
//! (`typeName`, `nestedFields`, `subFields`, and `type` for a field's type).

use serde::{Deserialize, Serialize};

pub mod colors;
pub mod utils;


pub use colors::Colors;

/// Type name used when the schema source does not declare one.
pub const UNKNOWN_TYPE_NAME: &str = "unknown";

/// Field type that marks an array field.
pub const ARRAY_TYPE: &str = "array";

/// Field type that marks an image field (projected through its asset).
pub const IMAGE_TYPE: &str = "image";

/// Field name that enables the slug-based query.
pub const SLUG_FIELD: &str = "slug";

// ============================================================================
// Schema Description
// ============================================================================

/// A parsed schema: the document type name plus its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    pub type_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaDescription {
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// The "could not parse" sentinel: `unknown` type name, no fields.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_TYPE_NAME, Vec::new())
    }

    /// True when the description must be treated as a parse failure.
    pub fn is_unparsed(&self) -> bool {
        self.type_name == UNKNOWN_TYPE_NAME || self.fields.is_empty()
    }

    /// True when a top-level field is literally named `slug`.
    pub fn has_slug(&self) -> bool {
        self.fields.iter().any(|f| f.name == SLUG_FIELD)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Default for SchemaDescription {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A top-level field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub validation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<ArrayOf>,
    /// Fields of the object members of an array field. Empty when not expanded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_fields: Vec<NestedFieldDescriptor>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            title: None,
            validation: false,
            of: None,
            nested_fields: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_validation(mut self, value: bool) -> Self {
        self.validation = value;
        self
    }

    /// Marks the field as an array of objects carrying `nested` fields.
    pub fn with_nested_fields(mut self, nested: Vec<NestedFieldDescriptor>) -> Self {
        self.of = Some(ArrayOf::Object);
        self.nested_fields = nested;
        self
    }

    pub fn is_array(&self) -> bool {
        self.type_name == ARRAY_TYPE
    }

    /// True when the field is an object array with at least one nested field.
    pub fn is_object_array(&self) -> bool {
        self.of == Some(ArrayOf::Object) && !self.nested_fields.is_empty()
    }
}

/// Member shape of an array field.
///
/// The parser only produces `Object`; `Other` keeps whatever a hand-built
/// description carried so it survives a JSON round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArrayOf {
    Object,
    Other(String),
}

impl From<String> for ArrayOf {
    fn from(value: String) -> Self {
        if value == "object" {
            ArrayOf::Object
        } else {
            ArrayOf::Other(value)
        }
    }
}

impl From<ArrayOf> for String {
    fn from(value: ArrayOf) -> Self {
        match value {
            ArrayOf::Object => "object".to_string(),
            ArrayOf::Other(raw) => raw,
        }
    }
}

/// A field declared inside the object shape of an array-of-objects field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedFieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub validation: bool,
    /// Inline attributes of an image field (e.g. `alt`). Empty for other types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<SubFieldDescriptor>,
}

impl NestedFieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            validation: false,
            sub_fields: Vec::new(),
        }
    }

    pub fn with_validation(mut self, value: bool) -> Self {
        self.validation = value;
        self
    }

    pub fn with_sub_fields(mut self, sub_fields: Vec<SubFieldDescriptor>) -> Self {
        self.sub_fields = sub_fields;
        self
    }

    pub fn is_image(&self) -> bool {
        self.type_name == IMAGE_TYPE
    }
}

/// An inline attribute of an image-typed nested field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub validation: bool,
}

impl SubFieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            validation: false,
        }
    }

    pub fn with_validation(mut self, value: bool) -> Self {
        self.validation = value;
        self
    }
}
