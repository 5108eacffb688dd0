// crates/schema-form-core/src/core/schema.rs
// ============================================================================
// Module: Schema Form Schema Model
// Description: Typed JSON-Schema nodes and the definitions registry.
// Purpose: Give variant resolution and requiredness a typed, lossless schema view.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Schemas arrive as loosely shaped JSON documents. This module parses them
//! into [`Schema`], which names the keywords the form core reasons about and
//! keeps every other keyword in a flattened map so a schema survives a
//! serialize/deserialize cycle unchanged. [`SchemaConstraint`] is the tagged
//! view the requiredness evaluator matches on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Schema Types
// ============================================================================

/// Primitive JSON-Schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// Integral JSON number.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
}

/// Declared `type` keyword, either a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `"type": "object"`
    Single(SchemaType),
    /// `"type": ["object", "null"]`
    Multiple(Vec<SchemaType>),
}

impl TypeDecl {
    /// Returns true when the declaration admits the given type.
    #[must_use]
    pub fn includes(&self, kind: SchemaType) -> bool {
        match self {
            Self::Single(single) => *single == kind,
            Self::Multiple(kinds) => kinds.contains(&kind),
        }
    }
}

impl From<SchemaType> for TypeDecl {
    fn from(kind: SchemaType) -> Self {
        Self::Single(kind)
    }
}

// ============================================================================
// SECTION: Schema Node
// ============================================================================

/// A single JSON-Schema node.
///
/// # Invariants
/// - Keywords not modeled as fields are preserved verbatim in `extra`.
/// - `const`, `default` and `enum` distinguish "absent" from an explicit `null`.
/// - Boolean schemas parse to their object equivalents: `true` to `{}` and
///   `false` to `{"not": {}}`. They serialize back in object form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared base type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeDecl>,
    /// Object property schemas keyed by property name.
    #[serde(default, deserialize_with = "subschema_map", skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// `const` constraint.
    #[serde(
        rename = "const",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub constant: Option<Value>,
    /// `enum` constraint.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    /// Default value.
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// `anyOf` alternatives.
    #[serde(
        rename = "anyOf",
        default,
        deserialize_with = "subschema_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub any_of: Option<Vec<Schema>>,
    /// `oneOf` alternatives.
    #[serde(
        rename = "oneOf",
        default,
        deserialize_with = "subschema_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_of: Option<Vec<Schema>>,
    /// `allOf` conjuncts.
    #[serde(
        rename = "allOf",
        default,
        deserialize_with = "subschema_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub all_of: Option<Vec<Schema>>,
    /// `$ref` pointer into the definitions registry.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Draft-07 style definitions.
    #[serde(default, deserialize_with = "subschema_map", skip_serializing_if = "Option::is_none")]
    pub definitions: Option<BTreeMap<String, Schema>>,
    /// 2019-09+ style definitions.
    #[serde(
        rename = "$defs",
        default,
        deserialize_with = "subschema_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub defs: Option<BTreeMap<String, Schema>>,
    /// Every keyword without a dedicated field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserializes a keyword that is present, keeping an explicit `null` as `Some(Null)`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Deserializes a list of subschemas, accepting boolean schemas.
fn subschema_list<'de, D>(deserializer: D) -> Result<Option<Vec<Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(nodes) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    nodes
        .into_iter()
        .map(Schema::from_value)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(D::Error::custom)
}

/// Deserializes a name-keyed table of subschemas, accepting boolean schemas.
fn subschema_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(nodes) = Option::<BTreeMap<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let mut schemas = BTreeMap::new();
    for (name, node) in nodes {
        let schema = Schema::from_value(node).map_err(D::Error::custom)?;
        schemas.insert(name, schema);
    }
    Ok(Some(schemas))
}

impl Schema {
    /// Parses a schema from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the value is neither a schema object
    /// nor a boolean schema.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Bool(accepts) => Ok(Self::from_bool(accepts)),
            other => serde_json::from_value(other),
        }
    }

    /// Returns the object form of a boolean schema.
    #[must_use]
    pub fn from_bool(accepts: bool) -> Self {
        if accepts {
            return Self::default();
        }
        let mut extra = Map::new();
        extra.insert("not".to_string(), Value::Object(Map::new()));
        Self {
            extra,
            ..Self::default()
        }
    }

    /// Serializes the schema back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Creates an empty schema declaring only a type.
    #[must_use]
    pub fn of_type(kind: SchemaType) -> Self {
        Self {
            schema_type: Some(TypeDecl::Single(kind)),
            ..Self::default()
        }
    }

    /// Returns true when the schema describes an object.
    ///
    /// A schema is object-shaped when its type admits `object` or it declares
    /// at least one property.
    #[must_use]
    pub fn is_object_shaped(&self) -> bool {
        self.schema_type.as_ref().is_some_and(|kind| kind.includes(SchemaType::Object))
            || self.properties.as_ref().is_some_and(|properties| !properties.is_empty())
    }

    /// Returns true when the schema declares `key` in `properties`.
    #[must_use]
    pub fn declares(&self, key: &str) -> bool {
        self.properties.as_ref().is_some_and(|properties| properties.contains_key(key))
    }

    /// Iterates over the property names declared by this schema.
    pub fn declared_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().flat_map(|properties| properties.keys().map(String::as_str))
    }

    /// Returns a keyword that has no dedicated field.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Returns the boolean-relevant constraints in evaluation precedence order.
    #[must_use]
    pub fn constraints(&self) -> Vec<SchemaConstraint<'_>> {
        let mut out = Vec::new();
        if let Some(constant) = &self.constant {
            out.push(SchemaConstraint::Const(constant));
        }
        if let Some(values) = &self.enumeration {
            out.push(SchemaConstraint::Enum(values));
        }
        if let Some(alternatives) = &self.any_of {
            out.push(SchemaConstraint::AnyOf(alternatives));
        }
        if let Some(alternatives) = &self.one_of {
            out.push(SchemaConstraint::OneOf(alternatives));
        }
        if let Some(conjuncts) = &self.all_of {
            out.push(SchemaConstraint::AllOf(conjuncts));
        }
        out
    }
}

// ============================================================================
// SECTION: Constraint View
// ============================================================================

/// Tagged view over the keywords that can force a boolean value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaConstraint<'a> {
    /// `const` keyword.
    Const(&'a Value),
    /// `enum` keyword.
    Enum(&'a [Value]),
    /// `anyOf` combinator.
    AnyOf(&'a [Schema]),
    /// `oneOf` combinator.
    OneOf(&'a [Schema]),
    /// `allOf` combinator.
    AllOf(&'a [Schema]),
}

// ============================================================================
// SECTION: Definitions Registry
// ============================================================================

/// Pointer prefix for draft-07 definitions.
const DEFINITIONS_PREFIX: &str = "#/definitions/";
/// Pointer prefix for 2019-09+ definitions.
const DEFS_PREFIX: &str = "#/$defs/";

/// Named schemas shared by a form, addressed through `$ref` pointers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    /// Schemas keyed by definition name.
    entries: BTreeMap<String, Schema>,
}

impl Definitions {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Collects `definitions` and `$defs` from a root schema.
    ///
    /// Names present in both tables resolve to the `definitions` entry.
    #[must_use]
    pub fn from_root(root: &Schema) -> Self {
        let mut entries = root.defs.clone().unwrap_or_default();
        if let Some(definitions) = &root.definitions {
            entries.extend(definitions.iter().map(|(name, schema)| (name.clone(), schema.clone())));
        }
        Self {
            entries,
        }
    }

    /// Registers a named schema, returning the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.entries.insert(name.into(), schema)
    }

    /// Returns a schema by definition name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.entries.get(name)
    }

    /// Resolves a local `$ref` pointer such as `#/definitions/Address`.
    #[must_use]
    pub fn lookup(&self, reference: &str) -> Option<&Schema> {
        let name = reference
            .strip_prefix(DEFINITIONS_PREFIX)
            .or_else(|| reference.strip_prefix(DEFS_PREFIX))?;
        self.entries.get(&unescape_pointer_token(name))
    }

    /// Returns the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the registry as a JSON object keyed by definition name.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when a schema fails to serialize.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.entries)
    }
}

impl FromIterator<(String, Schema)> for Definitions {
    fn from_iter<I: IntoIterator<Item = (String, Schema)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Decodes a single JSON-pointer token (`~1` to `/`, `~0` to `~`).
fn unescape_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
