//! Schema model: the vocabulary for declaring expected value shapes.
//!
//! A schema is a finite tree of [`SchemaNode`]s:
//! - primitive kinds: `unknown`, `string`, `number`, `boolean`
//! - `array_of`: a sequence whose every element matches one inner node
//! - an [`ObjectShape`]: named fields, each with its own node
//! - `optional`: marks an object-shape field absent-tolerant
//!
//! Construction never fails and has no side effects. Nodes are immutable
//! and freely reusable across validation calls.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A schema node describing one expected shape.
///
/// Serialized form: primitive kinds are their kind-name strings
/// (`"string"`, `"number"`, ...); wrappers are single-key maps
/// (`{"array_of": ...}`, `{"optional": ...}`, `{"object": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaNode {
    /// Matches any value, passed through unchanged.
    Unknown,
    /// UTF-8 string. Numbers coerce to their canonical decimal text.
    String,
    /// Any numeric value. No coercion.
    Number,
    /// Boolean. No coercion.
    Boolean,
    /// Homogeneous sequence with a single element node.
    ArrayOf(Box<SchemaNode>),
    /// Absent-tolerant wrapper; meaningful only as an object-shape field.
    Optional(Box<SchemaNode>),
    /// Nested object with its own field shape.
    Object(ObjectShape),
}

impl SchemaNode {
    /// Returns the kind name used in serialized schemas and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Unknown => "unknown",
            SchemaNode::String => "string",
            SchemaNode::Number => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::ArrayOf(_) => "array",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Object(_) => "object",
        }
    }

    /// Shorthand for an array of strings.
    pub fn string_array() -> Self {
        array_of(SchemaNode::String)
    }

    /// Shorthand for an array of numbers.
    pub fn number_array() -> Self {
        array_of(SchemaNode::Number)
    }

    /// Shorthand for an array of booleans.
    pub fn boolean_array() -> Self {
        array_of(SchemaNode::Boolean)
    }
}

impl From<ObjectShape> for SchemaNode {
    fn from(shape: ObjectShape) -> Self {
        SchemaNode::Object(shape)
    }
}

/// Wraps a node as an array-of schema node.
///
/// Accepts any node, including nested arrays and object shapes. No
/// validation happens at construction time.
pub fn array_of(node: SchemaNode) -> SchemaNode {
    SchemaNode::ArrayOf(Box::new(node))
}

/// Wraps a node as an optional schema node.
///
/// Optionality concerns key presence, so the wrapper is meaningful only as
/// an object-shape field's node. Wrapping an already-optional node returns
/// it unchanged, so double wrapping cannot be constructed.
pub fn optional(node: SchemaNode) -> SchemaNode {
    match node {
        SchemaNode::Optional(_) => node,
        other => SchemaNode::Optional(Box::new(other)),
    }
}

/// An object shape: a mapping from field name to schema node.
///
/// Fields keep their declaration order, and that order drives both field
/// iteration during validation and the order of accumulated error messages.
/// Field names are unique; redeclaring a name replaces its node in place.
///
/// Serialized form is a JSON map in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectShape {
    fields: Vec<(String, SchemaNode)>,
}

impl ObjectShape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field, or replaces the node of an already-declared name
    /// without changing its position.
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.fields.push((name, node)),
        }
        self
    }

    /// Looks up the node declared for a field name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ObjectShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, node) in &self.fields {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ObjectShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShapeVisitor;

        impl<'de> Visitor<'de> for ShapeVisitor {
            type Value = ObjectShape;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of field names to schema nodes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<ObjectShape, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Entries are kept in document order; a repeated name
                // replaces the earlier node, as in the builder.
                let mut shape = ObjectShape::new();
                while let Some((name, node)) = access.next_entry::<String, SchemaNode>()? {
                    shape = shape.field(name, node);
                }
                Ok(shape)
            }
        }

        deserializer.deserialize_map(ShapeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_shape() -> ObjectShape {
        ObjectShape::new()
            .field("city", SchemaNode::String)
            .field("zip", SchemaNode::String)
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SchemaNode::Unknown.kind_name(), "unknown");
        assert_eq!(SchemaNode::String.kind_name(), "string");
        assert_eq!(SchemaNode::Number.kind_name(), "number");
        assert_eq!(SchemaNode::Boolean.kind_name(), "boolean");
        assert_eq!(array_of(SchemaNode::String).kind_name(), "array");
        assert_eq!(optional(SchemaNode::Number).kind_name(), "optional");
        assert_eq!(SchemaNode::Object(address_shape()).kind_name(), "object");
    }

    #[test]
    fn test_array_shorthands() {
        assert_eq!(SchemaNode::string_array(), array_of(SchemaNode::String));
        assert_eq!(SchemaNode::number_array(), array_of(SchemaNode::Number));
        assert_eq!(SchemaNode::boolean_array(), array_of(SchemaNode::Boolean));
    }

    #[test]
    fn test_optional_flattens_double_wrapping() {
        let once = optional(SchemaNode::String);
        let twice = optional(optional(SchemaNode::String));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_optional_wraps_arrays_and_objects() {
        let node = optional(array_of(SchemaNode::Number));
        assert_eq!(
            node,
            SchemaNode::Optional(Box::new(SchemaNode::ArrayOf(Box::new(SchemaNode::Number))))
        );

        let node = optional(SchemaNode::Object(address_shape()));
        assert!(matches!(node, SchemaNode::Optional(_)));
    }

    #[test]
    fn test_shape_keeps_declaration_order() {
        let shape = ObjectShape::new()
            .field("zulu", SchemaNode::String)
            .field("alpha", SchemaNode::Number)
            .field("mike", SchemaNode::Boolean);

        let names: Vec<&str> = shape.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_redeclared_field_replaces_in_place() {
        let shape = ObjectShape::new()
            .field("one", SchemaNode::String)
            .field("two", SchemaNode::Number)
            .field("one", SchemaNode::Boolean);

        assert_eq!(shape.len(), 2);
        assert_eq!(shape.get("one"), Some(&SchemaNode::Boolean));
        let names: Vec<&str> = shape.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_shape_lookup() {
        let shape = address_shape();
        assert_eq!(shape.get("city"), Some(&SchemaNode::String));
        assert_eq!(shape.get("country"), None);
        assert!(!shape.is_empty());
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn test_primitive_serde_forms() {
        assert_eq!(serde_json::to_string(&SchemaNode::String).unwrap(), r#""string""#);
        assert_eq!(serde_json::to_string(&SchemaNode::Unknown).unwrap(), r#""unknown""#);

        let parsed: SchemaNode = serde_json::from_str(r#""boolean""#).unwrap();
        assert_eq!(parsed, SchemaNode::Boolean);
    }

    #[test]
    fn test_wrapper_serde_forms() {
        let node = array_of(SchemaNode::Number);
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"array_of":"number"}"#);

        let node = optional(SchemaNode::String);
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"optional":"string"}"#);

        let parsed: SchemaNode = serde_json::from_str(r#"{"array_of":{"optional":"string"}}"#).unwrap();
        assert_eq!(parsed, array_of(optional(SchemaNode::String)));
    }

    #[test]
    fn test_shape_serde_round_trip_keeps_order() {
        let shape = ObjectShape::new()
            .field("zulu", SchemaNode::String)
            .field("alpha", SchemaNode::number_array())
            .field("mike", optional(SchemaNode::Boolean));

        let text = serde_json::to_string(&shape).unwrap();
        assert_eq!(
            text,
            r#"{"zulu":"string","alpha":{"array_of":"number"},"mike":{"optional":"boolean"}}"#
        );

        let parsed: ObjectShape = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, shape);
    }

    #[test]
    fn test_nested_object_serde() {
        let shape = ObjectShape::new().field("address", SchemaNode::Object(address_shape()));
        let text = serde_json::to_string(&shape).unwrap();
        assert_eq!(text, r#"{"address":{"object":{"city":"string","zip":"string"}}}"#);

        let parsed: ObjectShape = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, shape);
    }

    #[test]
    fn test_malformed_schema_document_rejected() {
        assert!(serde_json::from_str::<SchemaNode>(r#""integer""#).is_err());
        assert!(serde_json::from_str::<SchemaNode>(r#"{"array_of":"integer"}"#).is_err());
        assert!(serde_json::from_str::<ObjectShape>(r#"["not","a","map"]"#).is_err());
    }
}
