//! Value matcher and object shape validator.
//!
//! Validation semantics:
//! - Coercion is asymmetric: `string` accepts numeric input, `number` and
//!   `boolean` never coerce
//! - Errors are accumulated, not fail-fast: one call surfaces every
//!   independent problem across object fields and array elements
//! - Fields the shape does not declare pass through into the result
//!   unchanged
//! - Every error message is prefixed with the dotted/bracketed path of the
//!   value it describes
//!
//! The matcher and the object validator recurse into each other: array
//! elements and object fields go through the matcher, nested object nodes
//! delegate back to the object validator.

use serde_json::{Map, Value};

use crate::errors::{ValidationFailure, ValidationResult, ERROR_SEPARATOR};
use crate::types::{ObjectShape, SchemaNode};

/// Options threaded unchanged through every recursive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    /// When a node expects an array but the candidate is a single value
    /// that would be valid inside one, wrap it in a one-element array.
    pub coerce_valid_object_into_array: bool,
}

/// Maximum schema nesting depth the engine will follow. A subtree nested
/// deeper than this reports as unvalidatable instead of exhausting the
/// stack; sibling fields keep validating.
const MAX_VALIDATION_DEPTH: usize = 64;

/// Validates a candidate value against an object shape.
///
/// On success the result is a fresh object: every declared field holds its
/// validated (possibly coerced) value, and fields the shape does not
/// declare are carried over untouched. On failure, every independent error
/// found across the declared fields is reported, in declaration order.
///
/// The keyed-record check is deliberately loose: a sequence candidate is
/// admitted as a record keyed by decimal element index (`"0"`, `"1"`, ...),
/// and the reconstructed result is then an object, not a sequence. This
/// quirk is part of the call contract and kept stable.
///
/// # Arguments
///
/// * `description` - Label prefixed to every error message (e.g. `"Request body"`)
/// * `candidate` - The untyped value to validate
/// * `shape` - The expected object shape
/// * `options` - Validation options, passed through all recursion
pub fn validate_object_shape(
    description: &str,
    candidate: &Value,
    shape: &ObjectShape,
    options: &ValidationOptions,
) -> ValidationResult {
    validate_object_shape_at(description, candidate, shape, options, 0)
}

/// Validates a single candidate value against one schema node.
///
/// Exposed so array and object internals are independently testable and so
/// a bare top-level value (an array, a primitive) can be validated without
/// an enclosing shape.
///
/// An `Optional` node reaching the matcher is validated transparently
/// against its inner node: optionality concerns key presence, which the
/// object validator has already resolved by the time a value is in hand.
pub fn validate_value(
    description: &str,
    candidate: &Value,
    node: &SchemaNode,
    options: &ValidationOptions,
) -> ValidationResult {
    validate_value_at(description, candidate, node, options, 0)
}

fn validate_value_at(
    path: &str,
    candidate: &Value,
    node: &SchemaNode,
    options: &ValidationOptions,
    depth: usize,
) -> ValidationResult {
    if depth > MAX_VALIDATION_DEPTH {
        return Err(ValidationFailure::from_message(format!(
            "Unexpected error when validating {path}"
        )));
    }

    match node {
        SchemaNode::Unknown => Ok(candidate.clone()),
        SchemaNode::String => match candidate {
            Value::String(_) => Ok(candidate.clone()),
            Value::Number(number) => Ok(Value::String(number.to_string())),
            other => Err(type_mismatch(path, node.kind_name(), other)),
        },
        SchemaNode::Number => {
            if candidate.is_number() {
                Ok(candidate.clone())
            } else {
                Err(type_mismatch(path, node.kind_name(), candidate))
            }
        }
        SchemaNode::Boolean => {
            if candidate.is_boolean() {
                Ok(candidate.clone())
            } else {
                Err(type_mismatch(path, node.kind_name(), candidate))
            }
        }
        SchemaNode::ArrayOf(element) => validate_array(path, candidate, element, options, depth),
        SchemaNode::Optional(inner) => validate_value_at(path, candidate, inner, options, depth),
        SchemaNode::Object(shape) => {
            validate_object_shape_at(path, candidate, shape, options, depth)
        }
    }
}

/// Validates a candidate against an array-of node.
///
/// A sequence candidate is validated element by element without
/// short-circuiting; the failure lists every failing element's combined
/// message and summarizes them under one `contained invalid items` line.
/// A non-sequence candidate either fails, or, with
/// `coerce_valid_object_into_array` set, is validated as the sole element
/// and wrapped on success; its failure propagates verbatim.
fn validate_array(
    path: &str,
    candidate: &Value,
    element: &SchemaNode,
    options: &ValidationOptions,
    depth: usize,
) -> ValidationResult {
    match candidate {
        Value::Array(items) => {
            let mut element_errors: Vec<String> = Vec::new();
            let mut validated = Vec::with_capacity(items.len());

            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                match validate_value_at(&item_path, item, element, options, depth + 1) {
                    Ok(value) => validated.push(value),
                    Err(failure) => element_errors.push(failure.error_message().to_owned()),
                }
            }

            if element_errors.is_empty() {
                Ok(Value::Array(validated))
            } else {
                let summary = format!(
                    "{path} contained invalid items:\n{}",
                    element_errors.join(ERROR_SEPARATOR)
                );
                Err(ValidationFailure::new(element_errors, summary))
            }
        }
        single => {
            if options.coerce_valid_object_into_array {
                let item_path = format!("{path}[0]");
                validate_value_at(&item_path, single, element, options, depth + 1)
                    .map(|value| Value::Array(vec![value]))
            } else {
                Err(ValidationFailure::from_message(format!(
                    "Expected {path} to be type: Array"
                )))
            }
        }
    }
}

fn validate_object_shape_at(
    description: &str,
    candidate: &Value,
    shape: &ObjectShape,
    options: &ValidationOptions,
    depth: usize,
) -> ValidationResult {
    // Shallow copy of the candidate's fields. Fields the shape does not
    // declare stay in the copy untouched; declared fields are overwritten
    // with their validated values as they pass.
    let mut result: Map<String, Value> = match candidate {
        Value::Object(fields) => fields.clone(),
        // The loose keyed-record check: sequences are records keyed by
        // decimal element index.
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item.clone()))
            .collect(),
        other => {
            return Err(ValidationFailure::from_message(format!(
                "{description} was expected to be an object, but was {}",
                json_type_name(other)
            )));
        }
    };

    let mut errors: Vec<String> = Vec::new();

    for (name, node) in shape.fields() {
        let field_path = format!("{description}.{name}");

        let (expected, required) = match node {
            SchemaNode::Optional(inner) => (inner.as_ref(), false),
            other => (other, true),
        };

        match result.get(name).cloned() {
            Some(value) => {
                match validate_value_at(&field_path, &value, expected, options, depth + 1) {
                    Ok(validated) => {
                        result.insert(name.to_owned(), validated);
                    }
                    Err(failure) => errors.extend(failure.into_errors()),
                }
            }
            None => {
                if required {
                    errors.push(format!("{description}: Missing expected Key: {name}"));
                }
                // An absent optional field is skipped silently: no error,
                // no placeholder in the result.
            }
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(result))
    } else {
        Err(ValidationFailure::aggregate(errors))
    }
}

/// Returns the runtime type name of a value for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a type mismatch failure.
fn type_mismatch(path: &str, expected: &str, actual: &Value) -> ValidationFailure {
    ValidationFailure::from_message(format!(
        "Expected {path} to be type: {expected}, was {}",
        json_type_name(actual)
    ))
}
