//! shapeguard - runtime shape validation for untyped values
//!
//! Checks a value of unknown provenance (a parsed request body, a config
//! document, a queue message) against a declared shape, and yields either
//! a validated value or the full list of path-qualified problems.
//!
//! # Design Principles
//!
//! - Accumulate every error in one pass; never stop at the first
//! - Coerce only where unambiguous (numbers into expected strings)
//! - Undeclared fields pass through untouched
//! - Pure and deterministic: same inputs, same outcome, no shared state
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use shapeguard::{array_of, optional, ObjectShape, SchemaNode};
//! use shapeguard::{validate_object_shape, ValidationOptions};
//!
//! let shape = ObjectShape::new()
//!     .field("name", SchemaNode::String)
//!     .field("ports", array_of(SchemaNode::Number))
//!     .field("comment", optional(SchemaNode::String));
//!
//! let candidate = json!({ "name": "gateway", "ports": [80, 443] });
//! let validated = validate_object_shape(
//!     "Service config",
//!     &candidate,
//!     &shape,
//!     &ValidationOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(validated, candidate);
//! ```

mod errors;
mod types;
mod validator;

pub use errors::{ValidationFailure, ValidationResult};
pub use types::{array_of, optional, ObjectShape, SchemaNode};
pub use validator::{validate_object_shape, validate_value, ValidationOptions};
