//! Validation outcome protocol.
//!
//! Every public entry point returns the two-armed [`ValidationResult`]:
//! success carries the validated value, failure carries an ordered,
//! non-empty list of human-readable error strings plus a single combined
//! message. Validation never panics outward; faults are downgraded to
//! scoped error strings inside the failure arm.

use serde_json::Value;
use thiserror::Error;

/// Separator joining accumulated error messages into the combined message.
///
/// Four spaces followed by a newline. Existing consumers match on this
/// exact sequence, so it must not change.
pub(crate) const ERROR_SEPARATOR: &str = "    \n";

/// Failure arm of a validation outcome.
///
/// Holds every independent error found in one pass, in the order fields
/// are declared in the schema (and elements appear in the candidate).
/// The display form is the combined message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error_message}")]
pub struct ValidationFailure {
    errors: Vec<String>,
    error_message: String,
}

impl ValidationFailure {
    /// A failure with a single error; the combined message is that error.
    pub(crate) fn from_message(message: String) -> Self {
        Self {
            errors: vec![message.clone()],
            error_message: message,
        }
    }

    /// A failure with an explicit error list and combined message.
    ///
    /// Used where the combined message is not the plain join, e.g. the
    /// array summary line. `errors` must be non-empty.
    pub(crate) fn new(errors: Vec<String>, error_message: String) -> Self {
        Self {
            errors,
            error_message,
        }
    }

    /// A failure whose combined message joins the accumulated errors with
    /// [`ERROR_SEPARATOR`]. `errors` must be non-empty.
    pub(crate) fn aggregate(errors: Vec<String>) -> Self {
        let error_message = errors.join(ERROR_SEPARATOR);
        Self {
            errors,
            error_message,
        }
    }

    /// The discrete error messages, one per independent failure.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The single combined message, suitable for display or logging.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Consumes the failure, returning the discrete error list.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// The two-armed outcome of a validation call.
pub type ValidationResult = Result<Value, ValidationFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message_failure() {
        let failure = ValidationFailure::from_message("Expected X to be type: number, was string".into());
        assert_eq!(failure.errors().len(), 1);
        assert_eq!(failure.error_message(), "Expected X to be type: number, was string");
        assert_eq!(failure.errors()[0], failure.error_message());
    }

    #[test]
    fn test_aggregate_joins_with_separator() {
        let failure = ValidationFailure::aggregate(vec!["first".into(), "second".into(), "third".into()]);
        assert_eq!(failure.errors().len(), 3);
        assert_eq!(failure.error_message(), "first    \nsecond    \nthird");
    }

    #[test]
    fn test_display_is_combined_message() {
        let failure = ValidationFailure::aggregate(vec!["one".into(), "two".into()]);
        assert_eq!(failure.to_string(), failure.error_message());
    }

    #[test]
    fn test_explicit_combined_message() {
        let failure = ValidationFailure::new(
            vec!["inner".into()],
            "X contained invalid items:\ninner".into(),
        );
        assert_eq!(failure.errors(), ["inner"]);
        assert_eq!(failure.error_message(), "X contained invalid items:\ninner");
    }

    #[test]
    fn test_into_errors() {
        let failure = ValidationFailure::aggregate(vec!["a".into(), "b".into()]);
        assert_eq!(failure.into_errors(), vec!["a".to_string(), "b".to_string()]);
    }
}
