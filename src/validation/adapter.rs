//! Request validation adapter
//!
//! Runs the shared schema against a raw candidate and reshapes schema
//! failures into a [`ValidationErrorMap`]. Schema failures never escape
//! as errors past this boundary; they become data.

use serde_json::Value;
use tracing::debug;

use crate::schema::{CarRecord, CarSchema, Clock, TimeReference};

use super::error_map::ValidationErrorMap;

/// Validates one candidate.
///
/// `Ok` means the caller may continue with the typed record; `Err` carries
/// the field-keyed messages, last issue per field wins.
pub fn validate_request(
    schema: &CarSchema,
    candidate: &Value,
    at: &TimeReference,
) -> Result<CarRecord, ValidationErrorMap> {
    schema.validate(candidate, at).map_err(|issues| {
        let errors = ValidationErrorMap::from_issues(&issues);
        debug!(
            issues = issues.len(),
            fields = ?errors.fields().collect::<Vec<_>>(),
            "car candidate rejected"
        );
        errors
    })
}

/// Schema plus time source, shared by long-lived validating callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarValidation {
    pub schema: CarSchema,
    pub clock: Clock,
}

impl CarValidation {
    pub fn new(clock: Clock) -> Self {
        Self {
            schema: CarSchema::new(),
            clock,
        }
    }

    /// Validates against the clock's current reference
    pub fn check(&self, candidate: &Value) -> Result<CarRecord, ValidationErrorMap> {
        validate_request(&self.schema, candidate, &self.clock.reference())
    }
}
