//! Field issues produced by schema evaluation
//!
//! A FieldIssue is data, not a failure of the process: it is always
//! surfaced to the caller for correction.

use std::fmt;

use serde::Serialize;

/// Pseudo-field used when the candidate itself is not an object.
pub const ROOT_FIELD: &str = "$root";

/// Category of a field violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Required value absent or null
    Required,
    /// Value could not be coerced to the declared type
    InvalidType,
    /// Text length outside its bounds
    InvalidLength,
    /// Value not in the enumerated set
    InvalidOption,
    /// Number or date outside its bounds
    OutOfRange,
}

impl IssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::Required => "REQUIRED",
            IssueKind::InvalidType => "INVALID_TYPE",
            IssueKind::InvalidLength => "INVALID_LENGTH",
            IssueKind::InvalidOption => "INVALID_OPTION",
            IssueKind::OutOfRange => "OUT_OF_RANGE",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One (field, message) violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn required(field: impl Into<String>, label: &str) -> Self {
        Self::new(field, IssueKind::Required, format!("{} is required.", label))
    }

    pub fn not_an_object(found: &str) -> Self {
        Self::new(
            ROOT_FIELD,
            IssueKind::InvalidType,
            format!("Expected a car object, received {}.", found),
        )
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.field, self.message)
    }
}

/// Result of evaluating the schema against one candidate
pub type SchemaResult<T> = Result<T, Vec<FieldIssue>>;
