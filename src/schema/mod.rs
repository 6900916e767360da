//! Car validation schema
//!
//! One schema module shared by the REST backend and the car form, so the
//! two sides of the network boundary cannot drift apart.
//!
//! # Design Principles
//!
//! - Pure: no I/O, no mutation of the candidate
//! - Exhaustive: every field is checked in one pass
//! - Time is injected, never read from ambient state
//! - Strings from forms and query parameters are coerced before range checks

mod errors;
mod rules;
mod types;
mod validator;

pub use errors::{FieldIssue, IssueKind, SchemaResult, ROOT_FIELD};
pub use rules::{
    car_rules, store_opening, Check, Coerced, Constraint, FieldKind, FieldRule,
    MAX_NAME_LENGTH, MAX_SELLING_PRICE, MIN_NAME_LENGTH, MIN_SELLING_PRICE,
    MIN_YEAR_MANUFACTURE, PLATES_LENGTH, STORE_OPENING,
};
pub use types::{CarRecord, Clock, Color, TimeReference, FIELD_NAMES};
pub use validator::CarSchema;
