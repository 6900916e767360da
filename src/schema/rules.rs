//! Declarative rule table for car records
//!
//! Each field maps to a type, a presence requirement and an ordered list
//! of (constraint, message) checks. Time-dependent bounds are resolved
//! when the table is built for a given [`TimeReference`], so the table
//! itself is plain data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::errors::{FieldIssue, IssueKind};
use super::types::{Color, TimeReference};

/// Oldest accepted manufacture year
pub const MIN_YEAR_MANUFACTURE: i32 = 1960;

/// Text length bounds for brand and model
pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 25;

/// Plates are always formatted as `AAA-9999` / `AAA-9A99`
pub const PLATES_LENGTH: usize = 8;

pub const MIN_SELLING_PRICE: f64 = 5_000.0;
pub const MAX_SELLING_PRICE: f64 = 5_000_000.0;

/// Store opening, the earliest possible selling date (midnight UTC)
pub const STORE_OPENING: (i32, u32, u32) = (2020, 3, 20);

pub(crate) const COLOR_VALUES: [&str; 13] = [
    Color::Amarelo.as_str(),
    Color::Azul.as_str(),
    Color::Branco.as_str(),
    Color::Cinza.as_str(),
    Color::Dourado.as_str(),
    Color::Laranja.as_str(),
    Color::Marrom.as_str(),
    Color::Prata.as_str(),
    Color::Preto.as_str(),
    Color::Rosa.as_str(),
    Color::Roxo.as_str(),
    Color::Verde.as_str(),
    Color::Vermelho.as_str(),
];

/// Declared type of a field, which drives coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string, no coercion
    Text,
    /// Number, or a numeric string
    Number,
    /// Whole number, or a numeric string
    Integer,
    /// Boolean, or `"true"` / `"false"`
    Boolean,
    /// RFC 3339 date-time or `YYYY-MM-DD` string
    Date,
}

impl FieldKind {
    fn noun(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number | FieldKind::Integer => "a number",
            FieldKind::Boolean => "true or false",
            FieldKind::Date => "a valid date",
        }
    }

    /// Coerces a raw, non-null value to this kind
    pub fn coerce(&self, raw: &Value) -> Option<Coerced> {
        match (self, raw) {
            (FieldKind::Text, Value::String(s)) => Some(Coerced::Text(s.clone())),
            (FieldKind::Number | FieldKind::Integer, Value::Number(n)) => {
                n.as_f64().map(Coerced::Number)
            }
            (FieldKind::Number | FieldKind::Integer, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Coerced::Number)
            }
            (FieldKind::Boolean, Value::Bool(b)) => Some(Coerced::Bool(*b)),
            (FieldKind::Boolean, Value::String(s)) => match s.trim() {
                "true" => Some(Coerced::Bool(true)),
                "false" => Some(Coerced::Bool(false)),
                _ => None,
            },
            (FieldKind::Date, Value::String(s)) => parse_date(s.trim()).map(Coerced::Date),
            _ => None,
        }
    }
}

/// Parses an ISO-8601 date-time, or a bare date at midnight UTC.
///
/// Date-times without an offset are read as UTC.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// A value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl Coerced {
    /// Canonical JSON form used to assemble the typed record
    pub fn to_json(&self, kind: FieldKind) -> Value {
        match self {
            Coerced::Text(s) => Value::String(s.clone()),
            Coerced::Number(n) if kind == FieldKind::Integer => Value::from(*n as i64),
            Coerced::Number(n) => Value::from(*n),
            Coerced::Bool(b) => Value::Bool(*b),
            Coerced::Date(d) => Value::String(d.to_rfc3339()),
        }
    }
}

/// Value constraint checked after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    MinLength(usize),
    MaxLength(usize),
    ExactLength(usize),
    OneOf(&'static [&'static str]),
    WholeNumber,
    Min(f64),
    Max(f64),
    NotBefore(DateTime<Utc>),
    NotAfter(DateTime<Utc>),
}

impl Constraint {
    /// Returns whether the coerced value satisfies the constraint.
    ///
    /// A constraint that does not apply to the value's type holds.
    pub fn holds(&self, value: &Coerced) -> bool {
        match (self, value) {
            (Constraint::MinLength(min), Coerced::Text(s)) => s.chars().count() >= *min,
            (Constraint::MaxLength(max), Coerced::Text(s)) => s.chars().count() <= *max,
            (Constraint::ExactLength(len), Coerced::Text(s)) => s.chars().count() == *len,
            (Constraint::OneOf(options), Coerced::Text(s)) => options.contains(&s.as_str()),
            (Constraint::WholeNumber, Coerced::Number(n)) => n.fract() == 0.0,
            (Constraint::Min(min), Coerced::Number(n)) => n >= min,
            (Constraint::Max(max), Coerced::Number(n)) => n <= max,
            (Constraint::NotBefore(min), Coerced::Date(d)) => d >= min,
            (Constraint::NotAfter(max), Coerced::Date(d)) => d <= max,
            _ => true,
        }
    }

    pub fn issue_kind(&self) -> IssueKind {
        match self {
            Constraint::MinLength(_) | Constraint::MaxLength(_) | Constraint::ExactLength(_) => {
                IssueKind::InvalidLength
            }
            Constraint::OneOf(_) => IssueKind::InvalidOption,
            Constraint::WholeNumber => IssueKind::InvalidType,
            Constraint::Min(_)
            | Constraint::Max(_)
            | Constraint::NotBefore(_)
            | Constraint::NotAfter(_) => IssueKind::OutOfRange,
        }
    }
}

/// One (constraint, message) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub constraint: Constraint,
    pub message: String,
}

/// Everything declared about one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    /// Absent and null are both accepted when optional
    pub optional: bool,
    pub required_message: String,
    pub type_message: String,
    pub checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: &'static str, label: &str, kind: FieldKind) -> Self {
        Self {
            field,
            kind,
            optional: false,
            required_message: format!("{} is required.", label),
            type_message: format!("{} must be {}.", label, kind.noun()),
            checks: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        self.checks.push(Check {
            constraint,
            message: message.into(),
        });
        self
    }

    /// Uses one message for every failure of this field
    pub fn with_single_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.required_message = message.clone();
        self.type_message = message.clone();
        for check in &mut self.checks {
            check.message = message.clone();
        }
        self
    }

    /// Evaluates the field against the candidate's raw value.
    ///
    /// Every check runs; all failures are returned. `Ok(None)` is an
    /// accepted absent optional value.
    pub fn evaluate(&self, raw: Option<&Value>) -> Result<Option<Coerced>, Vec<FieldIssue>> {
        let raw = match raw {
            None | Some(Value::Null) if self.optional => return Ok(None),
            None | Some(Value::Null) => {
                return Err(vec![FieldIssue::new(
                    self.field,
                    IssueKind::Required,
                    self.required_message.clone(),
                )])
            }
            Some(raw) => raw,
        };

        let value = self.kind.coerce(raw).ok_or_else(|| {
            vec![FieldIssue::new(
                self.field,
                IssueKind::InvalidType,
                self.type_message.clone(),
            )]
        })?;

        let issues: Vec<FieldIssue> = self
            .checks
            .iter()
            .filter(|check| !check.constraint.holds(&value))
            .map(|check| {
                FieldIssue::new(
                    self.field,
                    check.constraint.issue_kind(),
                    check.message.clone(),
                )
            })
            .collect();

        if issues.is_empty() {
            Ok(Some(value))
        } else {
            Err(issues)
        }
    }
}

/// Store opening as an instant
pub fn store_opening() -> DateTime<Utc> {
    let (y, m, d) = STORE_OPENING;
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Builds the car rule table, in schema order, for the given instant
pub fn car_rules(at: &TimeReference, opening: DateTime<Utc>) -> Vec<FieldRule> {
    let current_year = at.year();

    vec![
        FieldRule::new("brand", "Brand", FieldKind::Text)
            .check(
                Constraint::MinLength(MIN_NAME_LENGTH),
                "The brand must have at least 1 character.",
            )
            .check(
                Constraint::MaxLength(MAX_NAME_LENGTH),
                "The brand must have at most 25 characters.",
            ),
        FieldRule::new("model", "Model", FieldKind::Text)
            .check(
                Constraint::MinLength(MIN_NAME_LENGTH),
                "The model must have at least 1 character.",
            )
            .check(
                Constraint::MaxLength(MAX_NAME_LENGTH),
                "The model must have at most 25 characters.",
            ),
        FieldRule::new("color", "Color", FieldKind::Text)
            .check(Constraint::OneOf(&COLOR_VALUES), "")
            .with_single_message("The selected color is invalid."),
        FieldRule::new("year_manufacture", "Manufacture year", FieldKind::Integer)
            .check(
                Constraint::WholeNumber,
                "The manufacture year must be a whole number.",
            )
            .check(
                Constraint::Min(f64::from(MIN_YEAR_MANUFACTURE)),
                "The manufacture year cannot be earlier than 1960.",
            )
            .check(
                Constraint::Max(f64::from(current_year)),
                format!(
                    "The manufacture year cannot be later than the current year ({}).",
                    current_year
                ),
            ),
        FieldRule::new("imported", "Imported", FieldKind::Boolean),
        FieldRule::new("plates", "Plates", FieldKind::Text).check(
            Constraint::ExactLength(PLATES_LENGTH),
            "The plates must have exactly 8 characters.",
        ),
        FieldRule::new("selling_date", "Selling date", FieldKind::Date)
            .optional()
            .check(
                Constraint::NotBefore(opening),
                "The selling date cannot be earlier than the store opening.",
            )
            .check(
                Constraint::NotAfter(at.now()),
                "The selling date cannot be later than today.",
            ),
        FieldRule::new("selling_price", "Selling price", FieldKind::Number)
            .optional()
            .check(
                Constraint::Min(MIN_SELLING_PRICE),
                "The selling price must be at least R$ 5,000.00.",
            )
            .check(
                Constraint::Max(MAX_SELLING_PRICE),
                "The selling price must be at most R$ 5,000,000.00.",
            ),
    ]
}
