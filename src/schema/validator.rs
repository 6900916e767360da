//! Car schema evaluation
//!
//! Validation semantics:
//! - Every declared field is evaluated; one call reports all violated fields
//! - Numbers, booleans and dates are coerced from strings before checking
//! - Optional fields accept absence and null
//! - Undeclared keys are ignored and dropped from the typed record
//!
//! The validator never mutates the candidate and never reads the process
//! clock: "now" comes from the caller's [`TimeReference`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::errors::{FieldIssue, IssueKind, SchemaResult, ROOT_FIELD};
use super::rules::{car_rules, store_opening, FieldRule};
use super::types::{CarRecord, TimeReference};

/// Immutable car schema. Safe to share across threads and calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSchema {
    opening: DateTime<Utc>,
}

impl CarSchema {
    pub fn new() -> Self {
        Self {
            opening: store_opening(),
        }
    }

    /// Earliest accepted selling date
    pub fn store_opening(&self) -> DateTime<Utc> {
        self.opening
    }

    /// Rule table resolved for the given instant
    pub fn rules(&self, at: &TimeReference) -> Vec<FieldRule> {
        car_rules(at, self.opening)
    }

    /// Validates a candidate record.
    ///
    /// # Errors
    ///
    /// Returns every FieldIssue found, in schema order. A field may appear
    /// more than once when several of its checks fail.
    pub fn validate(&self, candidate: &Value, at: &TimeReference) -> SchemaResult<CarRecord> {
        let object = candidate
            .as_object()
            .ok_or_else(|| vec![FieldIssue::not_an_object(json_type_name(candidate))])?;

        let mut issues = Vec::new();
        let mut normalized = Map::new();

        for rule in self.rules(at) {
            match rule.evaluate(object.get(rule.field)) {
                Ok(Some(value)) => {
                    normalized.insert(rule.field.to_string(), value.to_json(rule.kind));
                }
                Ok(None) => {
                    normalized.insert(rule.field.to_string(), Value::Null);
                }
                Err(mut field_issues) => issues.append(&mut field_issues),
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        serde_json::from_value(Value::Object(normalized)).map_err(|e| {
            vec![FieldIssue::new(
                ROOT_FIELD,
                IssueKind::InvalidType,
                format!("Car record could not be assembled: {}", e),
            )]
        })
    }
}

impl Default for CarSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::Color;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> TimeReference {
        TimeReference::at(Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap())
    }

    fn valid_car() -> Value {
        json!({
            "brand": "Fiat",
            "model": "Uno",
            "color": "BRANCO",
            "year_manufacture": 2015,
            "imported": false,
            "plates": "ABC-1234",
            "selling_date": null,
            "selling_price": null
        })
    }

    #[test]
    fn test_valid_car_returns_typed_record() {
        let record = CarSchema::new().validate(&valid_car(), &at()).unwrap();
        assert_eq!(record.brand, "Fiat");
        assert_eq!(record.color, Color::Branco);
        assert_eq!(record.year_manufacture, 2015);
        assert_eq!(record.selling_date, None);
        assert_eq!(record.selling_price, None);
    }

    #[test]
    fn test_string_encoded_values_are_coerced() {
        let mut car = valid_car();
        car["year_manufacture"] = json!("2015");
        car["imported"] = json!("true");
        car["selling_price"] = json!("45000");
        car["selling_date"] = json!("2023-01-10");

        let record = CarSchema::new().validate(&car, &at()).unwrap();
        assert_eq!(record.year_manufacture, 2015);
        assert!(record.imported);
        assert_eq!(record.selling_price, Some(45000.0));
        assert_eq!(
            record.selling_date,
            Some(Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_candidate_is_not_mutated() {
        let car = valid_car();
        let before = car.clone();
        let _ = CarSchema::new().validate(&car, &at());
        assert_eq!(car, before);
    }

    #[test]
    fn test_undeclared_keys_are_ignored() {
        let mut car = valid_car();
        car["customer_id"] = json!(7);
        assert!(CarSchema::new().validate(&car, &at()).is_ok());
    }

    #[test]
    fn test_non_object_candidate() {
        let issues = CarSchema::new().validate(&json!([1, 2]), &at()).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, ROOT_FIELD);
        assert!(issues[0].message.contains("an array"));
    }

    #[test]
    fn test_issues_follow_schema_order() {
        let issues = CarSchema::new().validate(&json!({}), &at()).unwrap_err();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["brand", "model", "color", "year_manufacture", "imported", "plates"]
        );
    }

    #[test]
    fn test_selling_date_bounds() {
        let schema = CarSchema::new();

        let mut car = valid_car();
        car["selling_date"] = json!("2020-03-20");
        assert!(schema.validate(&car, &at()).is_ok());

        car["selling_date"] = json!("2020-03-19");
        let issues = schema.validate(&car, &at()).unwrap_err();
        assert_eq!(issues[0].field, "selling_date");
        assert!(issues[0].message.contains("store opening"));

        car["selling_date"] = json!("2024-07-15T10:00:01Z");
        let issues = schema.validate(&car, &at()).unwrap_err();
        assert!(issues[0].message.contains("later than today"));
    }

    #[test]
    fn test_invalid_date_string() {
        let mut car = valid_car();
        car["selling_date"] = json!("not a date");
        let issues = CarSchema::new().validate(&car, &at()).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidType);
        assert_eq!(issues[0].message, "Selling date must be a valid date.");
    }
}
