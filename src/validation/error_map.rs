//! Field-keyed validation error map
//!
//! Serialized as a flat JSON object `{ field: message }`. Keys keep the
//! order in which fields were first reported; a later message for the same
//! field overwrites the earlier one in place.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::schema::FieldIssue;

/// Mapping from field name to one error message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct ValidationErrorMap {
    entries: Vec<(String, String)>,
}

impl ValidationErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from schema issues, last issue per field wins
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a FieldIssue>) -> Self {
        let mut map = Self::new();
        for issue in issues {
            map.insert(issue.field.clone(), issue.message.clone());
        }
        map
    }

    /// Sets the message for `field`, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for ValidationErrorMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl Serialize for ValidationErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IssueKind;
    use serde_json::json;

    #[test]
    fn test_last_issue_per_field_wins() {
        let issues = vec![
            FieldIssue::new("year_manufacture", IssueKind::InvalidType, "first"),
            FieldIssue::new("brand", IssueKind::InvalidLength, "brand"),
            FieldIssue::new("year_manufacture", IssueKind::OutOfRange, "second"),
        ];
        let map = ValidationErrorMap::from_issues(&issues);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("year_manufacture"), Some("second"));
        let fields: Vec<_> = map.fields().collect();
        assert_eq!(fields, vec!["year_manufacture", "brand"]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut map = ValidationErrorMap::new();
        map.insert("color", "The selected color is invalid.");
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"color": "The selected color is invalid."})
        );
    }

    #[test]
    fn test_deserializes_from_object() {
        let map: ValidationErrorMap =
            serde_json::from_value(json!({"plates": "bad", "brand": "short"})).unwrap();
        assert_eq!(map.get("plates"), Some("bad"));
        assert_eq!(map.get("brand"), Some("short"));
        assert!(!map.contains("model"));
    }
}
