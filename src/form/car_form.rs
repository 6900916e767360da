//! Car form state
//!
//! Holds the draft being edited, the error slot read by per-field helper
//! text, and the last user-facing notification. Rendering is left to the
//! UI layer.

use serde_json::{Map, Value};
use tracing::debug;

use crate::rest_api::StoredCar;
use crate::schema::{Color, TimeReference, FIELD_NAMES, MIN_YEAR_MANUFACTURE};
use crate::validation::{CarValidation, ValidationErrorMap};

use super::api::{CarApi, CarApiError};

pub const FORM_HAS_ERRORS: &str = "The form contains errors. Please review the fields.";
pub const SAVED: &str = "Item saved successfully.";

/// Fields an empty input clears to null before validation
const CLEARABLE_FIELDS: [&str; 2] = ["selling_price", "selling_date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Generic, non-field message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Where field helper text comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ErrorSlot {
    #[default]
    Empty,
    /// Local schema rejection
    Fields(ValidationErrorMap),
    /// Backend failure, kept verbatim
    Backend(CarApiError),
}

/// Result of one submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(StoredCar),
    Rejected(ValidationErrorMap),
    Failed(CarApiError),
}

/// Draft defaults for a new car
pub fn form_defaults() -> Map<String, Value> {
    let mut draft = Map::new();
    for field in FIELD_NAMES {
        let value = match field {
            "imported" => Value::Bool(false),
            "selling_date" => Value::Null,
            _ => Value::String(String::new()),
        };
        draft.insert(field.to_string(), value);
    }
    draft
}

/// Color choices, in display order
pub fn color_options() -> Vec<&'static str> {
    Color::ALL.iter().map(Color::as_str).collect()
}

/// Manufacture years, newest first
pub fn year_options(at: &TimeReference) -> Vec<i32> {
    (MIN_YEAR_MANUFACTURE..=at.year()).rev().collect()
}

pub struct CarForm {
    draft: Map<String, Value>,
    editing: Option<u64>,
    modified: bool,
    errors: ErrorSlot,
    notification: Option<Notification>,
    validation: CarValidation,
}

impl CarForm {
    /// Empty form for a new car
    pub fn new(validation: CarValidation) -> Self {
        Self {
            draft: form_defaults(),
            editing: None,
            modified: false,
            errors: ErrorSlot::Empty,
            notification: None,
            validation,
        }
    }

    /// Form pre-filled with an existing car
    pub fn edit(validation: CarValidation, stored: &StoredCar) -> Self {
        let mut form = Self::new(validation);
        form.load(stored);
        form
    }

    /// Replaces the draft with a stored car and switches to editing it
    pub fn load(&mut self, stored: &StoredCar) {
        if let Ok(Value::Object(fields)) = serde_json::to_value(&stored.car) {
            self.draft = fields;
        }
        self.editing = Some(stored.id);
        self.modified = false;
        self.errors = ErrorSlot::Empty;
    }

    pub fn change_field(&mut self, name: &str, value: Value) {
        self.draft.insert(name.to_string(), value);
        self.modified = true;
    }

    pub fn draft(&self) -> &Map<String, Value> {
        &self.draft
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.draft.get(name)
    }

    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Leaving with unsaved edits asks the user first
    pub fn needs_leave_confirmation(&self) -> bool {
        self.modified
    }

    /// Helper text under `field`, if it has an error
    pub fn helper_text(&self, field: &str) -> Option<&str> {
        match &self.errors {
            ErrorSlot::Empty => None,
            ErrorSlot::Fields(errors) => errors.get(field),
            ErrorSlot::Backend(err) => err.field_errors().and_then(|errors| errors.get(field)),
        }
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.helper_text(field).is_some()
    }

    /// Draft as sent on submit: empty optional inputs become null
    pub fn payload(&self) -> Value {
        let mut payload = self.draft.clone();
        for field in CLEARABLE_FIELDS {
            if matches!(payload.get(field), Some(Value::String(s)) if s.is_empty()) {
                payload.insert(field.to_string(), Value::Null);
            }
        }
        Value::Object(payload)
    }

    /// Validates the draft with the shared schema, then saves it
    pub fn submit(&mut self, api: &dyn CarApi) -> SubmitOutcome {
        let payload = self.payload();

        if let Err(errors) = self.validation.check(&payload) {
            debug!(fields = errors.len(), "car form has errors");
            self.errors = ErrorSlot::Fields(errors.clone());
            self.notification = Some(Notification::error(FORM_HAS_ERRORS));
            return SubmitOutcome::Rejected(errors);
        }

        let result = match self.editing {
            Some(id) => api.update(id, &payload),
            None => api.create(&payload),
        };

        match result {
            Ok(stored) => {
                self.errors = ErrorSlot::Empty;
                self.editing = Some(stored.id);
                self.modified = false;
                self.notification = Some(Notification::success(SAVED));
                SubmitOutcome::Saved(stored)
            }
            Err(err) => {
                self.notification = Some(Notification::error(err.user_message()));
                self.errors = ErrorSlot::Backend(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }
}
