//! Car Form Tests
//!
//! - The form runs the shared schema before submitting
//! - Schema rejections fill field helper text plus one generic notification
//! - Backend failures are passed through unmodified
//! - Successful saves clear errors and the unsaved-changes flag

use std::cell::Cell;
use std::sync::Arc;

use carlot::form::{
    CarApi, CarApiError, CarForm, ErrorSlot, LocalCarApi, Severity, SubmitOutcome,
    FORM_HAS_ERRORS, GENERIC_SAVE_ERROR, SAVED,
};
use carlot::rest_api::{CarStore, InMemoryCarStore, StoredCar};
use carlot::schema::Clock;
use carlot::validation::{CarValidation, ValidationErrorMap};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn validation() -> CarValidation {
    CarValidation::new(Clock::Fixed(
        Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap(),
    ))
}

fn local_api() -> (Arc<InMemoryCarStore>, LocalCarApi) {
    let store = Arc::new(InMemoryCarStore::new());
    let api = LocalCarApi::new(store.clone(), validation());
    (store, api)
}

fn fill(form: &mut CarForm) {
    form.change_field("brand", json!("Fiat"));
    form.change_field("model", json!("Uno"));
    form.change_field("color", json!("BRANCO"));
    form.change_field("year_manufacture", json!(2015));
    form.change_field("plates", json!("ABC-1234"));
}

/// Backend that fails every call with a fixed error and counts calls
struct FailingApi {
    error: CarApiError,
    calls: Cell<usize>,
}

impl FailingApi {
    fn new(error: CarApiError) -> Self {
        Self {
            error,
            calls: Cell::new(0),
        }
    }

    fn fail(&self) -> Result<StoredCar, CarApiError> {
        self.calls.set(self.calls.get() + 1);
        Err(self.error.clone())
    }
}

impl CarApi for FailingApi {
    fn create(&self, _car: &Value) -> Result<StoredCar, CarApiError> {
        self.fail()
    }

    fn update(&self, _id: u64, _car: &Value) -> Result<StoredCar, CarApiError> {
        self.fail()
    }
}

// =============================================================================
// Local Validation
// =============================================================================

/// An untouched form fails locally and never calls the backend.
#[test]
fn test_empty_form_rejected_locally() {
    let api = FailingApi::new(CarApiError::Transport("unreachable".to_string()));
    let mut form = CarForm::new(validation());

    let outcome = form.submit(&api);

    let errors = match outcome {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(api.calls.get(), 0);
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["brand", "model", "color", "year_manufacture", "plates"]
    );

    let notification = form.notification().unwrap();
    assert_eq!(notification.message, FORM_HAS_ERRORS);
    assert_eq!(notification.severity, Severity::Error);

    assert_eq!(form.helper_text("color"), Some("The selected color is invalid."));
    assert!(form.has_error("plates"));
    assert!(!form.has_error("imported"));
    assert!(!form.has_error("selling_price"));
}

#[test]
fn test_empty_optional_inputs_are_not_errors() {
    let (store, api) = local_api();
    let mut form = CarForm::new(validation());
    fill(&mut form);
    form.change_field("selling_price", json!(""));
    form.change_field("selling_date", json!(""));

    let outcome = form.submit(&api);

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    let stored = store.get(1).unwrap();
    assert_eq!(stored.car.selling_price, None);
    assert_eq!(stored.car.selling_date, None);
}

/// The year bound comes from the clock the form was built with.
#[test]
fn test_submit_uses_form_clock() {
    let (store, api) = local_api();
    let mut form = CarForm::new(validation());
    fill(&mut form);
    form.change_field("year_manufacture", json!(2025));

    assert!(matches!(form.submit(&api), SubmitOutcome::Rejected(_)));
    assert_eq!(
        form.helper_text("year_manufacture"),
        Some("The manufacture year cannot be later than the current year (2024).")
    );
    assert!(store.list().unwrap().is_empty());
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_create_then_update() {
    let (store, api) = local_api();
    let mut form = CarForm::new(validation());
    fill(&mut form);
    assert!(form.needs_leave_confirmation());

    let stored = match form.submit(&api) {
        SubmitOutcome::Saved(stored) => stored,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(stored.id, 1);
    assert_eq!(form.editing(), Some(1));
    assert_eq!(form.errors(), &ErrorSlot::Empty);
    assert!(!form.needs_leave_confirmation());

    let notification = form.notification().unwrap();
    assert_eq!(notification.message, SAVED);
    assert_eq!(notification.severity, Severity::Success);

    form.change_field("selling_price", json!("23900.90"));
    form.change_field("selling_date", json!("2024-06-01"));
    assert!(matches!(form.submit(&api), SubmitOutcome::Saved(_)));

    assert_eq!(store.list().unwrap().len(), 1);
    assert_eq!(store.get(1).unwrap().car.selling_price, Some(23900.9));
}

#[test]
fn test_edit_loads_stored_car() {
    let (store, api) = local_api();
    let mut creator = CarForm::new(validation());
    fill(&mut creator);
    creator.submit(&api);

    let stored = store.get(1).unwrap();
    let mut form = CarForm::edit(validation(), &stored);

    assert_eq!(form.editing(), Some(1));
    assert_eq!(form.field("brand"), Some(&json!("Fiat")));
    assert!(!form.needs_leave_confirmation());

    form.change_field("model", json!("Mobi"));
    assert!(matches!(form.submit(&api), SubmitOutcome::Saved(_)));
    assert_eq!(store.get(1).unwrap().car.model, "Mobi");
}

// =============================================================================
// Backend Failures
// =============================================================================

/// Non-validation backend errors surface their own message unmodified.
#[test]
fn test_backend_failure_passed_through() {
    let error = CarApiError::Backend {
        status: 500,
        message: "Database unavailable".to_string(),
    };
    let api = FailingApi::new(error.clone());
    let mut form = CarForm::new(validation());
    fill(&mut form);

    let outcome = form.submit(&api);

    assert_eq!(outcome, SubmitOutcome::Failed(error.clone()));
    assert_eq!(api.calls.get(), 1);
    assert_eq!(form.errors(), &ErrorSlot::Backend(error));
    assert_eq!(form.notification().unwrap().message, "Database unavailable");
    assert!(!form.has_error("brand"));
    assert!(form.needs_leave_confirmation());
}

#[test]
fn test_failure_without_message_uses_generic_text() {
    let api = FailingApi::new(CarApiError::Transport(String::new()));
    let mut form = CarForm::new(validation());
    fill(&mut form);

    form.submit(&api);

    assert_eq!(form.notification().unwrap().message, GENERIC_SAVE_ERROR);
}

/// A 422 from the backend still drives field helper text.
#[test]
fn test_backend_rejection_shows_field_messages() {
    let mut errors = ValidationErrorMap::new();
    errors.insert("plates", "These plates are already registered.");
    let api = FailingApi::new(CarApiError::Rejected(errors));
    let mut form = CarForm::new(validation());
    fill(&mut form);

    assert!(matches!(form.submit(&api), SubmitOutcome::Failed(_)));
    assert_eq!(
        form.helper_text("plates"),
        Some("These plates are already registered.")
    );
}

#[test]
fn test_update_of_deleted_car_not_found() {
    let (store, api) = local_api();
    let mut form = CarForm::new(validation());
    fill(&mut form);
    form.submit(&api);

    store.delete(1).unwrap();
    form.change_field("model", json!("Palio"));

    match form.submit(&api) {
        SubmitOutcome::Failed(CarApiError::Backend { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Car 1 not found");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.notification().unwrap().message, "Car 1 not found");
}
