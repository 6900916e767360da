//! Backend seam for the car form
//!
//! [`CarApi`] is what the form submits to. [`LocalCarApi`] runs the same
//! server-side validation and store in-process.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::rest_api::{CarStore, RestError, StoredCar};
use crate::schema::CarRecord;
use crate::validation::{CarValidation, ValidationErrorMap};

/// Fallback text when a failure carries no message
pub const GENERIC_SAVE_ERROR: &str = "An error occurred while saving.";

/// Failures reported by the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarApiError {
    /// Server answered 422 with a field map
    #[error("The server rejected the car record")]
    Rejected(ValidationErrorMap),

    /// Any other non-success answer
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Request never got an answer
    #[error("{0}")]
    Transport(String),
}

impl CarApiError {
    /// Text for the generic notification
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_SAVE_ERROR.to_string()
        } else {
            message
        }
    }

    /// Field map carried by a 422 answer
    pub fn field_errors(&self) -> Option<&ValidationErrorMap> {
        match self {
            CarApiError::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<RestError> for CarApiError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Validation(errors) => CarApiError::Rejected(errors),
            other => CarApiError::Backend {
                status: other.status_code().as_u16(),
                message: other.to_string(),
            },
        }
    }
}

/// Car write operations the form depends on
pub trait CarApi {
    fn create(&self, car: &Value) -> Result<StoredCar, CarApiError>;

    fn update(&self, id: u64, car: &Value) -> Result<StoredCar, CarApiError>;
}

/// In-process backend: server validation followed by the store
pub struct LocalCarApi {
    store: Arc<dyn CarStore>,
    validation: CarValidation,
}

impl LocalCarApi {
    pub fn new(store: Arc<dyn CarStore>, validation: CarValidation) -> Self {
        Self { store, validation }
    }

    fn accept(&self, car: &Value) -> Result<CarRecord, CarApiError> {
        self.validation
            .check(car)
            .map_err(|errors| CarApiError::from(RestError::Validation(errors)))
    }
}

impl CarApi for LocalCarApi {
    fn create(&self, car: &Value) -> Result<StoredCar, CarApiError> {
        let record = self.accept(car)?;
        self.store.create(record).map_err(|e| {
            error!(error = %e, "car create failed");
            CarApiError::from(e)
        })
    }

    fn update(&self, id: u64, car: &Value) -> Result<StoredCar, CarApiError> {
        let record = self.accept(car)?;
        self.store.update(id, record).map_err(|e| {
            error!(id, error = %e, "car update failed");
            CarApiError::from(e)
        })
    }
}
