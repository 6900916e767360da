//! Client-side car form
//!
//! The form validates with the same schema module as the server before
//! submitting. Schema rejections fill the per-field error slot and raise
//! one generic notification; backend failures are stored verbatim.

mod api;
mod car_form;

pub use api::{CarApi, CarApiError, LocalCarApi, GENERIC_SAVE_ERROR};
pub use car_form::{
    color_options, form_defaults, year_options, CarForm, ErrorSlot, Notification, Severity,
    SubmitOutcome, FORM_HAS_ERRORS, SAVED,
};
