//! # Car REST API Module
//!
//! CRUD endpoints for the car inventory. POST and PUT bodies go through
//! the shared validation middleware before reaching the store.

pub mod errors;
pub mod server;
pub mod store;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use server::{car_routes, CarState};
pub use store::{CarStore, InMemoryCarStore, StoredCar};
