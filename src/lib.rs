//! carlot - car inventory service with a shared validation schema
//!
//! The `schema` module is the single source of the car record rules. The
//! server runs it through the `validation` middleware on every write, and
//! the client `form` runs the same rules before submitting.

pub mod cli;
pub mod config;
pub mod form;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod validation;
