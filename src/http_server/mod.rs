//! # HTTP Server Module
//!
//! Serves the car inventory API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/cars` - List (GET) and create (POST, validated)
//! - `/cars/:id` - Read (GET), replace (PUT, validated), delete (DELETE)

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
