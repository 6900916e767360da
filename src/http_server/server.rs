//! # HTTP Server
//!
//! Combines the car routes and the health route into one Axum app with
//! CORS and request tracing.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::rest_api::{car_routes, CarState, CarStore, InMemoryCarStore};
use crate::schema::Clock;
use crate::validation::CarValidation;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP server for the car inventory
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with an empty in-memory store and the system clock
    pub fn new(config: HttpServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryCarStore::new()), Clock::System)
    }

    /// Create a server over the given store and clock
    pub fn with_store(config: HttpServerConfig, store: Arc<dyn CarStore>, clock: Clock) -> Self {
        let state = CarState::new(store, CarValidation::new(clock));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: CarState) -> Router {
        let cors = if config.allows_any_origin() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| match s.parse() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        warn!(origin = %s, "ignoring unparsable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/cars", car_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured `host:port`; host names are resolved
    pub async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.config.socket_addr()).await
    }

    /// Bind and serve until the process stops
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        info!(%addr, "car inventory server listening");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
