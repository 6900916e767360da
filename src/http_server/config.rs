//! Listener and CORS settings for the inventory server
//!
//! The `server` section of `carlot.json`. The defaults let the Vite dev
//! server used by the car form talk to a local backend.

use serde::{Deserialize, Serialize};

/// `server` section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Bind address (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins the browser form may call from; empty means any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    ["http://localhost:5173", "http://127.0.0.1:5173"]
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    /// Defaults with a different port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as passed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }

    /// Rejects values the listener or the CORS layer cannot use
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("server.host must not be empty".to_string());
        }

        if let Some(origin) = self
            .cors_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(format!(
                "server.cors_origins entry '{}' must start with http:// or https://",
                origin
            ));
        }

        Ok(())
    }
}
