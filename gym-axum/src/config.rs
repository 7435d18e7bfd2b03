//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the REST API server,
//! including network binding and cross-origin access.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use gym_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     allowed_origins: vec!["https://gym.example.com".into()],
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Origins allowed to call the API from a browser. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origins: Vec::new(),
        }
    }
}

impl AxumConfig {
    /// The CORS policy described by `allowed_origins`.
    ///
    /// Origins that are not valid header values are skipped with a warning.
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.allowed_origins.is_empty() {
            AllowOrigin::any()
        } else {
            let origins = self
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect::<Vec<_>>();
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
