//! HTTP client factory.
//!
//! The backend client relies on reqwest's own defaults: no retries and no
//! default headers. The only knob is the optional request timeout from
//! [`ClientConfig`].

use reqwest::Client;

use crate::config::ClientConfig;

/// Creates a client builder carrying the configured timeout, if any.
///
/// Use this when you need to customize the client further before building.
pub fn create_client_builder(config: &ClientConfig) -> reqwest::ClientBuilder {
    let builder = Client::builder();
    match config.timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

/// Creates an HTTP client for the configured backend.
pub fn create_client(config: &ClientConfig) -> Result<Client, String> {
    create_client_builder(config)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {e}"))
}
