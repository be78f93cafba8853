//! Common utilities shared across SMM console crates.

pub mod config;
pub mod dirs;
pub mod http_client;

pub use config::{
    BACKEND_URL_ENV, ClientConfig, ConfigError, DEFAULT_API_PATH, DEFAULT_ORIGIN, ORIGIN_ENV,
};
pub use dirs::{AppDirs, SMM_HOME_ENV};
pub use http_client::{create_client, create_client_builder};
