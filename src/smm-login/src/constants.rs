//! Constants for the smm-login module.

/// Local storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// File name of the local storage file inside the application home.
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";
