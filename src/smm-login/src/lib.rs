//! SMM Login - session token persistence and authentication state.
//!
//! The backend issues an opaque session token on sign-in. It is kept in a
//! small key/value "local storage" file under the key [`TOKEN_KEY`] and
//! presented on every request. The [`SessionManager`] pairs that store with
//! the process-wide authentication flag the navigation guard reads.

pub mod constants;
mod session;
mod storage;
mod utils;

pub use constants::{LOCAL_STORAGE_FILE, TOKEN_KEY};
pub use session::SessionManager;
pub use storage::{LocalStorage, MemoryStorage, StorageError, TokenStore};
pub use utils::safe_format_key;

/// Re-exported so callers can build and expose tokens without a direct dependency.
pub use secrecy::{ExposeSecret, SecretString};
