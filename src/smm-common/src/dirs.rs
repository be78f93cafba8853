//! Application directories for the SMM console.
//!
//! Config and local storage live under a single home directory:
//! - Linux/macOS: `~/.smm`
//! - Windows: `%APPDATA%\smm`
//!
//! Can be overridden with the `SMM_HOME` environment variable.

use std::path::PathBuf;

/// Application name for directory paths
pub const APP_NAME: &str = "smm";

/// Primary home directory name on Linux/macOS
pub const HOME_DIR_NAME: &str = ".smm";

/// Environment variable overriding the home directory.
pub const SMM_HOME_ENV: &str = "SMM_HOME";

/// Application directories structure
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// Home directory holding config and local storage.
    pub home: PathBuf,
}

impl AppDirs {
    /// Resolve the application directories.
    ///
    /// A relative `SMM_HOME` is resolved against the current directory so
    /// files never end up somewhere unexpected after a `cd`.
    pub fn new() -> Option<Self> {
        if let Ok(home) = std::env::var(SMM_HOME_ENV) {
            if !home.is_empty() {
                let home = PathBuf::from(home);
                let home = if home.is_relative() {
                    std::env::current_dir().ok()?.join(home)
                } else {
                    home
                };
                return Some(Self { home });
            }
        }

        #[cfg(target_os = "windows")]
        let home = dirs::config_dir()?.join(APP_NAME);

        #[cfg(not(target_os = "windows"))]
        let home = dirs::home_dir()?.join(HOME_DIR_NAME);

        Some(Self { home })
    }

    /// Create a directory set rooted at an explicit path.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Get the config file path (config.toml)
    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Ensure the home directory exists (0700 on Unix)
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if !self.home.exists() {
            std::fs::create_dir_all(&self.home)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&self.home, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        Ok(())
    }
}
