//! Per-invocation application state.

use std::sync::Arc;

use anyhow::{Context, Result};
use smm_client::SmmClient;
use smm_common::{AppDirs, ClientConfig};
use smm_login::{LocalStorage, SessionManager};
use smm_router::{AuthGuard, Router, app_routes};

/// Everything a command needs, resolved once at startup.
pub struct AppContext {
    pub dirs: AppDirs,
    pub config: ClientConfig,
    pub session: SessionManager,
    pub client: SmmClient,
}

impl AppContext {
    /// Resolve directories, configuration and the stored session.
    pub fn load(backend_url: Option<&str>) -> Result<Self> {
        let dirs = AppDirs::new().context("Could not determine the SMM home directory")?;
        dirs.ensure_dirs()
            .with_context(|| format!("Cannot create {}", dirs.home.display()))?;
        let mut config = ClientConfig::load(&dirs)?;
        if let Some(url) = backend_url {
            config = config.with_backend_url(url);
        }
        Self::with_config(dirs, config)
    }

    pub fn with_config(dirs: AppDirs, config: ClientConfig) -> Result<Self> {
        let session = SessionManager::new(Arc::new(LocalStorage::in_dir(&dirs.home)));
        let client = SmmClient::new(config.clone(), session.clone())?;
        tracing::debug!(
            home = %dirs.home.display(),
            base_url = %config.base_url,
            authenticated = session.is_authenticated(),
            "Application context ready"
        );
        Ok(Self {
            dirs,
            config,
            session,
            client,
        })
    }

    pub fn router(&self) -> Router {
        Router::new(app_routes())
    }

    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::new(self.session.clone())
    }
}
