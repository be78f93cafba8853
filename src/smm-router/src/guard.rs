//! Navigation guards.

use smm_login::SessionManager;

use crate::router::ResolvedRoute;

/// Where unauthenticated navigation is sent.
pub const LOGIN_PATH: &str = "/login";

/// What a guard decided about a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Outcome of [`Router::navigate`](crate::Router::navigate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(ResolvedRoute),
    Redirect(String),
    NotFound,
}

/// Check run before every navigation.
pub trait NavigationGuard: Send + Sync {
    fn check(&self, to: &ResolvedRoute) -> GuardDecision;
}

/// Sends unauthenticated sessions away from routes that require auth.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    session: SessionManager,
}

impl AuthGuard {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }
}

impl NavigationGuard for AuthGuard {
    fn check(&self, to: &ResolvedRoute) -> GuardDecision {
        if to.requires_auth() && !self.session.is_authenticated() {
            return GuardDecision::Redirect(LOGIN_PATH.to_string());
        }
        GuardDecision::Allow
    }
}
