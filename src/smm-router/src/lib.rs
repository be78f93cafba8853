//! Client-side routing for the SMM console.
//!
//! [`app_routes`] declares the page tree. [`Router`] resolves paths against
//! it, builds paths for named routes, and runs a [`NavigationGuard`] before
//! handing out a page.
//!
//! # Example
//!
//! ```
//! use smm_router::{Page, Router};
//!
//! let router = Router::new(smm_router::app_routes());
//! let route = router.resolve("/organization/123/channels").unwrap();
//! assert_eq!(route.page(), Some(Page::Channels));
//! assert_eq!(route.param("id"), Some("123"));
//! ```

mod guard;
mod matcher;
mod route;
mod router;
mod table;

pub use guard::{AuthGuard, GuardDecision, LOGIN_PATH, Navigation, NavigationGuard};
pub use route::{Page, PageView, RouteMeta, RouteRecord};
pub use router::{MatchedRecord, Params, ResolvedRoute, RouteError, Router};
pub use table::app_routes;
