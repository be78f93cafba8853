//! Route resolution.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::guard::{GuardDecision, Navigation, NavigationGuard};
use crate::matcher::{Pattern, Segment, split};
use crate::route::{Page, RouteMeta, RouteRecord};

/// Route parameters by name.
pub type Params = BTreeMap<String, String>;

/// Errors building a path for a named route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route named '{0}'")]
    UnknownName(String),

    #[error("Route '{route}' requires param '{param}'")]
    MissingParam { route: String, param: String },
}

/// One record of a resolved route chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRecord {
    pub name: Option<String>,
    pub page: Option<Page>,
    pub meta: RouteMeta,
    pub props: bool,
}

impl From<&RouteRecord> for MatchedRecord {
    fn from(record: &RouteRecord) -> Self {
        Self {
            name: record.name.clone(),
            page: record.page,
            meta: record.meta,
            props: record.props,
        }
    }
}

#[derive(Debug)]
struct CompiledRoute {
    pattern: Pattern,
    // Root first
    chain: Vec<MatchedRecord>,
}

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    path: String,
    matched: Vec<MatchedRecord>,
    params: Params,
}

impl ResolvedRoute {
    /// The path that was resolved, without query or fragment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Matched records, root to leaf.
    pub fn matched(&self) -> &[MatchedRecord] {
        &self.matched
    }

    fn leaf(&self) -> Option<&MatchedRecord> {
        self.matched.last()
    }

    /// Name of the leaf record.
    pub fn name(&self) -> Option<&str> {
        self.leaf().and_then(|r| r.name.as_deref())
    }

    /// Page rendered by the leaf record, if it has one.
    pub fn page(&self) -> Option<Page> {
        self.leaf().and_then(|r| r.page)
    }

    /// Pages of the whole chain, outermost layout first.
    pub fn pages(&self) -> Vec<Page> {
        self.matched.iter().filter_map(|r| r.page).collect()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// True if any record in the chain requires authentication.
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|r| r.meta.auth)
    }

    /// Params handed to the leaf page, when it declares props.
    pub fn props(&self) -> Option<&Params> {
        self.leaf().filter(|r| r.props).map(|_| &self.params)
    }
}

/// Resolves paths against a route tree.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
    names: HashMap<String, usize>,
}

impl Router {
    /// Compile a route tree.
    ///
    /// Nested routes are tried before their parent, and siblings in
    /// declaration order. A later duplicate name replaces an earlier one.
    pub fn new(records: Vec<RouteRecord>) -> Self {
        let mut router = Self {
            routes: Vec::new(),
            names: HashMap::new(),
        };
        for record in &records {
            router.compile(record, &Pattern::default(), &[]);
        }
        tracing::debug!(routes = router.routes.len(), "Router initialized");
        router
    }

    fn compile(&mut self, record: &RouteRecord, parent: &Pattern, parent_chain: &[MatchedRecord]) {
        let pattern = parent.join(&record.path);
        let mut chain = parent_chain.to_vec();
        chain.push(MatchedRecord::from(record));

        for child in &record.children {
            self.compile(child, &pattern, &chain);
        }

        if let Some(name) = &record.name {
            self.names.insert(name.clone(), self.routes.len());
        }
        self.routes.push(CompiledRoute { pattern, chain });
    }

    /// Match a path. Returns `None` when no route matches.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let segments: Vec<&str> = split(path).collect();

        self.routes.iter().find_map(|route| {
            let params = route.pattern.matches(&segments)?;
            Some(ResolvedRoute {
                path: format!("/{}", segments.join("/")),
                matched: route.chain.clone(),
                params: params.into_iter().collect(),
            })
        })
    }

    /// Build the path of a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let index = self
            .names
            .get(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;

        let mut path = String::new();
        for segment in self.routes[*index].pattern.segments() {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(param) => {
                    let value = params.get(param).filter(|v| !v.is_empty()).ok_or_else(|| {
                        RouteError::MissingParam {
                            route: name.to_string(),
                            param: param.clone(),
                        }
                    })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// Resolve a path and run it through a guard.
    pub fn navigate(&self, path: &str, guard: &dyn NavigationGuard) -> Navigation {
        let Some(route) = self.resolve(path) else {
            tracing::debug!(path = %path, "No route matches");
            return Navigation::NotFound;
        };

        match guard.check(&route) {
            GuardDecision::Allow => Navigation::Proceed(route),
            GuardDecision::Redirect(target) => {
                tracing::debug!(from = %route.path(), to = %target, "Navigation redirected");
                Navigation::Redirect(target)
            }
        }
    }
}
