//! Route records and the pages they render.

/// A page component.
///
/// Values are cheap tags; the view itself is only built by [`Page::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    MainLayout,
    OrganizationLayout,
    Posts,
    Channels,
    SocialNetworks,
    AllOrganizations,
    Login,
}

/// A loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    /// Whether the page renders nested routes inside itself.
    pub is_layout: bool,
}

impl Page {
    /// Build the page's view.
    pub fn load(self) -> PageView {
        tracing::debug!(page = ?self, "Loading page");
        PageView {
            page: self,
            title: self.title(),
            is_layout: matches!(self, Page::MainLayout | Page::OrganizationLayout),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::MainLayout => "Home",
            Page::OrganizationLayout => "Organization",
            Page::Posts => "Posts",
            Page::Channels => "Channels",
            Page::SocialNetworks => "Social networks",
            Page::AllOrganizations => "All organizations",
            Page::Login => "Login",
        }
    }
}

/// Per-route metadata read by navigation guards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// The route is only reachable with an authenticated session.
    pub auth: bool,
}

/// A node of the route tree.
///
/// `path` is relative to the parent; an empty path matches the parent's
/// path itself. Segments starting with `:` capture a parameter.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub page: Option<Page>,
    pub meta: RouteMeta,
    /// Pass route params to the page as props.
    pub props: bool,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            page: None,
            meta: RouteMeta::default(),
            props: false,
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn auth(mut self) -> Self {
        self.meta.auth = true;
        self
    }

    pub fn props(mut self) -> Self {
        self.props = true;
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RouteRecord>) -> Self {
        self.children.extend(children);
        self
    }
}
