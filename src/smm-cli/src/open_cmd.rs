//! `smm open`: resolve a console path the way the web console would.

use anyhow::Result;
use clap::Args;
use smm_router::{Navigation, NavigationGuard, ResolvedRoute, Router};

use crate::context::AppContext;
use crate::styled_output::{print_dim, print_warning};

#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Console path, e.g. /organization/12/channels
    pub path: String,
}

impl OpenCommand {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let router = ctx.router();
        let guard = ctx.auth_guard();

        match open(&router, &guard, &self.path) {
            Navigation::Proceed(route) => {
                for line in describe_route(&route) {
                    println!("{line}");
                }
            }
            Navigation::Redirect(target) => {
                print_warning(&format!("Authentication required, redirected to {target}"));
                if let Some(route) = router.resolve(&target) {
                    for line in describe_route(&route) {
                        println!("{line}");
                    }
                }
            }
            Navigation::NotFound => {
                print_dim(&format!("No page at {}", self.path));
            }
        }
        Ok(())
    }
}

fn open(router: &Router, guard: &dyn NavigationGuard, path: &str) -> Navigation {
    let navigation = router.navigate(path, guard);
    tracing::debug!(path = %path, navigation = ?navigation, "Resolved console path");
    navigation
}

fn describe_route(route: &ResolvedRoute) -> Vec<String> {
    let mut lines = vec![format!("route: {}", route.name().unwrap_or("(unnamed)"))];

    let layouts: Vec<&str> = route
        .pages()
        .into_iter()
        .map(|page| page.load())
        .filter(|view| view.is_layout)
        .map(|view| view.title)
        .collect();
    if !layouts.is_empty() {
        lines.push(format!("layout: {}", layouts.join(" > ")));
    }

    match route.page() {
        Some(page) => lines.push(format!("page: {}", page.load().title)),
        None => lines.push("page: (none)".to_string()),
    }

    if let Some(props) = route.props() {
        let rendered: Vec<String> = props.iter().map(|(k, v)| format!("{k}={v}")).collect();
        lines.push(format!("props: {}", rendered.join(", ")));
    }
    lines
}
