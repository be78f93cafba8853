//! The console's page tree.

use crate::route::{Page, RouteRecord};

/// Routes of the SMM console.
pub fn app_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/")
            .name("home")
            .page(Page::MainLayout)
            .auth()
            .children([
                RouteRecord::new("organization/:id")
                    .name("OrganizationPage")
                    .page(Page::OrganizationLayout)
                    .auth()
                    .props()
                    .children([
                        RouteRecord::new("").name("posts").page(Page::Posts),
                        RouteRecord::new("users").name("users"),
                        RouteRecord::new("history").name("posts history"),
                        RouteRecord::new("channels")
                            .name("channels")
                            .page(Page::Channels)
                            .props(),
                        RouteRecord::new("social")
                            .name("social networks")
                            .page(Page::SocialNetworks)
                            .props(),
                    ]),
                RouteRecord::new("")
                    .name("AllOrganization")
                    .page(Page::AllOrganizations),
            ]),
        RouteRecord::new("/login").name("login").page(Page::Login),
    ]
}
