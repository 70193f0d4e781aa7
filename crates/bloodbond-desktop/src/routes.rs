//! Route table

use dioxus::prelude::*;

use crate::components::MainLayout;
use crate::views::{DonateNow, Home, HomeAlias, Login, NotFound, Profile, Signup};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(MainLayout)]
        #[route("/")]
        Home {},
        #[route("/home")]
        HomeAlias {},
        #[route("/log-in?:from")]
        Login { from: String },
        #[route("/sign-up?:from")]
        Signup { from: String },
        #[route("/donate-now")]
        DonateNow {},
        #[route("/profile")]
        Profile {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Resolve an internal path, falling back to the home page.
    pub fn from_path(path: &str) -> Self {
        path.parse().unwrap_or(Self::Home {})
    }

    pub fn login_from(path: &str) -> Self {
        Self::Login {
            from: path.to_string(),
        }
    }
}
