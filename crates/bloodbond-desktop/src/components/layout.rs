use dioxus::prelude::*;

use super::{Footer, Navbar};
use crate::routes::Route;

/// Navbar and footer around every routed page
#[component]
pub fn MainLayout() -> Element {
    rsx! {
        Navbar {}
        main {
            style: "flex: 1; width: 100%; max-width: 1100px; margin: 0 auto; padding: 24px;",
            Outlet::<Route> {}
        }
        Footer {}
    }
}
