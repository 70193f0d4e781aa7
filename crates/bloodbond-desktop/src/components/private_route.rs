//! Wrapper for pages that need a signed-in user.

use dioxus::prelude::*;

use bloodbond_core::routing::{guard, GuardDecision};

use super::Loader;
use crate::routes::Route;
use crate::state::AppState;

/// Renders `children` for a signed-in user, a placeholder while the
/// identity check runs, and otherwise sends the user to login with the
/// requested path remembered.
#[component]
pub fn PrivateRoute(children: Element) -> Element {
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let path = use_route::<Route>().to_string();

    let redirect_path = path.clone();
    use_effect(move || {
        if let GuardDecision::RedirectToLogin { from } =
            guard(&state.session.read(), &redirect_path)
        {
            tracing::debug!("Redirecting to login from {}", from);
            navigator.replace(Route::login_from(&from));
        }
    });

    let decision = guard(&state.session.read(), &path);
    match decision {
        GuardDecision::Render => children,
        GuardDecision::Placeholder | GuardDecision::RedirectToLogin { .. } => rsx! { Loader {} },
    }
}
