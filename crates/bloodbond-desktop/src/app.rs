//! Main application component

use dioxus::prelude::*;

use bloodbond_core::session::Session;

use crate::bootstrap_config::load_client_config;
use crate::components::ToastHost;
use crate::routes::Route;
use crate::services::Services;
use crate::state::AppState;
use crate::theme::PALETTE;

/// Root application component
#[component]
pub fn App() -> Element {
    let mut session = use_signal(Session::new);
    let services = use_signal(|| Services::from_config(&load_client_config()));
    let toast = use_signal(|| None);
    let mut restore_started = use_signal(|| false);

    // Settle the identity check exactly once
    use_effect(move || {
        if restore_started() {
            return;
        }
        restore_started.set(true);

        let auth = services.read().auth.clone();
        spawn(async move {
            let restored = match auth {
                Some(auth) => auth.restore_session().await.unwrap_or_else(|error| {
                    tracing::warn!("Failed to restore session: {}", error);
                    None
                }),
                None => None,
            };
            let signed_in = restored.is_some();
            if session.write().resolve(restored) {
                tracing::info!("Identity check resolved (signed in: {})", signed_in);
            }
        });
    });

    use_context_provider(|| AppState {
        session,
        services,
        toast,
    });

    let colors = PALETTE;

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                display: flex;
                flex-direction: column;
                font-family: system-ui, -apple-system, sans-serif;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            ToastHost {}
            Router::<Route> {}
        }
    }
}
