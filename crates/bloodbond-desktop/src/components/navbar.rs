//! Top navigation bar

use dioxus::prelude::*;

use bloodbond_core::auth::IdentityProvider;
use bloodbond_core::session::AuthStatus;

use crate::routes::Route;
use crate::state::AppState;
use crate::theme::PALETTE;

#[component]
pub fn Navbar() -> Element {
    let mut state = use_context::<AppState>();
    let navigator = use_navigator();
    let colors = PALETTE;
    let status = state.session.read().status().clone();

    let log_out = move |_| {
        let auth = state.auth();
        spawn(async move {
            if let Some(auth) = auth {
                if let Err(error) = auth.sign_out().await {
                    tracing::error!("Failed to clear stored session: {}", error);
                }
            }
            state.session.write().sign_out();
            state.notify_success("Logged out");
            navigator.push(Route::Home {});
        });
    };

    let link_style = format!("color: {}; text-decoration: none;", colors.text_primary);

    rsx! {
        header {
            style: "
                display: flex;
                align-items: center;
                gap: 20px;
                padding: 14px 32px;
                background: {colors.bg_primary};
                border-bottom: 1px solid {colors.border};
            ",
            Link {
                to: Route::Home {},
                style: "font-size: 22px; font-weight: 700; color: {colors.accent}; text-decoration: none;",
                "Bloodbond"
            }

            // Spacer
            div { style: "flex: 1;" }

            Link { to: Route::Home {}, style: "{link_style}", "Home" }
            Link { to: Route::DonateNow {}, style: "{link_style}", "Donate Now" }

            {match status {
                AuthStatus::Loading => rsx! {},
                AuthStatus::SignedIn(session) => {
                    let label = session
                        .user
                        .display_name
                        .clone()
                        .or_else(|| session.user.email.clone())
                        .unwrap_or_default();
                    rsx! {
                        Link { to: Route::Profile {}, style: "{link_style}", "Profile" }
                        span { style: "color: {colors.text_secondary}; font-size: 14px;", "{label}" }
                        button {
                            style: "
                                padding: 6px 14px;
                                border: 1px solid {colors.accent};
                                border-radius: 6px;
                                background: transparent;
                                color: {colors.accent};
                                cursor: pointer;
                            ",
                            onclick: log_out,
                            "Log Out"
                        }
                    }
                }
                AuthStatus::SignedOut => rsx! {
                    Link { to: Route::login_from(""), style: "{link_style}", "Login" }
                    Link {
                        to: Route::Signup { from: String::new() },
                        style: "
                            padding: 6px 14px;
                            border-radius: 6px;
                            background: {colors.accent};
                            color: {colors.accent_text};
                            text-decoration: none;
                        ",
                        "Sign Up"
                    }
                },
            }}
        }
    }
}
