//! Email/password sign-in

use dioxus::prelude::*;

use bloodbond_core::auth::IdentityProvider;
use bloodbond_core::routing::return_target;

use crate::routes::Route;
use crate::state::AppState;
use crate::theme::{input_style, primary_button_style, PALETTE};

#[component]
pub fn Login(from: String) -> Element {
    let mut state = use_context::<AppState>();
    let navigator = use_navigator();
    let colors = PALETTE;
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut working = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let destination = return_target(Some(&from));
    let signup_from = from.clone();

    let sign_in = move |_| {
        if working() {
            return;
        }
        let Some(auth) = state.auth() else {
            error.set(Some("Sign in is unavailable in this build.".to_string()));
            return;
        };
        let destination = destination.clone();
        working.set(true);
        error.set(None);
        spawn(async move {
            match auth.sign_in(&email(), &password()).await {
                Ok(session) => {
                    tracing::info!("Signed in as {:?}", session.user.email);
                    state.session.write().sign_in(session);
                    state.notify_success("Logged in successfully");
                    password.set(String::new());
                    navigator.replace(Route::from_path(&destination));
                }
                Err(auth_error) => {
                    tracing::error!("Sign in failed: {}", auth_error);
                    error.set(Some(auth_error.user_message()));
                }
            }
            working.set(false);
        });
    };

    rsx! {
        div {
            style: "
                max-width: 420px;
                margin: 40px auto;
                padding: 32px;
                border: 1px solid {colors.border};
                border-radius: 12px;
                display: flex;
                flex-direction: column;
                gap: 14px;
            ",
            h1 { style: "text-align: center; color: {colors.accent};", "Login" }
            input {
                style: "{input_style()}",
                r#type: "email",
                placeholder: "Email",
                value: "{email}",
                disabled: working(),
                oninput: move |event: FormEvent| email.set(event.value()),
            }
            input {
                style: "{input_style()}",
                r#type: "password",
                placeholder: "Password",
                value: "{password}",
                disabled: working(),
                oninput: move |event: FormEvent| password.set(event.value()),
            }
            button {
                style: "{primary_button_style(!working())}",
                disabled: working(),
                onclick: sign_in,
                if working() { "Signing in..." } else { "Login" }
            }
            if let Some(message) = error() {
                p { style: "color: {colors.error}; font-size: 14px;", "{message}" }
            }
            p {
                style: "text-align: center; font-size: 14px; color: {colors.text_secondary};",
                "New here? "
                Link {
                    to: Route::Signup { from: signup_from },
                    style: "color: {colors.accent};",
                    "Create an account"
                }
            }
        }
    }
}
