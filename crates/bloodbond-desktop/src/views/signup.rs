//! Donor registration

use dioxus::prelude::*;

use bloodbond_core::location::LocationSelector;
use bloodbond_core::media::ImageFile;
use bloodbond_core::models::BloodGroup;
use bloodbond_core::routing::return_target;
use bloodbond_core::signup::{submit_signup, SignupForm};

use crate::components::LocationSelect;
use crate::routes::Route;
use crate::services::pick_image;
use crate::state::AppState;
use crate::theme::{input_style, primary_button_style, PALETTE};

#[component]
pub fn Signup(from: String) -> Element {
    let mut state = use_context::<AppState>();
    let navigator = use_navigator();
    let colors = PALETTE;
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut blood_group = use_signal(|| None::<BloodGroup>);
    let mut image = use_signal(|| None::<ImageFile>);
    let location = use_signal(LocationSelector::new);
    let mut working = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let destination = return_target(Some(&from));
    let login_from = from.clone();

    let choose_image = move |_| {
        spawn(async move {
            match pick_image().await {
                Ok(Some(picked)) => image.set(Some(picked)),
                Ok(None) => {}
                Err(pick_error) => error.set(Some(pick_error.to_string())),
            }
        });
    };

    let submit = move |_| {
        if working() {
            return;
        }
        let form = SignupForm {
            name: name(),
            email: email(),
            password: password(),
            blood_group: blood_group(),
            image: image(),
            location: location.read().clone(),
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(invalid) => {
                state.notify_error(invalid.user_message());
                error.set(Some(invalid.user_message()));
                return;
            }
        };
        let (Some(host), Some(auth), Some(backend)) =
            (state.images(), state.auth(), state.backend())
        else {
            error.set(Some("Sign up is unavailable in this build.".to_string()));
            return;
        };

        let destination = destination.clone();
        working.set(true);
        error.set(None);
        spawn(async move {
            let outcome =
                submit_signup(host.as_ref(), auth.as_ref(), backend.as_ref(), &request).await;
            match outcome {
                Ok(session) => {
                    state.session.write().sign_in(session);
                    state.notify_success("Signup Successful");
                    navigator.replace(Route::from_path(&destination));
                }
                Err(signup_error) => {
                    tracing::error!("Signup failed: {}", signup_error);
                    let message = signup_error.user_message();
                    state.notify_error(message.clone());
                    error.set(Some(message));
                }
            }
            working.set(false);
        });
    };

    let selected_group = blood_group().map(BloodGroup::label).unwrap_or_default();
    let image_label = image
        .read()
        .as_ref()
        .map_or_else(|| "No photo chosen".to_string(), |file| file.file_name.clone());

    rsx! {
        div {
            style: "
                max-width: 640px;
                margin: 24px auto;
                padding: 32px;
                border: 1px solid {colors.border};
                border-radius: 12px;
                display: flex;
                flex-direction: column;
                gap: 14px;
            ",
            h1 { style: "text-align: center; color: {colors.accent};", "Sign Up" }

            input {
                style: "{input_style()}",
                placeholder: "Name",
                value: "{name}",
                disabled: working(),
                oninput: move |event: FormEvent| name.set(event.value()),
            }

            div {
                style: "display: flex; align-items: center; gap: 12px;",
                button {
                    style: "padding: 8px 14px; border: 1px solid {colors.border}; border-radius: 6px; background: {colors.bg_secondary}; cursor: pointer;",
                    disabled: working(),
                    onclick: choose_image,
                    "Choose Photo"
                }
                span { style: "color: {colors.text_secondary}; font-size: 14px;", "{image_label}" }
            }

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
                placeholder: "Password (at least 6 characters)",
                value: "{password}",
                disabled: working(),
                oninput: move |event: FormEvent| password.set(event.value()),
            }

            select {
                style: "{input_style()}",
                disabled: working(),
                onchange: move |event: FormEvent| blood_group.set(event.value().parse().ok()),
                option { value: "", selected: selected_group.is_empty(), "Select Blood Group" }
                for group in BloodGroup::ALL {
                    option {
                        key: "{group}",
                        value: "{group.label()}",
                        selected: group.label() == selected_group,
                        "{group.label()}"
                    }
                }
            }

            LocationSelect { selector: location, disabled: working() }

            button {
                style: "{primary_button_style(!working())}",
                disabled: working(),
                onclick: submit,
                if working() { "Signing up..." } else { "Sign Up" }
            }
            if let Some(message) = error() {
                p { style: "color: {colors.error}; font-size: 14px;", "{message}" }
            }
            p {
                style: "text-align: center; font-size: 14px; color: {colors.text_secondary};",
                "Already have an account? "
                Link {
                    to: Route::login_from(&login_from),
                    style: "color: {colors.accent};",
                    "Login"
                }
            }
        }
    }
}
