//! Signed-in user's donor profile

use dioxus::prelude::*;

use bloodbond_core::api::UserDirectory;
use bloodbond_core::location::LocationSelector;
use bloodbond_core::models::BloodGroup;
use bloodbond_core::profile::{save_profile, update_photo, ProfileEditor, ProfileState};

use crate::components::{Loader, LocationSelect, PrivateRoute};
use crate::services::pick_image;
use crate::state::AppState;
use crate::theme::{input_style, primary_button_style, PALETTE};

#[component]
pub fn Profile() -> Element {
    rsx! {
        PrivateRoute { ProfilePage {} }
    }
}

/// Editor with the location dropdowns' current state folded in
fn synced_editor(
    profile: &Signal<Option<ProfileState>>,
    location: &Signal<LocationSelector>,
) -> Option<ProfileEditor> {
    let mut editor = profile.read().as_ref()?.editor()?.clone();
    editor.location = location.read().clone();
    Some(editor)
}

#[component]
fn ProfilePage() -> Element {
    let mut state = use_context::<AppState>();
    let colors = PALETTE;
    let mut profile = use_signal(|| None::<ProfileState>);
    let mut loading = use_signal(|| true);
    let mut photo_working = use_signal(|| false);
    let mut location = use_signal(LocationSelector::new);

    // Reload whenever the signed-in email changes
    use_effect(move || {
        let email = state.session.read().email().map(str::to_string);
        let Some(email) = email else {
            return;
        };
        let Some(backend) = state.backend() else {
            loading.set(false);
            state.notify_error("Profile data is unavailable in this build.");
            return;
        };
        loading.set(true);
        spawn(async move {
            match backend.fetch_user(&email).await {
                Ok(record) => profile.set(Some(ProfileState::new(record))),
                Err(error) => {
                    tracing::error!("Failed to load profile for {}: {}", email, error);
                    state.notify_error("Failed to load profile.");
                }
            }
            loading.set(false);
        });
    });

    let change_photo = move |_| {
        if photo_working() {
            return;
        }
        let (Some(host), Some(auth), Some(backend)) =
            (state.images(), state.auth(), state.backend())
        else {
            state.notify_error("Photo upload is unavailable in this build.");
            return;
        };
        let Some(session) = state.session.read().current().cloned() else {
            return;
        };
        let Some(record) = profile.read().as_ref().map(|current| current.record().clone()) else {
            return;
        };
        spawn(async move {
            let image = match pick_image().await {
                Ok(Some(image)) => image,
                Ok(None) => return,
                Err(error) => {
                    state.notify_error(error.to_string());
                    return;
                }
            };
            photo_working.set(true);
            let outcome = update_photo(
                host.as_ref(),
                auth.as_ref(),
                backend.as_ref(),
                &session,
                &record,
                &image,
            )
            .await;
            match outcome {
                Ok((url, updated)) => {
                    if let Some(current) = profile.write().as_mut() {
                        current.apply_photo(&url);
                    }
                    state.session.write().sign_in(updated);
                    state.notify_success("Profile photo updated");
                }
                Err(error) => {
                    tracing::error!("Photo update failed: {}", error);
                    state.notify_error(error.user_message());
                }
            }
            photo_working.set(false);
        });
    };

    let open_editor = move |_| {
        let mut guard = profile.write();
        if let Some(current) = guard.as_mut() {
            location.set(current.open_editor().location.clone());
        }
    };

    if loading() {
        return rsx! { Loader { label: "Loading profile..." } };
    }
    let Some(current) = profile.read().clone() else {
        return rsx! {
            p { style: "color: {colors.text_secondary};", "No donor profile found for this account." }
        };
    };
    let record = current.record().clone();
    let editing = current.editor().is_some();
    let photo = record.photo_url.clone().unwrap_or_default();
    let blood_group = record.blood_group.map(BloodGroup::label).unwrap_or("-");
    let division = record.division.clone().unwrap_or_default();
    let district = record.district.clone().unwrap_or_default();
    let upazila = record.upazila.clone().unwrap_or_default();
    let role = record.role.label();
    let initial = record
        .name
        .trim()
        .chars()
        .next()
        .map(|first| first.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    rsx! {
        div {
            style: "
                max-width: 560px;
                margin: 24px auto;
                padding: 32px;
                border: 1px solid {colors.border};
                border-radius: 12px;
                display: flex;
                flex-direction: column;
                gap: 10px;
            ",
            div {
                title: "Change photo",
                style: "
                    width: 96px;
                    height: 96px;
                    margin: 0 auto 12px;
                    border-radius: 50%;
                    border: 2px solid {colors.accent};
                    background: {colors.bg_secondary};
                    overflow: hidden;
                    cursor: pointer;
                ",
                onclick: change_photo,
                if !photo.is_empty() {
                    img {
                        src: "{photo}",
                        alt: "{record.name}",
                        style: "width: 100%; height: 100%; object-fit: cover;",
                    }
                } else {
                    // default avatar
                    div {
                        style: "
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            height: 100%;
                            font-size: 40px;
                            color: {colors.accent};
                        ",
                        "{initial}"
                    }
                }
            }
            if photo_working() {
                p { style: "text-align: center; color: {colors.text_secondary};", "Uploading photo..." }
            }
            p { strong { "Name: " } "{record.name}" }
            p { strong { "Role: " } "{role}" }
            p { strong { "Email: " } "{record.email}" }
            p { strong { "Blood Group: " } "{blood_group}" }
            p { strong { "Division: " } "{division}" }
            p { strong { "District: " } "{district}" }
            if !upazila.is_empty() {
                p { strong { "Upazila: " } "{upazila}" }
            }
            button {
                style: "{primary_button_style(true)}",
                onclick: open_editor,
                "Edit Profile"
            }
        }

        if editing {
            ProfileEditorModal { profile, location }
        }
    }
}

#[component]
fn ProfileEditorModal(
    profile: Signal<Option<ProfileState>>,
    location: Signal<LocationSelector>,
) -> Element {
    let mut state = use_context::<AppState>();
    let colors = PALETTE;
    let mut saving = use_signal(|| false);

    let Some(editor) = synced_editor(&profile, &location) else {
        return rsx! {};
    };
    let dirty = editor.is_dirty();
    let can_save = dirty && !saving();
    let selected_group = editor.blood_group.map(BloodGroup::label).unwrap_or_default();
    let photo_url = editor.photo_url.clone().unwrap_or_default();

    let mut edit = move |apply: &dyn Fn(&mut ProfileEditor)| {
        if let Some(editor) = profile.write().as_mut().and_then(ProfileState::editor_mut) {
            apply(editor);
        }
    };

    let save = move |_| {
        if saving() {
            return;
        }
        let Some(editor) = synced_editor(&profile, &location) else {
            return;
        };
        if !editor.is_dirty() {
            return;
        }
        let patch = match editor.build_patch() {
            Ok(patch) => patch,
            Err(error) => {
                state.notify_error(error.user_message());
                return;
            }
        };
        let (Some(auth), Some(backend)) = (state.auth(), state.backend()) else {
            state.notify_error("Profile editing is unavailable in this build.");
            return;
        };
        let session = state.session.read().current().cloned();
        let Some(session) = session else {
            return;
        };
        let Some(email) = profile.read().as_ref().map(|current| current.record().email.clone()) else {
            return;
        };

        saving.set(true);
        spawn(async move {
            let outcome =
                save_profile(auth.as_ref(), backend.as_ref(), &session, &email, &patch).await;
            let settled = profile
                .write()
                .as_mut()
                .map(|current| current.finish_save(&patch, &outcome));
            match (settled, outcome) {
                (Some(Ok(())), Ok(updated)) => {
                    state.session.write().sign_in(updated);
                    state.notify_success("Profile updated successfully");
                }
                (Some(Err(message)), _) => state.notify_error(message),
                _ => {}
            }
            saving.set(false);
        });
    };

    let cancel = move |_| {
        if let Some(current) = profile.write().as_mut() {
            current.close_editor();
        }
    };

    rsx! {
        div {
            style: "
                position: fixed;
                inset: 0;
                z-index: 50;
                display: flex;
                align-items: center;
                justify-content: center;
                background: rgba(0, 0, 0, 0.4);
            ",
            div {
                style: "
                    width: min(640px, 92vw);
                    padding: 28px;
                    border-radius: 12px;
                    background: {colors.bg_primary};
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                ",
                h2 { style: "color: {colors.accent};", "Edit Profile" }

                label {
                    "Name"
                    input {
                        style: "{input_style()}",
                        value: "{editor.name}",
                        disabled: saving(),
                        oninput: move |event: FormEvent| {
                            let value = event.value();
                            edit(&move |editor| editor.name.clone_from(&value));
                        },
                    }
                }
                label {
                    "Photo URL"
                    input {
                        style: "{input_style()}",
                        value: "{photo_url}",
                        placeholder: "Leave blank to keep the current photo",
                        disabled: saving(),
                        oninput: move |event: FormEvent| {
                            let value = event.value();
                            edit(&move |editor| editor.photo_url = Some(value.clone()));
                        },
                    }
                }
                label {
                    "Blood Group"
                    select {
                        style: "{input_style()}",
                        disabled: saving(),
                        onchange: move |event: FormEvent| {
                            let group = event.value().parse::<BloodGroup>().ok();
                            edit(&move |editor| editor.blood_group = group);
                        },
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
                }

                LocationSelect { selector: location, disabled: saving() }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 10px; margin-top: 8px;",
                    button {
                        style: "padding: 10px 18px; border: 1px solid {colors.border}; border-radius: 6px; background: transparent; cursor: pointer;",
                        disabled: saving(),
                        onclick: cancel,
                        "Cancel"
                    }
                    button {
                        style: "{primary_button_style(can_save)}",
                        disabled: !can_save,
                        onclick: save,
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}
