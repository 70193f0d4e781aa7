//! Division → district → upazila dropdowns.

use std::sync::Arc;

use dioxus::prelude::*;

use bloodbond_core::api::{BackendClient, RegionDirectory};
use bloodbond_core::location::{fetch_districts, fetch_upazilas, LocationSelector, RegionTicket};
use bloodbond_core::models::RegionId;

use crate::state::AppState;
use crate::theme::PALETTE;

/// Cascading location dropdowns over a shared selector.
///
/// The division list loads on mount. Every change issues the dependent
/// fetch and the selector drops replies that have been superseded.
#[component]
pub fn LocationSelect(
    selector: Signal<LocationSelector>,
    #[props(default)] disabled: bool,
) -> Element {
    let state = use_context::<AppState>();
    let backend = state.backend();
    let colors = PALETTE;

    let initial_backend = backend.clone();
    use_hook(move || {
        if let Some(directory) = initial_backend {
            spawn(load_divisions(selector, directory, state));
        }
    });

    let Some(directory) = backend else {
        return rsx! {
            p { style: "color: {colors.error};", "Location data is unavailable in this build." }
        };
    };

    let current = selector.read().clone();
    let division_id = current
        .division_id()
        .map(ToString::to_string)
        .unwrap_or_default();
    let district_id = current
        .district_id()
        .map(ToString::to_string)
        .unwrap_or_default();
    let upazila = current.upazila().unwrap_or_default().to_string();
    let select_style = format!(
        "width: 100%; padding: 8px; border: 1px solid {}; border-radius: 6px;",
        colors.border
    );

    let division_directory = directory.clone();
    let on_division = move |event: FormEvent| {
        let ticket = selector.write().select_division(region_id(&event.value()));
        if let Some(ticket) = ticket {
            spawn(load_districts(selector, division_directory.clone(), ticket, state));
        }
    };
    let on_district = move |event: FormEvent| {
        let ticket = selector.write().select_district(region_id(&event.value()));
        if let Some(ticket) = ticket {
            spawn(load_upazilas(selector, directory.clone(), ticket, state));
        }
    };
    let on_upazila = move |event: FormEvent| {
        let value = event.value();
        let name = (!value.trim().is_empty()).then_some(value);
        selector.write().select_upazila(name);
    };

    rsx! {
        div {
            class: "location-select",
            style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px;",

            label {
                "Division"
                select {
                    style: "{select_style}",
                    disabled: disabled,
                    onchange: on_division,
                    option { value: "", selected: division_id.is_empty(), "Select division" }
                    for division in current.divisions().iter() {
                        option {
                            key: "{division.id}",
                            value: "{division.id}",
                            selected: division.id.as_str() == division_id,
                            "{division.name}"
                        }
                    }
                }
            }

            label {
                "District"
                select {
                    style: "{select_style}",
                    disabled: disabled || !current.district_enabled(),
                    onchange: on_district,
                    option { value: "", selected: district_id.is_empty(), "Select district" }
                    for district in current.districts().iter() {
                        option {
                            key: "{district.id}",
                            value: "{district.id}",
                            selected: district.id.as_str() == district_id,
                            "{district.name}"
                        }
                    }
                }
            }

            label {
                "Upazila"
                select {
                    style: "{select_style}",
                    disabled: disabled || !current.upazila_enabled(),
                    onchange: on_upazila,
                    option { value: "", selected: upazila.is_empty(), "Select upazila" }
                    for item in current.upazilas().iter() {
                        option {
                            key: "{item.name}",
                            value: "{item.name}",
                            selected: item.name == upazila,
                            "{item.name}"
                        }
                    }
                }
            }
        }
    }
}

fn region_id(value: &str) -> Option<RegionId> {
    let value = value.trim();
    (!value.is_empty()).then(|| RegionId::from(value))
}

fn report_error(mut selector: Signal<LocationSelector>, mut state: AppState) {
    let error = selector.write().take_error();
    if let Some(message) = error {
        tracing::error!("Failed to load location data: {}", message);
        state.notify_error(message);
    }
}

async fn load_divisions(
    mut selector: Signal<LocationSelector>,
    directory: Arc<BackendClient>,
    state: AppState,
) {
    let result = directory.divisions().await;
    let next = selector.write().receive_divisions(result);
    report_error(selector, state);
    if let Some(ticket) = next {
        load_districts(selector, directory, ticket, state).await;
    }
}

async fn load_districts(
    mut selector: Signal<LocationSelector>,
    directory: Arc<BackendClient>,
    ticket: RegionTicket,
    state: AppState,
) {
    let response = fetch_districts(directory.as_ref(), ticket).await;
    let next = selector.write().receive_districts(response);
    report_error(selector, state);
    if let Some(ticket) = next {
        load_upazilas(selector, directory, ticket, state).await;
    }
}

async fn load_upazilas(
    mut selector: Signal<LocationSelector>,
    directory: Arc<BackendClient>,
    ticket: RegionTicket,
    state: AppState,
) {
    let response = fetch_upazilas(directory.as_ref(), ticket).await;
    selector.write().receive_upazilas(response);
    report_error(selector, state);
}
