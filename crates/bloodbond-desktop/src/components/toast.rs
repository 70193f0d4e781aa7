use std::time::Duration;

use dioxus::prelude::*;

use crate::state::{AppState, ToastKind};
use crate::theme::PALETTE;

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Shows the current toast and dismisses it after a few seconds
#[component]
pub fn ToastHost() -> Element {
    let mut state = use_context::<AppState>();
    let colors = PALETTE;

    use_effect(move || {
        let Some(shown) = state.toast.read().clone() else {
            return;
        };
        spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            // a newer toast keeps its own timer
            if state.toast.peek().as_ref() == Some(&shown) {
                state.toast.set(None);
            }
        });
    });

    let Some(toast) = state.toast.read().clone() else {
        return rsx! {};
    };
    let background = match toast.kind {
        ToastKind::Success => colors.success,
        ToastKind::Error => colors.error,
    };

    rsx! {
        div {
            role: "status",
            style: "
                position: fixed;
                top: 16px;
                right: 16px;
                z-index: 100;
                padding: 12px 18px;
                border-radius: 8px;
                background: {background};
                color: #ffffff;
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
                cursor: pointer;
            ",
            onclick: move |_| state.toast.set(None),
            "{toast.message}"
        }
    }
}
