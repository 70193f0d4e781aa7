use dioxus::prelude::*;

use crate::theme::PALETTE;

/// Placeholder shown while something is still loading
#[component]
pub fn Loader(#[props(default = "Loading...".to_string())] label: String) -> Element {
    let colors = PALETTE;
    rsx! {
        div {
            class: "loader",
            style: "
                display: flex;
                justify-content: center;
                padding: 48px;
                color: {colors.text_secondary};
            ",
            "{label}"
        }
    }
}
