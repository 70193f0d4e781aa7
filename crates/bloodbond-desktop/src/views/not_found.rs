use dioxus::prelude::*;

use crate::routes::Route;
use crate::theme::PALETTE;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let colors = PALETTE;
    let path = format!("/{}", segments.join("/"));
    tracing::debug!("No route for {}", path);

    rsx! {
        div {
            style: "
                flex: 1;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 12px;
                padding: 64px;
            ",
            h1 { style: "font-size: 48px; color: {colors.accent};", "404" }
            p { style: "color: {colors.text_secondary};", "Nothing lives at {path}." }
            Link { to: Route::Home {}, style: "color: {colors.accent};", "Back to home" }
        }
    }
}
