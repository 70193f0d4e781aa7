use dioxus::prelude::*;

use crate::routes::Route;
use crate::theme::PALETTE;

#[component]
pub fn Footer() -> Element {
    let colors = PALETTE;
    rsx! {
        footer {
            style: "
                display: flex;
                flex-wrap: wrap;
                gap: 24px;
                justify-content: space-between;
                padding: 24px 32px;
                background: {colors.bg_secondary};
                border-top: 1px solid {colors.border};
                color: {colors.text_secondary};
                font-size: 14px;
            ",
            div {
                strong { style: "color: {colors.accent};", "Bloodbond" }
                p { "Connecting donors with the people who need them." }
            }
            nav {
                style: "display: flex; gap: 16px;",
                Link { to: Route::Home {}, "Home" }
                Link { to: Route::DonateNow {}, "Donate Now" }
                Link { to: Route::Signup { from: String::new() }, "Become a Donor" }
            }
        }
    }
}
