use dioxus::prelude::*;

use crate::routes::Route;
use crate::state::AppState;
use crate::theme::PALETTE;

#[component]
pub fn DonateNow() -> Element {
    let state = use_context::<AppState>();
    let colors = PALETTE;
    let signed_in = state.session.read().current().is_some();

    rsx! {
        section {
            style: "max-width: 640px; margin: 40px auto; text-align: center;",
            h1 { style: "font-size: 32px; color: {colors.accent};", "Donate Blood, Save Lives" }
            p {
                style: "color: {colors.text_secondary}; line-height: 1.6;",
                "A single donation can help up to three people. Register as a donor so "
                "people nearby can find you when they need your blood group."
            }
            if signed_in {
                Link {
                    to: Route::Profile {},
                    style: "color: {colors.accent};",
                    "Keep your donor profile up to date"
                }
            } else {
                Link {
                    to: Route::Signup { from: Route::DonateNow {}.to_string() },
                    style: "
                        display: inline-block;
                        padding: 10px 24px;
                        border-radius: 999px;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        text-decoration: none;
                    ",
                    "Become a Donor"
                }
            }
        }
    }
}
