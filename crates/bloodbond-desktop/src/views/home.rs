//! Landing page

use dioxus::prelude::*;

use bloodbond_core::models::BloodGroup;

use crate::routes::Route;
use crate::theme::PALETTE;

struct WayToHelp {
    heading: &'static str,
    description: &'static str,
}

const WAYS_TO_HELP: [WayToHelp; 3] = [
    WayToHelp {
        heading: "Host a Blood Drive",
        description: "Organize a blood drive and help save lives in your community.",
    },
    WayToHelp {
        heading: "Become a Volunteer",
        description: "Join our volunteer network and support blood donation efforts.",
    },
    WayToHelp {
        heading: "Make a Donation",
        description: "Your financial support helps us reach more people in need.",
    },
];

#[component]
pub fn Home() -> Element {
    let colors = PALETTE;

    rsx! {
        section {
            style: "text-align: center; margin-bottom: 40px;",
            h2 { style: "font-size: 28px; color: {colors.text_primary};", "Types Of Blood" }
            div {
                style: "display: grid; grid-template-columns: repeat(8, 1fr); gap: 8px; width: 80%; margin: 0 auto;",
                for group in BloodGroup::ALL {
                    div {
                        key: "{group}",
                        style: "
                            padding: 18px 0;
                            border-radius: 10px;
                            background: {colors.accent};
                            color: {colors.accent_text};
                            font-size: 20px;
                            font-weight: 800;
                        ",
                        "{group.label()}"
                    }
                }
            }
        }

        section {
            style: "text-align: center; margin-bottom: 24px;",
            h2 { style: "font-size: 28px; color: {colors.text_primary};", "More Ways You Can Make a Difference" }
            p { style: "color: {colors.text_secondary};", "Every action matters. Choose how you want to help today." }
        }

        div {
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 24px;",
            for way in WAYS_TO_HELP.iter() {
                div {
                    key: "{way.heading}",
                    style: "
                        padding: 24px;
                        border: 1px solid {colors.border};
                        border-radius: 16px;
                        background: {colors.bg_primary};
                        text-align: center;
                    ",
                    h3 { style: "font-size: 20px; margin-bottom: 8px;", "{way.heading}" }
                    p { style: "color: {colors.text_secondary}; font-size: 14px;", "{way.description}" }
                    Link {
                        to: Route::DonateNow {},
                        style: "
                            display: inline-block;
                            margin-top: 20px;
                            padding: 8px 20px;
                            border-radius: 999px;
                            background: {colors.accent};
                            color: {colors.accent_text};
                            text-decoration: none;
                        ",
                        "Learn More"
                    }
                }
            }
        }
    }
}

/// `/home` renders the landing page too
#[component]
pub fn HomeAlias() -> Element {
    rsx! { Home {} }
}
