//! Colors used by the inline styles

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub success: &'static str,
}

pub const PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#fdf2f2",
    text_primary: "#1a1a1a",
    text_secondary: "#5f6368",
    border: "#e5d3d3",
    accent: "#b91c1c",
    accent_text: "#ffffff",
    error: "#dc2626",
    success: "#16a34a",
};

pub fn input_style() -> String {
    format!(
        "width: 100%; padding: 10px; border: 1px solid {}; border-radius: 6px; box-sizing: border-box;",
        PALETTE.border
    )
}

/// Filled accent button; greyed out while `enabled` is false
pub fn primary_button_style(enabled: bool) -> String {
    let background = if enabled {
        PALETTE.accent
    } else {
        PALETTE.border
    };
    format!(
        "padding: 10px 18px; border: none; border-radius: 6px; background: {background}; color: {}; cursor: pointer;",
        PALETTE.accent_text
    )
}
