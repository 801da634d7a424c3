//! Theme and styling for the Soundbite UI

use egui::{Color32, Rounding, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Recording indicator color
    pub recording: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    /// Banner background
    pub bg_banner: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Border radius for the banner card
    pub card_rounding: Rounding,

    /// Spacing between the tap targets
    pub spacing_lg: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(3, 169, 244),   // Light blue
            recording: Color32::from_rgb(239, 68, 68), // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray
            bg_banner: Color32::from_rgb(1, 87, 155),    // Deep blue

            text_primary: Color32::from_rgb(249, 250, 251), // Almost white
            text_muted: Color32::from_rgb(156, 163, 175),   // Medium gray

            card_rounding: Rounding::same(10.0),

            spacing_lg: 24.0,
        }
    }

    /// Apply the theme to the egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.override_text_color = Some(self.text_primary);
        ctx.set_visuals(visuals);
    }
}
