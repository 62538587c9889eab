use egui::{Color32, Visuals};

use crate::state::sites::SiteKind;

/// Series colors for the scenario chart, drawn from the stock palette the
/// plots have always used (maroon first so the baseline stands out).
pub const SERIES_PALETTE: [[u8; 3]; 12] = [
    [128, 0, 0],     // Maroon
    [205, 133, 63],  // Peru
    [220, 20, 60],   // Crimson
    [47, 79, 79],    // DarkSlateGray
    [128, 0, 128],   // Purple
    [184, 134, 11],  // DarkGoldenRod
    [218, 165, 32],  // GoldenRod
    [32, 178, 170],  // LightSeaGreen
    [70, 130, 180],  // SteelBlue
    [255, 165, 0],   // Orange
    [255, 0, 255],   // Fuchsia
    [143, 188, 143], // DarkSeaGreen
];

pub fn series_color(index: usize) -> Color32 {
    let [r, g, b] = SERIES_PALETTE[index % SERIES_PALETTE.len()];
    Color32::from_rgb(r, g, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// Map marker color by site type: streams red, lakes blue.
    pub fn marker_color(&self, kind: SiteKind) -> Color32 {
        match (self, kind) {
            (Theme::Dark, SiteKind::Stream) => Color32::from_rgb(230, 70, 70),
            (Theme::Dark, SiteKind::Lake) => Color32::from_rgb(90, 140, 235),
            (Theme::Light, SiteKind::Stream) => Color32::from_rgb(200, 30, 30),
            (Theme::Light, SiteKind::Lake) => Color32::from_rgb(40, 90, 200),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}
