use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Pollutant, Season};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed mappings: season / pollutant → Color32
// ---------------------------------------------------------------------------

/// Maps the six seasons and five pollutant columns to distinct colours.
/// Built once; the mapping is fixed for the session so chart colours stay
/// stable across filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    seasons: BTreeMap<Season, Color32>,
    pollutants: BTreeMap<Pollutant, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        let season_palette = generate_palette(Season::ALL.len());
        let seasons = Season::ALL
            .into_iter()
            .zip(season_palette)
            .collect::<BTreeMap<_, _>>();

        let pollutant_palette = generate_palette(Pollutant::ALL.len());
        let pollutants = Pollutant::ALL
            .into_iter()
            .zip(pollutant_palette)
            .collect::<BTreeMap<_, _>>();

        ColorMap {
            seasons,
            pollutants,
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    /// Colour for a season (sidebar swatches, table highlight).
    pub fn season(&self, season: Season) -> Color32 {
        self.seasons.get(&season).copied().unwrap_or(self.default_color)
    }

    /// Colour for a pollutant (bars, lines, box elements).
    pub fn pollutant(&self, pollutant: Pollutant) -> Color32 {
        self.pollutants
            .get(&pollutant)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(6);
        let mut unique = palette.clone();
        unique.sort_by_key(|c| (c.r(), c.g(), c.b()));
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn every_season_and_pollutant_has_a_color() {
        let cm = ColorMap::default();
        for s in Season::ALL {
            assert_ne!(cm.season(s), Color32::GRAY);
        }
        for p in Pollutant::ALL {
            assert_ne!(cm.pollutant(p), Color32::GRAY);
        }
    }
}
