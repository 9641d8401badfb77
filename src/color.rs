use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            // alternate lightness between neighbouring hues
            let lightness = if i % 2 == 0 { 0.55 } else { 0.42 };
            let hsl = Hsl::new(hue, 0.75, lightness);
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
// Color mapping: artist name → Color32
// ---------------------------------------------------------------------------

/// Assigns each artist of a dataset a fixed colour.
///
/// Built over all artist names rather than the current selection, so an
/// artist keeps its colour while others are toggled.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(artists: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = artists.into_iter().collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for an artist.
    pub fn color_for(&self, artist: &str) -> Color32 {
        self.mapping.get(artist).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn colours_do_not_depend_on_lookup_order() {
        let map = ColorMap::new(["Avicii", "Kygo", "Zedd"]);
        let zedd = map.color_for("Zedd");
        assert_eq!(map.color_for("Avicii"), generate_palette(3)[0]);
        assert_eq!(map.color_for("Zedd"), zedd);
        assert_ne!(map.color_for("Avicii"), zedd);
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
