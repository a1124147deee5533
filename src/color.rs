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
// Color mapping: source name → Color32
// ---------------------------------------------------------------------------

/// Assigns each news source a stable colour for the charts and tables.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map over the given source names.
    pub fn new(sources: &[String]) -> Self {
        let mapping = sources
            .iter()
            .cloned()
            .zip(generate_palette(sources.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a source; unknown sources are grey.
    pub fn color_for(&self, source: &str) -> Color32 {
        self.mapping.get(source).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_source_falls_back_to_grey() {
        let cm = ColorMap::new(&["Wired".to_string(), "TheRecord".to_string()]);
        assert_ne!(cm.color_for("Wired"), cm.color_for("TheRecord"));
        assert_eq!(cm.color_for("wired"), Color32::GRAY);
    }
}
