use std::collections::{BTreeMap, BTreeSet};

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
            hsl_to_color32(hsl)
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Categorical mapping: loyalty status → Color32 (pie slices)
// ---------------------------------------------------------------------------

/// Maps the unique loyalty statuses to distinct slice colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map from the distinct status values.
    pub fn new(statuses: &BTreeSet<String>) -> Self {
        let palette = generate_palette(statuses.len());
        let mapping: BTreeMap<String, Color32> = statuses
            .iter()
            .zip(palette.into_iter())
            .map(|(s, c)| (s.clone(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a status.
    pub fn color_for(&self, status: &str) -> Color32 {
        self.mapping
            .get(status)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous gradient: normalised value → Color32 (bubble colour)
// ---------------------------------------------------------------------------

/// Map `t` in `[0, 1]` onto a cool-to-warm gradient (blue → teal → yellow),
/// used for the mean-distance bubble colouring on the map.
pub fn gradient_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    // Sweep hue from 230° (blue) down to 55° (yellow), brightening slightly.
    let hue = 230.0 - t * 175.0;
    let hsl = Hsl::new(hue, 0.70, 0.45 + 0.15 * t);
    hsl_to_color32(hsl)
}

/// Normalise `v` into `[0, 1]` over `[min, max]`; a degenerate range maps to
/// the gradient midpoint.
pub fn normalize(v: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        ((v - min) / range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_yields_distinct_colors() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        let unique: std::collections::BTreeSet<_> =
            palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn normalize_handles_degenerate_range() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
    }
}
