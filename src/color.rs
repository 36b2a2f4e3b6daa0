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
            hsl_to_color32(Hsl::new(hue, 0.75, 0.45))
        })
        .collect()
}

/// Default colour for the i-th group rule: the classic red/green/blue of the
/// original plots first, then evenly spaced hues.
pub fn default_rule_color(i: usize) -> [u8; 3] {
    const FIRST: [[u8; 3]; 3] = [[214, 39, 40], [44, 160, 44], [31, 119, 180]];
    if let Some(c) = FIRST.get(i) {
        return *c;
    }
    let c = hsl_to_color32(Hsl::new(((i * 67) % 360) as f32, 0.7, 0.5));
    [c.r(), c.g(), c.b()]
}

// ---------------------------------------------------------------------------
// Continuous colour scale
// ---------------------------------------------------------------------------

/// Map a normalised magnitude `t` in `[0, 1]` onto a cold-to-hot hue sweep
/// (blue → red). Used when a third numeric column drives point colour.
pub fn gradient(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(Hsl::new(240.0 * (1.0 - t), 0.85, 0.5))
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        assert_ne!(p[0], p[3]);
    }

    #[test]
    fn first_three_rule_colors_are_red_green_blue() {
        let [r, g, b] = default_rule_color(0);
        assert!(r > g && r > b);
        let [r, g, b] = default_rule_color(1);
        assert!(g > r && g > b);
        let [r, g, b] = default_rule_color(2);
        assert!(b > r && b > g);
    }

    #[test]
    fn gradient_runs_cold_to_hot() {
        let cold = gradient(0.0);
        let hot = gradient(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        // Out-of-range input clamps instead of wrapping.
        assert_eq!(gradient(-1.0), cold);
        assert_eq!(gradient(2.0), hot);
    }
}
