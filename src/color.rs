use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Volume line and peak markers.
pub const VOLUME_COLOR: Color32 = Color32::RED;

// ---------------------------------------------------------------------------
// Rank palette for the highest-volume list
// ---------------------------------------------------------------------------

/// `n` shades of red fading from saturated (rank 1) to pale (rank `n`).
pub fn rank_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let hsl = Hsl::new(0.0, 0.85 - 0.35 * t, 0.45 + 0.2 * t);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
