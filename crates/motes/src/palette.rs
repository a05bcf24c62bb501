//! Base colors for text groups and depth shading.

use motes_core::config::SamplingConfig;
use motes_core::{Color, Hsl};

/// Hue (degrees), saturation, lightness of the ten base colors.
const PALETTE: [(f32, f32, f32); 10] = [
    (359.0, 0.94, 0.62),
    (21.0, 0.89, 0.56),
    (33.0, 0.94, 0.55),
    (20.0, 0.94, 0.63),
    (42.0, 0.93, 0.64),
    (94.0, 0.38, 0.59),
    (162.0, 0.43, 0.46),
    (178.0, 0.30, 0.43),
    (208.0, 0.25, 0.45),
    (198.0, 0.61, 0.39),
];

/// Number of palette entries.
pub const PALETTE_LEN: usize = PALETTE.len();

/// Palette entry `index`, wrapping past the end.
pub fn base_color(index: usize) -> Hsl {
    let (h, s, l) = PALETTE[index % PALETTE.len()];
    Hsl::from_degrees(h, s, l)
}

/// Darken `base` by depth: shallow particles lose more lightness than deep
/// ones, which gives a cheap depth-of-field cue.
pub fn shade(base: Hsl, depth: f32, sampling: &SamplingConfig) -> Color {
    let darken = 1.0 - depth.abs() / sampling.depth_range;
    base.offset(0.0, 0.0, -darken * sampling.darken_factor)
        .to_color()
}
