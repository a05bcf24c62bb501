//! Line shaping with cosmic-text.
//!
//! Each wrapped line is shaped into its own unbounded buffer so its width can
//! be measured and its glyphs placed without cosmic-text wrapping it again.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use motes_core::profiling::profile_function;

/// Shape one line of text in `family` without any wrap width.
pub fn shape_line(
    font_system: &mut FontSystem,
    text: &str,
    family: &str,
    font_size: f32,
    line_height: f32,
) -> Buffer {
    profile_function!();

    let metrics = Metrics::new(font_size, line_height);
    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_size(font_system, None, None);
    buffer.set_text(
        font_system,
        text,
        Attrs::new().family(Family::Name(family)),
        Shaping::Advanced,
    );
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Widest layout run of a shaped buffer.
pub fn line_width(buffer: &Buffer) -> f32 {
    buffer
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0_f32, f32::max)
}

/// Measure the advance width of `text` set on a single line.
pub fn measure_line(
    font_system: &mut FontSystem,
    text: &str,
    family: &str,
    font_size: f32,
    line_height: f32,
) -> f32 {
    let buffer = shape_line(font_system, text, family, font_size, line_height);
    line_width(&buffer)
}
