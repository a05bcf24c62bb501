//! Test utilities for the motes engine.
//!
//! # Overview
//!
//! - `MockRasterizer` - a [`Rasterize`](motes_text::Rasterize) implementation
//!   that paints one solid block per character instead of real glyphs, so
//!   particle geometry can be asserted without any font files (requires the
//!   `mock` feature)
//! - [`bitmap_from_rows`] - build small alpha bitmaps from ASCII art
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use motes_test_utils::MockRasterizer;
//! use motes_text::Rasterize;
//!
//! let mut mock = MockRasterizer::new();
//! let bitmap = mock.rasterize("AB", 300.0, 0).unwrap().unwrap();
//! assert!(bitmap.covered_pixels() > 0);
//! assert_eq!(mock.recorder().call_count(), 1);
//! # }
//! ```

#[cfg(feature = "mock")]
pub mod mock_raster;

#[cfg(feature = "mock")]
pub use mock_raster::*;

use motes_text::AlphaBitmap;

/// Build a bitmap from rows of ASCII art.
///
/// `#` is full coverage, `+` is alpha 100, `.` is alpha 64 (exactly the
/// sampling threshold, so it must not spawn a particle) and anything else is
/// transparent. Rows shorter than the first are padded with transparency.
pub fn bitmap_from_rows(rows: &[&str]) -> AlphaBitmap {
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;
    let height = rows.len() as u32;
    let mut bitmap = AlphaBitmap::new(width, height);

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate().take(width as usize) {
            let alpha = match ch {
                '#' => 255,
                '+' => 100,
                '.' => 64,
                _ => 0,
            };
            bitmap.set(x as u32, y as u32, alpha);
        }
    }

    bitmap
}
