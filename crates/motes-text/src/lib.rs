//! Motes Text - text rasterization with cosmic-text
//!
//! Turns a string into an alpha bitmap the particle generator can sample:
//! - Font management for a small fixed [`FontSet`] loaded on demand
//! - Greedy word wrapping against a maximum line width
//! - Centered multi-line rasterization onto a fixed-size canvas
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use motes_core::config::RasterConfig;
//! use motes_text::{FontDatabase, FontSet, FontSystem, Rasterize, TextRasterizer};
//!
//! let font_system = FontSystem::new(FontDatabase::empty());
//! let mut rasterizer =
//!     TextRasterizer::new(font_system, FontSet::reference("fonts"), RasterConfig::default());
//!
//! if let Some(bitmap) = rasterizer.rasterize("Gen-Z", 300.0, 0).unwrap() {
//!     println!("{} covered pixels", bitmap.covered_pixels());
//! }
//! ```

pub mod bitmap;
pub mod error;
pub mod font;
pub mod raster;
pub mod shaping;
pub mod wrap;

pub use bitmap::AlphaBitmap;
pub use error::{TextError, TextResult};
pub use font::{FontDatabase, FontFace, FontFormat, FontSet, FontSource, FontSystem};
pub use raster::{Rasterize, TextRasterizer, line_middles};
pub use wrap::wrap_words;
