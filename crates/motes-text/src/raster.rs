//! Text to alpha-bitmap rasterization.
//!
//! Text is word-wrapped against a maximum width, then every line is drawn
//! horizontally centered on a fixed-size canvas. The block of lines is
//! anchored so the first line's middle sits at
//! `canvas_height / 2 - line_count * line_height / 2`.

use cosmic_text::{SwashCache, SwashContent};
use motes_core::config::RasterConfig;
use motes_core::profiling::profile_function;

use crate::bitmap::AlphaBitmap;
use crate::error::{TextError, TextResult};
use crate::font::{FontSet, FontSystem};
use crate::shaping::{line_width, measure_line, shape_line};
use crate::wrap::wrap_words;

/// Anything that can turn a text string into an alpha bitmap.
///
/// The particle generator only talks to this trait, so tests can swap the
/// font-backed [`TextRasterizer`] for a deterministic mock.
pub trait Rasterize {
    /// The fonts a caller may choose from.
    fn fonts(&self) -> &FontSet;

    /// Rasterize `text` with the font at `font_index`.
    ///
    /// Returns `Ok(None)` for blank text. A font that cannot be loaded is an
    /// error for this call only.
    fn rasterize(
        &mut self,
        text: &str,
        max_width: f32,
        font_index: usize,
    ) -> TextResult<Option<AlphaBitmap>>;
}

/// Vertical middle of every line for a block of `line_count` lines.
pub fn line_middles(config: &RasterConfig, line_count: usize) -> Vec<f32> {
    let line_height = config.line_height();
    let total_height = line_count as f32 * line_height;
    let first = config.canvas_height as f32 / 2.0 - total_height / 2.0;
    (0..line_count)
        .map(|index| first + index as f32 * line_height)
        .collect()
}

/// Font-backed rasterizer using cosmic-text shaping and swash glyph images.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    fonts: FontSet,
    config: RasterConfig,
}

impl TextRasterizer {
    pub fn new(font_system: FontSystem, fonts: FontSet, config: RasterConfig) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            fonts,
            config,
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    /// Wrap `text` into lines using real glyph advances.
    pub fn wrap(&self, text: &str, max_width: f32, font_index: usize) -> TextResult<Vec<String>> {
        let family = self.prepare_font(font_index)?;
        let inner = self.font_system.inner();
        let mut font_system = inner.write()?;
        let (size, line_height) = (self.config.font_size, self.config.line_height());

        Ok(wrap_words(text, max_width, |line| {
            measure_line(&mut font_system, line, &family, size, line_height)
        }))
    }

    fn prepare_font(&self, font_index: usize) -> TextResult<String> {
        let face = self.fonts.get(font_index).ok_or_else(|| {
            TextError::FontLoadError(format!(
                "font index {} out of range ({} fonts)",
                font_index,
                self.fonts.len()
            ))
        })?;
        self.font_system.ensure_face(face)?;
        Ok(face.family.clone())
    }
}

impl Rasterize for TextRasterizer {
    fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    fn rasterize(
        &mut self,
        text: &str,
        max_width: f32,
        font_index: usize,
    ) -> TextResult<Option<AlphaBitmap>> {
        profile_function!();

        if text.trim().is_empty() {
            return Ok(None);
        }

        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        if width == 0 || height == 0 {
            return Err(TextError::EmptyCanvas { width, height });
        }

        let lines = self.wrap(text, max_width, font_index)?;
        let family = self.prepare_font(font_index)?;
        let (size, line_height) = (self.config.font_size, self.config.line_height());

        let inner = self.font_system.inner();
        let mut font_system = inner.write()?;
        let mut bitmap = AlphaBitmap::new(width, height);

        for (line, middle) in lines.iter().zip(line_middles(&self.config, lines.len())) {
            let buffer = shape_line(&mut font_system, line, &family, size, line_height);
            let left = width as f32 / 2.0 - line_width(&buffer) / 2.0;
            let top = middle - line_height / 2.0;

            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let physical = glyph.physical((left, top + run.line_y), 1.0);
                    let Some(image) = self
                        .swash_cache
                        .get_image(&mut font_system, physical.cache_key)
                    else {
                        continue;
                    };

                    let origin_x = physical.x + image.placement.left;
                    let origin_y = physical.y - image.placement.top;
                    let glyph_width = image.placement.width as usize;
                    let channels = match image.content {
                        SwashContent::Mask => 1,
                        SwashContent::Color => 4,
                        SwashContent::SubpixelMask => {
                            tracing::trace!("skipping subpixel glyph in '{}'", line);
                            continue;
                        }
                    };

                    for (i, pixel) in image.data.chunks_exact(channels).enumerate() {
                        let alpha = pixel[channels - 1];
                        if alpha == 0 {
                            continue;
                        }
                        let x = origin_x + (i % glyph_width) as i32;
                        let y = origin_y + (i / glyph_width) as i32;
                        bitmap.blend(x, y, alpha);
                    }
                }
            }
        }

        tracing::trace!(
            "rasterized {} line(s) of '{}' covering {} pixels",
            lines.len(),
            text,
            bitmap.covered_pixels()
        );

        Ok(Some(bitmap))
    }
}
