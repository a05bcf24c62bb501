//! Mock implementation of [`Rasterize`] for testing.
//!
//! Every non-whitespace character becomes a solid block one advance wide,
//! wrapped and centered with the same rules as the font-backed rasterizer.

use std::sync::Arc;

use motes_core::config::RasterConfig;
use motes_text::{
    AlphaBitmap, FontFace, FontSet, Rasterize, TextError, TextResult, line_middles, wrap_words,
};
use parking_lot::Mutex;

/// Records a rasterization call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterCall {
    pub text: String,
    pub max_width: f32,
    pub font_index: usize,
}

/// Shared view of the calls a [`MockRasterizer`] has received.
///
/// Cloned handles stay valid after the rasterizer itself has been moved
/// into a generator or controller.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<RasterCall>>>,
}

impl CallRecorder {
    pub fn calls(&self) -> Vec<RasterCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: RasterCall) {
        self.calls.lock().push(call);
    }
}

/// Deterministic block-glyph rasterizer.
pub struct MockRasterizer {
    fonts: FontSet,
    config: RasterConfig,
    failing_families: Vec<String>,
    recorder: CallRecorder,
}

impl MockRasterizer {
    /// Two in-memory faces ("MockSans", "MockSerif") and the default canvas.
    pub fn new() -> Self {
        Self::with_config(RasterConfig::default())
    }

    pub fn with_config(config: RasterConfig) -> Self {
        Self {
            fonts: FontSet::new(vec![
                FontFace::from_memory("MockSans", Vec::new()),
                FontFace::from_memory("MockSerif", Vec::new()),
            ]),
            config,
            failing_families: Vec::new(),
            recorder: CallRecorder::default(),
        }
    }

    /// Make every call that picks `family` fail with a font load error.
    pub fn fail_family(mut self, family: impl Into<String>) -> Self {
        self.failing_families.push(family.into());
        self
    }

    /// Make every font in the set fail to load.
    pub fn fail_all(mut self) -> Self {
        self.failing_families = self.fonts.iter().map(|f| f.family.clone()).collect();
        self
    }

    pub fn recorder(&self) -> CallRecorder {
        self.recorder.clone()
    }

    /// Horizontal advance of one block glyph.
    pub fn advance(&self) -> f32 {
        self.config.font_size * 0.5
    }

    /// Measured width of `line` in block glyphs.
    pub fn measure(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.advance()
    }
}

impl Default for MockRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterize for MockRasterizer {
    fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    fn rasterize(
        &mut self,
        text: &str,
        max_width: f32,
        font_index: usize,
    ) -> TextResult<Option<AlphaBitmap>> {
        self.recorder.record(RasterCall {
            text: text.to_string(),
            max_width,
            font_index,
        });

        if text.trim().is_empty() {
            return Ok(None);
        }

        let face = self.fonts.get(font_index).ok_or_else(|| {
            TextError::FontLoadError(format!("font index {} out of range", font_index))
        })?;
        if self.failing_families.contains(&face.family) {
            return Err(TextError::FontLoadError(format!(
                "mock failure for '{}'",
                face.family
            )));
        }

        let lines = wrap_words(text, max_width, |line| self.measure(line));
        let mut bitmap = AlphaBitmap::new(self.config.canvas_width, self.config.canvas_height);
        let advance = self.advance();
        let block_width = (advance * 0.6).round().max(1.0) as u32;
        let block_height = (self.config.font_size * 0.7).round().max(1.0) as u32;

        for (line, middle) in lines.iter().zip(line_middles(&self.config, lines.len())) {
            let left = self.config.canvas_width as f32 / 2.0 - self.measure(line) / 2.0;
            let top = (middle - block_height as f32 / 2.0).round() as i32;

            for (column, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let x = (left + column as f32 * advance).round() as i32;
                bitmap.fill_rect(x, top, block_width, block_height);
            }
        }

        Ok(Some(bitmap))
    }
}
