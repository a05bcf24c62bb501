//! Tunable constants for the motes pipeline.
//!
//! [`Config::default`] reproduces the reference look; every section can be
//! overridden independently (tests shrink the canvas and switch jitter off).

use std::time::Duration;

/// Configuration for the whole text-particle pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub raster: RasterConfig,
    pub sampling: SamplingConfig,
    pub motion: MotionConfig,
}

/// Text rasterization settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    /// Bitmap width in pixels.
    pub canvas_width: u32,
    /// Bitmap height in pixels.
    pub canvas_height: u32,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f32,
    /// Fraction of the viewport width available to a line of text.
    pub wrap_factor: f32,
}

impl RasterConfig {
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    /// Word-wrap limit for a viewport of the given width.
    pub fn max_width(&self, viewport_width: f32) -> f32 {
        viewport_width * self.wrap_factor
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1024,
            canvas_height: 512,
            font_size: 60.0,
            line_height_factor: 1.2,
            wrap_factor: 0.3,
        }
    }
}

/// Bitmap sampling and particle placement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Step between sampled rows.
    pub row_stride: usize,
    /// Step between sampled columns.
    pub column_stride: usize,
    /// A pixel must have alpha strictly above this to spawn a particle.
    pub alpha_threshold: u8,
    /// Bitmap pixels per scene unit.
    pub scene_scale: f32,
    /// Depth offsets are drawn from `0.0..depth_range`.
    pub depth_range: f32,
    /// Side length of the cube initial positions are scattered in.
    pub scatter_extent: f32,
    /// Lightness removed from a particle at zero depth.
    pub darken_factor: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            row_stride: 2,
            column_stride: 1,
            alpha_threshold: 64,
            scene_scale: 8.0,
            depth_range: 3.0,
            scatter_extent: 100.0,
            darken_factor: 0.4,
        }
    }
}

/// Oscillation applied to a particle resting on its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
}

impl Jitter {
    pub const NONE: Jitter = Jitter {
        amplitude: 0.0,
        speed: 0.0,
    };
}

/// Per-frame animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Progress added per frame tick.
    pub progress_step: f32,
    /// Side length of the cube chaos targets are scattered in.
    pub chaos_extent: f32,
    /// Time between a chaos trigger and the reform.
    pub chaos_delay: Duration,
    pub settled_jitter: Jitter,
    pub chaos_jitter: Jitter,
    /// Depth axis jitter is this many times the base amplitude.
    pub depth_jitter_scale: f32,
}

impl MotionConfig {
    /// Ticks needed for a particle to go from 0 to 1.
    pub fn ticks_to_settle(&self) -> u32 {
        (1.0 / self.progress_step).ceil() as u32
    }

    /// Same settings with every jitter amplitude zeroed.
    pub fn without_jitter(self) -> Self {
        Self {
            settled_jitter: Jitter::NONE,
            chaos_jitter: Jitter::NONE,
            ..self
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            progress_step: 0.1,
            chaos_extent: 200.0,
            chaos_delay: Duration::from_millis(3000),
            settled_jitter: Jitter {
                amplitude: 0.05,
                speed: 2.0,
            },
            chaos_jitter: Jitter {
                amplitude: 0.2,
                speed: 5.0,
            },
            depth_jitter_scale: 10.0,
        }
    }
}
