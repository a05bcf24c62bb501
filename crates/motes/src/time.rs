use std::time::{Duration, Instant};

use motes_core::profiling::profile_function;

/// Frame timing for the animation loop.
///
/// Provides delta time, elapsed time, frame counting and time scaling.
/// Jitter phase reads [`Time::elapsed`]; the chaos deadline reads
/// [`Time::real_elapsed`], which ignores the delta cap and the time scale.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use motes::Time;
///
/// let mut time = Time::new();
/// time.advance(Duration::from_millis(16));
/// assert_eq!(time.frame_count(), 1);
/// assert_eq!(time.elapsed(), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct Time {
    /// Total scaled time since start
    elapsed: Duration,
    /// Scaled time since last frame
    delta: Duration,
    /// Uncapped, unscaled time since start
    real_elapsed: Duration,
    frame_count: u64,
    /// Time scale multiplier (1.0 = normal, 0.5 = half speed, 0.0 = paused)
    time_scale: f32,
    /// Maximum delta per frame (default: 0.1s)
    max_delta: Duration,
    last_frame_time: Instant,
}

impl Time {
    /// Creates a new Time with a scale of 1.0 and a max delta of 100ms.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            real_elapsed: Duration::ZERO,
            frame_count: 0,
            time_scale: 1.0,
            max_delta: Duration::from_millis(100),
            last_frame_time: Instant::now(),
        }
    }

    /// Updates the time from the wall clock.
    ///
    /// Should be called once per frame, before ticking the controller.
    pub fn update(&mut self) {
        profile_function!();
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.step(raw_delta);
    }

    /// Steps the time by `delta` without looking at the wall clock.
    ///
    /// Used by headless loops and tests.
    pub fn advance(&mut self, delta: Duration) {
        self.step(delta);
    }

    fn step(&mut self, raw_delta: Duration) {
        self.real_elapsed += raw_delta;

        // Cap delta so a long stall does not jump the animation
        let capped = raw_delta.min(self.max_delta);
        self.delta = if self.time_scale == 1.0 {
            capped
        } else {
            capped.mul_f64(self.time_scale as f64)
        };
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall time since start, unaffected by `max_delta` and the time scale.
    #[inline]
    pub fn real_elapsed(&self) -> Duration {
        self.real_elapsed
    }

    #[inline]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    #[inline]
    pub fn elapsed_seconds_f64(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the time scale; negative values are treated as 0.
    #[inline]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    #[inline]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    pub fn set_max_delta(&mut self, max_delta: Duration) {
        self.max_delta = max_delta;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.time_scale = 0.0;
    }

    #[inline]
    pub fn resume(&mut self) {
        self.time_scale = 1.0;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
