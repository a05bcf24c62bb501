//! Single-channel coverage bitmaps.

/// A row-major 8-bit alpha bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaBitmap {
    /// Create a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap existing coverage data.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Alpha at `(x, y)`, or `None` outside the bitmap.
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Overwrite the alpha at `(x, y)`; writes outside the bitmap are dropped.
    pub fn set(&mut self, x: u32, y: u32, alpha: u8) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = alpha;
        }
    }

    /// Composite `alpha` over the pixel at `(x, y)` (source-over).
    ///
    /// Coordinates may be negative or past the edge; those pixels are clipped.
    pub fn blend(&mut self, x: i32, y: i32, alpha: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return;
        }

        let dst = &mut self.data[(y * self.width + x) as usize];
        let src = alpha as u32;
        *dst = (src + (*dst as u32) * (255 - src) / 255).min(255) as u8;
    }

    /// Fill an axis-aligned rectangle with full coverage, clipped to the bitmap.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.blend(x + dx, y + dy, 255);
            }
        }
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0).count()
    }
}
