/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a logical pixel position to `[-1, 1]` on both axes, +Y up.
    ///
    /// Returns `None` for an invalid viewport.
    pub fn to_unit_square(self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.is_valid() {
            return None;
        }
        Some((2.0 * x / self.width - 1.0, 1.0 - 2.0 * y / self.height))
    }
}
