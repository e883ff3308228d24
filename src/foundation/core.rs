use crate::foundation::error::{FrameError, FrameResult};
use crate::foundation::math::unit_to_byte;

pub use kurbo::Vec2;

/// Bytes per pixel in a [`Frame`](crate::Frame) buffer (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// 0-based frame index within a render pass.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create validated dimensions: both sides must be non-zero and the RGB buffer size must
    /// fit in `usize`.
    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    pub(crate) fn validate(self) -> FrameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::validation(format!(
                "frame dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.checked_byte_len().is_none() {
            return Err(FrameError::validation(format!(
                "frame buffer for {}x{} overflows usize",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    fn checked_byte_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(BYTES_PER_PIXEL)
    }

    /// Size of a packed RGB8 buffer with these dimensions.
    pub fn byte_len(self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }

    /// `width / height`, used to keep shaded pixels square.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Linear RGB color as produced by a shader. Components are nominally in `[0, 1]`; anything
/// outside is clamped when quantized.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from its components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Quantize to 8-bit RGB.
    pub fn to_rgb8(self) -> [u8; 3] {
        [unit_to_byte(self.r), unit_to_byte(self.g), unit_to_byte(self.b)]
    }
}

impl From<[f64; 3]> for Color {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
