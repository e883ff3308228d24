use crate::foundation::core::{BYTES_PER_PIXEL, Dimensions, FrameIndex};

/// One rendered image of a pass.
///
/// Pixels are packed RGB8, row-major, top row first: exactly `width * height * 3` bytes. A frame
/// is owned by exactly one party at a time and is never mutated after it leaves its worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Index of this frame within its pass.
    pub index: FrameIndex,
    /// RGB8 bytes, tightly packed, row-major.
    pub pixels: Vec<u8>,
}

impl Frame {
    pub(crate) fn blank(dims: Dimensions, index: FrameIndex) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            index,
            pixels: vec![0; dims.byte_len()],
        }
    }

    /// Frame dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB bytes of pixel `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = self.offset(x, y);
        Some([self.pixels[off], self.pixels[off + 1], self.pixels[off + 2]])
    }

    /// Bytes of row `y`, or `None` when out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = (y as usize) * stride;
        self.pixels.get(start..start + stride)
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        (self.width as usize) * BYTES_PER_PIXEL
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
