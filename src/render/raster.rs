use crate::foundation::core::{BYTES_PER_PIXEL, Dimensions, FrameIndex};
use crate::foundation::math::{ndc_uv, pass_time};
use crate::render::frame::Frame;
use crate::shade::shader::Shader;

/// Result of rasterizing one frame.
#[derive(Debug)]
pub(crate) enum Raster {
    /// Every row was shaded.
    Complete(Frame),
    /// Cancelled between rows; the partial buffer has been dropped.
    Cancelled {
        /// Rows finished before the cancellation checkpoint fired.
        rows_done: u32,
    },
}

/// Shade every pixel of frame `index` out of `frame_count`.
///
/// `cancelled` is polled after each row, so a cancellation request costs at most one row of
/// shading.
pub(crate) fn rasterize_frame(
    shader: &dyn Shader,
    dims: Dimensions,
    index: FrameIndex,
    frame_count: u64,
    cancelled: impl Fn() -> bool,
) -> Raster {
    let time = pass_time(index.0, frame_count);
    let mut frame = Frame::blank(dims, index);
    let stride = (dims.width as usize) * BYTES_PER_PIXEL;

    for (y, row) in (0..dims.height).zip(frame.pixels.chunks_exact_mut(stride)) {
        for (x, px) in (0..dims.width).zip(row.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let color = shader.shade(ndc_uv(dims, x, y), time);
            px.copy_from_slice(&color.to_rgb8());
        }
        if cancelled() {
            return Raster::Cancelled { rows_done: y + 1 };
        }
    }

    Raster::Complete(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
