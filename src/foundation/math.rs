use crate::foundation::core::{Dimensions, Vec2};

/// Clamp `v` to `[0, 1]` and scale to a byte, truncating like a float-to-int cast.
///
/// NaN maps to 0.
pub(crate) fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Normalized device coordinates of the center of pixel `(x, y)`.
///
/// `v` spans `[-1, 1]` top to bottom; `u` is scaled by the aspect ratio so pixels stay square.
pub(crate) fn ndc_uv(dims: Dimensions, x: u32, y: u32) -> Vec2 {
    let w = f64::from(dims.width);
    let h = f64::from(dims.height);
    let u = ((2.0 * f64::from(x) + 1.0) / w - 1.0) * (w / h);
    let v = (2.0 * f64::from(y) + 1.0) / h - 1.0;
    Vec2::new(u, v)
}

/// Time parameter of frame `index` in a pass of `frame_count` frames: `index / frame_count`.
pub(crate) fn pass_time(index: u64, frame_count: u64) -> f64 {
    debug_assert!(index < frame_count);
    index as f64 / frame_count as f64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
