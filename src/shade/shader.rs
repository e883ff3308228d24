use std::sync::Arc;

use crate::foundation::core::{Color, Vec2};

/// A per-pixel shading function.
///
/// `shade` receives the pixel center in normalized device coordinates (see
/// [`FrameRenderer`](crate::FrameRenderer) for the mapping) and the pass time in `[0, 1)`, and
/// returns an RGB color. Implementations are called concurrently from every worker thread with
/// no synchronization, so they must not rely on shared mutable state. Out-of-range components
/// are clamped, not rejected.
pub trait Shader: Send + Sync {
    /// Color of the pixel at `uv` at time `time`.
    fn shade(&self, uv: Vec2, time: f64) -> Color;
}

/// Shader shared between the caller and every worker of a pass.
pub type SharedShader = Arc<dyn Shader>;

impl<F> Shader for F
where
    F: Fn(Vec2, f64) -> Color + Send + Sync,
{
    fn shade(&self, uv: Vec2, time: f64) -> Color {
        self(uv, time)
    }
}

/// Constant-color shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid(pub Color);

impl Shader for Solid {
    fn shade(&self, _uv: Vec2, _time: f64) -> Color {
        self.0
    }
}

/// Debug shader: red follows `u`, green follows `v`, blue follows time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvGradient;

impl Shader for UvGradient {
    fn shade(&self, uv: Vec2, time: f64) -> Color {
        Color::new((uv.x + 1.0) * 0.5, (uv.y + 1.0) * 0.5, time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/shader.rs"]
mod tests;
