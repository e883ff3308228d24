//! Framepool renders animations on the CPU with a fixed pool of worker threads.
//!
//! A pass renders frames `0..frame_count` of one [`Shader`]: every worker claims the next frame
//! index from a shared atomic counter, shades each pixel, and posts the finished [`Frame`] to a
//! [`CompletionContext`] that runs the caller's callback on its own thread.
//!
//! - Create a [`CompletionContext`] (for example a [`CompletionThread`])
//! - Create a [`FrameRenderer`] with a frame callback and [`RendererOpts`]
//! - Call [`FrameRenderer::render`] and optionally wait on the returned [`PassHandle`]
//!
//! Dropping the renderer stops the workers within one row of shading and joins them.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod pool;
mod render;
mod shade;
mod sink;

pub use crate::foundation::core::{BYTES_PER_PIXEL, Color, Dimensions, FrameIndex, Vec2};
pub use crate::foundation::error::{FrameError, FrameResult};
pub use crate::pool::opts::RendererOpts;
pub use crate::pool::pass::{PassHandle, PassStats, RenderRequest};
pub use crate::pool::renderer::FrameRenderer;
pub use crate::render::frame::Frame;
pub use crate::shade::shader::{Shader, SharedShader, Solid, UvGradient};
pub use crate::sink::completion::{CompletionContext, CompletionThread, FrameCallback, Task};
