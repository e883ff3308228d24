/// Result alias used throughout the crate.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors surfaced by the renderer, its pool and its completion sink.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Rejected input (bad dimensions, bad options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A render pass is still being claimed by workers.
    #[error("render pass in flight: {0}")]
    Busy(String),

    /// The renderer has been torn down and accepts no more work.
    #[error("renderer shut down: {0}")]
    Shutdown(String),

    /// The shading function failed while rasterizing a frame.
    #[error("shading error: {0}")]
    Shading(String),

    /// A completed frame could not be handed to the completion context.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Wrapped source error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Busy`].
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    /// Build a [`FrameError::Shutdown`].
    pub fn shutdown(msg: impl Into<String>) -> Self {
        Self::Shutdown(msg.into())
    }

    /// Build a [`FrameError::Shading`].
    pub fn shading(msg: impl Into<String>) -> Self {
        Self::Shading(msg.into())
    }

    /// Build a [`FrameError::Delivery`].
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}

/// Best-effort text for a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
