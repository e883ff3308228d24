use crate::foundation::error::{FrameError, FrameResult};

/// Options controlling the worker pool of a [`FrameRenderer`](crate::FrameRenderer).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererOpts {
    /// Number of worker threads. `0` uses the available hardware parallelism.
    pub threads: usize,
    /// Worker thread name prefix; threads are named `<prefix>-<index>`.
    pub thread_name: String,
    /// Worker stack size in bytes. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            threads: 0,
            thread_name: "framepool-worker".to_owned(),
            stack_size: None,
        }
    }
}

impl RendererOpts {
    /// Default options with an explicit worker count.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    /// Worker count after resolving `0` to the hardware parallelism.
    pub fn resolved_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        if self.stack_size == Some(0) {
            return Err(FrameError::validation(
                "renderer 'stack_size' must be > 0 when set",
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(FrameError::validation(
                "renderer 'thread_name' must not contain NUL bytes",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/opts.rs"]
mod tests;
