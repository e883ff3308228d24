use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::foundation::core::{Dimensions, FrameIndex};
use crate::foundation::error::FrameResult;
use crate::shade::shader::SharedShader;

/// Everything a render pass needs, fixed for the lifetime of the pass.
#[derive(Clone)]
pub struct RenderRequest {
    /// Output dimensions of every frame.
    pub dims: Dimensions,
    /// Number of frames; indices `0..frame_count` are rendered.
    pub frame_count: u64,
    /// Shading function shared by all workers.
    pub shader: SharedShader,
}

impl RenderRequest {
    /// Build a validated request.
    pub fn new(width: u32, height: u32, frame_count: u64, shader: SharedShader) -> FrameResult<Self> {
        Ok(Self {
            dims: Dimensions::new(width, height)?,
            frame_count,
            shader,
        })
    }
}

impl fmt::Debug for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderRequest")
            .field("dims", &self.dims)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

/// Frame accounting for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Frames requested.
    pub frames_total: u64,
    /// Frames whose callback returned normally.
    pub frames_delivered: u64,
    /// Frames lost to a shader panic, a callback panic or a closed completion context.
    pub frames_failed: u64,
    /// Frames cut short by shutdown and discarded.
    pub frames_abandoned: u64,
}

#[derive(Debug, Default)]
struct Progress {
    workers_active: usize,
    in_delivery: u64,
    stats: PassStats,
}

impl Progress {
    fn settled(&self) -> bool {
        self.workers_active == 0 && self.in_delivery == 0
    }
}

/// Pass-scoped shared state: the request snapshot, the claim counter and the progress counters.
pub(crate) struct PassState {
    request: RenderRequest,
    next_frame: AtomicU64,
    progress: Mutex<Progress>,
    settled: Condvar,
}

impl PassState {
    pub(crate) fn new(request: RenderRequest, workers: usize) -> Arc<Self> {
        let stats = PassStats {
            frames_total: request.frame_count,
            ..PassStats::default()
        };
        Arc::new(Self {
            request,
            next_frame: AtomicU64::new(0),
            progress: Mutex::new(Progress {
                workers_active: workers,
                in_delivery: 0,
                stats,
            }),
            settled: Condvar::new(),
        })
    }

    pub(crate) fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Claim the next unrendered frame. Each index below `frame_count` is handed out once.
    pub(crate) fn claim(&self) -> Option<FrameIndex> {
        let i = self.next_frame.fetch_add(1, Ordering::Relaxed);
        (i < self.request.frame_count).then_some(FrameIndex(i))
    }

    /// `true` while some worker may still claim or rasterize frames of this pass.
    pub(crate) fn workers_busy(&self) -> bool {
        self.lock().workers_active > 0
    }

    pub(crate) fn worker_finished(&self) {
        self.update(|p| p.workers_active = p.workers_active.saturating_sub(1));
    }

    pub(crate) fn record_posted(&self) {
        self.update(|p| p.in_delivery += 1);
    }

    pub(crate) fn record_delivered(&self) {
        self.update(|p| {
            p.in_delivery = p.in_delivery.saturating_sub(1);
            p.stats.frames_delivered += 1;
        });
    }

    /// A posted frame that never reached the callback, or whose callback panicked.
    pub(crate) fn record_undelivered(&self) {
        self.update(|p| {
            p.in_delivery = p.in_delivery.saturating_sub(1);
            p.stats.frames_failed += 1;
        });
    }

    pub(crate) fn record_failed(&self) {
        self.update(|p| p.stats.frames_failed += 1);
    }

    pub(crate) fn record_abandoned(&self) {
        self.update(|p| p.stats.frames_abandoned += 1);
    }

    fn lock(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut Progress)) {
        let mut p = self.lock();
        f(&mut p);
        if p.settled() {
            self.settled.notify_all();
        }
    }
}

/// Observer for one render pass, returned by [`FrameRenderer::render`](crate::FrameRenderer::render).
///
/// Dropping the handle does not affect the pass. A pass is settled once no worker is working on
/// it and every frame handed to the completion context has reached the callback or been dropped.
#[derive(Clone)]
pub struct PassHandle {
    state: Arc<PassState>,
}

impl PassHandle {
    pub(crate) fn new(state: Arc<PassState>) -> Self {
        Self { state }
    }

    /// Number of frames requested.
    pub fn frame_count(&self) -> u64 {
        self.state.request.frame_count
    }

    /// Current counters.
    pub fn stats(&self) -> PassStats {
        self.state.lock().stats
    }

    /// `true` once the pass is settled.
    pub fn is_settled(&self) -> bool {
        self.state.lock().settled()
    }

    /// Block until the pass is settled.
    ///
    /// Delivery runs on the completion context: if that context is never drained this blocks
    /// forever.
    pub fn wait(&self) -> PassStats {
        let guard = self
            .state
            .settled
            .wait_while(self.state.lock(), |p| !p.settled())
            .unwrap_or_else(PoisonError::into_inner);
        guard.stats
    }

    /// Block until the pass is settled or `timeout` elapses. Returns `None` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<PassStats> {
        let (guard, res) = self
            .state
            .settled
            .wait_timeout_while(self.state.lock(), timeout, |p| !p.settled())
            .unwrap_or_else(PoisonError::into_inner);
        if res.timed_out() && !guard.settled() {
            return None;
        }
        Some(guard.stats)
    }
}

impl fmt::Debug for PassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassHandle")
            .field("request", &self.state.request)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/pass.rs"]
mod tests;
