use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::foundation::error::{FrameError, FrameResult, panic_message};
use crate::pool::opts::RendererOpts;
use crate::pool::pass::{PassHandle, PassState, RenderRequest};
use crate::pool::workers::WorkerPool;
use crate::render::frame::Frame;
use crate::render::raster::{Raster, rasterize_frame};
use crate::shade::shader::SharedShader;
use crate::sink::completion::{CompletionContext, FrameCallback};

/// Parallel frame renderer.
///
/// A fixed pool of worker threads renders the frames of a pass by claiming indices from one
/// shared atomic counter; there is no central dispatcher. Each completed [`Frame`] is handed to
/// the caller's callback through a [`CompletionContext`], never on the worker thread itself.
///
/// Pixel `(x, y)` of a `width x height` frame is shaded at
/// `u = ((2x + 1) / width - 1) * (width / height)`, `v = (2y + 1) / height - 1`, and frame `i` of
/// `n` at time `i / n`.
///
/// At most one pass is in flight: [`FrameRenderer::render`] returns [`FrameError::Busy`] while
/// workers are still busy with the previous one. Frames arrive in no particular order; sort by
/// [`Frame::index`] if order matters.
pub struct FrameRenderer {
    workers: WorkerPool,
    shared: Arc<WorkerShared>,
    current: Mutex<Option<Arc<PassState>>>,
}

/// State every worker reads during a pass, independent of the pass itself.
struct WorkerShared {
    shutdown: AtomicBool,
    completion: Arc<dyn CompletionContext>,
    on_frame: FrameCallback,
}

#[derive(Clone, Copy, Debug)]
enum WorkerExit {
    Exhausted,
    Shutdown,
}

impl FrameRenderer {
    /// Start the worker pool. No rendering happens until [`FrameRenderer::render`].
    ///
    /// Fails when a worker thread cannot be spawned; threads that did start are joined first.
    pub fn new(
        completion: Arc<dyn CompletionContext>,
        on_frame: impl Fn(Frame) + Send + Sync + 'static,
        opts: RendererOpts,
    ) -> FrameResult<Self> {
        let workers = WorkerPool::start(&opts)?;
        Ok(Self {
            workers,
            shared: Arc::new(WorkerShared {
                shutdown: AtomicBool::new(false),
                completion,
                on_frame: Arc::new(on_frame),
            }),
            current: Mutex::new(None),
        })
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.size()
    }

    /// `true` once [`FrameRenderer::shutdown`] has run.
    pub fn is_shut_down(&self) -> bool {
        self.shared.is_shutting_down()
    }

    /// Start rendering frames `0..frame_count` of `width x height` pixels with `shader`.
    ///
    /// Returns immediately; frames are reported through the callback. Invalid dimensions are
    /// rejected before any worker is woken. A `frame_count` of 0 produces no callbacks and an
    /// already-settled handle.
    #[tracing::instrument(level = "debug", skip(self, shader))]
    pub fn render(
        &self,
        width: u32,
        height: u32,
        frame_count: u64,
        shader: SharedShader,
    ) -> FrameResult<PassHandle> {
        self.render_request(RenderRequest::new(width, height, frame_count, shader)?)
    }

    /// [`FrameRenderer::render`] with a prebuilt request.
    pub fn render_request(&self, request: RenderRequest) -> FrameResult<PassHandle> {
        request.dims.validate()?;

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if self.shared.is_shutting_down() {
            return Err(FrameError::shutdown("render called after shutdown"));
        }
        if let Some(prev) = current.as_ref()
            && prev.workers_busy()
        {
            tracing::warn!("render rejected: previous pass still rendering");
            return Err(FrameError::busy(
                "previous pass is still being rendered; wait on its handle first",
            ));
        }

        tracing::debug!(
            width = request.dims.width,
            height = request.dims.height,
            frame_count = request.frame_count,
            "render pass starting"
        );

        if request.frame_count == 0 {
            let pass = PassState::new(request, 0);
            *current = Some(Arc::clone(&pass));
            return Ok(PassHandle::new(pass));
        }

        let pass = PassState::new(request, self.workers.size());
        let shared = Arc::clone(&self.shared);
        let job_pass = Arc::clone(&pass);
        self.workers
            .broadcast(move |worker| shared.run_pass(worker, &job_pass))?;
        *current = Some(Arc::clone(&pass));
        Ok(PassHandle::new(pass))
    }

    /// Stop all workers and join their threads. Idempotent; also run on drop.
    ///
    /// Workers stop within one row of shading. Partially shaded frames are discarded; frames
    /// already posted to the completion context are still delivered by it.
    pub fn shutdown(&mut self) {
        if !self.shared.shutdown.swap(true, Ordering::AcqRel) {
            tracing::debug!("render shutdown requested");
        }
        self.workers.shutdown();
    }
}

impl Drop for FrameRenderer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl WorkerShared {
    fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Worker body for one pass: claim, rasterize and post frames until the counter runs past
    /// the end of the pass or shutdown is requested.
    fn run_pass(&self, worker: usize, pass: &Arc<PassState>) {
        let _leave = LeavePass(pass);
        let request = pass.request();
        let mut rendered = 0u64;

        let exit = loop {
            if self.is_shutting_down() {
                break WorkerExit::Shutdown;
            }
            let Some(index) = pass.claim() else {
                break WorkerExit::Exhausted;
            };

            let raster = catch_unwind(AssertUnwindSafe(|| {
                rasterize_frame(
                    &*request.shader,
                    request.dims,
                    index,
                    request.frame_count,
                    || self.is_shutting_down(),
                )
            }));

            match raster {
                Ok(Raster::Complete(frame)) => {
                    rendered += 1;
                    self.deliver(pass, frame);
                }
                Ok(Raster::Cancelled { rows_done }) => {
                    tracing::trace!(worker, frame = index.0, rows_done, "frame abandoned");
                    pass.record_abandoned();
                    break WorkerExit::Shutdown;
                }
                Err(payload) => {
                    let err = FrameError::shading(format!(
                        "shader panicked on frame {}: {}",
                        index.0,
                        panic_message(payload.as_ref())
                    ));
                    tracing::warn!(worker, error = %err, "frame dropped");
                    pass.record_failed();
                }
            }
        };

        tracing::debug!(worker, frames = rendered, reason = ?exit, "worker left render pass");
    }

    fn deliver(&self, pass: &Arc<PassState>, frame: Frame) {
        let index = frame.index;
        pass.record_posted();
        let delivery = Delivery {
            pass: Arc::clone(pass),
            frame: Some(frame),
            on_frame: Arc::clone(&self.on_frame),
        };
        // A rejected or unwound task has been dropped, which accounts for the frame.
        let posted = catch_unwind(AssertUnwindSafe(|| {
            self.completion.post(Box::new(move || delivery.run()))
        }));
        match posted {
            Ok(Ok(())) => tracing::trace!(frame = index.0, "frame posted"),
            Ok(Err(err)) => tracing::warn!(frame = index.0, error = %err, "frame not delivered"),
            Err(payload) => tracing::warn!(
                frame = index.0,
                panic = %panic_message(payload.as_ref()),
                "completion context panicked while posting"
            ),
        }
    }
}

/// Marks a worker as gone from its pass when dropped, including while unwinding.
struct LeavePass<'a>(&'a PassState);

impl Drop for LeavePass<'_> {
    fn drop(&mut self) {
        self.0.worker_finished();
    }
}

/// A completed frame in transit to the callback. Dropping it undelivered counts as a failure.
struct Delivery {
    pass: Arc<PassState>,
    frame: Option<Frame>,
    on_frame: FrameCallback,
}

impl Delivery {
    fn run(mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        let index = frame.index;
        match catch_unwind(AssertUnwindSafe(|| (self.on_frame)(frame))) {
            Ok(()) => self.pass.record_delivered(),
            Err(payload) => {
                tracing::warn!(
                    frame = index.0,
                    panic = %panic_message(payload.as_ref()),
                    "frame callback panicked"
                );
                self.pass.record_undelivered();
            }
        }
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if self.frame.is_some() {
            self.pass.record_undelivered();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/renderer.rs"]
mod tests;
