use std::thread::JoinHandle;

use crate::foundation::error::{FrameError, FrameResult, panic_message};
use crate::pool::opts::RendererOpts;

/// Fixed set of long-lived worker threads, each with its own rayon job queue.
///
/// Threads are spawned through a custom spawn handler so the pool owns their join handles:
/// [`WorkerPool::shutdown`] returns only after every worker thread has exited.
pub(crate) struct WorkerPool {
    pool: Option<rayon::ThreadPool>,
    handles: Vec<JoinHandle<()>>,
    size: usize,
}

impl WorkerPool {
    pub(crate) fn start(opts: &RendererOpts) -> FrameResult<Self> {
        opts.validate()?;
        let size = opts.resolved_threads();
        let prefix = opts.thread_name.clone();

        let mut builder = rayon::ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .panic_handler(|payload| {
                tracing::error!(
                    panic = %panic_message(payload.as_ref()),
                    "render worker job panicked"
                );
            });
        if let Some(stack_size) = opts.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let mut handles = Vec::with_capacity(size);
        let built = builder
            .spawn_handler(|thread| {
                let mut b = std::thread::Builder::new();
                if let Some(name) = thread.name() {
                    b = b.name(name.to_owned());
                }
                if let Some(stack_size) = thread.stack_size() {
                    b = b.stack_size(stack_size);
                }
                handles.push(b.spawn(|| thread.run())?);
                Ok(())
            })
            .build();

        let pool = match built {
            Ok(pool) => pool,
            Err(e) => {
                // rayon terminates the workers that did start; wait for them before failing.
                join_all(&mut handles);
                return Err(FrameError::from(
                    anyhow::Error::new(e)
                        .context(format!("failed to start {size} render worker thread(s)")),
                ));
            }
        };

        tracing::info!(workers = size, thread_name = %opts.thread_name, "render worker pool started");
        Ok(Self {
            pool: Some(pool),
            handles,
            size,
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Queue one job on every worker; `job` receives the worker index.
    pub(crate) fn broadcast<F>(&self, job: F) -> FrameResult<()>
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        let Some(pool) = self.pool.as_ref() else {
            return Err(FrameError::shutdown("worker pool has been shut down"));
        };
        pool.spawn_broadcast(move |ctx| job(ctx.index()));
        Ok(())
    }

    /// Release the job queues and join every worker. Queued jobs still run first. Idempotent.
    pub(crate) fn shutdown(&mut self) {
        let Some(pool) = self.pool.take() else {
            return;
        };
        drop(pool);
        join_all(&mut self.handles);
        tracing::info!(workers = self.size, "render worker pool joined");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn join_all(handles: &mut Vec<JoinHandle<()>>) {
    let me = std::thread::current().id();
    for handle in handles.drain(..) {
        if handle.thread().id() == me {
            tracing::warn!("worker pool dropped from its own worker thread; not joining it");
            continue;
        }
        let name = handle.thread().name().unwrap_or("<unnamed>").to_owned();
        if handle.join().is_err() {
            tracing::error!(thread = %name, "render worker thread panicked");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/workers.rs"]
mod tests;
