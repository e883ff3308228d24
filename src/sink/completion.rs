use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::foundation::error::{FrameError, FrameResult, panic_message};
use crate::render::frame::Frame;

/// Unit of work posted to a [`CompletionContext`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Caller callback receiving each completed frame.
pub type FrameCallback = Arc<dyn Fn(Frame) + Send + Sync>;

/// Execution context that runs posted tasks asynchronously.
///
/// Contract: `post` must not run `task` inline. The task runs later on the context's own
/// thread(s), so a slow callback never stalls the worker that produced the frame.
pub trait CompletionContext: Send + Sync {
    /// Queue `task`. Fails once the context no longer accepts work.
    fn post(&self, task: Task) -> FrameResult<()>;
}

/// Completion context backed by one dedicated thread draining a FIFO queue.
///
/// Dropping it (or calling [`CompletionThread::close`]) stops intake, runs every task that was
/// already queued and joins the thread.
pub struct CompletionThread {
    tx: Mutex<Option<mpsc::Sender<Task>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CompletionThread {
    /// Spawn the completion thread with the given name.
    pub fn spawn(name: impl Into<String>) -> FrameResult<Self> {
        let name = name.into();
        let (tx, rx) = mpsc::channel::<Task>();
        let handle = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || drain(rx))
            .with_context(|| format!("failed to spawn completion thread '{name}'"))?;
        tracing::debug!(thread = %name, "completion thread started");
        Ok(Self {
            tx: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Stop accepting tasks, run the queued ones and join the thread. Idempotent.
    pub fn close(&self) {
        drop(
            self.tx
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(handle) = handle else {
            return;
        };
        if handle.thread().id() == std::thread::current().id() {
            tracing::warn!("completion thread closed from one of its own tasks; not joining it");
            return;
        }
        if handle.join().is_err() {
            tracing::error!("completion thread panicked");
        }
    }
}

impl CompletionContext for CompletionThread {
    fn post(&self, task: Task) -> FrameResult<()> {
        let guard = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = guard
            .as_ref()
            .ok_or_else(|| FrameError::delivery("completion thread is closed"))?;
        tx.send(task)
            .map_err(|_| FrameError::delivery("completion thread is not accepting tasks"))
    }
}

impl Drop for CompletionThread {
    fn drop(&mut self) {
        self.close();
    }
}

fn drain(rx: mpsc::Receiver<Task>) {
    while let Ok(task) = rx.recv() {
        if let Err(payload) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(task)) {
            tracing::warn!(
                panic = %panic_message(payload.as_ref()),
                "completion task panicked"
            );
        }
    }
    tracing::debug!("completion thread drained");
}

#[cfg(test)]
#[path = "../../tests/unit/sink/completion.rs"]
mod tests;
