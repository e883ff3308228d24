#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use framepool::{CompletionThread, Frame, FrameRenderer, RendererOpts};

/// Upper bound for any wait in these tests.
pub const SETTLE: Duration = Duration::from_secs(30);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Renderer wired to a completion thread that collects every delivered frame.
pub struct Harness {
    pub completion: Arc<CompletionThread>,
    pub frames: Arc<Mutex<Vec<Frame>>>,
    pub renderer: FrameRenderer,
}

impl Harness {
    pub fn new(threads: usize) -> Self {
        Self::with_opts(RendererOpts::with_threads(threads))
    }

    pub fn with_opts(opts: RendererOpts) -> Self {
        init_tracing();
        let completion = Arc::new(CompletionThread::spawn("test-completion").unwrap());
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let renderer = FrameRenderer::new(
            completion.clone(),
            move |frame| sink.lock().unwrap().push(frame),
            opts,
        )
        .unwrap();
        Self {
            completion,
            frames,
            renderer,
        }
    }

    /// Delivered frames sorted by index; clears the collection.
    pub fn take_frames(&self) -> Vec<Frame> {
        let mut frames = std::mem::take(&mut *self.frames.lock().unwrap());
        frames.sort_by_key(|f| f.index);
        frames
    }

    pub fn delivered(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}
