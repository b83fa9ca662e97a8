//! The engine: graph root, render lock, and stream lifecycle.
//!
//! One call to [`Engine::process`] produces one block:
//!
//! 1. take the render lock;
//! 2. evaluate the root input `in` into the engine's block;
//! 3. tick every registered [`Ticker`] in registration order;
//! 4. release the lock and scale the block by [`HEADROOM`].
//!
//! All processor evaluation finishes before any ticker runs, so a dup's
//! done flag means "computed for the block in flight" for the whole block.
//!
//! The control plane takes the same lock through [`Engine::lock`] and
//! performs topology edits on the returned [`Graph`].
//!
//! ## Stream lifecycle
//!
//! [`Engine::start`] hands a render callback to an [`AudioBackend`] on a
//! dedicated stream thread. That thread opens and starts the stream,
//! reports the outcome, then parks until [`Engine::stop`] (or the engine
//! being dropped) asks it to stop and close. `start` returns only after the
//! stream is running or has failed; a failure leaves the engine stopped.
//! `stop` returns only after the stream is torn down.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, MutexGuard};

use crate::error::{GraphError, StreamError};
use crate::inputs::Source;
use crate::processor::{Processor, Sink, SlotMut, SlotSpec, Ticker};
use crate::signal::{HEADROOM, Sample};
use crate::stream::{AudioBackend, OutputStream, RenderCallback, StreamConfig};

/// Lock guard over the engine's graph, returned by [`Engine::lock`].
pub type EngineGuard<'a> = MutexGuard<'a, Graph>;

/// State protected by the render lock: the root input and the ticker list.
pub struct Graph {
    root: Source,
    tickers: Vec<Arc<dyn Ticker>>,
}

impl Graph {
    fn new() -> Self {
        Self {
            root: Source::new(),
            tickers: Vec::new(),
        }
    }

    /// Registers a ticker; it runs after every block, after those before it.
    pub fn add_ticker(&mut self, ticker: Arc<dyn Ticker>) {
        self.tickers.push(ticker);
    }

    /// Unregisters the first occurrence of `ticker`, keeping the order of
    /// the rest. Returns whether it was registered.
    pub fn remove_ticker(&mut self, ticker: &Arc<dyn Ticker>) -> bool {
        let target = Arc::as_ptr(ticker);
        match self
            .tickers
            .iter()
            .position(|t| std::ptr::addr_eq(Arc::as_ptr(t), target))
        {
            Some(pos) => {
                self.tickers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of registered tickers.
    pub fn ticker_count(&self) -> usize {
        self.tickers.len()
    }

    fn render(&mut self, out: &mut [Sample]) {
        out.copy_from_slice(self.root.process());
        for ticker in &self.tickers {
            ticker.tick();
        }
    }
}

impl Sink for Graph {
    fn unit_name(&self) -> &'static str {
        "engine"
    }

    fn slots(&self) -> &'static [SlotSpec] {
        const SLOTS: &[SlotSpec] = &[SlotSpec::buffered("in")];
        SLOTS
    }

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
        match name {
            "in" => Some(SlotMut::Buffered(&mut self.root)),
            _ => None,
        }
    }
}

/// Stream thread handle kept while running.
struct Runner {
    stop_tx: Sender<()>,
    done_rx: Receiver<Result<(), StreamError>>,
    thread: JoinHandle<()>,
}

/// Root of the patch graph and driver of the per-block tick.
///
/// # Example
///
/// ```rust
/// use patchwire_core::{Engine, Value, BLOCK_LEN, HEADROOM};
///
/// let engine = Engine::new();
/// engine.input("in", Box::new(Value(1.0))).unwrap();
///
/// let out = engine.render(3);
/// assert_eq!(out.len(), 3 * BLOCK_LEN);
/// assert!(out.iter().all(|&s| s == HEADROOM));
/// ```
pub struct Engine {
    graph: Mutex<Graph>,
    runner: Mutex<Option<Runner>>,
}

impl Engine {
    /// Creates a stopped engine with `in` wired to silence and no tickers.
    pub fn new() -> Self {
        Self {
            graph: Mutex::new(Graph::new()),
            runner: Mutex::new(None),
        }
    }

    /// Takes the render lock. Hold the guard for the whole of any topology
    /// edit; drop it to unlock.
    pub fn lock(&self) -> EngineGuard<'_> {
        self.graph.lock()
    }

    /// Wires `processor` into the engine's root slot (`in`).
    pub fn input(&self, name: &str, processor: Box<dyn Processor>) -> Result<(), GraphError> {
        self.lock().input(name, processor)
    }

    /// The engine's input names.
    pub fn inputs(&self) -> Vec<String> {
        self.lock().inputs()
    }

    /// Registers a ticker under the render lock.
    pub fn add_ticker(&self, ticker: Arc<dyn Ticker>) {
        self.lock().add_ticker(ticker);
    }

    /// Unregisters a ticker under the render lock.
    pub fn remove_ticker(&self, ticker: &Arc<dyn Ticker>) -> bool {
        self.lock().remove_ticker(ticker)
    }

    /// Produces one block into `out`, which must be [`BLOCK_LEN`](crate::BLOCK_LEN) long.
    pub fn process_into(&self, out: &mut [Sample]) {
        self.graph.lock().render(out);
        for s in out.iter_mut() {
            *s *= HEADROOM;
        }
    }

    /// Produces one block.
    pub fn process(&self) -> Vec<Sample> {
        let mut block = crate::signal::zeroed_block();
        self.process_into(&mut block);
        block
    }

    /// Produces `blocks` consecutive blocks, concatenated.
    pub fn render(&self, blocks: usize) -> Vec<Sample> {
        let mut out = Vec::with_capacity(blocks * crate::signal::BLOCK_LEN);
        for _ in 0..blocks {
            out.extend_from_slice(&self.process());
        }
        out
    }

    /// Whether a stream is currently running.
    pub fn is_running(&self) -> bool {
        self.runner.lock().is_some()
    }

    /// Binds the engine to a real-time output stream.
    ///
    /// Blocks until the stream is running. On error nothing is left
    /// running and `start` may be called again.
    pub fn start(
        self: &Arc<Self>,
        backend: Box<dyn AudioBackend>,
        config: StreamConfig,
    ) -> Result<(), StreamError> {
        let mut runner = self.runner.lock();
        if runner.is_some() {
            return Err(StreamError::AlreadyRunning);
        }

        let engine = Arc::downgrade(self);
        let render: RenderCallback =
            Box::new(move |block: &mut [Sample]| render_weak(&engine, block));

        let (stop_tx, stop_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        let backend_name = backend.name().to_owned();
        let thread = thread::Builder::new()
            .name("patchwire-stream".into())
            .spawn(move || run_stream(backend, &config, render, &stop_rx, &done_tx))
            .map_err(|e| StreamError::Open(e.to_string()))?;

        match done_rx.recv() {
            Ok(Ok(())) => {
                tracing::info!(backend = %backend_name, "engine started");
                *runner = Some(Runner {
                    stop_tx,
                    done_rx,
                    thread,
                });
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                tracing::warn!(backend = %backend_name, error = %e, "engine failed to start");
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(StreamError::ThreadPanicked)
            }
        }
    }

    /// Unbinds the engine from its stream.
    ///
    /// Returns after the stream thread has stopped and closed the stream;
    /// no block is produced after that. Reports any teardown error.
    pub fn stop(&self) -> Result<(), StreamError> {
        let runner = self.runner.lock().take().ok_or(StreamError::NotRunning)?;
        let _ = runner.stop_tx.send(());
        let result = runner
            .done_rx
            .recv()
            .unwrap_or(Err(StreamError::ThreadPanicked));
        if runner.thread.join().is_err() {
            return Err(StreamError::ThreadPanicked);
        }
        tracing::info!("engine stopped");
        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn render_weak(engine: &Weak<Engine>, block: &mut [Sample]) {
    match engine.upgrade() {
        Some(engine) => engine.process_into(block),
        None => block.fill(0.0),
    }
}

/// Body of the stream thread.
fn run_stream(
    backend: Box<dyn AudioBackend>,
    config: &StreamConfig,
    render: RenderCallback,
    stop_rx: &Receiver<()>,
    done_tx: &Sender<Result<(), StreamError>>,
) {
    let mut stream: Box<dyn OutputStream> = match backend.open(config, render) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = done_tx.send(Err(e));
            return;
        }
    };
    if let Err(e) = stream.start() {
        let _ = stream.close();
        let _ = done_tx.send(Err(e));
        return;
    }
    let _ = done_tx.send(Ok(()));

    // A closed channel means the engine was dropped; tear down either way.
    let _ = stop_rx.recv();

    let result = match stream.stop() {
        Ok(()) => stream.close(),
        Err(e) => {
            let _ = stream.close();
            Err(e)
        }
    };
    let _ = done_tx.send(result);
}
