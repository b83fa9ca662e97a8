//! Fan-out cache: one computation per block, any number of consumers.
//!
//! A [`Dup`] wraps a processor and hands out [`Output`] handles. The first
//! output read after a [`tick`](Ticker::tick) runs the wrapped processor;
//! every later read in the same block copies the cached result. Reading
//! order among outputs does not matter.
//!
//! ```text
//!              ┌──────────┐
//!   source ──► │   Dup    │ ──► Output ──► consumer A
//!              │ cache    │ ──► Output ──► consumer B
//!              │ done     │ ──► Output ──► consumer C
//!              └──────────┘
//! ```
//!
//! The cache block is only allocated once a second output exists and is
//! kept from then on, even if the count falls back to one.
//!
//! ## Feedback
//!
//! `done` is set before the wrapped processor runs. An output read from
//! inside that same computation (a feedback loop back into the dup) sees
//! `done` and gets the previous block's cache, giving a one-block delay
//! around the loop instead of infinite recursion.
//!
//! ## Locking
//!
//! All dup traffic happens under the engine lock. The inner mutexes are
//! therefore never contended; they make the shared state `Sync` and keep
//! the source and the bookkeeping separately lockable so a feedback read
//! never touches the source lock it is nested in.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::GraphError;
use crate::processor::{Processor, Ticker};
use crate::signal::{Sample, zeroed_block};

/// Fan-out wrapper around one processor.
///
/// Cloning a `Dup` clones the handle; all clones share one cache.
#[derive(Clone)]
pub struct Dup {
    shared: Arc<Shared>,
}

/// Consumer handle issued by [`Dup::output`].
///
/// Dropping or [`close`](Output::close)-ing the handle removes it from the
/// dup's live set.
pub struct Output {
    shared: Arc<Shared>,
    id: u64,
}

struct Shared {
    source: Mutex<Box<dyn Processor>>,
    state: Mutex<State>,
}

struct State {
    done: bool,
    live: Vec<u64>,
    next_id: u64,
    cache: Option<Vec<Sample>>,
}

impl Dup {
    /// Wraps `source`.
    pub fn new<P: Processor + 'static>(source: P) -> Self {
        Self::from_boxed(Box::new(source))
    }

    /// Wraps an already boxed processor.
    pub fn from_boxed(source: Box<dyn Processor>) -> Self {
        Self {
            shared: Arc::new(Shared {
                source: Mutex::new(source),
                state: Mutex::new(State {
                    done: false,
                    live: Vec::new(),
                    next_id: 0,
                    cache: None,
                }),
            }),
        }
    }

    /// Issues a new output and appends it to the live set.
    pub fn output(&self) -> Output {
        let mut state = self.shared.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.live.push(id);
        if state.live.len() > 1 && state.cache.is_none() {
            state.cache = Some(zeroed_block());
        }
        Output {
            shared: Arc::clone(&self.shared),
            id,
        }
    }

    /// Replaces the wrapped processor.
    ///
    /// Takes effect at the next computation; a block already computed this
    /// tick keeps being served from the cache.
    pub fn set_source(&self, source: Box<dyn Processor>) {
        let old = std::mem::replace(&mut *self.shared.source.lock(), source);
        drop(old);
    }

    /// Wires `processor` into an input of the wrapped processor.
    pub fn input(&self, name: &str, processor: Box<dyn Processor>) -> Result<(), GraphError> {
        let mut source = self.shared.source.lock();
        match source.as_sink_mut() {
            Some(sink) => sink.input(name, processor),
            None => Err(GraphError::NotASink {
                input: name.to_owned(),
            }),
        }
    }

    /// Input names of the wrapped processor; empty if it has none.
    pub fn inputs(&self) -> Vec<String> {
        let source = self.shared.source.lock();
        source.as_sink().map(|s| s.inputs()).unwrap_or_default()
    }

    /// Handle for registering this dup with an engine.
    pub fn ticker(&self) -> Arc<dyn Ticker> {
        Arc::clone(&self.shared) as Arc<dyn Ticker>
    }

    /// Number of outputs currently live.
    pub fn live_outputs(&self) -> usize {
        self.shared.state.lock().live.len()
    }

    /// Whether the shared cache block has been allocated.
    pub fn has_cache(&self) -> bool {
        self.shared.state.lock().cache.is_some()
    }

    /// Whether `ticker` is this dup's ticker handle.
    pub fn is_ticker(&self, ticker: &Arc<dyn Ticker>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(ticker), Arc::as_ptr(&self.shared))
    }
}

impl Ticker for Dup {
    fn tick(&self) {
        self.shared.tick();
    }
}

impl Ticker for Shared {
    fn tick(&self) {
        self.state.lock().done = false;
    }
}

impl Output {
    /// Releases this output.
    pub fn close(self) {
        drop(self);
    }
}

impl Processor for Output {
    fn process(&mut self, block: &mut [Sample]) {
        {
            let mut state = self.shared.state.lock();
            if state.done {
                if let Some(cache) = &state.cache {
                    debug_assert_eq!(block.len(), cache.len(), "block length mismatch");
                    block.copy_from_slice(cache);
                }
                return;
            }
            state.done = true;
        }

        self.shared.source.lock().process(block);

        let mut state = self.shared.state.lock();
        if state.live.len() > 1
            && let Some(cache) = state.cache.as_mut()
        {
            debug_assert_eq!(block.len(), cache.len(), "block length mismatch");
            cache.copy_from_slice(block);
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        if let Some(pos) = state.live.iter().position(|&id| id == self.id) {
            state.live.remove(pos);
        }
    }
}
