//! Signal-graph runtime for the patchwire modular synthesizer.
//!
//! A patch is a directed graph of [`Processor`]s. Every processor fills a
//! fixed-length block of samples per call; processors that accept inputs
//! are also [`Sink`]s and expose named, rewireable slots. The [`Engine`]
//! owns the root of the graph and produces one block per call to
//! [`Engine::process`], either on demand (offline rendering, tests) or from
//! a real-time audio callback after [`Engine::start`].
//!
//! ## Key Components
//!
//! - **Signal constants**: [`Sample`], [`BLOCK_LEN`], [`SAMPLE_RATE`], [`pitch_to_hz`]
//! - **Contract**: [`Processor`], [`Sink`], [`Ticker`], [`Value`]
//! - **Input slots**: [`Input`] (raw), [`Source`] (buffered), [`Trigger`] (edge-detecting)
//! - **Fan-out**: [`Dup`] and [`Output`], one computation per block for N consumers
//! - **Engine**: render lock, ticker sequencing, headroom, stream lifecycle
//! - **Fast math**: [`fast_math::fast_sin`] and [`fast_math::fast_exp2`] lookup tables
//!
//! ## Example
//!
//! ```rust
//! use patchwire_core::{BLOCK_LEN, Dup, Engine, HEADROOM, Value};
//!
//! let engine = Engine::new();
//! let dup = Dup::new(Value(0.5));
//! engine.add_ticker(dup.ticker());
//! engine.input("in", Box::new(dup.output())).unwrap();
//!
//! let block = engine.process();
//! assert_eq!(block.len(), BLOCK_LEN);
//! assert_eq!(block[0], 0.5 * HEADROOM);
//! ```
//!
//! ## Threading
//!
//! The render path and the control path share one lock, exposed as
//! [`Engine::lock`]. Every topology mutation (rewiring a slot, creating or
//! releasing an [`Output`], registering a [`Ticker`]) happens while the
//! guard is held, so a block in flight never observes a half-applied edit.

pub mod dup;
pub mod engine;
pub mod error;
pub mod fast_math;
pub mod inputs;
pub mod processor;
pub mod signal;
pub mod stream;

pub use dup::{Dup, Output};
pub use engine::{Engine, EngineGuard, Graph};
pub use error::{GraphError, StreamError};
pub use inputs::{Input, Source, Trigger};
pub use processor::{Processor, Sink, SlotKind, SlotMut, SlotSpec, Ticker, Value};
pub use signal::{
    BLOCK_LEN, HEADROOM, SAMPLE_RATE, Sample, TRIGGER_THRESHOLD, pitch_to_hz, zeroed_block,
};
pub use stream::{AudioBackend, OutputStream, RenderCallback, StreamConfig};
