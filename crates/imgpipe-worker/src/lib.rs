//! imgpipe worker
//!
//! Turns one object-created event into one bounded-size derivative, a metadata record
//! and a completion message. [`handle_event`] is the entry point used by the Lambda
//! binary; [`process`] runs the pipeline for an already-resolved source object.

pub mod context;
pub mod pipeline;
pub mod setup;
pub mod state;
pub mod trigger;

pub use context::PipelineContext;
pub use pipeline::{handle_event, process};
pub use state::PipelineState;
pub use trigger::source_from_event;
