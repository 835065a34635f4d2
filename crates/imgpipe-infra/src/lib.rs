//! imgpipe Infrastructure Library
//!
//! Process-level plumbing shared by the imgpipe binaries. Currently this is only the
//! tracing subscriber setup.

pub mod telemetry;

pub use telemetry::init_telemetry;
