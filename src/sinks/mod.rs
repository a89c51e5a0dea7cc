//! Durable logging of completed events.
//!
//! The ticker hands every finalized event to a [`CompletionSink`];
//! [`JsonlSink`] is the provided file-backed implementation.

mod file;
mod sink;

pub use file::JsonlSink;
pub use sink::CompletionSink;
