// src/diag.rs

//! Diagnostic sink trait and implementations
//!
//! Resolution passes produce ordered human-readable messages. Where those
//! messages end up depends on the caller: the CLI prints them, the watch
//! daemon logs them, and tests capture them.

use std::sync::Mutex;
use tracing::info;

/// Receives the ordered messages of a resolution pass
///
/// Implementations must be thread-safe (Send + Sync) so a sink can be
/// shared across passes. Emitting has no failure mode.
pub trait DiagnosticSink: Send + Sync {
    /// Emit one message
    fn emit(&self, message: &str);
}

/// Prints messages to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a new console sink
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, message: &str) {
        println!("{}", message);
    }
}

/// Forwards messages to tracing at info level
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        info!("{}", message);
    }
}

/// Records messages in memory
///
/// Useful for tests and for embedders that want to present messages
/// through their own UI.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create a new memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
