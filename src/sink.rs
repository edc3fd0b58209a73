//! Log sinks injected into components.
//!
//! Transition bodies report what they did through a [`LogSink`]. The sink is
//! handed to the component at construction so tests can capture messages
//! without a global subscriber. Recording is fire-and-forget: nothing is
//! returned to the transition.

use std::ffi::{c_char, CStr};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for messages emitted by transition bodies.
pub trait LogSink: Send + Sync {
    /// Record one message.
    fn record(&self, message: &str);
}

/// Sink forwarding to `tracing` at `info` level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    component: &'static str,
}

impl TracingSink {
    /// Create a sink that tags every event with `component`.
    pub const fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl LogSink for TracingSink {
    fn record(&self, message: &str) {
        tracing::info!(component = self.component, "{message}");
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&self, _message: &str) {}
}

/// Sink keeping messages in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for MemorySink {
    fn record(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("messages", &self.messages().len())
            .finish()
    }
}

/// Log an informational message on behalf of foreign code.
///
/// Null pointers are ignored and invalid UTF-8 is replaced.
///
/// # Safety
///
/// `message` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn expose_log_info(message: *const c_char) {
    if message.is_null() {
        return;
    }
    // SAFETY: non-null and NUL-terminated per the caller contract
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    tracing::info!(target: "ffi_expose::foreign", "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record("first");
        sink.record("second");

        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let shared = sink.clone();
        shared.record("hello");

        assert_eq!(sink.messages(), vec!["hello"]);
    }

    #[test]
    fn null_sink_accepts_anything() {
        let sink = NullSink;
        sink.record("dropped");
    }

    #[test]
    fn sinks_work_as_trait_objects() {
        let memory = MemorySink::new();
        let sinks: Vec<Arc<dyn LogSink>> = vec![
            Arc::new(TracingSink::new("test")),
            Arc::new(NullSink),
            Arc::new(memory.clone()),
        ];

        for sink in &sinks {
            sink.record("step completed");
        }

        assert_eq!(memory.messages().len(), 1);
    }

    #[test]
    fn foreign_log_ignores_null() {
        unsafe { expose_log_info(std::ptr::null()) };
    }

    #[test]
    fn foreign_log_accepts_c_string() {
        let message = CString::new("Pre-processing step completed.").unwrap();
        unsafe { expose_log_info(message.as_ptr()) };
    }
}
