//! Errors raised by the Rust side of an exposed surface.
//!
//! The generated C functions never report errors; these are seen by
//! in-process consumers and by the checked handle registry.

use thiserror::Error;

/// Errors that can occur when driving exposed components from Rust.
#[derive(Debug, Error)]
pub enum ExposeError {
    #[error("`{method}` is not an exposed transition of `{component}`")]
    UnknownTransition {
        component: &'static str,
        method: String,
    },

    #[error("Handle {handle:#x} is not a live `{component}` handle")]
    InvalidHandle {
        component: &'static str,
        handle: usize,
    },

    #[error("Manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}
