//! ffi-expose: state-machine components behind an opaque-handle C ABI
//!
//! A foreign orchestration runtime drives Rust components without knowing
//! their types. It receives an untyped handle from a generated factory, calls
//! generated trampolines with that handle, and finally hands it to a
//! generated destructor. Trampolines take nothing but the handle and return
//! nothing.
//!
//! # Core Concepts
//!
//! - **Component**: an object owning one `State` value, changed only by its
//!   own unguarded transitions
//! - **Exposure declaration**: [`expose_object!`] lists a type and the
//!   transitions to export; signatures are checked at compile time
//! - **Handle**: the pointer-sized token the foreign side holds, either the
//!   instance address or a registry id in `checked` mode
//!
//! # Example
//!
//! ```rust
//! use ffi_expose::components::{ObjectDetection, ObjectDetectionState};
//! use ffi_expose::core::Component;
//! use ffi_expose::{Exposed, Instance};
//!
//! assert_eq!(ObjectDetection::TABLE.create.symbol, "create_ObjectDetection");
//!
//! let mut detection = Instance::<ObjectDetection>::new();
//! detection.invoke("drive_q2").unwrap();
//! assert_eq!(
//!     detection.peek(ObjectDetection::state),
//!     Some(ObjectDetectionState::DriveQ2)
//! );
//! ```

pub mod components;
pub mod core;
pub mod expose;
pub mod handle;
pub mod instance;
pub mod registry;
pub mod sink;

// Re-export commonly used types
pub use crate::core::{Component, State};
pub use expose::{ExposeError, Exposed, ExposureTable, HandleMode, Manifest};
pub use handle::Handle;
pub use instance::Instance;
pub use sink::{LogSink, MemorySink, NullSink, TracingSink};
