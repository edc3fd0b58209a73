//! Reference components exported by this crate.
//!
//! Transition bodies are placeholders: they move the state and report
//! through the injected sink.

mod camera_driver;
mod object_detection;

pub use camera_driver::{CameraDriver, CameraDriverState};
pub use object_detection::{ObjectDetection, ObjectDetectionState};
