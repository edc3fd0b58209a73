//! Camera driver stage.
//!
//! Reads a frame, processes it and writes the result for the detection
//! stage. Exposed in checked mode: its handles are registry ids.

use std::fmt;
use std::sync::Arc;

use crate::core::Component;
use crate::sink::{LogSink, TracingSink};
use crate::{expose_object, state_enum};

state_enum! {
    pub enum CameraDriverState {
        Initial,
        ReadingInput,
        Processing,
        WritingOutput,
    }
    initial: Initial
}

pub struct CameraDriver {
    state: CameraDriverState,
    sink: Arc<dyn LogSink>,
}

impl CameraDriver {
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: CameraDriverState::default(),
            sink,
        }
    }

    pub fn read_input(&mut self) {
        self.state = CameraDriverState::ReadingInput;
        self.sink.record("Frame read.");
    }

    pub fn process(&mut self) {
        self.state = CameraDriverState::Processing;
        self.sink.record("Frame processed.");
    }

    pub fn write_output(&mut self) {
        self.state = CameraDriverState::WritingOutput;
        self.sink.record("Frame written.");
    }
}

impl Default for CameraDriver {
    fn default() -> Self {
        Self::with_sink(Arc::new(TracingSink::new(Self::NAME)))
    }
}

impl Component for CameraDriver {
    type State = CameraDriverState;
    const NAME: &'static str = "CameraDriver";

    fn state(&self) -> CameraDriverState {
        self.state
    }
}

impl fmt::Debug for CameraDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraDriver")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

expose_object!(checked CameraDriver: read_input, process, write_output);
