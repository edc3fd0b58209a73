//! Object detection pipeline stage.
//!
//! Driven by the orchestration runtime after each camera frame: one
//! pre-processing step, three drive queries that may run in any order, then
//! fusion. The component does not enforce that order.

use std::fmt;
use std::sync::Arc;

use crate::core::Component;
use crate::sink::{LogSink, TracingSink};
use crate::{expose_object, state_enum};

state_enum! {
    /// Last step executed by [`ObjectDetection`].
    pub enum ObjectDetectionState {
        Initial,
        PreProcessing,
        DriveQ1,
        DriveQ2,
        DriveQ3,
        ObjectFusion,
    }
    initial: Initial
}

pub struct ObjectDetection {
    state: ObjectDetectionState,
    sink: Arc<dyn LogSink>,
}

impl ObjectDetection {
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: ObjectDetectionState::default(),
            sink,
        }
    }

    pub fn pre_processing(&mut self) {
        self.state = ObjectDetectionState::PreProcessing;
        self.sink.record("Pre-processing step completed.");
    }

    pub fn drive_q1(&mut self) {
        self.state = ObjectDetectionState::DriveQ1;
        self.sink.record("Driving Q1 step completed.");
    }

    pub fn drive_q2(&mut self) {
        self.state = ObjectDetectionState::DriveQ2;
        self.sink.record("Driving Q2 step completed.");
    }

    pub fn drive_q3(&mut self) {
        self.state = ObjectDetectionState::DriveQ3;
        self.sink.record("Driving Q3 step completed.");
    }

    pub fn object_fusion(&mut self) {
        self.state = ObjectDetectionState::ObjectFusion;
        self.sink.record("Object fusion step completed.");
    }
}

impl Default for ObjectDetection {
    fn default() -> Self {
        Self::with_sink(Arc::new(TracingSink::new(Self::NAME)))
    }
}

impl Component for ObjectDetection {
    type State = ObjectDetectionState;
    const NAME: &'static str = "ObjectDetection";

    fn state(&self) -> ObjectDetectionState {
        self.state
    }
}

impl fmt::Debug for ObjectDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDetection")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

expose_object!(ObjectDetection: pre_processing, drive_q1, drive_q2, drive_q3, object_fusion);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::expose::{Exposed, HandleMode};
    use crate::instance::Instance;
    use crate::sink::MemorySink;

    #[test]
    fn starts_in_initial_state() {
        let detection = ObjectDetection::default();
        assert_eq!(detection.state(), ObjectDetectionState::Initial);
        assert!(detection.state().is_initial());
    }

    #[test]
    fn each_step_sets_its_state() {
        let mut detection = ObjectDetection::with_sink(Arc::new(MemorySink::new()));

        detection.object_fusion();
        assert_eq!(detection.state(), ObjectDetectionState::ObjectFusion);
        detection.drive_q2();
        assert_eq!(detection.state(), ObjectDetectionState::DriveQ2);
        detection.pre_processing();
        assert_eq!(detection.state(), ObjectDetectionState::PreProcessing);
        detection.drive_q3();
        assert_eq!(detection.state(), ObjectDetectionState::DriveQ3);
        detection.drive_q1();
        assert_eq!(detection.state(), ObjectDetectionState::DriveQ1);
    }

    #[test]
    fn steps_report_to_sink() {
        let sink = MemorySink::new();
        let mut detection = ObjectDetection::with_sink(Arc::new(sink.clone()));

        detection.pre_processing();
        detection.drive_q1();
        detection.object_fusion();

        assert_eq!(
            sink.messages(),
            vec![
                "Pre-processing step completed.",
                "Driving Q1 step completed.",
                "Object fusion step completed.",
            ]
        );
    }

    #[test]
    fn exposed_surface_matches_pipeline() {
        let table = ObjectDetection::TABLE;
        assert_eq!(table.component, ObjectDetection::NAME);
        assert_eq!(table.mode, HandleMode::Unchecked);
        assert_eq!(
            table.symbols(),
            vec![
                "create_ObjectDetection",
                "free_ObjectDetection",
                "pre_processing_ObjectDetection",
                "drive_q1_ObjectDetection",
                "drive_q2_ObjectDetection",
                "drive_q3_ObjectDetection",
                "object_fusion_ObjectDetection",
            ]
        );
    }

    #[test]
    fn pipeline_through_handle() {
        let mut detection = Instance::<ObjectDetection>::new();
        assert_eq!(
            detection.peek(ObjectDetection::state),
            Some(ObjectDetectionState::Initial)
        );

        for (method, expected) in [
            ("pre_processing", ObjectDetectionState::PreProcessing),
            ("drive_q1", ObjectDetectionState::DriveQ1),
            ("drive_q2", ObjectDetectionState::DriveQ2),
            ("drive_q3", ObjectDetectionState::DriveQ3),
            ("object_fusion", ObjectDetectionState::ObjectFusion),
        ] {
            detection.invoke(method).unwrap();
            assert_eq!(detection.peek(ObjectDetection::state), Some(expected));
        }
    }
}
