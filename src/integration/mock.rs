//! Scriptable in-memory engine for unit tests.

use std::collections::VecDeque;

use crate::frame::{
    AnchorState, ExtrinsicData, Image, ImageFormat, IntrinsicData, SimilarityTransform,
    TrackingState,
};
use crate::integration::engine::{TrackerKind, TrackingEngine};

#[derive(Debug, thiserror::Error)]
#[error("mock engine: {0}")]
pub struct MockError(pub &'static str);

#[derive(Debug, Default)]
pub struct MockEngine {
    pub kind: TrackerKind,
    pub running: bool,
    /// `initialize` reports success after this many calls.
    pub init_after: usize,
    pub init_calls: usize,
    pub steps: usize,
    pub fail_next_step: bool,
    pub fail_timestamp: bool,
    pub stop_tracking_on_step: bool,
    /// States reported by successive steps; `Tracked` once exhausted.
    pub states: VecDeque<AnchorState>,
    pub injected_timestamp: Option<f64>,
    pub injected_intrinsics: bool,
    pub calls: Vec<String>,
}

impl MockEngine {
    pub fn with_kind(kind: TrackerKind) -> Self {
        Self {
            kind,
            running: true,
            ..Self::default()
        }
    }

    fn current_state(&self) -> AnchorState {
        self.states.front().copied().unwrap_or(AnchorState::Tracked)
    }
}

impl TrackingEngine for MockEngine {
    type Error = MockError;

    fn start_tracking(&mut self, uri: &str) -> Result<(), MockError> {
        if uri.is_empty() {
            return Err(MockError("empty uri"));
        }
        self.calls.push(format!("start:{uri}"));
        self.running = true;
        Ok(())
    }

    fn stop_tracking(&mut self) -> Result<(), MockError> {
        self.calls.push("stop".to_string());
        self.running = false;
        Ok(())
    }

    fn initialize(&mut self) -> Result<bool, MockError> {
        self.init_calls += 1;
        Ok(self.init_calls > self.init_after)
    }

    fn is_initialized(&self) -> bool {
        self.running && self.init_calls > self.init_after
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn tracker_kind(&self) -> TrackerKind {
        self.kind
    }

    fn set_image(&mut self, node: &str, key: &str, _image: &Image) -> Result<(), MockError> {
        self.calls.push(format!("set_image:{node}/{key}"));
        Ok(())
    }

    fn set_intrinsics(
        &mut self,
        node: &str,
        key: &str,
        _intrinsics: &IntrinsicData,
    ) -> Result<(), MockError> {
        self.calls.push(format!("set_intrinsics:{node}/{key}"));
        self.injected_intrinsics = true;
        Ok(())
    }

    fn set_extrinsics(
        &mut self,
        node: &str,
        key: &str,
        _extrinsics: &ExtrinsicData,
    ) -> Result<(), MockError> {
        self.calls.push(format!("set_extrinsics:{node}/{key}"));
        Ok(())
    }

    fn set_timestamp(&mut self, timestamp: f64) -> Result<(), MockError> {
        if self.fail_timestamp {
            return Err(MockError("timestamp rejected"));
        }
        self.injected_timestamp = Some(timestamp);
        Ok(())
    }

    fn step(&mut self) -> Result<bool, MockError> {
        self.steps += 1;
        if self.fail_next_step {
            self.fail_next_step = false;
            return Err(MockError("inconsistent engine state"));
        }
        if self.stop_tracking_on_step {
            return Ok(false);
        }
        Ok(true)
    }

    fn similarity_transform(
        &mut self,
        _node: &str,
        key: &str,
    ) -> Result<SimilarityTransform, MockError> {
        self.calls.push(format!("similarity:{key}"));
        Ok(SimilarityTransform::default())
    }

    fn image(&mut self, _node: &str, key: &str) -> Result<Image, MockError> {
        match key {
            "DebugImage" => Err(MockError("no debug image")),
            _ => Ok(Image::new(2, 2, ImageFormat::Rgb)),
        }
    }

    fn intrinsics(&mut self, _node: &str, _key: &str) -> Result<IntrinsicData, MockError> {
        Ok(IntrinsicData::new(2, 2, 1.0, 1.0, 0.5, 0.5))
    }

    fn extrinsics(&mut self, _node: &str, key: &str) -> Result<ExtrinsicData, MockError> {
        self.calls.push(format!("extrinsics:{key}"));
        Ok(ExtrinsicData::default())
    }

    fn tracking_state(&mut self, _node: &str) -> Result<TrackingState, MockError> {
        let state = self.current_state();
        self.states.pop_front();
        Ok(TrackingState::single("TrackedObject", state, 1.0))
    }
}
