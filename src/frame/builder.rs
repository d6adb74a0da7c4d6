//! Builder for assembling `Frame` objects from individual fields.

use crate::frame::camera::{ExtrinsicData, IntrinsicData, SimilarityTransform};
use crate::frame::image::{CalibratedImage, Image};
use crate::frame::tracking_frame::Frame;
use crate::frame::tracking_state::TrackingState;

/// Builder for creating `Frame` objects field by field.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    /// Create a new frame builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp in seconds.
    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.frame.timestamp = timestamp;
        self
    }

    /// Set the camera image.
    pub fn image(mut self, image: Image) -> Self {
        self.frame.image = Some(image);
        self
    }

    pub fn intrinsics(mut self, intrinsics: IntrinsicData) -> Self {
        self.frame.intrinsics = Some(intrinsics);
        self
    }

    pub fn extrinsics(mut self, extrinsics: ExtrinsicData) -> Self {
        self.frame.extrinsics = Some(extrinsics);
        self
    }

    /// Set the world-from-camera transform.
    pub fn camera_transform(mut self, transform: ExtrinsicData) -> Self {
        self.frame.camera_transform = Some(transform);
        self
    }

    /// Add or replace the transform of one named anchor.
    pub fn anchor_transform(
        mut self,
        anchor: impl Into<String>,
        transform: SimilarityTransform,
    ) -> Self {
        self.frame.anchor_transforms.insert(anchor.into(), transform);
        self
    }

    pub fn debug_image(mut self, image: Image) -> Self {
        self.frame.debug_image = Some(image);
        self
    }

    pub fn calibrated_depth_image(mut self, image: CalibratedImage) -> Self {
        self.frame.calibrated_depth_image = Some(image);
        self
    }

    pub fn tracking_state(mut self, state: TrackingState) -> Self {
        self.frame.tracking_state = state;
        self
    }

    /// Build the final `Frame`.
    pub fn build(self) -> Frame {
        self.frame
    }
}
