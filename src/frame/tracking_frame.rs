//! One tracking cycle's input or output data.

use std::collections::BTreeMap;

use crate::error::{Result, SyncTrackError};
use crate::frame::camera::{ExtrinsicData, IntrinsicData, SimilarityTransform};
use crate::frame::disposable::Disposable;
use crate::frame::image::{CalibratedImage, Image};
use crate::frame::tracking_state::TrackingState;

const RESOURCE: &str = "frame";

/// Bundled tracking input/output for one cycle.
///
/// The holder owns the image buffers and releases them with
/// [`Disposable::dispose`] (or on drop). Use [`Frame::try_clone`] to get an
/// independently owned copy before handing a frame to a longer-lived
/// container.
#[derive(Debug, Default)]
pub struct Frame {
    pub(crate) image: Option<Image>,
    pub(crate) intrinsics: Option<IntrinsicData>,
    pub(crate) extrinsics: Option<ExtrinsicData>,
    pub(crate) camera_transform: Option<ExtrinsicData>,
    pub(crate) anchor_transforms: BTreeMap<String, SimilarityTransform>,
    pub(crate) debug_image: Option<Image>,
    pub(crate) calibrated_depth_image: Option<CalibratedImage>,
    pub(crate) tracking_state: TrackingState,
    pub(crate) timestamp: f64,
    disposed: bool,
}

/// All fields of a frame, moved out for consumption.
#[derive(Debug, Default)]
pub struct FrameParts {
    pub image: Option<Image>,
    pub intrinsics: Option<IntrinsicData>,
    pub extrinsics: Option<ExtrinsicData>,
    pub camera_transform: Option<ExtrinsicData>,
    pub anchor_transforms: BTreeMap<String, SimilarityTransform>,
    pub debug_image: Option<Image>,
    pub calibrated_depth_image: Option<CalibratedImage>,
    pub tracking_state: TrackingState,
    pub timestamp: f64,
}

impl Frame {
    /// Empty frame at the given timestamp (seconds).
    pub fn new(timestamp: f64) -> Self {
        let mut frame = Self::default();
        frame.timestamp = timestamp;
        frame
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            Err(SyncTrackError::Disposed(RESOURCE))
        } else {
            Ok(())
        }
    }

    /// Deep copy with its own buffers. Fails on a disposed frame.
    pub fn try_clone(&self) -> Result<Frame> {
        self.ensure_live()?;
        Ok(Frame {
            image: self.image.clone(),
            intrinsics: self.intrinsics,
            extrinsics: self.extrinsics,
            camera_transform: self.camera_transform,
            anchor_transforms: self.anchor_transforms.clone(),
            debug_image: self.debug_image.clone(),
            calibrated_depth_image: self.calibrated_depth_image.clone(),
            tracking_state: self.tracking_state.clone(),
            timestamp: self.timestamp,
            disposed: false,
        })
    }

    pub fn image(&self) -> Result<Option<&Image>> {
        self.ensure_live()?;
        Ok(self.image.as_ref())
    }

    pub fn debug_image(&self) -> Result<Option<&Image>> {
        self.ensure_live()?;
        Ok(self.debug_image.as_ref())
    }

    pub fn calibrated_depth_image(&self) -> Result<Option<&CalibratedImage>> {
        self.ensure_live()?;
        Ok(self.calibrated_depth_image.as_ref())
    }

    pub fn intrinsics(&self) -> Option<&IntrinsicData> {
        self.intrinsics.as_ref()
    }

    pub fn extrinsics(&self) -> Option<&ExtrinsicData> {
        self.extrinsics.as_ref()
    }

    pub fn camera_transform(&self) -> Option<&ExtrinsicData> {
        self.camera_transform.as_ref()
    }

    pub fn anchor_transforms(&self) -> &BTreeMap<String, SimilarityTransform> {
        &self.anchor_transforms
    }

    pub fn tracking_state(&self) -> &TrackingState {
        &self.tracking_state
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Move every field out, leaving the frame disposed.
    pub fn take_parts(&mut self) -> Result<FrameParts> {
        self.ensure_live()?;
        self.disposed = true;
        Ok(FrameParts {
            image: self.image.take(),
            intrinsics: self.intrinsics.take(),
            extrinsics: self.extrinsics.take(),
            camera_transform: self.camera_transform.take(),
            anchor_transforms: std::mem::take(&mut self.anchor_transforms),
            debug_image: self.debug_image.take(),
            calibrated_depth_image: self.calibrated_depth_image.take(),
            tracking_state: std::mem::take(&mut self.tracking_state),
            timestamp: self.timestamp,
        })
    }
}

impl Disposable for Frame {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.image = None;
        self.debug_image = None;
        self.calibrated_depth_image = None;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        self.dispose();
    }
}
