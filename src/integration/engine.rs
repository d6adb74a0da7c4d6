//! Trait for the native tracking engine driven by the worker thread.

use crate::frame::{ExtrinsicData, Image, IntrinsicData, SimilarityTransform, TrackingState};

/// Node and key names of the engine's injection/extraction graph.
pub mod nodes {
    /// Injection node fed with input frames.
    pub const INJECT: &str = "inject0";
    /// Root node of the tracking pipeline.
    pub const ROOT: &str = "";

    pub const IMAGE_IN: &str = "imageIn";
    pub const INTRINSIC: &str = "intrinsic";
    pub const EXTRINSIC: &str = "extrinsic";
    pub const INTRINSIC_DISPLAY: &str = "intrinsicDisplay";
    pub const IMAGE_DISPLAY: &str = "imageDisplay";
    pub const DEBUG_IMAGE: &str = "DebugImage";
    pub const WORLD_FROM_CAMERA: &str = "worldFromCameraTransform";

    /// Anchor whose transform poster trackers always report.
    pub const TRACKED_OBJECT: &str = "TrackedObject";

    /// Key of the world-from-anchor similarity transform.
    pub fn world_from_anchor(anchor: &str) -> String {
        format!("WorldFrom{}Transform", anchor)
    }
}

/// Kind of tracker loaded by the engine. Decides which nodes hold the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerKind {
    /// Model-based tracker (and any tracker without special handling)
    #[default]
    ModelTracker,
    /// Planar poster tracker; renders no display image
    PosterTracker,
    /// Camera calibration pipeline; reports no camera transform
    CameraCalibration,
}

impl TrackerKind {
    /// Map the engine's tracker type name.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "PosterTracker" => Self::PosterTracker,
            "CameraCalibration" => Self::CameraCalibration,
            _ => Self::ModelTracker,
        }
    }
}

/// Synchronous tracking engine.
///
/// Implement this trait to connect a native tracker to the frame exchange.
/// Every method is only called while the caller holds the shared engine
/// lock, so implementations need no internal synchronization.
///
/// # Example
///
/// ```ignore
/// use synctrack_rs::TrackingEngine;
///
/// struct MyEngine { /* native handle */ }
///
/// impl TrackingEngine for MyEngine {
///     type Error = std::io::Error;
///     // forward each call to the native library
/// }
/// ```
pub trait TrackingEngine: Send + 'static {
    /// Error type for engine failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the tracking configuration at `uri` and start the pipeline.
    fn start_tracking(&mut self, uri: &str) -> Result<(), Self::Error>;

    /// Stop the pipeline and unload the tracker.
    fn stop_tracking(&mut self) -> Result<(), Self::Error>;

    /// Run one initialization step. Returns `true` once the tracker is
    /// initialized and ready to accept injected frames.
    fn initialize(&mut self) -> Result<bool, Self::Error>;

    /// Whether the tracker is still initialized. Once this turns `false`
    /// the worker leaves the tracking phase and exits.
    fn is_initialized(&self) -> bool;

    /// Whether the pipeline is running at all.
    fn is_running(&self) -> bool;

    /// Kind of the loaded tracker.
    fn tracker_kind(&self) -> TrackerKind;

    fn set_image(&mut self, node: &str, key: &str, image: &Image) -> Result<(), Self::Error>;

    fn set_intrinsics(
        &mut self,
        node: &str,
        key: &str,
        intrinsics: &IntrinsicData,
    ) -> Result<(), Self::Error>;

    fn set_extrinsics(
        &mut self,
        node: &str,
        key: &str,
        extrinsics: &ExtrinsicData,
    ) -> Result<(), Self::Error>;

    /// Timestamp (seconds) of the frame about to be processed.
    fn set_timestamp(&mut self, timestamp: f64) -> Result<(), Self::Error>;

    /// Run one synchronous tracking step on the injected data. Returns
    /// whether tracking is still active afterwards.
    fn step(&mut self) -> Result<bool, Self::Error>;

    fn similarity_transform(
        &mut self,
        node: &str,
        key: &str,
    ) -> Result<SimilarityTransform, Self::Error>;

    fn image(&mut self, node: &str, key: &str) -> Result<Image, Self::Error>;

    /// Like [`TrackingEngine::image`], but a missing image is not an error.
    fn try_image(&mut self, node: &str, key: &str) -> Result<Option<Image>, Self::Error> {
        Ok(self.image(node, key).ok())
    }

    fn intrinsics(&mut self, node: &str, key: &str) -> Result<IntrinsicData, Self::Error>;

    fn extrinsics(&mut self, node: &str, key: &str) -> Result<ExtrinsicData, Self::Error>;

    fn tracking_state(&mut self, node: &str) -> Result<TrackingState, Self::Error>;
}
