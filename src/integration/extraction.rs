//! Injection of input frames into the engine and extraction of results.
//!
//! Every function here expects the caller to hold the shared engine lock
//! for the whole inject -> step -> extract sequence.

use tracing::{trace, warn};

use crate::error::{Result, SyncTrackError};
use crate::frame::{Frame, FrameBuilder};
use crate::integration::engine::{TrackerKind, TrackingEngine, nodes};

/// What to pull out of the engine after each step.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Anchors whose world transform is read
    pub anchor_names: Vec<String>,
    /// Whether to read the debug image
    pub debug_images: bool,
}

/// Feed image, camera data and timestamp of `frame` into the engine.
///
/// A failing timestamp command is logged and does not abort injection.
pub fn inject_frame<E: TrackingEngine>(engine: &mut E, frame: &Frame) -> Result<()> {
    match frame.image()? {
        Some(image) => engine
            .set_image(nodes::INJECT, nodes::IMAGE_IN, image)
            .map_err(SyncTrackError::engine)?,
        None => trace!("input frame carries no image"),
    }
    if let Some(intrinsics) = frame.intrinsics() {
        engine
            .set_intrinsics(nodes::INJECT, nodes::INTRINSIC, intrinsics)
            .map_err(SyncTrackError::engine)?;
    }
    let extrinsics = frame.extrinsics().copied().unwrap_or_default();
    engine
        .set_extrinsics(nodes::INJECT, nodes::EXTRINSIC, &extrinsics)
        .map_err(SyncTrackError::engine)?;
    if let Err(err) = engine.set_timestamp(frame.timestamp()) {
        warn!(error = %err, timestamp = frame.timestamp(), "failed to set frame timestamp");
    }
    Ok(())
}

/// Read one result frame out of the engine.
///
/// Fields the engine does not recompute are copied from `input`.
pub fn extract_result<E: TrackingEngine>(
    engine: &mut E,
    input: &Frame,
    options: &ExtractOptions,
) -> Result<Frame> {
    let kind = engine.tracker_kind();
    let mut builder = FrameBuilder::new();

    for anchor in &options.anchor_names {
        let transform = engine
            .similarity_transform(nodes::ROOT, &nodes::world_from_anchor(anchor))
            .map_err(SyncTrackError::engine)?;
        builder = builder.anchor_transform(anchor.clone(), transform);
    }

    if options.debug_images {
        if let Some(debug) = engine
            .try_image(nodes::ROOT, nodes::DEBUG_IMAGE)
            .map_err(SyncTrackError::engine)?
        {
            builder = builder.debug_image(debug);
        }
    }

    let intrinsics = engine
        .intrinsics(nodes::INJECT, nodes::INTRINSIC_DISPLAY)
        .map_err(SyncTrackError::engine)?;
    builder = builder.intrinsics(intrinsics);

    match kind {
        TrackerKind::PosterTracker => {
            let anchor = engine
                .similarity_transform(
                    nodes::ROOT,
                    &nodes::world_from_anchor(nodes::TRACKED_OBJECT),
                )
                .map_err(SyncTrackError::engine)?;
            let extrinsics = engine
                .extrinsics(nodes::ROOT, nodes::EXTRINSIC)
                .map_err(SyncTrackError::engine)?;
            let camera = engine
                .extrinsics(nodes::ROOT, nodes::WORLD_FROM_CAMERA)
                .map_err(SyncTrackError::engine)?;
            builder = builder
                .anchor_transform(nodes::TRACKED_OBJECT, anchor)
                .extrinsics(extrinsics)
                .camera_transform(camera);
            // Poster trackers render no display image; reuse the input.
            if let Some(image) = input.image()? {
                builder = builder.image(image.clone());
            }
        }
        TrackerKind::CameraCalibration => {
            let extrinsics = engine
                .extrinsics(nodes::ROOT, nodes::EXTRINSIC)
                .map_err(SyncTrackError::engine)?;
            let image = engine
                .image(nodes::ROOT, nodes::IMAGE_DISPLAY)
                .map_err(SyncTrackError::engine)?;
            builder = builder.extrinsics(extrinsics).image(image);
        }
        TrackerKind::ModelTracker => {
            let image = engine
                .image(nodes::ROOT, nodes::IMAGE_DISPLAY)
                .map_err(SyncTrackError::engine)?;
            let camera = engine
                .extrinsics(nodes::ROOT, nodes::WORLD_FROM_CAMERA)
                .map_err(SyncTrackError::engine)?;
            builder = builder
                .image(image)
                .extrinsics(camera)
                .camera_transform(camera);
        }
    }

    let state = engine
        .tracking_state(nodes::ROOT)
        .map_err(SyncTrackError::engine)?;

    Ok(builder
        .tracking_state(state)
        .timestamp(input.timestamp())
        .build())
}

/// Inject `frame`, run one step and extract the result.
///
/// Returns `None` when the engine is not running or tracking stopped during
/// the step.
pub fn track_frame<E: TrackingEngine>(
    engine: &mut E,
    frame: &Frame,
    options: &ExtractOptions,
) -> Result<Option<Frame>> {
    if !engine.is_running() {
        return Ok(None);
    }
    inject_frame(engine, frame)?;
    let still_active = engine.step().map_err(SyncTrackError::engine)?;
    if !still_active {
        return Ok(None);
    }
    extract_result(engine, frame, options).map(Some)
}
