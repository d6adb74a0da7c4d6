mod builder;
mod camera;
mod disposable;
mod image;
mod tracking_frame;
mod tracking_state;

pub use builder::FrameBuilder;
pub use camera::{ExtrinsicData, IntrinsicData, SimilarityTransform};
pub use disposable::{Disposable, Scoped};
pub use image::{CalibratedImage, Image, ImageFormat};
pub use tracking_frame::{Frame, FrameParts};
pub use tracking_state::{
    AnchorState, AnchorTrackingState, ModelBounds, ModelValidation, TrackingState,
};
