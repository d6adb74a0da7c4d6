//! Events emitted to the host once per tick.

use crate::error::Result;
use crate::exchange::SlotDrain;
use crate::frame::{
    CalibratedImage, ExtrinsicData, Frame, Image, IntrinsicData, Scoped, SimilarityTransform,
    TrackingState,
};

/// One piece of tracking output delivered to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    TrackingState(TrackingState),
    Image(Image),
    Extrinsics(ExtrinsicData),
    Intrinsics(IntrinsicData),
    CameraTransform(ExtrinsicData),
    DebugImage(Image),
    CalibratedDepthImage(CalibratedImage),
    AnchorTransform {
        anchor: String,
        transform: SimilarityTransform,
    },
}

/// Receiver of tick events. Implemented for every `FnMut(TrackingEvent)`.
pub trait EventSink {
    fn emit(&mut self, event: TrackingEvent);
}

impl<F: FnMut(TrackingEvent)> EventSink for F {
    fn emit(&mut self, event: TrackingEvent) {
        self(event)
    }
}

/// Emit everything held by a slot drain and release its frame.
///
/// Dropped states come first, in capture order, one event per snapshot.
pub fn emit_drain<S: EventSink + ?Sized>(drain: SlotDrain, sink: &mut S) -> Result<()> {
    let SlotDrain { current, dropped } = drain;
    for state in dropped {
        sink.emit(TrackingEvent::TrackingState(state));
    }
    match current {
        Some(frame) => emit_frame(&mut Scoped::new(frame), sink),
        None => Ok(()),
    }
}

/// Emit the per-frame events of `frame`, consuming its contents.
pub fn emit_frame<S: EventSink + ?Sized>(frame: &mut Frame, sink: &mut S) -> Result<()> {
    let parts = frame.take_parts()?;

    if let Some(image) = parts.image {
        sink.emit(TrackingEvent::Image(image));
    }
    if let Some(extrinsics) = parts.extrinsics {
        sink.emit(TrackingEvent::Extrinsics(extrinsics));
    }
    if let Some(intrinsics) = parts.intrinsics {
        sink.emit(TrackingEvent::Intrinsics(intrinsics));
    }
    if let Some(camera) = parts.camera_transform {
        sink.emit(TrackingEvent::CameraTransform(camera));
    }
    if let Some(debug) = parts.debug_image {
        sink.emit(TrackingEvent::DebugImage(debug));
    }
    if let Some(depth) = parts.calibrated_depth_image {
        sink.emit(TrackingEvent::CalibratedDepthImage(depth));
    }
    sink.emit(TrackingEvent::TrackingState(parts.tracking_state));
    for (anchor, transform) in parts.anchor_transforms {
        sink.emit(TrackingEvent::AnchorTransform { anchor, transform });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{AnchorState, Disposable, FrameBuilder, ImageFormat};

    fn collect(drain: SlotDrain) -> Vec<TrackingEvent> {
        let mut events = Vec::new();
        emit_drain(drain, &mut |event: TrackingEvent| events.push(event)).unwrap();
        events
    }

    #[test]
    fn test_empty_drain_emits_nothing() {
        assert!(collect(SlotDrain::default()).is_empty());
    }

    #[test]
    fn test_event_order() {
        let frame = FrameBuilder::new()
            .image(Image::new(2, 2, ImageFormat::Rgb))
            .intrinsics(IntrinsicData::new(2, 2, 1.0, 1.0, 1.0, 1.0))
            .extrinsics(ExtrinsicData::default())
            .camera_transform(ExtrinsicData::default())
            .anchor_transform("b", SimilarityTransform::default())
            .anchor_transform("a", SimilarityTransform::default())
            .tracking_state(TrackingState::single("a", AnchorState::Tracked, 1.0))
            .build();
        let drain = SlotDrain {
            current: Some(frame),
            dropped: vec![TrackingState::single("a", AnchorState::Lost, 0.0)],
        };

        let events = collect(drain);
        let kinds: Vec<&str> = events
            .iter()
            .map(|event| match event {
                TrackingEvent::TrackingState(_) => "state",
                TrackingEvent::Image(_) => "image",
                TrackingEvent::Extrinsics(_) => "extrinsics",
                TrackingEvent::Intrinsics(_) => "intrinsics",
                TrackingEvent::CameraTransform(_) => "camera",
                TrackingEvent::DebugImage(_) => "debug",
                TrackingEvent::CalibratedDepthImage(_) => "depth",
                TrackingEvent::AnchorTransform { anchor, .. } => anchor.as_str(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "state",
                "image",
                "extrinsics",
                "intrinsics",
                "camera",
                "state",
                "a",
                "b",
            ]
        );
        assert_eq!(
            events[0],
            TrackingEvent::TrackingState(TrackingState::single("a", AnchorState::Lost, 0.0))
        );
    }

    #[test]
    fn test_empty_states_are_emitted() {
        let slot = crate::exchange::LatestResultSlot::new();
        slot.push(&Frame::new(1.0)).unwrap();
        slot.push(&Frame::new(2.0)).unwrap();

        let events = collect(slot.pop().unwrap());
        assert_eq!(
            events,
            vec![
                TrackingEvent::TrackingState(TrackingState::default()),
                TrackingEvent::TrackingState(TrackingState::default()),
            ]
        );
    }

    #[test]
    fn test_emit_frame_consumes_frame() {
        let mut frame = FrameBuilder::new()
            .image(Image::new(1, 1, ImageFormat::Grey))
            .build();
        let mut count = 0;
        emit_frame(&mut frame, &mut |_: TrackingEvent| count += 1).unwrap();
        // Image and tracking state.
        assert_eq!(count, 2);
        assert!(frame.is_disposed());
        assert!(emit_frame(&mut frame, &mut |_: TrackingEvent| count += 1).is_err());
    }
}
