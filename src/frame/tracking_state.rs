//! Tracking-state snapshots reported by the engine once per step.

use std::fmt;

/// Discrete tracking state of one anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorState {
    /// Object tracked successfully
    Tracked,
    /// Object tracked, but something disturbs tracking (motion blur, bad light)
    Critical,
    /// Object could not be tracked
    #[default]
    Lost,
}

impl AnchorState {
    /// Parse the engine's textual state. Unknown values map to `Lost`.
    pub fn parse(state: &str) -> Self {
        match state {
            "tracked" => Self::Tracked,
            "critical" => Self::Critical,
            _ => Self::Lost,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tracked => "tracked",
            Self::Critical => "critical",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for AnchorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized image-space bounding box of a model's visible parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Validation result of one model inside an anchor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelValidation {
    /// Unique within one anchor
    pub model_name: String,
    pub correspondences: u32,
    /// 0.0 (worst) to 1.0 (best)
    pub quality: f64,
    pub position: ModelBounds,
}

/// State of one named tracking anchor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnchorTrackingState {
    pub name: String,
    pub state: AnchorState,
    /// 0.0 (worst) to 1.0 (best); meaning depends on the tracking method
    pub quality: f32,
    /// Seconds since the Unix epoch when processing of the image started
    pub timestamp: f64,
    pub models: Vec<ModelValidation>,
}

impl AnchorTrackingState {
    pub fn new(name: impl Into<String>, state: AnchorState, quality: f32) -> Self {
        Self {
            name: name.into(),
            state,
            quality,
            timestamp: 0.0,
            models: Vec::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_model(mut self, model: ModelValidation) -> Self {
        self.models.push(model);
        self
    }
}

/// Immutable snapshot of every anchor's state for one tracking step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackingState {
    pub objects: Vec<AnchorTrackingState>,
}

impl TrackingState {
    pub fn new(objects: Vec<AnchorTrackingState>) -> Self {
        Self { objects }
    }

    /// Snapshot with a single anchor.
    pub fn single(name: impl Into<String>, state: AnchorState, quality: f32) -> Self {
        Self::new(vec![AnchorTrackingState::new(name, state, quality)])
    }

    /// Whether the engine reported no anchors at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn anchor(&self, name: &str) -> Option<&AnchorTrackingState> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// State of the first anchor, if any.
    pub fn primary_state(&self) -> Option<AnchorState> {
        self.objects.first().map(|o| o.state)
    }

    /// Multi-line, human-readable rendering for overlays and logs.
    pub fn to_display_string(&self) -> String {
        let mut entries = Vec::with_capacity(self.objects.len());
        for obj in &self.objects {
            let mut s = format!(
                "{}\n* State: {}\n* Quality: {}\n",
                obj.name, obj.state, obj.quality
            );
            if !obj.models.is_empty() {
                s.push_str("\nModels:");
                for model in &obj.models {
                    s.push_str(&format!(
                        "\n{}\n* Quality: {}\n* ModelPosition:\n    ({:.4}, {:.4})\n    ({:.4}, {:.4})\n* NumberOfCorrespondences: {}\n",
                        model.model_name,
                        model.quality,
                        model.position.min_x,
                        model.position.min_y,
                        model.position.max_x,
                        model.position.max_y,
                        model.correspondences
                    ));
                }
            }
            entries.push(s);
        }
        entries.join("\n")
    }
}
