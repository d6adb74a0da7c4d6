//! Configuration of a synchronous tracking session.

use std::time::Duration;

use crate::exchange::BoundedFrameQueue;
use crate::frame::Frame;
use crate::integration::ExtractOptions;

/// Settings for [`SyncTrackingManager`](crate::manager::SyncTrackingManager).
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Maximum number of queued input frames; clamped to at least 1
    pub input_capacity: usize,
    /// Pause after an idle worker iteration; zero yields instead
    pub idle_backoff: Duration,
    /// Fetch the engine debug image with every result
    pub debug_images: bool,
    /// Anchors whose world transform is extracted per result
    pub anchor_names: Vec<String>,
    /// Name of the worker thread
    pub thread_name: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            input_capacity: BoundedFrameQueue::<Frame>::DEFAULT_CAPACITY,
            idle_backoff: Duration::from_millis(1),
            debug_images: false,
            anchor_names: Vec::new(),
            thread_name: "synctrack-worker".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.input_capacity = capacity.max(1);
        self
    }

    pub fn with_idle_backoff(mut self, backoff: Duration) -> Self {
        self.idle_backoff = backoff;
        self
    }

    pub fn with_debug_images(mut self, enabled: bool) -> Self {
        self.debug_images = enabled;
        self
    }

    /// Add an anchor to extract. Duplicates are ignored.
    pub fn with_anchor(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.anchor_names.contains(&name) {
            self.anchor_names.push(name);
        }
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub(crate) fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            anchor_names: self.anchor_names.clone(),
            debug_images: self.debug_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.input_capacity, 2);
        assert_eq!(config.idle_backoff, Duration::from_millis(1));
        assert!(!config.debug_images);
        assert!(config.anchor_names.is_empty());
    }

    #[test]
    fn test_setters() {
        let config = ManagerConfig::default()
            .with_input_capacity(0)
            .with_anchor("Engine")
            .with_anchor("Engine")
            .with_debug_images(true);
        assert_eq!(config.input_capacity, 1);
        assert_eq!(config.anchor_names, vec!["Engine".to_string()]);

        let options = config.extract_options();
        assert!(options.debug_images);
        assert_eq!(options.anchor_names.len(), 1);
    }
}
