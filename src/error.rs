//! Error types for the synchronous tracking core.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SyncTrackError>;

/// Boxed engine error that can cross the worker thread boundary.
pub type BoxedEngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to the host application.
///
/// Back-pressure and frame drops are never errors. Everything here is either
/// lifecycle misuse or an engine failure on the producer side.
#[derive(Error, Debug)]
pub enum SyncTrackError {
    /// The named resource was used after `dispose()`.
    #[error("{0} has been disposed")]
    Disposed(&'static str),

    /// `start` was called while a session is still running.
    #[error("tracking session already started")]
    AlreadyStarted,

    /// Engine failure reported to the producer thread.
    #[error("engine error: {0}")]
    Engine(#[source] BoxedEngineError),

    /// The worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

impl SyncTrackError {
    pub fn engine<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine(Box::new(err))
    }

    /// Whether this error signals use of a disposed resource.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed(_))
    }
}
