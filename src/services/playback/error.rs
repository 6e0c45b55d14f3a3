/// Errors that can occur during playback engine operations
#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    /// Media could not be loaded or decoded
    #[error("failed to load media: {0}")]
    LoadFailed(String),

    /// A status or seek command was rejected by the engine
    #[error("playback command failed: {0}")]
    CommandFailed(String),

    /// The engine is gone (torn down or crashed)
    #[error("playback engine detached")]
    Detached,
}
