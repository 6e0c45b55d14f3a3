use async_trait::async_trait;

use super::{MediaSpec, PlaybackError, PlaybackStatus, StatusUpdate};

/// The playback capability consumed by the control surface.
///
/// Implementations wrap the host's media engine. Commands are issued as
/// non-blocking requests whose resolution arrives as the returned future;
/// commands are not cancelable once issued. Status events flowing back at
/// the engine's own cadence are delivered separately through
/// [`PlayerController::handle_status`].
///
/// [`PlayerController::handle_status`]: crate::services::player::PlayerController::handle_status
#[async_trait]
pub trait PlaybackSource: Send + Sync + 'static {
    /// Load media into the engine.
    ///
    /// # Errors
    /// Returns `PlaybackError::LoadFailed` if the media cannot be opened.
    async fn load(&self, media: MediaSpec) -> Result<PlaybackStatus, PlaybackError>;

    /// Apply a partial status command (play intent, position, rate).
    ///
    /// # Errors
    /// Returns `PlaybackError::CommandFailed` if the engine rejects the
    /// command.
    async fn apply(&self, update: StatusUpdate) -> Result<PlaybackStatus, PlaybackError>;
}
