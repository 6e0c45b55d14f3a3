use crate::config::{PlayerTimings, Theme};
use crate::services::playback::PlaybackStatus;

use super::error::ErrorReport;
use super::types::Orientation;

/// Callback invoked with every raw status event from the engine.
pub type PlaybackCallback = Box<dyn Fn(&PlaybackStatus) + Send + Sync>;

/// Callback invoked with fatal and non-fatal failure reports.
pub type ErrorCallback = Box<dyn Fn(&ErrorReport) + Send + Sync>;

/// Callback invoked when the fullscreen toggle requests an orientation
/// change. Rotating the screen is the embedder's job.
pub type OrientationCallback = Box<dyn Fn() + Send + Sync>;

/// Configuration surface exposed to the embedding view.
///
/// Everything has a usable default: stock timings and theme, portrait
/// orientation, no callbacks. Failure reports fall back to the log when no
/// error callback is installed.
pub struct PlayerConfig {
    /// Animation and timer durations.
    pub timings: PlayerTimings,

    /// Icon overrides and text styling, passed through to the view layer.
    pub theme: Theme,

    /// Orientation the player mounts in.
    pub orientation: Orientation,

    /// Receives every raw status event. Panics inside this callback are
    /// caught and logged; they never disturb status processing.
    pub playback_callback: Option<PlaybackCallback>,

    /// Receives fatal and non-fatal failure reports.
    pub error_callback: Option<ErrorCallback>,

    /// Invoked when the fullscreen toggle is pressed in portrait.
    pub switch_to_landscape: Option<OrientationCallback>,

    /// Invoked when the fullscreen toggle is pressed in landscape.
    pub switch_to_portrait: Option<OrientationCallback>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            timings: PlayerTimings::default(),
            theme: Theme::default(),
            orientation: Orientation::Portrait,
            playback_callback: None,
            error_callback: None,
            switch_to_landscape: None,
            switch_to_portrait: None,
        }
    }
}

impl std::fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("timings", &self.timings)
            .field("theme", &self.theme)
            .field("orientation", &self.orientation)
            .field("playback_callback", &self.playback_callback.is_some())
            .field("error_callback", &self.error_callback.is_some())
            .finish_non_exhaustive()
    }
}
