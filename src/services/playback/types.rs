use std::time::Duration;

/// A point-in-time report of the playback engine's state.
///
/// Delivered by the engine at its own cadence and returned from commands.
/// When `is_loaded` is false only `error` carries meaning; all other fields
/// should be ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackStatus {
    /// Whether media is loaded and the remaining fields are meaningful.
    pub is_loaded: bool,

    /// Whether the engine is actively rendering frames.
    pub is_playing: bool,

    /// Whether the engine is waiting on data.
    pub is_buffering: bool,

    /// The play intent currently held by the engine.
    pub should_play: bool,

    /// Whether playback just reached the natural end of the media.
    pub did_just_finish: bool,

    /// Whether looping is enabled on the engine.
    pub is_looping: bool,

    /// Current playback position, if known.
    pub position: Option<Duration>,

    /// Total media duration, if known.
    pub duration: Option<Duration>,

    /// Load or decode error, if the engine failed.
    pub error: Option<String>,
}

/// A partial status command sent to the playback engine.
///
/// Unset fields leave the engine's current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusUpdate {
    /// New play intent.
    pub should_play: Option<bool>,

    /// New playback position.
    pub position: Option<Duration>,

    /// New playback rate (1.0 is normal speed).
    pub rate: Option<f64>,
}

impl StatusUpdate {
    /// Command that only changes the play intent.
    pub fn play_intent(should_play: bool) -> Self {
        Self {
            should_play: Some(should_play),
            ..Self::default()
        }
    }

    /// Command that moves the position and sets the play intent together.
    pub fn seek(position: Duration, should_play: bool) -> Self {
        Self {
            should_play: Some(should_play),
            position: Some(position),
            rate: None,
        }
    }
}

/// Declarative configuration for loading media into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSpec {
    /// Locator for the media (URL, file path, asset identifier).
    pub uri: String,

    /// Whether playback should start as soon as the media is ready.
    pub autoplay: bool,

    /// Whether audio starts muted.
    pub muted: bool,

    /// Whether playback loops at the end of the media.
    pub looping: bool,

    /// Initial playback rate.
    pub rate: f64,
}

impl MediaSpec {
    /// Media spec with stock settings: no autoplay, unmuted, no loop.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            autoplay: false,
            muted: false,
            looping: false,
            rate: 1.0,
        }
    }
}
