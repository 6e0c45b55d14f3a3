/// Coarse playback state derived from engine status events.
///
/// Exactly one phase is active at a time. Transitions are driven by status
/// events except while a seek is in flight, when the seek coordinator owns
/// the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Media is still loading; no status with `is_loaded` has arrived.
    Loading,

    /// The engine is rendering frames.
    Playing,

    /// Playback is paused.
    Paused,

    /// The engine is waiting on data.
    Buffering,

    /// Playback failed, or buffering happened while offline.
    Error,

    /// Playback reached the natural end of a non-looping media.
    /// Cleared only by an explicit replay.
    Ended,
}

/// Whether a user-initiated seek gesture is in flight.
///
/// While not `NotSeeking`, status events may update position and duration
/// but never the playback phase: the seek handlers own the phase until the
/// seek command settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekPhase {
    /// No seek gesture in progress.
    NotSeeking,

    /// The user is dragging the seek handle.
    Seeking,

    /// The drag ended; the seek command has been issued but not settled.
    Seeked,
}

impl SeekPhase {
    /// Whether status events are allowed to drive phase transitions.
    pub fn is_not_seeking(self) -> bool {
        self == Self::NotSeeking
    }
}

/// Visibility state of the controls overlay.
///
/// Cycles `Hidden -> Showing -> Shown -> Hiding -> Hidden`, with a direct
/// `Shown -> Hiding` on user tap. `Showing` and `Hiding` are animated
/// transients; the fade completion callback finalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsVisibility {
    /// Overlay fully visible, inactivity countdown armed.
    Shown,

    /// Fade-in animation running.
    Showing,

    /// Overlay fully invisible and non-interactive.
    Hidden,

    /// Fade-out animation running.
    Hiding,
}

/// Screen orientation as reported by the embedding view.
///
/// Used to pick the fullscreen toggle direction; rotating the screen is the
/// embedder's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Portrait layout; fullscreen toggle switches to landscape.
    Portrait,

    /// Landscape layout; fullscreen toggle switches to portrait.
    Landscape,
}
