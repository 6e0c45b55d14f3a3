/// Connectivity signal consumed to disambiguate offline buffering
pub mod connectivity;
/// Playback source abstraction over the host media engine
pub mod playback;
/// Player controller: phase tracking, seek coordination, overlay visibility
pub mod player;

/// Common utilities shared between services
pub mod common;

pub use connectivity::ConnectivityState;
pub use playback::{MediaSpec, PlaybackError, PlaybackSource, PlaybackStatus, StatusUpdate};
pub use player::{
    ControlsVisibility, ErrorReport, Orientation, PlaybackPhase, PlayerConfig, PlayerController,
    SeekPhase, Severity,
};
