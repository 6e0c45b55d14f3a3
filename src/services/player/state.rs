use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::services::common::Property;
use crate::services::connectivity::ConnectivityState;

use super::types::{ControlsVisibility, Orientation, PlaybackPhase, SeekPhase};

/// Reactive state of one mounted player.
///
/// Each property can be watched independently for efficient UI updates.
/// Properties are mutated only by the owning [`PlayerController`]; the view
/// layer reads and watches.
///
/// [`PlayerController`]: super::PlayerController
#[derive(Debug)]
pub struct PlayerState {
    /// Coarse playback phase.
    pub phase: Property<PlaybackPhase>,

    /// Whether a seek gesture is in flight.
    pub seek_phase: Property<SeekPhase>,

    /// Last known playback position. `None` until the first loaded status.
    pub position: Property<Option<Duration>>,

    /// Last known media duration. `None` until the first loaded status.
    pub duration: Property<Option<Duration>>,

    /// Play intent last reported by the engine.
    pub should_play: Property<bool>,

    /// User-facing error message. `Some` exactly while the phase is `Error`.
    pub last_error: Property<Option<String>>,

    /// Most recent connectivity report.
    pub connectivity: Property<ConnectivityState>,

    /// Visibility state of the controls overlay.
    pub visibility: Property<ControlsVisibility>,

    /// Overlay opacity in `[0, 1]`, animated by the fade tasks.
    pub opacity: Property<f64>,

    /// Current screen orientation as reported by the embedder.
    pub orientation: Property<Orientation>,

    /// Monotonic clock reading at the last phase transition. Read by the
    /// spinner rule to suppress flicker on short buffering blips.
    phase_changed_at: Mutex<Instant>,
}

impl PlayerState {
    pub(crate) fn new(orientation: Orientation) -> Self {
        Self {
            phase: Property::new(PlaybackPhase::Loading),
            seek_phase: Property::new(SeekPhase::NotSeeking),
            position: Property::new(None),
            duration: Property::new(None),
            should_play: Property::new(false),
            last_error: Property::new(None),
            connectivity: Property::new(ConnectivityState::Unknown),
            visibility: Property::new(ControlsVisibility::Hidden),
            opacity: Property::new(0.0),
            orientation: Property::new(orientation),
            phase_changed_at: Mutex::new(Instant::now()),
        }
    }

    /// When the phase last changed, on the tokio clock.
    pub fn phase_changed_at(&self) -> Instant {
        *self
            .phase_changed_at
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn mark_phase_change(&self) {
        *self
            .phase_changed_at
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Instant::now();
    }
}
