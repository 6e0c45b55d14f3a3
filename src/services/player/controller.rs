use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::services::connectivity::ConnectivityState;
use crate::services::playback::{MediaSpec, PlaybackSource, PlaybackStatus, StatusUpdate};

use super::config::PlayerConfig;
use super::error::{ErrorReport, Severity};
use super::state::PlayerState;
use super::tasks::{Fade, Scheduled};
use super::types::{Orientation, PlaybackPhase};

/// User-facing message when buffering stalls with no network.
///
/// Network absence is inferred from the connectivity signal, not reported
/// by the engine itself.
pub(crate) const OFFLINE_MESSAGE: &str =
    "You are probably offline. Please make sure you are connected to the Internet to watch this video";

/// The control surface state machine for one mounted player.
///
/// Owns the [`PlayerState`] exclusively and drives the playback source
/// while mounted. All mutation happens on delivery of one of three event
/// kinds: engine status events ([`handle_status`]), user gestures (the
/// public entry points), and timer/animation completions. Nothing blocks;
/// engine commands resolve as their own later events.
///
/// Dropping the controller cancels the inactivity timer and any in-flight
/// fade. Engine commands already issued are not cancelable; their eventual
/// completions hold only a [`Weak`] reference and no-op after teardown.
///
/// [`handle_status`]: PlayerController::handle_status
pub struct PlayerController<S: PlaybackSource> {
    source: Arc<S>,
    config: PlayerConfig,
    state: PlayerState,
    weak: Weak<Self>,

    pub(crate) hide_timer: Mutex<Option<Scheduled>>,
    pub(crate) fade: Mutex<Option<Fade>>,

    /// Play intent captured when a seek gesture starts, restored when the
    /// seek settles.
    pub(crate) pending_should_play: AtomicBool,
}

impl<S: PlaybackSource> PlayerController<S> {
    /// Mount a new player over the given playback source.
    ///
    /// The player starts in `Loading` phase with the overlay hidden.
    pub fn new(source: Arc<S>, config: PlayerConfig) -> Arc<Self> {
        let orientation = config.orientation;
        Arc::new_cyclic(|weak| Self {
            source,
            config,
            state: PlayerState::new(orientation),
            weak: weak.clone(),
            hide_timer: Mutex::new(None),
            fade: Mutex::new(None),
            pending_should_play: AtomicBool::new(false),
        })
    }

    /// Reactive state for the view layer to read and watch.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The configuration this player was mounted with.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub(crate) fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub(crate) fn weak(&self) -> Weak<Self> {
        self.weak.clone()
    }

    /// Load media into the playback source.
    ///
    /// A load failure is fatal: the phase moves to `Error`. A successful
    /// load feeds the returned status through normal status handling.
    pub async fn load(&self, media: MediaSpec) {
        match self.source.load(media).await {
            Ok(status) => self.handle_status(&status),
            Err(e) => self.fail(format!("Failed to load media: {e}"), Some(e.to_string())),
        }
    }

    /// Ingest one status event from the playback source.
    ///
    /// Invoked at the engine's cadence, in delivery order. Position,
    /// duration, and play intent are refreshed on every loaded status; the
    /// phase is re-derived only when no seek is in flight and playback has
    /// not ended.
    pub fn handle_status(&self, status: &PlaybackStatus) {
        self.forward_status(status);

        if !status.is_loaded {
            // An in-flight seek owns the phase, engine errors included.
            if let Some(engine_error) = &status.error
                && self.state.seek_phase.get().is_not_seeking()
            {
                self.fail(
                    format!("Encountered a fatal error during playback: {engine_error}"),
                    Some(engine_error.clone()),
                );
            }
            return;
        }

        self.state.position.set(status.position);
        self.state.duration.set(status.duration);
        self.state.should_play.set(status.should_play);

        // While a seek is in flight the seek handlers own the phase, and
        // Ended is only left through an explicit replay.
        if !self.state.seek_phase.get().is_not_seeking()
            || self.state.phase.get() == PlaybackPhase::Ended
        {
            return;
        }

        if status.did_just_finish && !status.is_looping {
            self.set_phase(PlaybackPhase::Ended);
        } else if self.state.connectivity.get().is_offline() && status.is_buffering {
            self.fail(OFFLINE_MESSAGE, None);
        } else {
            self.set_phase(playing_buffering_or_paused(status));
        }
    }

    /// Forward the raw status to the embedder, insulated from its panics.
    fn forward_status(&self, status: &PlaybackStatus) {
        if let Some(callback) = &self.config.playback_callback
            && catch_unwind(AssertUnwindSafe(|| callback(status))).is_err()
        {
            error!("uncaught panic in playback callback");
        }
    }

    /// Record the most recent connectivity report.
    pub fn set_connectivity(&self, reach: ConnectivityState) {
        debug!("[network_state] {reach:?}");
        self.state.connectivity.set(reach);
    }

    /// Update the orientation reported by the embedding view.
    pub fn set_orientation(&self, orientation: Orientation) {
        self.state.orientation.set(orientation);
    }

    /// Flip the play intent on the engine. Fire-and-forget; failures are
    /// reported non-fatally.
    pub fn toggle_play(&self) {
        self.interaction();

        let intent = self.state.phase.get() != PlaybackPhase::Playing;
        let source = Arc::clone(&self.source);
        let weak = self.weak();
        tokio::spawn(async move {
            if let Err(e) = source.apply(StatusUpdate::play_intent(intent)).await
                && let Some(player) = weak.upgrade()
            {
                player.report_non_fatal("Play/pause toggle failed", Some(e.to_string()));
            }
        });
    }

    /// Restart playback from the beginning. The only way out of `Ended`.
    pub fn replay(&self) {
        self.interaction();

        let source = Arc::clone(&self.source);
        let weak = self.weak();
        tokio::spawn(async move {
            match source.apply(StatusUpdate::seek(Duration::ZERO, true)).await {
                Ok(_) => {
                    if let Some(player) = weak.upgrade() {
                        player.set_phase(PlaybackPhase::Playing);
                    }
                }
                Err(e) => {
                    if let Some(player) = weak.upgrade() {
                        player.report_non_fatal("Replay failed", Some(e.to_string()));
                    }
                }
            }
        });
    }

    /// One-shot externally-requested seek that starts playback from the
    /// given position. Fire-and-forget; failures are non-fatal.
    pub fn play_from_position(&self, position: Duration) {
        let source = Arc::clone(&self.source);
        let weak = self.weak();
        tokio::spawn(async move {
            if let Err(e) = source.apply(StatusUpdate::seek(position, true)).await
                && let Some(player) = weak.upgrade()
            {
                player.report_non_fatal("Play from position failed", Some(e.to_string()));
            }
        });
    }

    /// Ask the embedder to rotate into or out of fullscreen.
    ///
    /// In portrait the `switch_to_landscape` callback fires, otherwise
    /// `switch_to_portrait`. Orientation control itself is external; the
    /// embedder reports the result through [`set_orientation`].
    ///
    /// [`set_orientation`]: PlayerController::set_orientation
    pub fn toggle_fullscreen(&self) {
        self.interaction();

        let callback = match self.state.orientation.get() {
            Orientation::Portrait => &self.config.switch_to_landscape,
            Orientation::Landscape => &self.config.switch_to_portrait,
        };
        if let Some(switch) = callback {
            switch();
        }
    }

    /// Move to a new phase, recording the transition timestamp.
    ///
    /// Returns whether a transition actually happened. Leaving `Error`
    /// clears the stored error message.
    pub(crate) fn set_phase(&self, next: PlaybackPhase) -> bool {
        let current = self.state.phase.get();
        if current == next {
            return false;
        }

        debug!(
            "[playback] {current:?} -> {next:?} [seek] {:?} [should_play] {}",
            self.state.seek_phase.get(),
            self.state.should_play.get()
        );

        if current == PlaybackPhase::Error {
            self.state.last_error.set(None);
        }
        self.state.phase.set(next);
        self.state.mark_phase_change();
        true
    }

    /// Enter the `Error` phase with a user-facing message.
    ///
    /// The fatal report fires once per transition into `Error`; repeated
    /// failures while already errored only refresh the message.
    pub(crate) fn fail(&self, message: impl Into<String>, cause: Option<String>) {
        let message = message.into();
        self.state.last_error.set(Some(message.clone()));
        if self.set_phase(PlaybackPhase::Error) {
            self.report(ErrorReport::fatal(message, cause));
        }
    }

    pub(crate) fn report_non_fatal(&self, message: &str, cause: Option<String>) {
        warn!("[playback] {message} ({cause:?})");
        self.report(ErrorReport::non_fatal(message, cause));
    }

    pub(crate) fn report(&self, report: ErrorReport) {
        match &self.config.error_callback {
            Some(callback) => callback(&report),
            None => match report.severity {
                Severity::Fatal => error!("{report}"),
                Severity::NonFatal => warn!("{report}"),
            },
        }
    }
}

/// The three-way phase derivation for an ordinary loaded status.
pub(crate) fn playing_buffering_or_paused(status: &PlaybackStatus) -> PlaybackPhase {
    if status.is_playing {
        PlaybackPhase::Playing
    } else if status.is_buffering {
        PlaybackPhase::Buffering
    } else {
        PlaybackPhase::Paused
    }
}
