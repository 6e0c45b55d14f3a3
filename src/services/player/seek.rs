use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{debug, warn};

use crate::services::playback::{PlaybackSource, StatusUpdate};

use super::controller::{PlayerController, playing_buffering_or_paused};
use super::types::{PlaybackPhase, SeekPhase};

/// Seek coordination.
///
/// Mediates drag/tap gestures on the position slider against the engine's
/// asynchronous seek. While a seek is in flight, status-derived phase
/// transitions are suppressed and the handlers here own the phase.
///
/// Seek commands are sequential per player by construction: the view layer
/// disables the slider whenever [`seek_enabled`] is false, so a new gesture
/// cannot start while a `complete_seek` command is unresolved. There is no
/// internal queue backing that discipline up.
///
/// [`seek_enabled`]: PlayerController::seek_enabled
impl<S: PlaybackSource> PlayerController<S> {
    /// The user grabbed the seek handle.
    ///
    /// Captures the play intent to restore when the seek settles, pauses
    /// the engine, and stops the overlay hide countdown. No-op if a drag
    /// is already in progress.
    pub fn begin_seek(&self) {
        if self.state().seek_phase.get() == SeekPhase::Seeking {
            return;
        }

        // A previous seek may have reached Seeked without settling yet; its
        // engine-side intent is still "paused", so re-use the capture from
        // before that seek instead of reading the transient value.
        let pending = if self.state().seek_phase.get() == SeekPhase::Seeked {
            self.pending_should_play.load(Ordering::SeqCst)
        } else {
            self.state().should_play.get()
        };
        self.pending_should_play.store(pending, Ordering::SeqCst);

        self.set_seek_phase(SeekPhase::Seeking);

        let source = Arc::clone(self.source());
        let weak = self.weak();
        tokio::spawn(async move {
            if let Err(e) = source.apply(StatusUpdate::play_intent(false)).await
                && let Some(player) = weak.upgrade()
            {
                player.report_non_fatal("Pause before seek failed", Some(e.to_string()));
            }
        });
    }

    /// The drag ended at the given fraction of the media duration.
    ///
    /// Optimistically shows a spinner (intent to play) or the play button
    /// (intent to pause) before the command resolves, then reconciles the
    /// phase from the status the engine returns. A failed command leaves
    /// the optimistic state in place.
    pub async fn complete_seek(&self, fraction: f64) {
        self.set_seek_phase(SeekPhase::Seeked);

        let should_play = self.pending_should_play.load(Ordering::SeqCst);
        self.set_phase(if should_play {
            PlaybackPhase::Buffering
        } else {
            PlaybackPhase::Paused
        });

        // A drag fraction has no scale until the duration is known; the
        // seek lands at the start in that case. The command must still be
        // issued so the seek phase settles back to NotSeeking.
        let target = match self.state().duration.get() {
            Some(duration) => duration.mul_f64(fraction.clamp(0.0, 1.0)),
            None => Duration::ZERO,
        };
        match self
            .source()
            .apply(StatusUpdate::seek(target, should_play))
            .await
        {
            Ok(status) => {
                self.set_seek_phase(SeekPhase::NotSeeking);
                self.set_phase(playing_buffering_or_paused(&status));
            }
            Err(e) => {
                warn!("[seek] command failed, keeping optimistic state: {e}");
            }
        }
    }

    /// A direct tap on the seek bar at the given fraction.
    ///
    /// Only honored while the overlay is fully shown and the player is in
    /// a seekable phase; equivalent to a zero-length drag.
    pub async fn tap_to_seek(&self, fraction: f64) {
        if !self.seek_enabled() {
            return;
        }

        self.begin_seek();
        self.complete_seek(fraction).await;
    }

    fn set_seek_phase(&self, next: SeekPhase) {
        debug!(
            "[seek] {:?} -> {next:?} [playback] {:?} [should_play] {}",
            self.state().seek_phase.get(),
            self.state().phase.get(),
            self.state().should_play.get()
        );

        self.state().seek_phase.set(next);

        // The hide countdown must not run out from under an active drag.
        if next == SeekPhase::Seeking {
            self.cancel_hide_timer();
        } else {
            self.interaction();
        }
    }
}
