use std::sync::PoisonError;

use crate::services::playback::PlaybackSource;

use super::controller::PlayerController;
use super::tasks::{Fade, Scheduled};
use super::types::ControlsVisibility;

/// Controls overlay visibility choreography.
///
/// The overlay cycles `Hidden -> Showing -> Shown -> Hiding -> Hidden`.
/// A tap on the video surface toggles it; an inactivity countdown armed in
/// `Shown` fades it out slowly. Fades and the countdown are abort-on-drop
/// tasks holding weak references, so completions landing after teardown
/// are no-ops.
impl<S: PlaybackSource> PlayerController<S> {
    /// A tap on the video surface.
    ///
    /// Shown hides quickly, Hidden shows, a running fade-out reverses into
    /// a fade-in. A tap during fade-in is ignored to avoid animation races.
    pub fn toggle_controls(&self) {
        match self.state().visibility.get() {
            ControlsVisibility::Shown => {
                self.state().visibility.set(ControlsVisibility::Hiding);
                self.hide_controls(true);
            }
            ControlsVisibility::Hidden | ControlsVisibility::Hiding => {
                self.state().visibility.set(ControlsVisibility::Showing);
                self.show_controls();
            }
            ControlsVisibility::Showing => {}
        }
    }

    /// A press on any overlay control. Restarts the inactivity countdown.
    pub fn interaction(&self) {
        let weak = self.weak();
        let countdown = Scheduled::after(self.config().timings.hide_controls_timer(), move || {
            if let Some(player) = weak.upgrade() {
                player.on_hide_timer_expired();
            }
        });

        *self
            .hide_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(countdown);
    }

    pub(crate) fn cancel_hide_timer(&self) {
        *self
            .hide_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn on_hide_timer_expired(&self) {
        // No interaction for the whole countdown: fade away slowly.
        self.state().visibility.set(ControlsVisibility::Hiding);
        self.hide_controls(false);
    }

    fn show_controls(&self) {
        let weak = self.weak();
        let fade = Fade::run(
            self.state().opacity.clone(),
            1.0,
            self.config().timings.fade_in(),
            move || {
                if let Some(player) = weak.upgrade() {
                    player.state().visibility.set(ControlsVisibility::Shown);
                    player.interaction();
                }
            },
        );

        self.replace_fade(fade);
    }

    fn hide_controls(&self, quick: bool) {
        self.cancel_hide_timer();

        let duration = if quick {
            self.config().timings.quick_fade_out()
        } else {
            self.config().timings.fade_out()
        };

        let weak = self.weak();
        let fade = Fade::run(self.state().opacity.clone(), 0.0, duration, move || {
            if let Some(player) = weak.upgrade() {
                player.state().visibility.set(ControlsVisibility::Hidden);
            }
        });

        self.replace_fade(fade);
    }

    /// Installing a new fade aborts the previous one, which is how a
    /// reversal picks up from the current opacity.
    fn replace_fade(&self, fade: Fade) {
        *self.fade.lock().unwrap_or_else(PoisonError::into_inner) = Some(fade);
    }
}
