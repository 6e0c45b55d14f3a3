use std::time::Duration;

use crate::services::playback::PlaybackSource;

use super::controller::PlayerController;
use super::types::{ControlsVisibility, PlaybackPhase};

/// Derived values the view layer renders from, computed on demand from the
/// reactive state.
impl<S: PlaybackSource> PlayerController<S> {
    /// Whether the loading indicator should render.
    ///
    /// True for the whole `Loading` phase. For `Buffering` the spinner is
    /// held back until the phase has lasted the configured delay, so brief
    /// buffering blips never flicker a spinner.
    pub fn spinner_visible(&self) -> bool {
        match self.state().phase.get() {
            PlaybackPhase::Loading => true,
            PlaybackPhase::Buffering => {
                self.state().phase_changed_at().elapsed()
                    >= self.config().timings.buffering_spinner_delay()
            }
            _ => false,
        }
    }

    /// Seek handle position as a fraction of the media duration.
    ///
    /// Falls back to the start of the track until both position and
    /// duration are known.
    pub fn seek_slider_position(&self) -> f64 {
        match (self.state().position.get(), self.state().duration.get()) {
            (Some(position), Some(duration)) if !duration.is_zero() => {
                (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Whether the seek bar accepts gestures.
    ///
    /// Disabled while loading, ended, or errored, and unless the overlay
    /// is fully shown. This disablement is what keeps seek commands
    /// sequential per player.
    pub fn seek_enabled(&self) -> bool {
        !matches!(
            self.state().phase.get(),
            PlaybackPhase::Loading | PlaybackPhase::Ended | PlaybackPhase::Error
        ) && self.state().visibility.get() == ControlsVisibility::Shown
    }

    /// Clock text for the current playback position.
    pub fn position_text(&self) -> String {
        format_clock(self.state().position.get())
    }

    /// Clock text for the media duration.
    pub fn duration_text(&self) -> String {
        format_clock(self.state().duration.get())
    }
}

/// Render a duration as zero-padded `MM:SS`. Unknown durations render as
/// the zero clock.
pub fn format_clock(duration: Option<Duration>) -> String {
    let total_seconds = duration.unwrap_or(Duration::ZERO).as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn clock_zero_when_unknown() {
        assert_eq!(format_clock(None), "00:00");
    }

    #[test]
    fn clock_pads_single_digits() {
        assert_eq!(format_clock(Some(Duration::from_secs(65))), "01:05");
    }

    #[test]
    fn clock_truncates_subsecond() {
        assert_eq!(format_clock(Some(Duration::from_millis(59_900))), "00:59");
    }

    #[test]
    fn clock_minutes_past_an_hour_keep_counting() {
        assert_eq!(format_clock(Some(Duration::from_secs(61 * 60 + 5))), "61:05");
    }
}
