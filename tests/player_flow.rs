//! End-to-end tests for the player controller state machine.
//!
//! Drives a controller against an in-process scripted playback source.
//! All timing behavior runs on the paused tokio clock, so every timer and
//! fade executes deterministically in virtual time.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use playbar::services::connectivity::ConnectivityState;
use playbar::services::playback::{
    MediaSpec, PlaybackError, PlaybackSource, PlaybackStatus, StatusUpdate,
};
use playbar::services::player::{
    ControlsVisibility, ErrorReport, PlaybackPhase, PlayerConfig, PlayerController, SeekPhase,
    Severity, StatusMonitor,
};

/// Scripted playback engine. Commands merge into an internal status that is
/// echoed back, the way a well-behaved engine confirms what it applied.
#[derive(Default)]
struct FakeSource {
    status: Mutex<PlaybackStatus>,
    commands: Mutex<Vec<StatusUpdate>>,
    fail_commands: AtomicBool,
}

impl FakeSource {
    fn with_duration(duration: Duration) -> Self {
        let source = Self::default();
        {
            let mut status = source.status.lock().unwrap();
            status.is_loaded = true;
            status.duration = Some(duration);
            status.position = Some(Duration::ZERO);
        }
        source
    }

    fn recorded_commands(&self) -> Vec<StatusUpdate> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackSource for FakeSource {
    async fn load(&self, _media: MediaSpec) -> Result<PlaybackStatus, PlaybackError> {
        Ok(self.status.lock().unwrap().clone())
    }

    async fn apply(&self, update: StatusUpdate) -> Result<PlaybackStatus, PlaybackError> {
        self.commands.lock().unwrap().push(update);

        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(PlaybackError::CommandFailed("scripted failure".into()));
        }

        let mut status = self.status.lock().unwrap();
        if let Some(should_play) = update.should_play {
            status.should_play = should_play;
            status.is_playing = should_play;
        }
        if let Some(position) = update.position {
            status.position = Some(position);
        }
        Ok(status.clone())
    }
}

fn playing_status(position_ms: u64, duration_ms: u64) -> PlaybackStatus {
    PlaybackStatus {
        is_loaded: true,
        is_playing: true,
        should_play: true,
        position: Some(Duration::from_millis(position_ms)),
        duration: Some(Duration::from_millis(duration_ms)),
        ..PlaybackStatus::default()
    }
}

fn mounted() -> (Arc<FakeSource>, Arc<PlayerController<FakeSource>>) {
    let source = Arc::new(FakeSource::with_duration(Duration::from_secs(10)));
    let player = PlayerController::new(Arc::clone(&source), PlayerConfig::default());
    (source, player)
}

/// Collects error reports delivered through the error callback.
#[derive(Default)]
struct ErrorSink {
    fatal: AtomicUsize,
    non_fatal: AtomicUsize,
    last_message: Mutex<Option<String>>,
}

impl ErrorSink {
    fn install(config: &mut PlayerConfig) -> Arc<Self> {
        let reports = Arc::new(Self::default());
        let sink = Arc::clone(&reports);
        config.error_callback = Some(Box::new(move |report: &ErrorReport| {
            match report.severity {
                Severity::Fatal => sink.fatal.fetch_add(1, Ordering::SeqCst),
                Severity::NonFatal => sink.non_fatal.fetch_add(1, Ordering::SeqCst),
            };
            *sink.last_message.lock().unwrap() = Some(report.message.clone());
        }));
        reports
    }
}

/// Drive the overlay from Hidden to Shown.
async fn show_overlay(player: &Arc<PlayerController<FakeSource>>) {
    player.toggle_controls();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);
}

#[tokio::test(start_paused = true)]
async fn status_sequence_loading_playing_ended() {
    let (_, player) = mounted();
    assert_eq!(player.state().phase.get(), PlaybackPhase::Loading);

    player.handle_status(&PlaybackStatus::default());
    assert_eq!(player.state().phase.get(), PlaybackPhase::Loading);

    player.handle_status(&playing_status(0, 10_000));
    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);

    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        did_just_finish: true,
        ..PlaybackStatus::default()
    });
    assert_eq!(player.state().phase.get(), PlaybackPhase::Ended);

    // Ended sticks until an explicit replay, whatever else the engine says.
    player.handle_status(&playing_status(0, 10_000));
    assert_eq!(player.state().phase.get(), PlaybackPhase::Ended);
}

#[tokio::test(start_paused = true)]
async fn looping_media_does_not_end() {
    let (_, player) = mounted();

    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        is_playing: true,
        did_just_finish: true,
        is_looping: true,
        ..PlaybackStatus::default()
    });

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
}

#[tokio::test(start_paused = true)]
async fn redelivered_status_is_idempotent() {
    let (_, player) = mounted();
    let status = playing_status(1_000, 10_000);

    player.handle_status(&status);
    let changed_at = player.state().phase_changed_at();

    tokio::time::sleep(Duration::from_millis(50)).await;
    player.handle_status(&status);

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
    assert_eq!(player.state().phase_changed_at(), changed_at);
}

#[tokio::test(start_paused = true)]
async fn unloaded_error_status_is_fatal() {
    let source = Arc::new(FakeSource::default());
    let mut config = PlayerConfig::default();
    let reports = ErrorSink::install(&mut config);
    let player = PlayerController::new(source, config);

    player.handle_status(&PlaybackStatus {
        error: Some("decoder died".into()),
        ..PlaybackStatus::default()
    });

    assert_eq!(player.state().phase.get(), PlaybackPhase::Error);
    assert!(
        player
            .state()
            .last_error
            .get()
            .unwrap()
            .contains("decoder died")
    );
    assert_eq!(reports.fatal.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn offline_buffering_becomes_error_once() {
    let source = Arc::new(FakeSource::default());
    let mut config = PlayerConfig::default();
    let reports = ErrorSink::install(&mut config);
    let player = PlayerController::new(source, config);

    player.set_connectivity(ConnectivityState::None);
    let buffering = PlaybackStatus {
        is_loaded: true,
        is_buffering: true,
        ..PlaybackStatus::default()
    };

    player.handle_status(&buffering);
    assert_eq!(player.state().phase.get(), PlaybackPhase::Error);
    let message = player.state().last_error.get().unwrap();
    assert!(message.contains("offline"), "unexpected message: {message}");

    // Still offline, still buffering: no second fatal report.
    player.handle_status(&buffering);
    assert_eq!(reports.fatal.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_connectivity_is_not_offline() {
    let (_, player) = mounted();

    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        is_buffering: true,
        ..PlaybackStatus::default()
    });

    assert_eq!(player.state().phase.get(), PlaybackPhase::Buffering);
}

#[tokio::test(start_paused = true)]
async fn recovery_status_clears_error() {
    let (_, player) = mounted();

    player.set_connectivity(ConnectivityState::None);
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        is_buffering: true,
        ..PlaybackStatus::default()
    });
    assert_eq!(player.state().phase.get(), PlaybackPhase::Error);

    player.set_connectivity(ConnectivityState::Reachable);
    player.handle_status(&playing_status(500, 10_000));

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
    assert!(player.state().last_error.get().is_none());
}

#[tokio::test(start_paused = true)]
async fn in_flight_seek_suppresses_phase_but_not_position() {
    let (_, player) = mounted();
    player.handle_status(&playing_status(1_000, 10_000));
    player.begin_seek();
    assert_eq!(player.state().seek_phase.get(), SeekPhase::Seeking);

    // Neither completion nor an engine error may move the phase mid-seek.
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        did_just_finish: true,
        position: Some(Duration::from_millis(9_999)),
        duration: Some(Duration::from_millis(10_000)),
        ..PlaybackStatus::default()
    });
    player.handle_status(&PlaybackStatus {
        error: Some("mid-seek hiccup".into()),
        ..PlaybackStatus::default()
    });

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
    assert_eq!(
        player.state().position.get(),
        Some(Duration::from_millis(9_999))
    );
    assert!(player.state().last_error.get().is_none());
}

#[tokio::test(start_paused = true)]
async fn seek_restores_captured_play_intent() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(1_000, 10_000));

    player.begin_seek();
    player.complete_seek(0.5).await;

    assert_eq!(player.state().seek_phase.get(), SeekPhase::NotSeeking);
    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);

    let commands = source.recorded_commands();
    let settle = commands.last().unwrap();
    assert_eq!(settle.position, Some(Duration::from_millis(5_000)));
    assert_eq!(settle.should_play, Some(true));
}

#[tokio::test(start_paused = true)]
async fn failed_seek_keeps_optimistic_state() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(1_000, 10_000));

    player.begin_seek();
    source.fail_commands.store(true, Ordering::SeqCst);
    player.complete_seek(0.3).await;

    // Intent was to play, so the optimistic phase is Buffering, and the
    // unsettled seek stays in Seeked.
    assert_eq!(player.state().phase.get(), PlaybackPhase::Buffering);
    assert_eq!(player.state().seek_phase.get(), SeekPhase::Seeked);
}

#[tokio::test(start_paused = true)]
async fn paused_seek_lands_on_paused() {
    let (_, player) = mounted();
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        duration: Some(Duration::from_secs(10)),
        position: Some(Duration::ZERO),
        ..PlaybackStatus::default()
    });

    player.begin_seek();
    player.complete_seek(0.2).await;

    assert_eq!(player.state().phase.get(), PlaybackPhase::Paused);
}

#[tokio::test(start_paused = true)]
async fn redrag_reuses_captured_intent() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(1_000, 10_000));

    player.begin_seek();
    source.fail_commands.store(true, Ordering::SeqCst);
    player.complete_seek(0.3).await;
    assert_eq!(player.state().seek_phase.get(), SeekPhase::Seeked);

    // The pause-before-seek already pushed should_play=false back through a
    // status event; a rapid re-drag must not lose the original play intent.
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        should_play: false,
        position: Some(Duration::from_millis(3_000)),
        duration: Some(Duration::from_millis(10_000)),
        ..PlaybackStatus::default()
    });

    player.begin_seek();
    source.fail_commands.store(false, Ordering::SeqCst);
    player.complete_seek(0.6).await;

    let settle = source.recorded_commands().last().cloned().unwrap();
    assert_eq!(settle.should_play, Some(true));
    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
}

#[tokio::test(start_paused = true)]
async fn begin_seek_twice_is_a_noop() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(1_000, 10_000));

    player.begin_seek();
    player.begin_seek();
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Only one pause command went out.
    assert_eq!(source.recorded_commands().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn seek_with_unknown_duration_lands_at_start() {
    let source = Arc::new(FakeSource::default());
    let player = PlayerController::new(Arc::clone(&source), PlayerConfig::default());

    // A live stream reports no duration but is otherwise seekable.
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        is_playing: true,
        should_play: true,
        position: Some(Duration::from_secs(3)),
        duration: None,
        ..PlaybackStatus::default()
    });
    show_overlay(&player).await;
    assert!(player.seek_enabled());

    player.begin_seek();
    player.complete_seek(0.5).await;

    // The drag fraction has no scale, so the seek targets the start, with
    // the captured play intent restored.
    let settle = source.recorded_commands().last().cloned().unwrap();
    assert_eq!(settle.position, Some(Duration::ZERO));
    assert_eq!(settle.should_play, Some(true));
    assert_eq!(player.state().seek_phase.get(), SeekPhase::NotSeeking);

    // Status events keep moving the phase afterwards.
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        position: Some(Duration::ZERO),
        ..PlaybackStatus::default()
    });
    assert_eq!(player.state().phase.get(), PlaybackPhase::Paused);
}

#[tokio::test(start_paused = true)]
async fn tap_to_seek_issues_command_for_half_position() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(0, 10_000));
    show_overlay(&player).await;

    player.tap_to_seek(0.5).await;

    let settle = source.recorded_commands().last().cloned().unwrap();
    assert_eq!(settle.position, Some(Duration::from_millis(5_000)));
}

#[tokio::test(start_paused = true)]
async fn tap_to_seek_ignored_while_overlay_hidden() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(0, 10_000));

    player.tap_to_seek(0.5).await;

    assert!(source.recorded_commands().is_empty());
    assert_eq!(player.state().seek_phase.get(), SeekPhase::NotSeeking);
}

#[tokio::test(start_paused = true)]
async fn tap_to_seek_ignored_after_end() {
    let (source, player) = mounted();
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        did_just_finish: true,
        ..PlaybackStatus::default()
    });
    show_overlay(&player).await;

    player.tap_to_seek(0.5).await;

    assert!(source.recorded_commands().is_empty());
}

#[tokio::test(start_paused = true)]
async fn spinner_held_back_for_short_buffering() {
    let (_, player) = mounted();

    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        is_buffering: true,
        ..PlaybackStatus::default()
    });
    assert_eq!(player.state().phase.get(), PlaybackPhase::Buffering);
    assert!(!player.spinner_visible());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!player.spinner_visible());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(player.spinner_visible());
}

#[tokio::test(start_paused = true)]
async fn spinner_always_visible_while_loading() {
    let (_, player) = mounted();
    assert!(player.spinner_visible());
}

#[tokio::test(start_paused = true)]
async fn overlay_shows_then_auto_hides() {
    let (_, player) = mounted();
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hidden);

    player.toggle_controls();
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Showing);

    // Fade-in completes within fade_in_ms.
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);
    assert!((player.state().opacity.get() - 1.0).abs() < f64::EPSILON);

    // No interaction: inactivity countdown (4000) plus slow fade (1000).
    tokio::time::sleep(Duration::from_millis(5_300)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hidden);
    assert!(player.state().opacity.get().abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn tap_while_shown_hides_quickly() {
    let (_, player) = mounted();
    show_overlay(&player).await;

    player.toggle_controls();
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hiding);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn tap_while_hiding_reverses_into_showing() {
    let (_, player) = mounted();
    show_overlay(&player).await;

    player.toggle_controls();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hiding);

    player.toggle_controls();
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Showing);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);
    assert!((player.state().opacity.get() - 1.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn tap_while_showing_is_ignored() {
    let (_, player) = mounted();

    player.toggle_controls();
    tokio::time::sleep(Duration::from_millis(50)).await;
    player.toggle_controls();
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Showing);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);
}

#[tokio::test(start_paused = true)]
async fn interaction_postpones_auto_hide() {
    let (_, player) = mounted();
    show_overlay(&player).await;

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    player.interaction();

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);

    tokio::time::sleep(Duration::from_millis(2_300)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn dragging_stops_the_hide_countdown() {
    let (_, player) = mounted();
    player.handle_status(&playing_status(0, 10_000));
    show_overlay(&player).await;

    player.begin_seek();
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Shown);

    // Finishing the seek re-arms the countdown.
    player.complete_seek(0.4).await;
    tokio::time::sleep(Duration::from_millis(5_300)).await;
    assert_eq!(player.state().visibility.get(), ControlsVisibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn replay_leaves_ended() {
    let (source, player) = mounted();
    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        did_just_finish: true,
        ..PlaybackStatus::default()
    });
    assert_eq!(player.state().phase.get(), PlaybackPhase::Ended);

    player.replay();
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
    let command = source.recorded_commands().last().cloned().unwrap();
    assert_eq!(command.position, Some(Duration::ZERO));
    assert_eq!(command.should_play, Some(true));
}

#[tokio::test(start_paused = true)]
async fn toggle_play_flips_intent() {
    let (source, player) = mounted();
    player.handle_status(&playing_status(0, 10_000));

    player.toggle_play();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(
        source.recorded_commands().last().unwrap().should_play,
        Some(false)
    );

    player.handle_status(&PlaybackStatus {
        is_loaded: true,
        ..PlaybackStatus::default()
    });
    player.toggle_play();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(
        source.recorded_commands().last().unwrap().should_play,
        Some(true)
    );
}

#[tokio::test(start_paused = true)]
async fn failed_fire_and_forget_command_reports_non_fatal() {
    let source = Arc::new(FakeSource::with_duration(Duration::from_secs(10)));
    source.fail_commands.store(true, Ordering::SeqCst);
    let mut config = PlayerConfig::default();
    let reports = ErrorSink::install(&mut config);
    let player = PlayerController::new(Arc::clone(&source), config);
    player.handle_status(&playing_status(0, 10_000));

    player.toggle_play();
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(reports.non_fatal.load(Ordering::SeqCst), 1);
    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
}

#[tokio::test(start_paused = true)]
async fn playback_callback_panic_is_contained() {
    let source = Arc::new(FakeSource::default());
    let mut config = PlayerConfig::default();
    config.playback_callback = Some(Box::new(|_status| panic!("embedder bug")));
    let player = PlayerController::new(source, config);

    player.handle_status(&playing_status(2_000, 10_000));

    assert_eq!(player.state().phase.get(), PlaybackPhase::Playing);
    assert_eq!(
        player.state().position.get(),
        Some(Duration::from_millis(2_000))
    );
}

#[tokio::test(start_paused = true)]
async fn status_monitor_forwards_in_order() {
    let (_, player) = mounted();

    let statuses = futures::stream::iter(vec![
        PlaybackStatus::default(),
        playing_status(0, 10_000),
        PlaybackStatus {
            is_loaded: true,
            did_just_finish: true,
            ..PlaybackStatus::default()
        },
    ]);
    let _monitor = StatusMonitor::start(&player, statuses);
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(player.state().phase.get(), PlaybackPhase::Ended);
}

#[tokio::test(start_paused = true)]
async fn fullscreen_toggle_requests_orientation_switch() {
    use playbar::services::player::Orientation;

    let source = Arc::new(FakeSource::default());
    let to_landscape = Arc::new(AtomicUsize::new(0));
    let to_portrait = Arc::new(AtomicUsize::new(0));

    let mut config = PlayerConfig::default();
    let counter = Arc::clone(&to_landscape);
    config.switch_to_landscape = Some(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let counter = Arc::clone(&to_portrait);
    config.switch_to_portrait = Some(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let player = PlayerController::new(source, config);

    player.toggle_fullscreen();
    assert_eq!(to_landscape.load(Ordering::SeqCst), 1);

    // The embedder rotates and reports back; the next toggle goes the
    // other way.
    player.set_orientation(Orientation::Landscape);
    player.toggle_fullscreen();
    assert_eq!(to_portrait.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn late_timer_after_teardown_is_ignored() {
    let (_, player) = mounted();
    show_overlay(&player).await;

    drop(player);
    // Countdown and fade tasks abort on drop; nothing left to panic.
    tokio::time::sleep(Duration::from_millis(10_000)).await;
}
