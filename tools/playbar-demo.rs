//! Headless demo of the player control surface.
//!
//! Mounts a controller over a scripted in-process playback engine, walks it
//! through a load / play / buffer / seek / finish scenario, and prints every
//! phase and visibility transition. Run with:
//!
//! ```sh
//! cargo run --bin playbar-demo
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use playbar::services::connectivity::ConnectivityState;
use playbar::services::playback::{
    MediaSpec, PlaybackError, PlaybackSource, PlaybackStatus, StatusUpdate,
};
use playbar::services::player::{PlayerConfig, PlayerController, StatusMonitor};
use tracing::info;

/// Minimal scripted engine: commands merge into an internal status.
#[derive(Default)]
struct ScriptedEngine {
    status: Mutex<PlaybackStatus>,
}

impl ScriptedEngine {
    fn mutate(&self, change: impl FnOnce(&mut PlaybackStatus)) -> PlaybackStatus {
        let mut status = self
            .status
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        change(&mut status);
        status.clone()
    }
}

#[async_trait]
impl PlaybackSource for ScriptedEngine {
    async fn load(&self, media: MediaSpec) -> Result<PlaybackStatus, PlaybackError> {
        info!("engine: loading {}", media.uri);
        Ok(self.mutate(|status| {
            status.is_loaded = true;
            status.should_play = media.autoplay;
            status.is_playing = media.autoplay;
            status.position = Some(Duration::ZERO);
            status.duration = Some(Duration::from_secs(120));
        }))
    }

    async fn apply(&self, update: StatusUpdate) -> Result<PlaybackStatus, PlaybackError> {
        info!("engine: apply {update:?}");
        Ok(self.mutate(|status| {
            if let Some(should_play) = update.should_play {
                status.should_play = should_play;
                status.is_playing = should_play;
            }
            if let Some(position) = update.position {
                status.position = Some(position);
            }
        }))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    playbar::tracing_config::init()?;

    let engine = Arc::new(ScriptedEngine::default());
    let player = PlayerController::new(Arc::clone(&engine), PlayerConfig::default());

    // Print every phase and visibility transition as the view layer would
    // observe them.
    let phases = player.state().phase.watch();
    tokio::spawn(async move {
        let mut phases = std::pin::pin!(phases);
        while let Some(phase) = phases.next().await {
            info!("view: phase {phase:?}");
        }
    });
    let overlays = player.state().visibility.watch();
    tokio::spawn(async move {
        let mut overlays = std::pin::pin!(overlays);
        while let Some(visibility) = overlays.next().await {
            info!("view: overlay {visibility:?}");
        }
    });

    player.set_connectivity(ConnectivityState::Reachable);
    player.load(MediaSpec::new("demo://sintel-trailer")).await;

    // Engine status cadence: one report every 500 ms, advancing position
    // while playing.
    let ticker = {
        let engine = Arc::clone(&engine);
        async_stream::stream! {
            loop {
                tokio::time::sleep(Duration::from_millis(500)).await;
                let status = engine.mutate(|status| {
                    if status.is_playing
                        && let Some(position) = status.position
                    {
                        status.position = Some(position + Duration::from_millis(500));
                    }
                });
                yield status;
            }
        }
    };
    let _monitor = StatusMonitor::start(&player, ticker);

    info!("demo: tap surface to show controls");
    player.toggle_controls();
    tokio::time::sleep(Duration::from_millis(400)).await;

    info!("demo: press play");
    player.toggle_play();
    tokio::time::sleep(Duration::from_secs(2)).await;
    info!(
        "demo: clock {} / {} (slider {:.2})",
        player.position_text(),
        player.duration_text(),
        player.seek_slider_position()
    );

    info!("demo: drag the seek handle to 75%");
    player.begin_seek();
    tokio::time::sleep(Duration::from_millis(300)).await;
    player.complete_seek(0.75).await;
    info!(
        "demo: clock {} / {} after seek",
        player.position_text(),
        player.duration_text()
    );

    info!("demo: let the engine report the finish");
    let finished = engine.mutate(|status| {
        status.is_playing = false;
        status.should_play = false;
        status.did_just_finish = true;
        status.position = status.duration;
    });
    player.handle_status(&finished);

    info!("demo: replay from the start");
    player.replay();
    tokio::time::sleep(Duration::from_secs(1)).await;

    info!("demo: wait for the overlay to hide itself");
    tokio::time::sleep(Duration::from_millis(5_500)).await;

    info!(
        "demo: done in phase {:?} with overlay {:?}",
        player.state().phase.get(),
        player.state().visibility.get()
    );
    Ok(())
}
