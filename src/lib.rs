//! Playbar - Headless video player control surface.
//!
//! Playbar implements the state machine behind an on-screen video player
//! overlay (play/pause, seek bar, buffering spinner, auto-hiding controls)
//! without committing to any rendering toolkit. The main features include:
//!
//! - Playback phase tracking derived from engine status events
//! - Seek coordination that keeps drag gestures and async seeks consistent
//! - Inactivity-driven show/hide choreography for the controls overlay
//! - Reactive properties a view layer can watch for fine-grained updates
//!
//! The media engine itself is a consumed capability: embedders provide an
//! implementation of [`services::playback::PlaybackSource`] and feed its
//! status events into a [`services::player::PlayerController`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use playbar::services::player::{PlayerConfig, PlayerController};
//! # use playbar::services::playback::{MediaSpec, PlaybackError, PlaybackSource, PlaybackStatus, StatusUpdate};
//! # struct Engine;
//! # #[async_trait::async_trait]
//! # impl PlaybackSource for Engine {
//! #     async fn load(&self, _: MediaSpec) -> Result<PlaybackStatus, PlaybackError> { Ok(PlaybackStatus::default()) }
//! #     async fn apply(&self, _: StatusUpdate) -> Result<PlaybackStatus, PlaybackError> { Ok(PlaybackStatus::default()) }
//! # }
//! # let engine = Arc::new(Engine);
//!
//! let player = PlayerController::new(engine, PlayerConfig::default());
//!
//! // The view layer watches reactive state and forwards gestures.
//! let phase = player.state().phase.get();
//! println!("Current phase: {phase:?}");
//! ```

/// Overlay configuration: timings, theme, TOML loading.
pub mod config;

/// Reactive services: playback source, connectivity, player controller.
pub mod services;

/// Tracing initialization for embedding applications and tools.
pub mod tracing_config;

pub use config::{PlayerTimings, Theme};
pub use services::player::{PlayerConfig, PlayerController};
