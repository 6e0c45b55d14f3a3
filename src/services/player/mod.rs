//! Player controller service.
//!
//! One [`PlayerController`] instance owns the full state of one mounted
//! player: the coarse playback phase derived from engine status events, the
//! seek coordination that keeps drag gestures consistent with asynchronous
//! seeks, and the show/hide choreography of the controls overlay. State is
//! exposed as reactive properties the view layer watches; gestures and
//! status events flow in through plain method calls.

/// Runtime player configuration and embedder callbacks
pub mod config;
/// Player controller implementation
pub mod controller;
/// Error report types delivered to the embedder
pub mod error;
/// Status and connectivity stream monitors
pub mod monitoring;
/// Seek coordination entry points
mod seek;
/// Reactive player state container
pub mod state;
/// Cancelable timer and fade tasks
mod tasks;
/// Phase, seek, and visibility state types
pub mod types;
/// Derived view computations (spinner, slider, clock text)
pub mod view;
/// Controls overlay visibility choreography
mod visibility;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use monitoring::*;
pub use state::*;
pub use types::*;
