//! Playback source abstraction.
//!
//! The media engine that decodes and renders video is an external
//! collaborator. This module defines the narrow capability the control
//! surface consumes: a declarative load, asynchronous commands, and
//! point-in-time status reports delivered at the engine's own cadence.

/// Playback error types
pub mod error;
/// Playback source trait definition
pub mod source;
/// Status and command types
pub mod types;

pub use error::*;
pub use source::*;
pub use types::*;
