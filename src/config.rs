//! Overlay configuration types.
//!
//! Timing and appearance settings for the control surface. All types are
//! serializable to/from TOML so embedders can keep overlay tuning in their
//! own configuration files. Every field has a sensible default matching the
//! stock overlay behavior.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading overlay configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Animation and timer durations for the controls overlay.
///
/// All durations are in milliseconds to keep the TOML surface flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTimings {
    /// How long the fade-in animation for the controls runs.
    pub fade_in_ms: u64,

    /// How long the fade-out animation runs after the inactivity timer fires.
    pub fade_out_ms: u64,

    /// How long the fade-out runs when the screen is tapped while the
    /// controls are visible.
    pub quick_fade_out_ms: u64,

    /// How long the controls stay visible without user interaction.
    pub hide_controls_timer_ms: u64,

    /// How long a buffering stretch must last before the spinner is shown.
    /// Short buffering blips below this threshold never render a spinner.
    pub buffering_spinner_delay_ms: u64,
}

impl Default for PlayerTimings {
    fn default() -> Self {
        Self {
            fade_in_ms: 200,
            fade_out_ms: 1000,
            quick_fade_out_ms: 200,
            hide_controls_timer_ms: 4000,
            buffering_spinner_delay_ms: 200,
        }
    }
}

impl PlayerTimings {
    /// Fade-in duration for showing the controls.
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    /// Slow fade-out duration used when the inactivity timer expires.
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    /// Fast fade-out duration used when the user taps the surface.
    pub fn quick_fade_out(&self) -> Duration {
        Duration::from_millis(self.quick_fade_out_ms)
    }

    /// Inactivity countdown before the controls start hiding.
    pub fn hide_controls_timer(&self) -> Duration {
        Duration::from_millis(self.hide_controls_timer_ms)
    }

    /// Minimum buffering duration before the spinner renders.
    pub fn buffering_spinner_delay(&self) -> Duration {
        Duration::from_millis(self.buffering_spinner_delay_ms)
    }

    /// Parse timings from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the string is not valid TOML for
    /// this schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load timings from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents are not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

/// Icon overrides for the overlay controls.
///
/// Values are opaque identifiers (icon names, asset paths) that the view
/// layer resolves; `None` means the view's built-in asset is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    /// Icon for the play button.
    pub play: Option<String>,
    /// Icon for the pause button.
    pub pause: Option<String>,
    /// Icon for the buffering spinner.
    pub spinner: Option<String>,
    /// Icon for entering fullscreen.
    pub fullscreen_enter: Option<String>,
    /// Icon for exiting fullscreen.
    pub fullscreen_exit: Option<String>,
    /// Icon for the replay button shown when playback ends.
    pub replay: Option<String>,
    /// Image for the seek slider track.
    pub track: Option<String>,
    /// Image for the seek slider thumb.
    pub thumb: Option<String>,
}

/// Text styling for overlay labels (seek bar times, error messages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Text color as a hex string.
    pub color: String,
    /// Font family name.
    pub font_family: String,
    /// Font size in points.
    pub font_size: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            font_family: "roboto-regular".to_string(),
            font_size: 12,
        }
    }
}

/// Appearance settings for the controls overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Icon overrides for the overlay controls.
    pub icons: IconSet,

    /// Text styling for overlay labels.
    pub text_style: TextStyle,
}
