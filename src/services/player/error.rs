use std::fmt;

/// How severe a reported playback failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Playback cannot continue; the phase has moved to `Error`.
    Fatal,

    /// A fire-and-forget command failed; playback continues with the best
    /// available state.
    NonFatal,
}

/// A failure report delivered to the embedder's error callback.
///
/// No error ever crosses the component boundary as a panic or a `Result`:
/// failures become either an `Error` phase transition or one of these
/// best-effort notifications.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Whether playback survived the failure.
    pub severity: Severity,

    /// Human-readable description.
    pub message: String,

    /// Underlying engine error, if one was attached.
    pub cause: Option<String>,
}

impl ErrorReport {
    pub(crate) fn fatal(message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            message: message.into(),
            cause,
        }
    }

    pub(crate) fn non_fatal(message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            severity: Severity::NonFatal,
            message: message.into(),
            cause,
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{:?}: {} ({cause})", self.severity, self.message),
            None => write!(f, "{:?}: {}", self.severity, self.message),
        }
    }
}
