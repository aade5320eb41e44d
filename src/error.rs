//! Unified error types.
//!
//! Command synthesis, path conversion, and reconciliation are total and never
//! return these. They surface only from config loading and from the
//! subprocess layer underneath the multiplexer adapters.

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ProcessError
// ---------------------------------------------------------------------------

/// Errors from short-lived probe/listing subprocesses.
#[derive(Debug)]
pub enum ProcessError {
    /// The program could not be started (missing binary, permissions).
    Spawn { program: String, source: std::io::Error },
    /// The program started but waiting on it failed.
    Io { program: String, source: std::io::Error },
    /// The program did not finish within its time budget.
    TimedOut { program: String, limit: Duration },
}

impl ProcessError {
    /// True when the failure means the binary is simply not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => write!(f, "failed to start {program}: {source}"),
            Self::Io { program, source } => write!(f, "{program}: {source}"),
            Self::TimedOut { program, limit } => {
                write!(f, "{program} timed out after {}ms", limit.as_millis())
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Io { source, .. } => Some(source),
            Self::TimedOut { .. } => None,
        }
    }
}
