// SysBridge - util/error.rs
//
// Typed errors for the two fallible areas: sensor polling and config
// loading. Both preserve the causal chain for diagnostic logging.

use crate::util::constants::{STATUS_PLATFORM_FAILURE, STATUS_UNSUPPORTED};
use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Why a sensor poll produced no reading.
///
/// These are the only two failure kinds the facade surfaces; every other
/// operation falls back to a default instead of failing.
#[derive(Debug)]
pub enum SensorError {
    /// No sensor source installed, or the feature is absent on this host.
    Unsupported { reason: String },

    /// The underlying OS facility failed.
    PlatformFailure {
        reason: String,
        source: Option<io::Error>,
    },
}

impl SensorError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::PlatformFailure {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn io(reason: impl Into<String>, source: io::Error) -> Self {
        Self::PlatformFailure {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Integer status reported through the buffer-style sensor call.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Unsupported { .. } => STATUS_UNSUPPORTED,
            Self::PlatformFailure { .. } => STATUS_PLATFORM_FAILURE,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { reason } => write!(f, "Sensors unsupported: {reason}"),
            Self::PlatformFailure {
                reason,
                source: Some(source),
            } => write!(f, "Sensor platform failure: {reason}: {source}"),
            Self::PlatformFailure { reason, source: None } => {
                write!(f, "Sensor platform failure: {reason}")
            }
        }
    }
}

impl std::error::Error for SensorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PlatformFailure {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading `config.toml`.
///
/// None of these stop startup: the loader falls back to defaults and hands
/// the errors back as warnings for the caller to surface.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range or not a recognised choice.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
