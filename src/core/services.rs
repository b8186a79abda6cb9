// SysBridge - core/services.rs
//
// Capability traits for the OS-dependent services the facade forwards to.
//
// A host supplies implementations for whichever capabilities it wants to
// override; anything left out falls back to the platform default. Plain
// closures of the right shape implement the single-method traits, so a
// host can install `|msg: &str| ...` as a log sink without a wrapper type.
//
// Every trait is `Send + Sync`: one table is shared by all threads calling
// the facade.

use crate::core::model::SensorReading;
use crate::util::error::SensorError;
use std::path::PathBuf;

/// Destination for one-line diagnostic messages.
pub trait LogSink: Send + Sync {
    /// Record a single line of text. Must not fail observably.
    fn log(&self, message: &str);
}

/// Wall clock and local timezone.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch, with sub-second precision.
    fn unix_time(&self) -> f64;

    /// Local time minus UTC, in seconds (e.g. +3600 for CET in winter).
    fn utc_offset(&self) -> i32;
}

/// Resolves the per-user writable data directory.
pub trait UserDirProvider: Send + Sync {
    fn user_dir(&self) -> PathBuf;
}

/// Device motion sensors (accelerometer + magnetometer).
///
/// `enable = true` starts the subsystem if needed and returns a reading.
/// `enable = false` stops it and returns `Ok(None)`. Both directions are
/// idempotent; the implementation owns the enabled/disabled state and must
/// synchronise it if it can be polled from several threads.
pub trait SensorSource: Send + Sync {
    fn poll(&self, enable: bool) -> Result<Option<SensorReading>, SensorError>;
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

impl<F> UserDirProvider for F
where
    F: Fn() -> PathBuf + Send + Sync,
{
    fn user_dir(&self) -> PathBuf {
        self()
    }
}

impl<F> SensorSource for F
where
    F: Fn(bool) -> Result<Option<SensorReading>, SensorError> + Send + Sync,
{
    fn poll(&self, enable: bool) -> Result<Option<SensorReading>, SensorError> {
        self(enable)
    }
}
