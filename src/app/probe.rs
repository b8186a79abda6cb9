// SysBridge - app/probe.rs
//
// Snapshot of what the facade currently answers, for the CLI and for hosts
// that want to log their environment at startup.

use crate::app::facade::SystemFacade;
use crate::core::model::{Orientation, SensorReading};
use crate::util::constants::STATUS_OK;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Everything the facade reported during one probe.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    /// Seconds since the Unix epoch.
    pub unix_time: f64,
    /// `unix_time` rendered in the reported UTC offset (RFC 3339).
    pub local_time: Option<String>,
    /// Local time minus UTC, in seconds.
    pub utc_offset_seconds: i32,
    pub user_dir: PathBuf,
    /// Present only when sensors were probed.
    pub sensors: Option<SensorProbe>,
}

/// Result of one enable-read-disable sensor cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SensorProbe {
    /// Status of the enabling poll (0 = success).
    pub status: i32,
    pub reading: Option<SensorReading>,
    pub orientation: Option<Orientation>,
    pub error: Option<String>,
}

/// Query every facade operation once.
///
/// With `sensors = true` the sensor subsystem is enabled, read once, and
/// stopped again so the probe leaves no hardware running.
pub fn probe(facade: &SystemFacade, sensors: bool) -> ServiceReport {
    let unix_time = facade.get_unix_time();
    let utc_offset_seconds = facade.get_utc_offset();
    let user_dir = facade.get_user_dir();

    let sensors = sensors.then(|| probe_sensors(facade));

    tracing::debug!(
        unix_time,
        utc_offset_seconds,
        user_dir = %user_dir.display(),
        sensors = sensors.is_some(),
        "Service probe complete"
    );

    ServiceReport {
        unix_time,
        local_time: format_local(unix_time, utc_offset_seconds),
        utc_offset_seconds,
        user_dir,
        sensors,
    }
}

fn probe_sensors(facade: &SystemFacade) -> SensorProbe {
    let probe = match facade.device_sensors(true) {
        Ok(reading) => SensorProbe {
            status: STATUS_OK,
            orientation: reading.as_ref().and_then(Orientation::from_reading),
            reading,
            error: None,
        },
        Err(e) => SensorProbe {
            status: e.status_code(),
            reading: None,
            orientation: None,
            error: Some(e.to_string()),
        },
    };

    if let Err(e) = facade.device_sensors(false) {
        tracing::debug!(error = %e, "Stopping sensors after probe failed");
    }
    probe
}

/// Render a unix time in a fixed UTC offset; `None` if either is out of
/// chrono's range.
fn format_local(unix_time: f64, utc_offset_seconds: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(utc_offset_seconds)?;
    let secs = unix_time.floor();
    let nanos = ((unix_time - secs) * 1e9) as u32;
    let utc = DateTime::<Utc>::from_timestamp(secs as i64, nanos.min(999_999_999))?;
    Some(offset.from_utc_datetime(&utc.naive_utc()).to_rfc3339())
}
