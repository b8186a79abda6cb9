// SysBridge - platform/mod.rs
//
// Platform layer: OS-backed default implementations of the core service
// traits, plus config and data directory resolution.
// Dependencies: core traits, util, directories, chrono.
// Must NOT depend on: app.

pub mod clock;
pub mod config;
pub mod console;
pub mod fs;
pub mod sensors;

use crate::core::table::CallbackTable;
use config::{AppConfig, SensorBackend};
use sensors::{IioSensors, NoSensors};

/// Compose the callback table for this host as selected by `config`.
///
/// Only the sensor slot is filled: clock, log sink and user directory are
/// already served by the facade's own defaults, which read the same OS
/// facilities. `SensorBackend::Auto` selects IIO on Linux and `NoSensors`
/// elsewhere, so a host without sensors still reports unsupported from a
/// filled slot.
pub fn native_callbacks(config: &AppConfig) -> CallbackTable {
    let use_iio = match config.sensor_backend {
        SensorBackend::Iio => true,
        SensorBackend::None => false,
        SensorBackend::Auto => cfg!(target_os = "linux"),
    };

    tracing::debug!(
        backend = ?config.sensor_backend,
        iio = use_iio,
        root = %config.iio_root.display(),
        "Composing native callbacks"
    );

    if use_iio {
        CallbackTable::new().with_sensors(IioSensors::new(config.iio_root.clone()))
    } else {
        CallbackTable::new().with_sensors(NoSensors)
    }
}
