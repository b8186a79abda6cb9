// SysBridge - platform/sensors.rs
//
// Sensor backends.
//
// `IioSensors` reads the Linux Industrial I/O subsystem through sysfs:
//   <root>/iio:deviceN/in_accel_{x,y,z}_raw   (+ _scale / _offset)
//   <root>/iio:deviceM/in_magn_{x,y,z}_raw    (+ _scale / _offset)
// Kernel ABI: accel is m/s² and magn is gauss after (raw + offset) * scale.
// Per-axis scale/offset files win over the shared channel files; missing
// ones default to scale 1 and offset 0.
//
// Enabling discovers the two devices once and keeps them until disabled.
// Both directions are idempotent. The enabled state sits behind a Mutex so
// concurrent pollers see one consistent subsystem.

use crate::core::model::SensorReading;
use crate::core::services::SensorSource;
use crate::platform::fs::{read_f64, read_optional_f64};
use crate::util::constants::{GAUSS_TO_MICROTESLA, IIO_DEVICE_PREFIX, MAX_IIO_DEVICES};
use crate::util::error::SensorError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const AXES: [&str; 3] = ["x", "y", "z"];

/// Sensor source for hosts with no motion sensors: always unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensors;

impl SensorSource for NoSensors {
    fn poll(&self, _enable: bool) -> Result<Option<SensorReading>, SensorError> {
        Err(SensorError::unsupported("no sensor source installed"))
    }
}

/// Device directories found during discovery.
#[derive(Debug, Clone, PartialEq)]
struct IioDevices {
    accel: PathBuf,
    magn: PathBuf,
}

/// Linux IIO accelerometer + magnetometer backend.
#[derive(Debug)]
pub struct IioSensors {
    root: PathBuf,
    devices: Mutex<Option<IioDevices>>,
}

impl IioSensors {
    /// Backend reading devices under `root` (normally `/sys/bus/iio/devices`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            devices: Mutex::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.devices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SensorSource for IioSensors {
    fn poll(&self, enable: bool) -> Result<Option<SensorReading>, SensorError> {
        let mut devices = self.devices.lock().unwrap_or_else(PoisonError::into_inner);

        if !enable {
            if devices.take().is_some() {
                tracing::info!(root = %self.root.display(), "IIO sensors stopped");
            }
            return Ok(None);
        }

        if devices.is_none() {
            let found = discover(&self.root)?;
            tracing::info!(
                accel = %found.accel.display(),
                magn = %found.magn.display(),
                "IIO sensors started"
            );
            *devices = Some(found);
        }
        let dev = devices
            .as_ref()
            .ok_or_else(|| SensorError::failure("IIO device state lost"))?;

        let accel = read_channel(&dev.accel, "accel")?;
        let gauss = read_channel(&dev.magn, "magn")?;
        let mag = gauss.map(|g| g * GAUSS_TO_MICROTESLA);

        tracing::trace!(?accel, ?mag, "IIO sample");
        Ok(Some(SensorReading { accel, mag }))
    }
}

/// Find the first accelerometer and first magnetometer device under `root`.
fn discover(root: &Path) -> Result<IioDevices, SensorError> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SensorError::unsupported(format!(
                "no IIO bus at '{}'",
                root.display()
            )));
        }
        Err(e) => {
            return Err(SensorError::io(
                format!("listing IIO devices in '{}'", root.display()),
                e,
            ));
        }
    };

    // Triggers and buffers share the bus directory with devices; only
    // `iio:deviceN` entries count towards the limit. Sorted before the limit
    // so the chosen devices do not depend on read_dir order.
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(IIO_DEVICE_PREFIX))
        })
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs.truncate(MAX_IIO_DEVICES);

    let find = |channel: &str| {
        dirs.iter()
            .find(|dir| dir.join(format!("in_{channel}_x_raw")).is_file())
            .cloned()
    };

    match (find("accel"), find("magn")) {
        (Some(accel), Some(magn)) => Ok(IioDevices { accel, magn }),
        (None, _) => Err(SensorError::unsupported(format!(
            "no IIO accelerometer under '{}'",
            root.display()
        ))),
        (_, None) => Err(SensorError::unsupported(format!(
            "no IIO magnetometer under '{}'",
            root.display()
        ))),
    }
}

/// Read the three scaled axes of one channel type from a device directory.
fn read_channel(dir: &Path, channel: &str) -> Result<[f64; 3], SensorError> {
    let attr = |name: String| dir.join(name);
    let fail = |path: &Path, e: io::Error| SensorError::io(format!("reading '{}'", path.display()), e);

    let shared_scale_path = attr(format!("in_{channel}_scale"));
    let shared_scale = read_optional_f64(&shared_scale_path).map_err(|e| fail(&shared_scale_path, e))?;
    let shared_offset_path = attr(format!("in_{channel}_offset"));
    let shared_offset =
        read_optional_f64(&shared_offset_path).map_err(|e| fail(&shared_offset_path, e))?;

    let mut out = [0.0; 3];
    for (slot, axis) in out.iter_mut().zip(AXES) {
        let raw_path = attr(format!("in_{channel}_{axis}_raw"));
        let raw = read_f64(&raw_path).map_err(|e| fail(&raw_path, e))?;

        let scale_path = attr(format!("in_{channel}_{axis}_scale"));
        let scale = read_optional_f64(&scale_path)
            .map_err(|e| fail(&scale_path, e))?
            .or(shared_scale)
            .unwrap_or(1.0);

        let offset_path = attr(format!("in_{channel}_{axis}_offset"));
        let offset = read_optional_f64(&offset_path)
            .map_err(|e| fail(&offset_path, e))?
            .or(shared_offset)
            .unwrap_or(0.0);

        *slot = (raw + offset) * scale;
    }
    Ok(out)
}
