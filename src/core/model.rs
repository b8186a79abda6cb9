// SysBridge - core/model.rs
//
// Data types shared by the facade, the sensor backends, and the probe.
//
// Sensor conventions (fixed for every backend):
//   - Acceleration in m/s², gravity included (a device lying flat on a table
//     reads roughly +9.81 on z).
//   - Magnetic field in microtesla.
//   - Both in the device frame: x to the right of the screen, y towards the
//     top of the screen, z out of the screen towards the user.

use serde::{Deserialize, Serialize};

/// One simultaneous accelerometer + magnetometer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Acceleration including gravity, m/s², device frame.
    pub accel: [f64; 3],
    /// Magnetic field, µT, device frame.
    pub mag: [f64; 3],
}

impl SensorReading {
    pub fn new(accel: [f64; 3], mag: [f64; 3]) -> Self {
        Self { accel, mag }
    }
}

/// Attitude of the device's rear-camera viewing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Clockwise from magnetic north, in [0, 360).
    pub azimuth_deg: f64,
    /// Above the horizon, in [-90, 90].
    pub altitude_deg: f64,
    /// Rotation about the viewing direction, in (-180, 180].
    pub roll_deg: f64,
}
