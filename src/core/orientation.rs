// SysBridge - core/orientation.rs
//
// Device attitude from one accelerometer + magnetometer sample, and an
// adaptive smoother for feeding a view direction from a stream of samples.
//
// Method: the accelerometer (gravity included) gives "up" in the device
// frame; east = field × up and north = up × east complete a world basis.
// Projecting the rear-camera direction (device -z) onto that basis gives
// azimuth and altitude. Input conventions are documented in core/model.rs.

use crate::core::model::{Orientation, SensorReading};
use crate::util::constants::{
    FAST_MOTION_DEG, HORIZON_CRITICAL_BAND_DEG, HORIZON_NEAR_BAND_DEG, MIN_VECTOR_NORM,
    MODERATE_MOTION_DEG, SMOOTH_FACTOR_CRITICAL, SMOOTH_FACTOR_FAST, SMOOTH_FACTOR_MODERATE,
    SMOOTH_FACTOR_NEAR, SMOOTH_FACTOR_SLOW,
};

type Vec3 = [f64; 3];

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: Vec3) -> Option<Vec3> {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if norm < MIN_VECTOR_NORM || !norm.is_finite() {
        return None;
    }
    Some([v[0] / norm, v[1] / norm, v[2] / norm])
}

/// Wrap an angle difference into (-180, 180].
fn wrap_delta(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

impl Orientation {
    /// Attitude of the rear camera for one sample.
    ///
    /// Returns `None` for degenerate input: no measurable gravity, no
    /// measurable field, or a field parallel to gravity (at a magnetic pole).
    pub fn from_reading(reading: &SensorReading) -> Option<Self> {
        let up = normalize(reading.accel)?;
        let east = normalize(cross(reading.mag, up))?;
        let north = cross(up, east);

        // Components of device -z in the (east, north, up) basis.
        let e = -east[2];
        let n = -north[2];
        let u = -up[2];

        let azimuth_deg = e.atan2(n).to_degrees().rem_euclid(360.0);
        let altitude_deg = u.atan2(e.hypot(n)).to_degrees();
        let roll_deg = (-up[0]).atan2(up[1]).to_degrees();

        Some(Self {
            azimuth_deg,
            altitude_deg,
            roll_deg,
        })
    }
}

/// Exponential smoother for a stream of orientations.
///
/// Azimuth becomes unstable as the camera approaches the horizon, so the
/// smoothing factor shrinks there; elsewhere it grows with the speed of
/// motion so fast pans are not dragged behind.
#[derive(Debug, Default, Clone)]
pub struct OrientationSmoother {
    current: Option<Orientation>,
}

impl OrientationSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample and return the smoothed orientation.
    ///
    /// The first sample is returned unchanged. Roll is passed through.
    pub fn update(&mut self, sample: Orientation) -> Orientation {
        let Some(prev) = self.current else {
            self.current = Some(sample);
            return sample;
        };

        let az_diff = wrap_delta(sample.azimuth_deg - prev.azimuth_deg);
        let alt_diff = sample.altitude_deg - prev.altitude_deg;
        let factor = smoothing_factor(sample.altitude_deg, az_diff, alt_diff);

        let next = Orientation {
            azimuth_deg: (prev.azimuth_deg + az_diff * factor).rem_euclid(360.0),
            altitude_deg: prev.altitude_deg + alt_diff * factor,
            roll_deg: sample.roll_deg,
        };
        self.current = Some(next);
        next
    }

    /// Forget history; the next sample initialises the smoother again.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<Orientation> {
        self.current
    }
}

fn smoothing_factor(altitude_deg: f64, az_diff: f64, alt_diff: f64) -> f64 {
    let from_horizon = altitude_deg.abs();
    if from_horizon < HORIZON_CRITICAL_BAND_DEG {
        return SMOOTH_FACTOR_CRITICAL;
    }
    if from_horizon < HORIZON_NEAR_BAND_DEG {
        return SMOOTH_FACTOR_NEAR;
    }
    let rate = az_diff.abs().max(alt_diff.abs());
    if rate > FAST_MOTION_DEG {
        SMOOTH_FACTOR_FAST
    } else if rate > MODERATE_MOTION_DEG {
        SMOOTH_FACTOR_MODERATE
    } else {
        SMOOTH_FACTOR_SLOW
    }
}
