// SysBridge - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SysBridge";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SysBridge";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Sensor status codes
// =============================================================================

/// Sensor poll completed (readings written, or subsystem stopped).
pub const STATUS_OK: i32 = 0;

/// No sensor source installed, or the host has no usable sensor hardware.
pub const STATUS_UNSUPPORTED: i32 = -1;

/// The underlying OS facility failed.
pub const STATUS_PLATFORM_FAILURE: i32 = -2;

// =============================================================================
// Linux IIO sensor backend
// =============================================================================

/// Default sysfs directory listing Industrial I/O devices.
pub const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

/// Name prefix of device entries in the IIO bus directory.
pub const IIO_DEVICE_PREFIX: &str = "iio:device";

/// Upper bound on device directories inspected during discovery.
pub const MAX_IIO_DEVICES: usize = 64;

/// IIO magnetometers report gauss after scaling; the facade reports µT.
pub const GAUSS_TO_MICROTESLA: f64 = 100.0;

// =============================================================================
// Orientation smoothing
// =============================================================================

/// Altitude band (degrees either side of the horizon) where azimuth is
/// numerically unstable and smoothing is strongest.
pub const HORIZON_CRITICAL_BAND_DEG: f64 = 5.0;

/// Wider band around the horizon with moderately strong smoothing.
pub const HORIZON_NEAR_BAND_DEG: f64 = 10.0;

/// Smoothing factor inside the critical horizon band.
pub const SMOOTH_FACTOR_CRITICAL: f64 = 0.05;

/// Smoothing factor inside the near-horizon band.
pub const SMOOTH_FACTOR_NEAR: f64 = 0.1;

/// Smoothing factor for fast motion (change above `FAST_MOTION_DEG`).
pub const SMOOTH_FACTOR_FAST: f64 = 0.4;

/// Smoothing factor for moderate motion (change above `MODERATE_MOTION_DEG`).
pub const SMOOTH_FACTOR_MODERATE: f64 = 0.3;

/// Smoothing factor for slow motion.
pub const SMOOTH_FACTOR_SLOW: f64 = 0.2;

/// Per-sample change (degrees) above which motion counts as fast.
pub const FAST_MOTION_DEG: f64 = 10.0;

/// Per-sample change (degrees) above which motion counts as moderate.
pub const MODERATE_MOTION_DEG: f64 = 5.0;

/// Vector norms below this are treated as zero (no gravity / no field).
pub const MIN_VECTOR_NORM: f64 = 1e-9;
