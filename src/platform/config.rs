// SysBridge - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SysBridge data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/sysbridge/ or %APPDATA%\SysBridge\config\)
    pub config_dir: PathBuf,

    /// Per-user writable data directory; the default answer of `get_user_dir`.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[paths]` section.
    pub paths: PathsSection,
    /// `[sensors]` section.
    pub sensors: SensorsSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Override for the default user data directory.
    pub user_dir: Option<String>,
}

/// `[sensors]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SensorsSection {
    /// Backend: "auto", "iio" or "none".
    pub backend: Option<String>,
    /// sysfs directory listing IIO devices.
    pub iio_root: Option<String>,
}

/// Which sensor backend `platform::native_callbacks` installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorBackend {
    /// IIO on Linux, nothing elsewhere.
    #[default]
    Auto,
    /// Linux Industrial I/O via sysfs.
    Iio,
    /// No sensor source; polls report unsupported.
    None,
}

impl SensorBackend {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "iio" => Some(Self::Iio),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,

    // -- Paths --
    /// Replaces the platform data directory as the default user dir.
    pub user_dir: Option<PathBuf>,

    // -- Sensors --
    pub sensor_backend: SensorBackend,
    pub iio_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_file: None,
            user_dir: None,
            sensor_backend: SensorBackend::Auto,
            iio_root: PathBuf::from(constants::DEFAULT_IIO_ROOT),
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and every problem found, as
/// non-fatal `ConfigError`s. If the file does not exist, returns defaults
/// with no warnings (first-run). If the file is unreadable or unparseable,
/// returns defaults with one error; the caller still starts but should
/// surface it.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path,
                source,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(err);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(err);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn out_of_range(field: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

/// Validate each field, accumulating all problems rather than stopping at the
/// first. Rejected values keep their defaults.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                level,
                "one of error, warn, info, debug, trace",
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    // -- Paths: user_dir --
    // Empty means "platform default".
    if let Some(dir) = raw.paths.user_dir.filter(|d| !d.is_empty()) {
        if Path::new(&dir).is_absolute() {
            config.user_dir = Some(PathBuf::from(dir));
        } else {
            warnings.push(out_of_range("paths.user_dir", &dir, "an absolute path"));
        }
    }

    // -- Sensors: backend --
    if let Some(ref backend) = raw.sensors.backend {
        match SensorBackend::parse(backend) {
            Some(b) => config.sensor_backend = b,
            None => warnings.push(out_of_range(
                "sensors.backend",
                backend,
                "one of auto, iio, none",
            )),
        }
    }

    // -- Sensors: iio_root --
    if let Some(root) = raw.sensors.iio_root {
        if !root.is_empty() {
            config.iio_root = PathBuf::from(root);
        }
    }

    config
}
