// SysBridge - app/facade.rs
//
// The system-services facade: a uniform call surface over OS-dependent
// operations, forwarding each call to the installed callback or falling
// back to the platform default.
//
// Table handling:
//   - The current table is an `Arc<CallbackTable>` behind a `RwLock`.
//   - Each call clones the `Arc` under a short read lock, then invokes the
//     callback with no lock held. A callback may therefore re-install the
//     table (or call back into the facade) without deadlocking.
//   - `install` swaps the whole table; the next call observes it. Nothing is
//     cached between calls.
//   - A poisoned lock is recovered: the table is a plain value and stays
//     valid whatever panicked while holding the lock.

use crate::core::model::SensorReading;
use crate::core::services::{Clock, LogSink};
use crate::core::table::{CallbackTable, LogFn, SensorsFn, UserDirFn};
use crate::platform;
use crate::platform::clock::SystemClock;
use crate::platform::config::{AppConfig, PlatformPaths};
use crate::platform::console::StderrSink;
use crate::util::constants::STATUS_OK;
use crate::util::error::SensorError;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Facade over the installed system services.
pub struct SystemFacade {
    table: RwLock<Arc<CallbackTable>>,
    user_dir_override: Option<PathBuf>,
    default_user_dir: OnceLock<PathBuf>,
}

impl Default for SystemFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFacade {
    /// Facade with an empty table: every operation uses its default.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Arc::new(CallbackTable::new())),
            user_dir_override: None,
            default_user_dir: OnceLock::new(),
        }
    }

    /// Facade whose default user directory is `dir` instead of the platform
    /// data directory.
    pub fn with_default_user_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir_override: Some(dir.into()),
            ..Self::new()
        }
    }

    /// Facade configured from `config.toml`: user-dir override plus the
    /// native callbacks for this host.
    pub fn from_config(config: &AppConfig) -> Self {
        let facade = Self {
            user_dir_override: config.user_dir.clone(),
            ..Self::new()
        };
        facade.install(platform::native_callbacks(config));
        facade
    }

    fn current(&self) -> Arc<CallbackTable> {
        Arc::clone(&self.table.read().unwrap_or_else(PoisonError::into_inner))
    }

    // =========================================================================
    // Table management
    // =========================================================================

    /// The table in effect right now.
    pub fn callbacks(&self) -> Arc<CallbackTable> {
        self.current()
    }

    /// Replace the callback table. Later calls use `table` immediately.
    pub fn install(&self, table: CallbackTable) {
        tracing::debug!(table = ?table, "Installing callback table");
        let mut slot = self.table.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(table);
    }

    /// Install context-bound function callbacks; see
    /// [`CallbackTable::with_context`].
    pub fn install_callbacks<C>(
        &self,
        user: Arc<C>,
        log: Option<LogFn<C>>,
        user_dir: Option<UserDirFn<C>>,
        sensors: Option<SensorsFn<C>>,
    ) where
        C: Send + Sync + 'static,
    {
        self.install(CallbackTable::with_context(user, log, user_dir, sensors));
    }

    /// Drop all installed callbacks.
    pub fn reset(&self) {
        self.install(CallbackTable::new());
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Print one line of text through the installed sink, or stderr.
    pub fn log(&self, message: &str) {
        match &self.current().log {
            Some(sink) => sink.log(message),
            None => StderrSink.log(message),
        }
    }

    /// Seconds since the Unix epoch.
    pub fn get_unix_time(&self) -> f64 {
        match &self.current().clock {
            Some(clock) => clock.unix_time(),
            None => SystemClock.unix_time(),
        }
    }

    /// Local time minus UTC, in seconds.
    pub fn get_utc_offset(&self) -> i32 {
        match &self.current().clock {
            Some(clock) => clock.utc_offset(),
            None => SystemClock.utc_offset(),
        }
    }

    /// The user data directory.
    ///
    /// Without a callback this is resolved once per facade (config override,
    /// else the platform data directory) and identical on every call.
    pub fn get_user_dir(&self) -> PathBuf {
        if let Some(provider) = &self.current().user_dir {
            return provider.user_dir();
        }
        self.default_user_dir
            .get_or_init(|| {
                let dir = self
                    .user_dir_override
                    .clone()
                    .unwrap_or_else(|| PlatformPaths::resolve().data_dir);
                tracing::debug!(dir = %dir.display(), "Default user directory resolved");
                dir
            })
            .clone()
    }

    /// Start (`enable = true`) or stop the motion sensors.
    ///
    /// Enabled: the latest reading. Stopped: `Ok(None)`. With no sensor
    /// source installed: `SensorError::Unsupported`.
    pub fn device_sensors(&self, enable: bool) -> Result<Option<SensorReading>, SensorError> {
        let result = match &self.current().sensors {
            Some(source) => source.poll(enable),
            None => Err(SensorError::unsupported("no sensor source installed")),
        };
        if let Err(ref e) = result {
            tracing::debug!(enable, error = %e, "Sensor poll failed");
        }
        result
    }

    /// Buffer-style sensor poll for hosts that own fixed output arrays.
    ///
    /// Returns `0` on success and a negative status on failure (see
    /// `util::constants`). The buffers are written only when a reading was
    /// produced; on failure or when stopping they keep their contents.
    pub fn device_sensors_raw(&self, enable: bool, acc: &mut [f64; 3], mag: &mut [f64; 3]) -> i32 {
        match self.device_sensors(enable) {
            Ok(Some(reading)) => {
                *acc = reading.accel;
                *mag = reading.mag;
                STATUS_OK
            }
            Ok(None) => STATUS_OK,
            Err(e) => e.status_code(),
        }
    }
}
