// SysBridge - app/global.rs
//
// Process-wide facade for hosts that want free functions instead of passing
// a `SystemFacade` around.
//
// The facade is created on first use with an empty table and lives for the
// process. Hosts normally call `install_callbacks` once at startup; later
// re-installs are allowed and take effect on the next call.

use crate::app::facade::SystemFacade;
use crate::core::model::SensorReading;
use crate::core::table::{CallbackTable, LogFn, SensorsFn, UserDirFn};
use crate::util::error::SensorError;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

static FACADE: OnceLock<SystemFacade> = OnceLock::new();

/// The process-wide facade.
pub fn facade() -> &'static SystemFacade {
    FACADE.get_or_init(SystemFacade::new)
}

/// Replace the process-wide callback table.
pub fn install(table: CallbackTable) {
    facade().install(table);
}

/// Register context-bound callbacks on the process-wide facade.
pub fn install_callbacks<C>(
    user: Arc<C>,
    log: Option<LogFn<C>>,
    user_dir: Option<UserDirFn<C>>,
    sensors: Option<SensorsFn<C>>,
) where
    C: Send + Sync + 'static,
{
    facade().install_callbacks(user, log, user_dir, sensors);
}

/// Drop all callbacks from the process-wide facade.
pub fn reset() {
    facade().reset();
}

pub fn log(message: &str) {
    facade().log(message);
}

pub fn get_unix_time() -> f64 {
    facade().get_unix_time()
}

pub fn get_utc_offset() -> i32 {
    facade().get_utc_offset()
}

pub fn get_user_dir() -> PathBuf {
    facade().get_user_dir()
}

pub fn device_sensors(enable: bool) -> Result<Option<SensorReading>, SensorError> {
    facade().device_sensors(enable)
}

pub fn device_sensors_raw(enable: bool, acc: &mut [f64; 3], mag: &mut [f64; 3]) -> i32 {
    facade().device_sensors_raw(enable, acc, mag)
}

/// Format a message and print it through the process-wide facade.
///
/// ```
/// sysbridge::sys_log!("loaded {} tiles in {:.1} ms", 42, 3.25);
/// ```
#[macro_export]
macro_rules! sys_log {
    ($($arg:tt)*) => {
        $crate::app::global::log(&::std::format!($($arg)*))
    };
}
