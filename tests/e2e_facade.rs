// SysBridge - tests/e2e_facade.rs
//
// End-to-end tests for the system-services facade.
//
// These exercise the public library surface the way a host would: building
// callback tables, installing them, and calling the facade operations. The
// IIO tests run the real sysfs backend against a fake device tree written to
// a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use sysbridge::app::global;
use sysbridge::platform::config::{load_config, SensorBackend};
use sysbridge::platform::sensors::IioSensors;
use sysbridge::util::constants::{STATUS_OK, STATUS_PLATFORM_FAILURE, STATUS_UNSUPPORTED};
use sysbridge::{CallbackTable, SensorError, SensorReading, SystemFacade};

// =============================================================================
// Helpers
// =============================================================================

/// Host-side state handed to context-bound callbacks.
#[derive(Default)]
struct Host {
    name: String,
    logged: Mutex<Vec<String>>,
    polls: Mutex<Vec<bool>>,
    enabled: AtomicBool,
}

fn host_log(host: &Host, msg: &str) {
    host.logged
        .lock()
        .unwrap()
        .push(format!("{}: {msg}", host.name));
}

fn host_user_dir(host: &Host) -> PathBuf {
    PathBuf::from("/home").join(&host.name)
}

fn host_sensors(host: &Host, enable: bool) -> Result<Option<SensorReading>, SensorError> {
    host.polls.lock().unwrap().push(enable);
    host.enabled.store(enable, Ordering::SeqCst);
    Ok(enable.then(|| SensorReading::new([0.0, 9.81, 0.0], [0.0, -40.0, -20.0])))
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

fn write_fake_iio(root: &Path) {
    let accel = root.join("iio:device0");
    let magn = root.join("iio:device1");
    fs::create_dir_all(&accel).unwrap();
    fs::create_dir_all(&magn).unwrap();
    for (axis, raw) in [("x", "0"), ("y", "981"), ("z", "0")] {
        fs::write(accel.join(format!("in_accel_{axis}_raw")), format!("{raw}\n")).unwrap();
    }
    fs::write(accel.join("in_accel_scale"), "0.01\n").unwrap();
    for (axis, raw) in [("x", "0"), ("y", "-400"), ("z", "-200")] {
        fs::write(magn.join(format!("in_magn_{axis}_raw")), format!("{raw}\n")).unwrap();
    }
    fs::write(magn.join("in_magn_scale"), "0.001\n").unwrap();
}

// =============================================================================
// Forwarding
// =============================================================================

/// Callbacks receive the caller's arguments and the installed context as-is.
#[test]
fn e2e_callbacks_receive_arguments_and_context() {
    let host = Arc::new(Host {
        name: "stel".to_string(),
        ..Default::default()
    });
    let facade = SystemFacade::new();
    facade.install_callbacks(
        Arc::clone(&host),
        Some(host_log),
        Some(host_user_dir),
        Some(host_sensors),
    );

    facade.log("hello sky");
    assert_eq!(*host.logged.lock().unwrap(), vec!["stel: hello sky"]);

    assert_eq!(facade.get_user_dir(), PathBuf::from("/home/stel"));

    let reading = facade.device_sensors(true).unwrap();
    assert!(reading.is_some());
    assert!(facade.device_sensors(false).unwrap().is_none());
    assert_eq!(*host.polls.lock().unwrap(), vec![true, false]);

    let ctx = facade.callbacks().context::<Host>().expect("context installed");
    assert!(Arc::ptr_eq(&ctx, &host));
}

/// Slots left empty keep their defaults even when others are installed.
#[test]
fn e2e_partial_table_falls_back_per_slot() {
    let facade = SystemFacade::with_default_user_dir("/opt/fallback");
    facade.install(CallbackTable::new().with_log(|_: &str| {}));

    assert_eq!(facade.get_user_dir(), PathBuf::from("/opt/fallback"));
    assert!(facade.device_sensors(true).unwrap_err().is_unsupported());
    let before = now_secs();
    assert!(facade.get_unix_time() >= before - 0.01);
}

// =============================================================================
// Defaults
// =============================================================================

/// Default unix time lies between two independent wall-clock readings.
#[test]
fn e2e_default_unix_time_matches_wall_clock() {
    let facade = SystemFacade::new();
    let before = now_secs();
    let t = facade.get_unix_time();
    let after = now_secs();
    assert!(
        t >= before - 0.01 && t <= after + 0.01,
        "expected {before} <= {t} <= {after}"
    );
}

/// Default user dir is the same string on every call.
#[test]
fn e2e_default_user_dir_is_stable() {
    let facade = SystemFacade::new();
    let first = facade.get_user_dir();
    for _ in 0..5 {
        assert_eq!(facade.get_user_dir(), first);
    }
    assert!(!first.as_os_str().is_empty());
}

// =============================================================================
// Sensors
// =============================================================================

/// Disabling after enabling succeeds and leaves the subsystem stopped.
#[test]
fn e2e_disable_after_enable_stops_sensors() {
    let host = Arc::new(Host::default());
    let facade = SystemFacade::new();
    facade.install_callbacks(Arc::clone(&host), None, None, Some(host_sensors));

    let mut acc = [0.0; 3];
    let mut mag = [0.0; 3];
    assert_eq!(facade.device_sensors_raw(true, &mut acc, &mut mag), STATUS_OK);
    assert!(host.enabled.load(Ordering::SeqCst));
    assert_eq!(acc, [0.0, 9.81, 0.0]);

    let mut acc2 = [7.0; 3];
    let mut mag2 = [7.0; 3];
    assert_eq!(facade.device_sensors_raw(false, &mut acc2, &mut mag2), STATUS_OK);
    assert!(!host.enabled.load(Ordering::SeqCst));
    // Stopping produces no data, so nothing is written.
    assert_eq!(acc2, [7.0; 3]);
    assert_eq!(mag2, [7.0; 3]);
}

/// A failing sensor callback leaves both buffers bit-identical.
#[test]
fn e2e_failed_poll_leaves_buffers_untouched() {
    let facade = SystemFacade::new();
    facade.install(CallbackTable::new().with_sensors(
        |_: bool| -> Result<Option<SensorReading>, SensorError> {
            Err(SensorError::failure("bus error"))
        },
    ));

    let acc_before = [f64::NAN, -0.0, 1.5e-300];
    let mag_before = [f64::INFINITY, 42.0, -7.25];
    let mut acc = acc_before;
    let mut mag = mag_before;

    let status = facade.device_sensors_raw(true, &mut acc, &mut mag);
    assert_eq!(status, STATUS_PLATFORM_FAILURE);
    for i in 0..3 {
        assert_eq!(acc[i].to_bits(), acc_before[i].to_bits());
        assert_eq!(mag[i].to_bits(), mag_before[i].to_bits());
    }
}

/// The real IIO backend behind the facade, against a fake sysfs tree.
#[test]
fn e2e_iio_backend_through_facade() {
    let bus = tempfile::tempdir().unwrap();
    write_fake_iio(bus.path());

    let facade = SystemFacade::new();
    facade.install(CallbackTable::new().with_sensors(IioSensors::new(bus.path())));

    let mut acc = [0.0; 3];
    let mut mag = [0.0; 3];
    assert_eq!(facade.device_sensors_raw(true, &mut acc, &mut mag), STATUS_OK);
    assert!((acc[1] - 9.81).abs() < 1e-9, "{acc:?}");
    // -400 * 0.001 G = -0.4 G = -40 µT
    assert!((mag[1] + 40.0).abs() < 1e-9, "{mag:?}");
    assert!((mag[2] + 20.0).abs() < 1e-9, "{mag:?}");

    let orientation = sysbridge::Orientation::from_reading(&SensorReading::new(acc, mag))
        .expect("upright device has an orientation");
    assert!(orientation.azimuth_deg.abs() < 1e-6 || (orientation.azimuth_deg - 360.0).abs() < 1e-6);

    assert_eq!(facade.device_sensors_raw(false, &mut acc, &mut mag), STATUS_OK);
}

/// Config selects the IIO backend and its root for `SystemFacade::from_config`.
#[test]
fn e2e_config_drives_native_callbacks() {
    let config_dir = tempfile::tempdir().unwrap();
    let bus = tempfile::tempdir().unwrap();
    write_fake_iio(bus.path());
    let user_dir = config_dir.path().join("data");

    fs::write(
        config_dir.path().join("config.toml"),
        format!(
            "[paths]\nuser_dir = {:?}\n[sensors]\nbackend = \"iio\"\niio_root = {:?}\n",
            user_dir,
            bus.path()
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(config_dir.path());
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(config.sensor_backend, SensorBackend::Iio);

    let facade = SystemFacade::from_config(&config);
    assert_eq!(facade.get_user_dir(), user_dir);
    assert!(facade.device_sensors(true).unwrap().is_some());
    assert!(facade.device_sensors(false).unwrap().is_none());
}

/// `backend = "none"` leaves sensors unsupported.
#[test]
fn e2e_config_backend_none_is_unsupported() {
    let config_dir = tempfile::tempdir().unwrap();
    fs::write(
        config_dir.path().join("config.toml"),
        "[sensors]\nbackend = \"none\"\n",
    )
    .unwrap();
    let (config, _) = load_config(config_dir.path());
    let facade = SystemFacade::from_config(&config);
    let mut acc = [0.0; 3];
    let mut mag = [0.0; 3];
    assert_eq!(facade.device_sensors_raw(true, &mut acc, &mut mag), STATUS_UNSUPPORTED);
}

// =============================================================================
// Re-installation
// =============================================================================

/// A table installed between two calls is used by the second call.
#[test]
fn e2e_reinstall_is_observed_immediately() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let facade = SystemFacade::new();

    let f = Arc::clone(&first);
    facade.install(CallbackTable::new().with_log(move |_: &str| {
        f.fetch_add(1, Ordering::SeqCst);
    }));
    facade.log("one");

    let s = Arc::clone(&second);
    facade.install(CallbackTable::new().with_log(move |_: &str| {
        s.fetch_add(1, Ordering::SeqCst);
    }));
    facade.log("two");

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

/// Concurrent callers and a re-installing writer never observe a torn table:
/// every delivered message lands in exactly one installed sink, and once the
/// writer is done only the last sink receives anything.
#[test]
fn e2e_concurrent_calls_during_reinstall() {
    const GENERATIONS: usize = 50;

    let facade = Arc::new(SystemFacade::new());
    let delivered: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let facade = Arc::clone(&facade);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    facade.log("tick");
                    let _ = facade.get_unix_time();
                }
            })
        })
        .collect();

    for generation in 0..GENERATIONS {
        let d = Arc::clone(&delivered);
        facade.install(CallbackTable::new().with_log(move |_: &str| {
            d.lock().unwrap().push(generation);
        }));
    }

    for r in readers {
        r.join().unwrap();
    }

    assert!(facade.callbacks().log.is_some());
    assert!(delivered
        .lock()
        .unwrap()
        .iter()
        .all(|&generation| generation < GENERATIONS));

    delivered.lock().unwrap().clear();
    facade.log("final");
    assert_eq!(*delivered.lock().unwrap(), vec![GENERATIONS - 1]);
}

// =============================================================================
// Process-wide facade
// =============================================================================

/// The free functions and `sys_log!` drive the single process-wide facade.
/// Kept in one test so no other test in this binary races on the global.
#[test]
fn e2e_global_facade_round_trip() {
    let host = Arc::new(Host {
        name: "global".to_string(),
        ..Default::default()
    });
    global::install_callbacks(
        Arc::clone(&host),
        Some(host_log),
        Some(host_user_dir),
        Some(host_sensors),
    );

    sysbridge::sys_log!("{} stars", 3);
    assert_eq!(*host.logged.lock().unwrap(), vec!["global: 3 stars"]);
    assert_eq!(global::get_user_dir(), PathBuf::from("/home/global"));

    let mut acc = [0.0; 3];
    let mut mag = [0.0; 3];
    assert_eq!(global::device_sensors_raw(true, &mut acc, &mut mag), STATUS_OK);
    assert!(global::device_sensors(false).unwrap().is_none());

    global::reset();
    assert!(global::facade().callbacks().is_empty());
    assert!(global::device_sensors(true).unwrap_err().is_unsupported());
    let offset = global::get_utc_offset();
    assert!((-12 * 3600..=14 * 3600).contains(&offset));
}
