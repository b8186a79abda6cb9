// SysBridge - main.rs
//
// Command-line probe. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Building the facade with the native callbacks for this host
// 4. Printing what each system service answers

use clap::Parser;
use std::path::PathBuf;
use sysbridge::app::probe::{self, ServiceReport};
use sysbridge::platform::config::{self, PlatformPaths};
use sysbridge::util;
use sysbridge::SystemFacade;

/// SysBridge - probe the pluggable system services of this host.
///
/// Prints the wall clock, UTC offset, user data directory and, on request,
/// one motion-sensor reading with the derived device orientation.
#[derive(Parser, Debug)]
#[command(name = "sysbridge", version, about)]
struct Cli {
    /// Also enable the motion sensors, take one reading, and stop them.
    #[arg(short = 's', long = "sensors")]
    sensors: bool,

    /// Print the report as JSON.
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Directory holding config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Route a message through the facade's log operation before probing.
    #[arg(short = 'l', long = "log")]
    log: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());
    let (app_config, config_warnings) = config::load_config(&config_dir);

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    // Config is read before tracing exists; replay its warnings now.
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "SysBridge starting"
    );

    let facade = SystemFacade::from_config(&app_config);

    if let Some(ref message) = cli.log {
        facade.log(message);
    }

    let report = probe::probe(&facade, cli.sensors);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialise report");
                eprintln!("Error: failed to serialise report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn print_report(report: &ServiceReport) {
    println!("unix time    : {:.3}", report.unix_time);
    if let Some(ref local) = report.local_time {
        println!("local time   : {local}");
    }
    println!("utc offset   : {} s", report.utc_offset_seconds);
    println!("user dir     : {}", report.user_dir.display());

    let Some(ref sensors) = report.sensors else {
        return;
    };
    println!("sensor status: {}", sensors.status);
    if let Some(ref error) = sensors.error {
        println!("sensor error : {error}");
    }
    if let Some(ref reading) = sensors.reading {
        let [ax, ay, az] = reading.accel;
        let [mx, my, mz] = reading.mag;
        println!("accel (m/s²) : {ax:8.3} {ay:8.3} {az:8.3}");
        println!("mag (µT)     : {mx:8.3} {my:8.3} {mz:8.3}");
    }
    if let Some(ref o) = sensors.orientation {
        println!(
            "orientation  : azimuth {:.1}°, altitude {:.1}°, roll {:.1}°",
            o.azimuth_deg, o.altitude_deg, o.roll_deg
        );
    }
}
