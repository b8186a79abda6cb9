// SysBridge - lib.rs
//
// Library entry point. Hosts embed the facade from here; the `sysbridge`
// binary in `main.rs` is a thin probe on top of it.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::facade::SystemFacade;
pub use crate::core::model::{Orientation, SensorReading};
pub use crate::core::table::CallbackTable;
pub use crate::util::error::SensorError;
