// SysBridge - app/mod.rs
//
// Application layer: the system-services facade, the process-wide
// instance, and the service probe.
// Dependencies: core, platform, util.

pub mod facade;
pub mod global;
pub mod probe;
