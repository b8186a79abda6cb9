// SysBridge - core/mod.rs
//
// Core layer: sensor data model, service traits, callback table,
// orientation math.
// Dependencies: util layer, standard library.
// Must NOT depend on: platform, app, or perform any I/O directly.

pub mod model;
pub mod orientation;
pub mod services;
pub mod table;
