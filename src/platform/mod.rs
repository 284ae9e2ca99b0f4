// FleetLens - platform/mod.rs
//
// Platform abstraction layer: config directory resolution and config.toml
// loading. Everything OS-specific stays behind this boundary.

pub mod config;
