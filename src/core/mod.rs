// FleetLens - core/mod.rs
//
// Core business logic layer: the record view-model pipeline.
// Dependencies: standard library, chrono, regex, serde only.
// Must NOT depend on: data, platform, or any I/O crate directly.

pub mod classify;
pub mod export;
pub mod filter;
pub mod group;
pub mod model;
pub mod summary;
pub mod view;
