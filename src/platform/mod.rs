// LogGrid - platform/mod.rs
//
// Platform layer: configuration directory resolution and config loading.
// The only layer that touches the filesystem.

pub mod config;
