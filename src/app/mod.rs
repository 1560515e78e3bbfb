// LogGrid - app/mod.rs
//
// Application layer: owns table state and the command surface.
// Depends on core and util; never on the presentation shell.

pub mod state;
