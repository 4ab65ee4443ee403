// Application controller: owns the roster state, applies user commands, and
// publishes derived snapshots to the UI.

pub mod app;
pub mod protocol;
