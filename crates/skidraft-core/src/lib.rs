// Library root for the roster view-model: player records, the roster
// collection, derived views, and the persistence bridge.

pub mod config;
pub mod db;
pub mod nationality;
pub mod photo;
pub mod player;
pub mod roster;
pub mod storage;
pub mod views;

/// Maximum number of players that may be flagged as captain at once.
pub const CAPTAIN_LIMIT: usize = 3;
