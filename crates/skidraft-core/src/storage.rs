// Persistence bridge: best-effort save/load of the roster slot, plus
// snapshot export/import for user-initiated file transfers.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::player::Player;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("snapshot must be a JSON array of players")]
    NotAList,

    #[error("snapshot entry {index} is not a player record: {source}")]
    BadRecord {
        index: usize,
        source: serde_json::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The roster's durable slot: one key in the database holding a JSON array.
pub struct Storage {
    db: Database,
    key: String,
}

impl Storage {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Storage {
            db,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Write the full collection to the slot. Failures are logged and
    /// swallowed; the caller's in-memory state stays authoritative.
    pub fn save(&self, players: &[Player]) {
        let json = match serde_json::to_string(players) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize players: {}", e);
                return;
            }
        };
        match self.db.save_slot(&self.key, &json) {
            Ok(()) => debug!("Saved {} players to slot {}", players.len(), self.key),
            Err(e) => warn!("Failed to save players: {:#}", e),
        }
    }

    /// Read the collection from the slot. Absent or malformed content yields
    /// an empty collection. Entries that are not player records are skipped
    /// so the readable ones survive the next save.
    pub fn load(&self) -> Vec<Player> {
        let raw = match self.db.load_slot(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved players under {}", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to load saved players: {:#}", e);
                return Vec::new();
            }
        };
        match parse_saved_players(raw.as_bytes()) {
            Ok(players) => {
                info!("Loaded {} saved players", players.len());
                players
            }
            Err(e) => {
                warn!("Failed to load saved players: {}", e);
                Vec::new()
            }
        }
    }
}

/// Pretty-printed JSON array of the full collection.
pub fn export_snapshot(players: &[Player]) -> Vec<u8> {
    // A Vec of plain structs with string keys cannot fail to serialize.
    serde_json::to_vec_pretty(players).unwrap_or_else(|e| {
        warn!("Failed to serialize export snapshot: {}", e);
        b"[]".to_vec()
    })
}

/// Parse an exported snapshot. Anything other than a JSON array of
/// player-shaped objects is rejected.
pub fn import_snapshot(bytes: &[u8]) -> Result<Vec<Player>, StorageError> {
    parse_players(bytes)
}

/// Write the export snapshot to `dir/file_name`, returning the path written.
pub fn export_to_file(
    players: &[Player],
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, StorageError> {
    let path = dir.join(file_name);
    std::fs::write(&path, export_snapshot(players)).map_err(|source| StorageError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Exported {} players to {}", players.len(), path.display());
    Ok(path)
}

/// Read and parse a snapshot file.
pub fn import_from_file(path: &Path) -> Result<Vec<Player>, StorageError> {
    let bytes = std::fs::read(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_snapshot(&bytes)
}

fn parse_list(bytes: &[u8]) -> Result<Vec<serde_json::Value>, StorageError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(StorageError::Parse)?;
    match value {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(StorageError::NotAList),
    }
}

fn parse_players(bytes: &[u8]) -> Result<Vec<Player>, StorageError> {
    parse_list(bytes)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| StorageError::BadRecord { index, source })
        })
        .collect()
}

/// Like `parse_players`, but drops entries that are not records instead of
/// failing the whole list.
fn parse_saved_players(bytes: &[u8]) -> Result<Vec<Player>, StorageError> {
    let players = parse_list(bytes)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Player>(item) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("Skipping saved entry {}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
