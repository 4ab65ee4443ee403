// Roster collection: create/edit/delete players and enforce the captain limit.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::nationality;
use crate::player::{generate_id, Player, PlayerInput};
use crate::CAPTAIN_LIMIT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("a photo is required to create a player")]
    PhotoRequired,
}

/// Ordered player collection. New players go to the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn captain_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_captain).count()
    }

    /// Create a player, or update one in place when `editing_id` names an
    /// existing record.
    ///
    /// An update keeps the record's `id` and captain flag, and keeps its photo
    /// unless `input.photo` carries a new one. A create needs a photo; without
    /// one this returns [`RosterError::PhotoRequired`] and nothing changes.
    pub fn add_or_update(
        &mut self,
        input: PlayerInput,
        editing_id: Option<&str>,
    ) -> Result<Player, RosterError> {
        let existing_idx = editing_id.and_then(|id| self.players.iter().position(|p| p.id == id));

        match existing_idx {
            Some(idx) => {
                let existing = &self.players[idx];
                let photo = input.photo.clone().unwrap_or_else(|| existing.photo.clone());
                let updated = build_player(input, existing.id.clone(), photo, existing.is_captain);
                debug!("Updated player {} ({})", updated.name, updated.id);
                self.players[idx] = updated.clone();
                Ok(updated)
            }
            None => {
                if let Some(id) = editing_id {
                    debug!("Edit target {id} no longer exists, creating a new player");
                }
                let photo = input
                    .photo
                    .clone()
                    .filter(|p| !p.is_empty())
                    .ok_or(RosterError::PhotoRequired)?;
                let created = build_player(input, generate_id(), photo, false);
                debug!("Created player {} ({})", created.name, created.id);
                self.players.insert(0, created.clone());
                Ok(created)
            }
        }
    }

    /// Delete the player with `id`. Returns whether a record was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }

    /// Set or clear a player's captain flag.
    ///
    /// Returns `false` (and leaves the roster untouched) when the player does
    /// not exist or when the change would put more than [`CAPTAIN_LIMIT`]
    /// captains on the roster.
    pub fn set_captain(&mut self, id: &str, desired: bool) -> bool {
        let Some(idx) = self.players.iter().position(|p| p.id == id) else {
            return false;
        };
        if self.players[idx].is_captain == desired {
            return true;
        }
        if desired && self.captain_count() >= CAPTAIN_LIMIT {
            debug!("Captain limit reached, rejecting captain for {id}");
            return false;
        }
        self.players[idx].is_captain = desired;
        true
    }

    /// Replace the whole collection.
    ///
    /// Records are kept in the given order. Duplicate ids are re-issued and
    /// captains beyond [`CAPTAIN_LIMIT`] are demoted, first come first kept.
    pub fn replace_all(&mut self, players: Vec<Player>) {
        let mut seen = HashSet::new();
        let mut captains = 0;
        let mut players = players;

        for player in &mut players {
            if !seen.insert(player.id.clone()) {
                let fresh = generate_id();
                warn!(
                    "Duplicate player id {} for {}, assigning {}",
                    player.id, player.name, fresh
                );
                player.id = fresh.clone();
                seen.insert(fresh);
            }
            if player.is_captain {
                if captains >= CAPTAIN_LIMIT {
                    warn!("Too many captains, demoting {}", player.name);
                    player.is_captain = false;
                } else {
                    captains += 1;
                }
            }
        }

        self.players = players;
    }
}

fn build_player(input: PlayerInput, id: String, photo: String, is_captain: bool) -> Player {
    let flag_id = input.flag_id.filter(|f| !f.is_empty());
    let flag_src = flag_id.as_deref().and_then(nationality::flag_src);
    Player {
        id,
        name: input.name.trim().to_string(),
        team: input.team.trim().to_string(),
        flag_id,
        nationality: None,
        flag_src,
        flag: None,
        photo,
        ski: input.ski,
        drnk: input.drnk,
        chaos: input.chaos,
        coord: input.coord,
        is_captain,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
