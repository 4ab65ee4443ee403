// Derived views over the player collection: captains, snake draft order,
// leaderboards, and card display rows.
//
// Every view is a pure function of the current players and is rebuilt on
// each snapshot. An empty source yields `View::Empty` with the hint to show
// in place of the rows.

use std::collections::HashMap;

use crate::nationality::{self, FlagDisplay};
use crate::player::Player;

pub const NO_CAPTAINS_HINT: &str = "No captains selected yet.";
pub const NO_DRAFT_ORDER_HINT: &str = "Select captains on the Roster tab to see the order.";
pub const NO_PLAYERS_RANKING_HINT: &str = "No players yet. Add players to see rankings.";
pub const NO_TEAMS_RANKING_HINT: &str = "No teams yet. Add players to see rankings.";
pub const NO_CARDS_HINT: &str = "No players yet. Add your first player!";

/// A derived list, or the placeholder to show when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<T> {
    Empty(&'static str),
    Ready(Vec<T>),
}

impl<T> View<T> {
    fn from_rows(rows: Vec<T>, hint: &'static str) -> Self {
        if rows.is_empty() {
            View::Empty(hint)
        } else {
            View::Ready(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            View::Empty(_) => &[],
            View::Ready(rows) => rows,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            View::Empty(hint) => Some(*hint),
            View::Ready(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, View::Empty(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptainEntry {
    pub id: String,
    pub name: String,
    pub team: String,
}

/// One pick in the draft order. `pick` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSlot {
    pub pick: usize,
    pub captain_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualRank {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub team: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRank {
    pub rank: usize,
    pub team: String,
    pub score: i64,
}

/// Display model for one player card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub id: String,
    pub name: String,
    pub team: String,
    pub rating: i64,
    pub flag: FlagDisplay,
    pub ski: i32,
    pub drnk: i32,
    pub chaos: i32,
    pub coord: i32,
    pub is_captain: bool,
    pub has_photo: bool,
}

/// Captains in collection order.
pub fn captains(players: &[Player]) -> View<CaptainEntry> {
    let rows = players
        .iter()
        .filter(|p| p.is_captain)
        .map(|p| CaptainEntry {
            id: p.id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
        })
        .collect();
    View::from_rows(rows, NO_CAPTAINS_HINT)
}

/// Snake draft order: captains forward, then the same captains reversed.
/// For captains `[A, B, C]` this is `[A, B, C, C, B, A]`.
pub fn draft_order(players: &[Player]) -> View<DraftSlot> {
    let names: Vec<&str> = players
        .iter()
        .filter(|p| p.is_captain)
        .map(|p| p.name.as_str())
        .collect();

    let rows = names
        .iter()
        .chain(names.iter().rev())
        .enumerate()
        .map(|(i, name)| DraftSlot {
            pick: i + 1,
            captain_name: name.to_string(),
        })
        .collect();
    View::from_rows(rows, NO_DRAFT_ORDER_HINT)
}

/// Players ranked by total score (descending), ties by name (ascending).
pub fn individual_leaderboard(players: &[Player]) -> View<IndividualRank> {
    let mut scored: Vec<(&Player, i64)> = players.iter().map(|p| (p, p.total_score())).collect();
    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score.cmp(a_score).then_with(|| a.name.cmp(&b.name))
    });

    let rows = scored
        .into_iter()
        .enumerate()
        .map(|(i, (p, score))| IndividualRank {
            rank: i + 1,
            id: p.id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
            score,
        })
        .collect();
    View::from_rows(rows, NO_PLAYERS_RANKING_HINT)
}

/// Teams ranked by the sum of their players' total scores (descending),
/// ties by team name (ascending).
pub fn team_leaderboard(players: &[Player]) -> View<TeamRank> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for p in players {
        *totals.entry(p.team.as_str()).or_insert(0) += p.total_score();
    }

    let mut teams: Vec<(&str, i64)> = totals.into_iter().collect();
    teams.sort_by(|(a, a_score), (b, b_score)| b_score.cmp(a_score).then_with(|| a.cmp(b)));

    let rows = teams
        .into_iter()
        .enumerate()
        .map(|(i, (team, score))| TeamRank {
            rank: i + 1,
            team: team.to_string(),
            score,
        })
        .collect();
    View::from_rows(rows, NO_TEAMS_RANKING_HINT)
}

/// Card rows in collection order.
pub fn player_cards(players: &[Player]) -> View<PlayerCard> {
    let rows = players
        .iter()
        .map(|p| PlayerCard {
            id: p.id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
            rating: p.average_rating(),
            flag: nationality::resolve_flag(p),
            ski: p.ski,
            drnk: p.drnk,
            chaos: p.chaos,
            coord: p.coord,
            is_captain: p.is_captain,
            has_photo: !p.photo.is_empty(),
        })
        .collect();
    View::from_rows(rows, NO_CARDS_HINT)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
