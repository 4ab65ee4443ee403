// Message types exchanged between the app task and the UI task.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use skidraft_core::views::{CaptainEntry, DraftSlot, IndividualRank, PlayerCard, TeamRank, View};

/// Top-level panels of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Roster,
    Draft,
    Leaderboard,
}

/// Raw create/edit form contents as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub team: String,
    pub flag_id: Option<String>,
    pub ski: i32,
    pub drnk: i32,
    pub chaos: i32,
    pub coord: i32,
    /// Image file to embed. `None` keeps the current photo when editing.
    pub photo_path: Option<PathBuf>,
}

/// Commands sent from the UI to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SubmitForm(Box<FormInput>),
    StartEdit(String),
    CancelEdit,
    SetCaptain { id: String, desired: bool },
    /// Delete a player. The UI collects confirmation before sending this.
    DeletePlayer(String),
    Import(PathBuf),
    Export,
    SwitchTab(TabId),
    Quit,
}

/// Current values of a player, used to fill the form when editing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrefill {
    pub id: String,
    pub name: String,
    pub team: String,
    pub flag_id: Option<String>,
    pub ski: i32,
    pub drnk: i32,
    pub chaos: i32,
    pub coord: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A one-line status message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
            at: Local::now(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// Every derived view plus the form state, rebuilt after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub cards: View<PlayerCard>,
    pub captains: View<CaptainEntry>,
    pub draft_order: View<DraftSlot>,
    pub individual_leaderboard: View<IndividualRank>,
    pub team_leaderboard: View<TeamRank>,
    pub player_count: usize,
    pub captain_count: usize,
    pub captain_limit: usize,
    /// Id of the player being edited, if the form is in edit mode.
    pub editing: Option<String>,
    pub photo_hint: String,
    pub active_tab: TabId,
}

/// Updates sent from the app to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    EditStarted(Box<EditPrefill>),
    /// The submitted form was applied; the UI may clear it.
    FormAccepted,
    /// The submitted form was not applied; the hint explains why.
    FormRejected(String),
    /// A captain toggle was refused; the UI should revert its checkbox.
    CaptainRejected { id: String },
    Notice(Notice),
}
