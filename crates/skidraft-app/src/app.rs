// Application state and orchestration logic.
//
// The app task owns `AppState`, applies `UserCommand`s from the UI one at a
// time, persists the roster after every mutation, and pushes a fresh
// `AppSnapshot` back to the UI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use skidraft_core::config::Config;
use skidraft_core::photo::{PhotoError, PhotoReader};
use skidraft_core::player::{Player, PlayerInput};
use skidraft_core::roster::{Roster, RosterError};
use skidraft_core::storage::{self, Storage, StorageError};
use skidraft_core::{views, CAPTAIN_LIMIT};

use crate::protocol::{
    AppSnapshot, EditPrefill, FormInput, Notice, TabId, UiUpdate, UserCommand,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CREATE_PHOTO_HINT: &str = "Required for new players.";
pub const EDIT_PHOTO_HINT: &str = "Leave blank to keep the current photo.";
pub const MISSING_PHOTO_HINT: &str = "Please add a photo to create a player.";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a form submission was not applied.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Photo(#[from] PhotoError),
}

impl SubmitError {
    /// Text shown next to the form's photo field.
    pub fn hint(&self) -> String {
        match self {
            SubmitError::Roster(RosterError::PhotoRequired) => MISSING_PHOTO_HINT.to_string(),
            SubmitError::Photo(e) => format!("Could not read photo: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub storage: Storage,
    /// Id of the player whose card is loaded into the form, if any.
    pub editing: Option<String>,
    pub active_tab: TabId,
    pub photo_hint: String,
    photo_reader: Arc<dyn PhotoReader>,
}

impl AppState {
    /// Create an AppState with an empty roster. Call
    /// [`recover_from_storage`] to load the saved roster.
    pub fn new(config: Config, storage: Storage, photo_reader: Arc<dyn PhotoReader>) -> Self {
        AppState {
            config,
            roster: Roster::new(),
            storage,
            editing: None,
            active_tab: TabId::Roster,
            photo_hint: CREATE_PHOTO_HINT.to_string(),
            photo_reader,
        }
    }

    /// Derive every view from the current roster.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let players = self.roster.players();
        AppSnapshot {
            cards: views::player_cards(players),
            captains: views::captains(players),
            draft_order: views::draft_order(players),
            individual_leaderboard: views::individual_leaderboard(players),
            team_leaderboard: views::team_leaderboard(players),
            player_count: players.len(),
            captain_count: self.roster.captain_count(),
            captain_limit: CAPTAIN_LIMIT,
            editing: self.editing.clone(),
            photo_hint: self.photo_hint.clone(),
            active_tab: self.active_tab,
        }
    }

    fn persist(&self) {
        self.storage.save(self.roster.players());
    }

    /// Apply a create/edit form. Reads the photo file (if any) first, then
    /// creates a player or updates the one being edited.
    pub async fn submit_form(&mut self, form: FormInput) -> Result<Player, SubmitError> {
        let photo = match &form.photo_path {
            Some(path) => self.photo_reader.read_data_url(path).await?,
            None => None,
        };

        let input = PlayerInput {
            name: form.name,
            team: form.team,
            flag_id: form.flag_id,
            photo,
            ski: form.ski,
            drnk: form.drnk,
            chaos: form.chaos,
            coord: form.coord,
        };

        let editing = self.editing.clone();
        let player = self.roster.add_or_update(input, editing.as_deref())?;
        info!(
            "{} player {} ({})",
            if editing.as_deref() == Some(player.id.as_str()) { "Updated" } else { "Added" },
            player.name,
            player.team
        );

        self.reset_edit_mode();
        self.persist();
        Ok(player)
    }

    /// Put the form into edit mode for `id`. Returns the values to prefill,
    /// or `None` if the player does not exist.
    pub fn start_edit(&mut self, id: &str) -> Option<EditPrefill> {
        let player = self.roster.get(id)?;
        let prefill = EditPrefill {
            id: player.id.clone(),
            name: player.name.clone(),
            team: player.team.clone(),
            flag_id: player.nationality_key().map(str::to_string),
            ski: player.ski,
            drnk: player.drnk,
            chaos: player.chaos,
            coord: player.coord,
        };
        self.editing = Some(prefill.id.clone());
        self.photo_hint = EDIT_PHOTO_HINT.to_string();
        Some(prefill)
    }

    pub fn reset_edit_mode(&mut self) {
        self.editing = None;
        self.photo_hint = CREATE_PHOTO_HINT.to_string();
    }

    /// Set a player's captain flag. Returns whether it was applied.
    pub fn set_captain(&mut self, id: &str, desired: bool) -> bool {
        let applied = self.roster.set_captain(id, desired);
        if applied {
            self.persist();
        }
        applied
    }

    /// Delete a player. Returns whether a record was removed.
    pub fn delete_player(&mut self, id: &str) -> bool {
        if !self.roster.remove(id) {
            return false;
        }
        if self.editing.as_deref() == Some(id) {
            self.reset_edit_mode();
        }
        self.persist();
        true
    }

    /// Replace the roster with the snapshot at `path`. On any error the
    /// current roster is left as it was.
    pub fn import_from(&mut self, path: &Path) -> Result<usize, StorageError> {
        let players = storage::import_from_file(path)?;
        self.roster.replace_all(players);
        if let Some(id) = self.editing.clone() {
            if self.roster.get(&id).is_none() {
                self.reset_edit_mode();
            }
        }
        self.persist();
        Ok(self.roster.len())
    }

    /// Write the roster to the configured export file.
    pub fn export(&self) -> Result<PathBuf, StorageError> {
        storage::export_to_file(
            self.roster.players(),
            Path::new(&self.config.export.directory),
            &self.config.export.file_name,
        )
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the app loop until `Quit` arrives or the command channel closes.
///
/// Sends an initial snapshot so the UI has something to draw, then one or
/// more updates per command.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::StateSnapshot(Box::new(snapshot))).await;
}

async fn send_notice(ui_tx: &mpsc::Sender<UiUpdate>, notice: Notice) {
    let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
}

/// Handle a user command from the UI.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SubmitForm(form) => match state.submit_form(*form).await {
            Ok(player) => {
                let _ = ui_tx.send(UiUpdate::FormAccepted).await;
                send_notice(ui_tx, Notice::info(format!("Saved {}", player.name))).await;
            }
            Err(e) => {
                warn!("Form submission rejected: {}", e);
                state.photo_hint = e.hint();
                let _ = ui_tx.send(UiUpdate::FormRejected(e.hint())).await;
            }
        },
        UserCommand::StartEdit(id) => match state.start_edit(&id) {
            Some(prefill) => {
                let _ = ui_tx.send(UiUpdate::EditStarted(Box::new(prefill))).await;
            }
            None => warn!("Cannot edit unknown player {}", id),
        },
        UserCommand::CancelEdit => {
            state.reset_edit_mode();
        }
        UserCommand::SetCaptain { id, desired } => {
            if !state.set_captain(&id, desired) {
                info!("Captain change for {} rejected", id);
                let known = state.roster.get(&id).is_some();
                let _ = ui_tx.send(UiUpdate::CaptainRejected { id }).await;
                if known {
                    send_notice(
                        ui_tx,
                        Notice::warning(format!("Only {CAPTAIN_LIMIT} captains allowed")),
                    )
                    .await;
                }
            }
        }
        UserCommand::DeletePlayer(id) => {
            if let Some(name) = state.roster.get(&id).map(|p| p.name.clone()) {
                state.delete_player(&id);
                info!("Deleted player {} ({})", name, id);
                send_notice(ui_tx, Notice::info(format!("Deleted {name}"))).await;
            }
        }
        UserCommand::Import(path) => match state.import_from(&path) {
            Ok(count) => {
                info!("Imported {} players from {}", count, path.display());
                send_notice(ui_tx, Notice::info(format!("Imported {count} players"))).await;
            }
            Err(e) => {
                warn!("Import from {} failed: {}", path.display(), e);
                send_notice(ui_tx, Notice::warning(format!("Import failed: {e}"))).await;
            }
        },
        UserCommand::Export => match state.export() {
            Ok(path) => {
                send_notice(
                    ui_tx,
                    Notice::info(format!("Exported to {}", path.display())),
                )
                .await;
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                send_notice(ui_tx, Notice::warning(format!("Export failed: {e}"))).await;
            }
        },
        UserCommand::SwitchTab(tab) => {
            state.active_tab = tab;
            info!("Switched to tab: {:?}", tab);
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }

    send_snapshot(state, ui_tx).await;
}

// ---------------------------------------------------------------------------
// Startup recovery
// ---------------------------------------------------------------------------

/// Load the saved roster into `state`. Returns the number of players loaded.
pub fn recover_from_storage(state: &mut AppState) -> usize {
    let players = state.storage.load();
    state.roster.replace_all(players);
    let count = state.roster.len();
    info!(
        "Restored {} players ({} captains) from slot {}",
        count,
        state.roster.captain_count(),
        state.storage.key()
    );
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::NoticeLevel;
    use async_trait::async_trait;
    use skidraft_core::config::{ExportConfig, LoggingConfig, StorageConfig};
    use skidraft_core::db::Database;

    const PHOTO: &str = "data:image/png;base64,AAAA";

    /// Returns a fixed photo for any path except ones named `missing*`.
    struct StubPhotoReader;

    #[async_trait]
    impl PhotoReader for StubPhotoReader {
        async fn read_data_url(&self, path: &Path) -> Result<Option<String>, PhotoError> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with("missing") {
                return Err(PhotoError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
            if name.starts_with("empty") {
                return Ok(None);
            }
            Ok(Some(PHOTO.to_string()))
        }
    }

    fn test_config(export_dir: &str) -> Config {
        Config {
            storage: StorageConfig {
                db_path: Some(":memory:".into()),
                key: "tahoeTripPlayers".into(),
            },
            export: ExportConfig {
                file_name: "tahoe-trip-players.json".into(),
                directory: export_dir.into(),
            },
            logging: LoggingConfig::default(),
        }
    }

    fn test_state() -> AppState {
        let storage = Storage::new(Database::open(":memory:").unwrap(), "tahoeTripPlayers");
        AppState::new(test_config("."), storage, Arc::new(StubPhotoReader))
    }

    fn form(name: &str, team: &str, photo: Option<&str>) -> FormInput {
        FormInput {
            name: name.into(),
            team: team.into(),
            flag_id: Some("canada".into()),
            ski: 10,
            drnk: 20,
            chaos: 30,
            coord: 40,
            photo_path: photo.map(PathBuf::from),
        }
    }

    #[tokio::test]
    async fn submit_creates_and_persists() {
        let mut state = test_state();
        let player = state
            .submit_form(form("Ada", "Moguls", Some("ada.png")))
            .await
            .unwrap();
        assert_eq!(player.photo, PHOTO);
        assert_eq!(state.roster.len(), 1);
        assert_eq!(state.storage.load(), state.roster.players());
    }

    #[tokio::test]
    async fn submit_without_photo_is_rejected() {
        let mut state = test_state();
        let err = state
            .submit_form(form("Ada", "Moguls", None))
            .await
            .unwrap_err();
        assert_eq!(err.hint(), MISSING_PHOTO_HINT);
        assert!(state.roster.is_empty());
        assert!(state.storage.load().is_empty());
    }

    #[tokio::test]
    async fn submit_with_empty_photo_file_is_rejected() {
        let mut state = test_state();
        let err = state
            .submit_form(form("Ada", "Moguls", Some("empty.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Roster(RosterError::PhotoRequired)));
    }

    #[tokio::test]
    async fn unreadable_photo_is_rejected_with_hint() {
        let mut state = test_state();
        let err = state
            .submit_form(form("Ada", "Moguls", Some("missing.png")))
            .await
            .unwrap_err();
        assert!(err.hint().starts_with("Could not read photo"));
        assert!(state.roster.is_empty());
    }

    #[tokio::test]
    async fn edit_flow_preserves_identity_and_resets_mode() {
        let mut state = test_state();
        let created = state
            .submit_form(form("Ada", "Moguls", Some("ada.png")))
            .await
            .unwrap();
        assert!(state.set_captain(&created.id, true));

        let prefill = state.start_edit(&created.id).unwrap();
        assert_eq!(prefill.name, "Ada");
        assert_eq!(prefill.flag_id.as_deref(), Some("canada"));
        assert_eq!(state.editing.as_deref(), Some(created.id.as_str()));
        assert_eq!(state.photo_hint, EDIT_PHOTO_HINT);

        let updated = state
            .submit_form(form("Ada Lovelace", "Moguls", None))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.photo, created.photo);
        assert!(updated.is_captain);
        assert_eq!(updated.name, "Ada Lovelace");
        assert!(state.editing.is_none());
        assert_eq!(state.photo_hint, CREATE_PHOTO_HINT);
        assert_eq!(state.roster.len(), 1);
    }

    #[test]
    fn start_edit_unknown_is_none() {
        let mut state = test_state();
        assert!(state.start_edit("nope").is_none());
        assert!(state.editing.is_none());
    }

    #[tokio::test]
    async fn deleting_edited_player_resets_edit_mode() {
        let mut state = test_state();
        let p = state
            .submit_form(form("Ada", "Moguls", Some("ada.png")))
            .await
            .unwrap();
        state.start_edit(&p.id);
        assert!(state.delete_player(&p.id));
        assert!(state.editing.is_none());
        assert!(state.storage.load().is_empty());
        assert!(!state.delete_player(&p.id));
    }

    #[tokio::test]
    async fn rejected_captain_is_not_persisted() {
        let mut state = test_state();
        let mut ids = Vec::new();
        for i in 0..4 {
            let p = state
                .submit_form(form(&format!("P{i}"), "T", Some("p.png")))
                .await
                .unwrap();
            ids.push(p.id);
        }
        for id in &ids[..3] {
            assert!(state.set_captain(id, true));
        }
        assert!(!state.set_captain(&ids[3], true));
        let saved = state.storage.load();
        assert_eq!(saved.iter().filter(|p| p.is_captain).count(), 3);
    }

    #[tokio::test]
    async fn snapshot_reflects_roster() {
        let mut state = test_state();
        let empty = state.build_snapshot();
        assert!(empty.cards.is_empty());
        assert!(empty.draft_order.is_empty());
        assert_eq!(empty.captain_limit, CAPTAIN_LIMIT);

        let p = state
            .submit_form(form("Ada", "Moguls", Some("ada.png")))
            .await
            .unwrap();
        state.set_captain(&p.id, true);
        let snap = state.build_snapshot();
        assert_eq!(snap.player_count, 1);
        assert_eq!(snap.captain_count, 1);
        assert_eq!(snap.draft_order.rows().len(), 2);
        assert_eq!(snap.individual_leaderboard.rows()[0].score, 100);
        assert_eq!(snap.team_leaderboard.rows()[0].team, "Moguls");
    }

    #[tokio::test]
    async fn export_and_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(Database::open(":memory:").unwrap(), "k");
        let mut state = AppState::new(
            test_config(dir.path().to_str().unwrap()),
            storage,
            Arc::new(StubPhotoReader),
        );
        for name in ["Ada", "Bo"] {
            state
                .submit_form(form(name, "Moguls", Some("p.png")))
                .await
                .unwrap();
        }
        let before = state.roster.players().to_vec();
        let path = state.export().unwrap();
        assert_eq!(path, dir.path().join("tahoe-trip-players.json"));

        state.delete_player(&before[0].id);
        assert_eq!(state.import_from(&path).unwrap(), 2);
        assert_eq!(state.roster.players(), before.as_slice());
        assert_eq!(state.storage.load(), before);
    }

    #[tokio::test]
    async fn failed_import_leaves_roster_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"not": "a list"}"#).unwrap();

        let mut state = test_state();
        state
            .submit_form(form("Ada", "Moguls", Some("p.png")))
            .await
            .unwrap();
        let before = state.roster.clone();
        assert!(matches!(state.import_from(&bad), Err(StorageError::NotAList)));
        assert_eq!(state.roster, before);
    }

    #[test]
    fn recover_loads_saved_players() {
        let mut state = test_state();
        state.storage.db().save_slot("tahoeTripPlayers", "garbage").unwrap();
        assert_eq!(recover_from_storage(&mut state), 0);

        state
            .storage
            .db()
            .save_slot(
                "tahoeTripPlayers",
                r#"[{"id": "a", "name": "Ada", "team": "Moguls", "isCaptain": true}]"#,
            )
            .unwrap();
        assert_eq!(recover_from_storage(&mut state), 1);
        assert_eq!(state.roster.captain_count(), 1);
    }

    #[tokio::test]
    async fn handle_command_sends_snapshot_after_each_command() {
        let mut state = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(&mut state, UserCommand::SwitchTab(TabId::Draft), &ui_tx).await;
        match ui_rx.recv().await {
            Some(UiUpdate::StateSnapshot(snap)) => assert_eq!(snap.active_tab, TabId::Draft),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_rejected_captain_reports_id() {
        let mut state = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(
            &mut state,
            UserCommand::SetCaptain {
                id: "ghost".into(),
                desired: true,
            },
            &ui_tx,
        )
        .await;
        assert_eq!(
            ui_rx.recv().await,
            Some(UiUpdate::CaptainRejected { id: "ghost".into() })
        );
        // No captain-limit notice for a player that does not exist
        match ui_rx.recv().await {
            Some(UiUpdate::StateSnapshot(_)) => {}
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_captain_over_limit_warns() {
        let mut state = test_state();
        let mut ids = Vec::new();
        for i in 0..4 {
            let p = state
                .submit_form(form(&format!("P{i}"), "T", Some("p.png")))
                .await
                .unwrap();
            ids.push(p.id);
        }
        for id in &ids[..3] {
            assert!(state.set_captain(id, true));
        }
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(
            &mut state,
            UserCommand::SetCaptain {
                id: ids[3].clone(),
                desired: true,
            },
            &ui_tx,
        )
        .await;
        assert_eq!(
            ui_rx.recv().await,
            Some(UiUpdate::CaptainRejected { id: ids[3].clone() })
        );
        match ui_rx.recv().await {
            Some(UiUpdate::Notice(notice)) => {
                assert_eq!(notice.level, NoticeLevel::Warning);
                assert_eq!(notice.text, "Only 3 captains allowed");
            }
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_rejected_form_sets_hint() {
        let mut state = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(
            &mut state,
            UserCommand::SubmitForm(Box::new(form("Ada", "Moguls", None))),
            &ui_tx,
        )
        .await;
        assert_eq!(
            ui_rx.recv().await,
            Some(UiUpdate::FormRejected(MISSING_PHOTO_HINT.into()))
        );
        match ui_rx.recv().await {
            Some(UiUpdate::StateSnapshot(snap)) => {
                assert_eq!(snap.photo_hint, MISSING_PHOTO_HINT)
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }
}
