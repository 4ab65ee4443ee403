// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the app's latest `AppSnapshot`
// plus purely local state (selection, mode, form contents). The app task
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod form;
pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use skidraft_app::app::CREATE_PHOTO_HINT;
use skidraft_app::protocol::{AppSnapshot, Notice, TabId, UiUpdate, UserCommand};
use skidraft_core::views::{
    CaptainEntry, DraftSlot, IndividualRank, PlayerCard, TeamRank, View, NO_CAPTAINS_HINT,
    NO_CARDS_HINT, NO_DRAFT_ORDER_HINT, NO_PLAYERS_RANKING_HINT, NO_TEAMS_RANKING_HINT,
};
use skidraft_core::CAPTAIN_LIMIT;

use form::FormState;
use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// The add/edit overlay has focus.
    Form,
    /// Waiting for y/n on deleting `ViewState::pending_delete`.
    ConfirmDelete,
    ConfirmQuit,
    /// Typing the path of a file to import.
    ImportPrompt,
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Snapshot fields are replaced wholesale on every `StateSnapshot`; the rest
/// is owned by the TUI and survives snapshots.
pub struct ViewState {
    pub cards: View<PlayerCard>,
    pub captains: View<CaptainEntry>,
    pub draft_order: View<DraftSlot>,
    pub individual_leaderboard: View<IndividualRank>,
    pub team_leaderboard: View<TeamRank>,
    pub player_count: usize,
    pub captain_count: usize,
    pub captain_limit: usize,
    /// Id of the player the app has in edit mode.
    pub editing: Option<String>,
    pub photo_hint: String,
    pub active_tab: TabId,
    /// Index of the highlighted card on the Roster tab.
    pub selected: usize,
    pub mode: Mode,
    pub form: FormState,
    pub pending_delete: Option<String>,
    pub import_path: String,
    /// Most recent status message from the app.
    pub notice: Option<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            cards: View::Empty(NO_CARDS_HINT),
            captains: View::Empty(NO_CAPTAINS_HINT),
            draft_order: View::Empty(NO_DRAFT_ORDER_HINT),
            individual_leaderboard: View::Empty(NO_PLAYERS_RANKING_HINT),
            team_leaderboard: View::Empty(NO_TEAMS_RANKING_HINT),
            player_count: 0,
            captain_count: 0,
            captain_limit: CAPTAIN_LIMIT,
            editing: None,
            photo_hint: CREATE_PHOTO_HINT.to_string(),
            active_tab: TabId::Roster,
            selected: 0,
            mode: Mode::Normal,
            form: FormState::default(),
            pending_delete: None,
            import_path: String::new(),
            notice: None,
        }
    }
}

impl ViewState {
    /// Apply a full state snapshot from the app.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.cards = snapshot.cards;
        self.captains = snapshot.captains;
        self.draft_order = snapshot.draft_order;
        self.individual_leaderboard = snapshot.individual_leaderboard;
        self.team_leaderboard = snapshot.team_leaderboard;
        self.player_count = snapshot.player_count;
        self.captain_count = snapshot.captain_count;
        self.captain_limit = snapshot.captain_limit;
        self.editing = snapshot.editing;
        self.photo_hint = snapshot.photo_hint;
        self.active_tab = snapshot.active_tab;

        // Keep the selection on a real row after deletes and imports
        let len = self.cards.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// The card under the selection cursor, if any.
    pub fn selected_card(&self) -> Option<&PlayerCard> {
        self.cards.rows().get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::EditStarted(prefill) => {
            state.form = FormState::from_prefill(&prefill);
            state.mode = Mode::Form;
        }
        UiUpdate::FormAccepted => {
            state.form = FormState::default();
            if state.mode == Mode::Form {
                state.mode = Mode::Normal;
            }
        }
        UiUpdate::FormRejected(hint) => {
            state.form.hint = Some(hint);
        }
        UiUpdate::CaptainRejected { id } => {
            // The snapshot that follows carries the unchanged flag
            debug!("Captain toggle for {} rejected", id);
        }
        UiUpdate::Notice(notice) => {
            state.notice = Some(notice);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame, including any active overlay.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Roster => widgets::cards::render(frame, layout.main_panel, state),
        TabId::Draft => widgets::draft_order::render(frame, layout.main_panel, state),
        TabId::Leaderboard => widgets::leaderboard::render(frame, layout.main_panel, state),
    }
    widgets::notice_bar::render(frame, layout.notice_bar, state.notice.as_ref());
    widgets::help_bar::render(frame, layout.help_bar, state.mode);

    match state.mode {
        Mode::Normal => {}
        Mode::Form => widgets::player_form::render(frame, area, &state.form, &state.photo_hint),
        Mode::ConfirmDelete => {
            let name = state
                .pending_delete
                .as_deref()
                .and_then(|id| state.cards.rows().iter().find(|c| c.id == id))
                .map(|c| c.name.as_str())
                .unwrap_or("player");
            widgets::confirm::render(frame, area, " Delete? ", &format!("Delete {name}?"));
        }
        Mode::ConfirmQuit => {
            widgets::confirm::render(frame, area, " Quit? ", "Really quit?");
        }
        Mode::ImportPrompt => {
            widgets::confirm::render_prompt(frame, area, " Import file ", &state.import_path);
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input, and render ticks until the user
/// quits or the app closes the update channel.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
