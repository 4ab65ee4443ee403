// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app, or
// into local ViewState mutations (selection, mode changes, form editing).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use skidraft_app::protocol::{TabId, UserCommand};

use crate::form::{FormField, FormState};
use crate::{Mode, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app. Returns `None` when the key was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match view_state.mode {
        Mode::Normal => handle_normal(key_event, view_state),
        Mode::Form => handle_form(key_event, view_state),
        Mode::ConfirmDelete => handle_confirm_delete(key_event, view_state),
        Mode::ConfirmQuit => handle_confirm_quit(key_event, view_state),
        Mode::ImportPrompt => handle_import_prompt(key_event, view_state),
    }
}

fn handle_normal(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('1') => switch_tab(view_state, TabId::Roster),
        KeyCode::Char('2') => switch_tab(view_state, TabId::Draft),
        KeyCode::Char('3') => switch_tab(view_state, TabId::Leaderboard),

        KeyCode::Down | KeyCode::Char('j') => {
            let len = view_state.cards.rows().len();
            if view_state.selected + 1 < len {
                view_state.selected += 1;
            }
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }

        KeyCode::Char('a') => {
            view_state.form = FormState::default();
            view_state.mode = Mode::Form;
            // Drop any edit the app still holds so the form is in create mode
            Some(UserCommand::CancelEdit)
        }
        KeyCode::Char('e') => roster_target(view_state).map(UserCommand::StartEdit),
        KeyCode::Char('d') => {
            let id = roster_target(view_state)?;
            view_state.pending_delete = Some(id);
            view_state.mode = Mode::ConfirmDelete;
            None
        }
        KeyCode::Char('c') | KeyCode::Char(' ') => {
            if view_state.active_tab != TabId::Roster {
                return None;
            }
            let card = view_state.selected_card()?;
            Some(UserCommand::SetCaptain {
                id: card.id.clone(),
                desired: !card.is_captain,
            })
        }

        KeyCode::Char('i') => {
            view_state.import_path.clear();
            view_state.mode = Mode::ImportPrompt;
            None
        }
        KeyCode::Char('x') => Some(UserCommand::Export),

        KeyCode::Esc => {
            view_state.notice = None;
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.mode = Mode::ConfirmQuit;
            None
        }

        _ => None,
    }
}

fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    view_state.active_tab = tab;
    Some(UserCommand::SwitchTab(tab))
}

/// Id of the selected card, only while the Roster tab is showing it.
fn roster_target(view_state: &ViewState) -> Option<String> {
    if view_state.active_tab != TabId::Roster {
        return None;
    }
    view_state.selected_card().map(|c| c.id.clone())
}

/// Keys while the add/edit overlay is open.
///
/// Tab/Down and BackTab/Up move focus, Left/Right cycle the nationality
/// selector, Enter submits, Esc cancels.
fn handle_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if key_event.code == KeyCode::Esc {
        view_state.form = FormState::default();
        view_state.mode = Mode::Normal;
        return Some(UserCommand::CancelEdit);
    }

    let form = &mut view_state.form;
    match key_event.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            None
        }
        KeyCode::Left if form.focus == FormField::Nationality => {
            form.cycle_nationality(false);
            None
        }
        KeyCode::Right if form.focus == FormField::Nationality => {
            form.cycle_nationality(true);
            None
        }
        KeyCode::Enter => match form.to_input() {
            Ok(input) => {
                form.hint = None;
                Some(UserCommand::SubmitForm(Box::new(input)))
            }
            Err(hint) => {
                form.hint = Some(hint);
                None
            }
        },
        KeyCode::Backspace => {
            let focus = form.focus;
            if let Some(text) = form.text_mut(focus) {
                text.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            let focus = form.focus;
            if let Some(text) = form.text_mut(focus) {
                text.push(c);
            }
            None
        }
        _ => None,
    }
}

fn handle_confirm_delete(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.mode = Mode::Normal;
            view_state.pending_delete.take().map(UserCommand::DeletePlayer)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.mode = Mode::Normal;
            view_state.pending_delete = None;
            None
        }
        _ => None,
    }
}

/// `y` or `q` confirms, `n` or Esc cancels, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}

fn handle_import_prompt(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = Mode::Normal;
            view_state.import_path.clear();
            None
        }
        KeyCode::Enter => {
            let path = view_state.import_path.trim().to_string();
            if path.is_empty() {
                return None;
            }
            view_state.mode = Mode::Normal;
            view_state.import_path.clear();
            Some(UserCommand::Import(PathBuf::from(path)))
        }
        KeyCode::Backspace => {
            view_state.import_path.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.import_path.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
