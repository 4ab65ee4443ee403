// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): tabs, counts                 |
// +--------------------------------------------------+
// | Main Panel (fill): active tab                    |
// |   Draft:       Captains (40%) | Draft Order      |
// |   Leaderboard: Players (60%)  | Teams            |
// +--------------------------------------------------+
// | Notice Bar (1 row)                               |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Latest notice from the app.
    pub notice_bar: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // notice bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        notice_bar: vertical[2],
        help_bar: vertical[3],
    }
}

/// Split a panel into side-by-side columns, the left one taking
/// `left_percent` of the width.
pub fn split_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent.min(100)),
        ])
        .split(area);
    (columns[0], columns[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
