// Player cards widget: the roster as a selectable table.
//
// Columns: captain checkbox, flag, name, team, rating, the four stats,
// photo marker. Captain rows are yellow; the selected row is highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use skidraft_core::views::PlayerCard;

use crate::ViewState;

const HEADERS: [&str; 10] = [
    "Capt", "Flag", "Name", "Team", "Rtg", "SKI", "DRNK", "CHAOS", "COORD", "Photo",
];

/// Render the roster cards into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Roster ({})", state.player_count));

    if let Some(hint) = state.cards.hint() {
        let paragraph = Paragraph::new(format!("  {hint}"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .cards
        .rows()
        .iter()
        .map(|card| {
            let style = if card.is_captain {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(card_cells(card).into_iter().map(Cell::from)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Min(14),
        Constraint::Min(12),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Checkbox text for the captain column.
pub fn captain_mark(is_captain: bool) -> &'static str {
    if is_captain {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Cell text for one card, in `HEADERS` order.
pub fn card_cells(card: &PlayerCard) -> Vec<String> {
    vec![
        captain_mark(card.is_captain).to_string(),
        card.flag.text().to_string(),
        card.name.clone(),
        card.team.clone(),
        card.rating.to_string(),
        card.ski.to_string(),
        card.drnk.to_string(),
        card.chaos.to_string(),
        card.coord.to_string(),
        if card.has_photo { "yes" } else { "-" }.to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{card, render_text};
    use skidraft_core::nationality::FlagDisplay;
    use skidraft_core::views::{View, NO_CARDS_HINT};

    #[test]
    fn captain_mark_values() {
        assert_eq!(captain_mark(true), "[x]");
        assert_eq!(captain_mark(false), "[ ]");
    }

    #[test]
    fn card_cells_follow_header_order() {
        let mut c = card("a", "Ada", true);
        c.flag = FlagDisplay::Glyph("🏔️".into());
        c.has_photo = false;
        let cells = card_cells(&c);
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(
            cells,
            vec!["[x]", "🏔️", "Ada", "Moguls", "50", "40", "50", "60", "50", "-"]
        );
    }

    #[test]
    fn empty_roster_shows_hint() {
        let state = ViewState::default();
        let text = render_text(80, 6, |frame| render(frame, frame.area(), &state));
        assert!(text.contains(NO_CARDS_HINT));
    }

    #[test]
    fn cards_render_names() {
        let mut state = ViewState::default();
        state.cards = View::Ready(vec![card("a", "Ada", true), card("b", "Bo", false)]);
        state.player_count = 2;
        state.selected = 1;
        let text = render_text(100, 8, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("Roster (2)"));
        assert!(text.contains("Ada"));
        assert!(text.contains("Bo"));
    }
}
