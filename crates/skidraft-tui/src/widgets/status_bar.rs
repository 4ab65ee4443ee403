// Status bar widget: tab bar, player and captain counts, edit indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use skidraft_app::protocol::TabId;

use crate::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [tab bar] | players | captains n/limit [| editing]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(tab_spans(state.active_tab));

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("Players {}", state.player_count),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("Captains {}/{}", state.captain_count, state.captain_limit),
        captain_style(state.captain_count, state.captain_limit),
    ));

    if state.editing.is_some() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled("Editing", Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Captain counter turns yellow once every captain slot is taken.
pub fn captain_style(count: usize, limit: usize) -> Style {
    if count >= limit {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Build tab indicator spans with the active tab highlighted.
/// E.g. "[1:Roster] [2:Draft] [3:Leaderboard]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [
        (TabId::Roster, "1:Roster"),
        (TabId::Draft, "2:Draft"),
        (TabId::Leaderboard, "3:Leaderboard"),
    ];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_text;

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(TabId::Draft);
        // 0=[1:Roster], 1=" ", 2=[2:Draft]
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_spans_contain_labels() {
        let spans = tab_spans(TabId::Roster);
        let labels: Vec<&str> = spans
            .iter()
            .step_by(2)
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(labels, vec!["[1:Roster]", "[2:Draft]", "[3:Leaderboard]"]);
    }

    #[test]
    fn captain_style_at_limit() {
        assert_eq!(captain_style(3, 3).fg, Some(Color::Yellow));
        assert_eq!(captain_style(2, 3).fg, Some(Color::White));
    }

    #[test]
    fn render_shows_counts() {
        let mut state = ViewState::default();
        state.player_count = 5;
        state.captain_count = 2;
        state.editing = Some("a".into());
        let text = render_text(100, 1, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("Players 5"));
        assert!(text.contains("Captains 2/3"));
        assert!(text.contains("Editing"));
    }
}
