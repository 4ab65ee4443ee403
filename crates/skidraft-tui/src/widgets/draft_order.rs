// Draft tab: captains on the left, snake draft order on the right.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use skidraft_core::views::CaptainEntry;

use crate::layout::split_columns;
use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (left, right) = split_columns(area, 40);

    let captains_title = format!("Captains ({}/{})", state.captain_count, state.captain_limit);
    let captains: Vec<ListItem> = state
        .captains
        .rows()
        .iter()
        .map(|c| ListItem::new(format_captain(c)))
        .collect();
    render_list(frame, left, captains_title, captains, state.captains.hint());

    let picks: Vec<ListItem> = state
        .draft_order
        .rows()
        .iter()
        .map(|slot| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", slot.pick),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    slot.captain_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();
    render_list(
        frame,
        right,
        "Draft Order".to_string(),
        picks,
        state.draft_order.hint(),
    );
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: String,
    items: Vec<ListItem>,
    hint: Option<&str>,
) {
    let block = Block::default().borders(Borders::ALL).title(title);
    match hint {
        Some(hint) => {
            let paragraph = Paragraph::new(format!("  {hint}"))
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        None => frame.render_widget(List::new(items).block(block), area),
    }
}

/// "Name (Team)" line for the captains list.
pub fn format_captain(captain: &CaptainEntry) -> String {
    format!("{} ({})", captain.name, captain.team)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
