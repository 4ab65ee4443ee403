// Help bar: key hints for the current input mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::Mode;

pub fn render(frame: &mut Frame, area: Rect, mode: Mode) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(mode),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => {
            " 1-3:Tabs | j/k:Select | a:Add | e:Edit | d:Delete | c/Space:Captain | i:Import | x:Export | q:Quit"
        }
        Mode::Form => " Tab/↓:Next | Shift+Tab/↑:Prev | ←/→:Nationality | Enter:Save | Esc:Cancel",
        Mode::ConfirmDelete | Mode::ConfirmQuit => " y:Confirm | n/Esc:Cancel",
        Mode::ImportPrompt => " Type a file path | Enter:Import | Esc:Cancel",
    }
}
