// Notice bar: the latest status message from the app, with its time.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use skidraft_app::protocol::{Notice, NoticeLevel};

pub fn render(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        Some(notice) => Line::from(vec![
            Span::styled(
                format!(" {} ", notice.at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(notice.text.clone(), Style::default().fg(level_color(notice.level))),
        ]),
        None => Line::raw(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
    }
}
