// Add/edit player overlay.
//
// One line per field with the focused field highlighted, followed by the
// photo hint from the app and any validation message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::form::{FormField, FormState};
use crate::widgets::confirm::centered_rect;

const FORM_WIDTH: u16 = 64;
/// Fields, a spacer, two hint lines, and borders.
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 5;

pub fn render(frame: &mut Frame, area: Rect, form: &FormState, photo_hint: &str) {
    let dialog_area = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let title = if form.editing.is_some() {
        " Edit Player "
    } else {
        " Add Player "
    };

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(form, field))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(" Photo: {photo_hint}"),
        Style::default().fg(Color::DarkGray),
    )));
    if let Some(hint) = form.hint.as_deref().filter(|h| *h != photo_hint) {
        lines.push(Line::from(Span::styled(
            format!(" {hint}"),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// One labelled field. The focused field gets a cursor (or selector arrows
/// for the nationality) and a highlighted value.
pub fn field_line(form: &FormState, field: FormField) -> Line<'static> {
    let focused = form.focus == field;
    let value = form.display(field);
    let value = match (field, focused) {
        (FormField::Nationality, true) => format!("< {value} >"),
        (_, true) => format!("{value}_"),
        _ => value,
    };

    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(
            format!(" {:>11}: ", field.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, value_style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_text;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn focused_field_shows_cursor() {
        let form = FormState {
            name: "Ada".into(),
            ..FormState::default()
        };
        assert_eq!(line_text(&field_line(&form, FormField::Name)), "        Name: Ada_");
        assert_eq!(line_text(&field_line(&form, FormField::Team)), "        Team: ");
    }

    #[test]
    fn focused_nationality_shows_arrows() {
        let form = FormState {
            focus: FormField::Nationality,
            nationality: Some(0),
            ..FormState::default()
        };
        assert_eq!(
            line_text(&field_line(&form, FormField::Nationality)),
            " Nationality: < United States >"
        );
    }

    #[test]
    fn titles_follow_mode() {
        let create = FormState::default();
        let text = render_text(80, 20, |frame| render(frame, frame.area(), &create, "Required for new players."));
        assert!(text.contains("Add Player"));
        assert!(text.contains("Required for new players."));

        let edit = FormState {
            editing: Some("a".into()),
            ..FormState::default()
        };
        let text = render_text(80, 20, |frame| {
            render(frame, frame.area(), &edit, "Leave blank to keep the current photo.")
        });
        assert!(text.contains("Edit Player"));
    }

    #[test]
    fn validation_hint_is_shown_once() {
        let form = FormState {
            hint: Some("Stats must be whole numbers.".into()),
            ..FormState::default()
        };
        let text = render_text(80, 20, |frame| render(frame, frame.area(), &form, "Required for new players."));
        assert!(text.contains("Stats must be whole numbers."));

        let rejected = FormState {
            hint: Some("Please add a photo to create a player.".into()),
            ..FormState::default()
        };
        let text = render_text(80, 20, |frame| {
            render(frame, frame.area(), &rejected, "Please add a photo to create a player.")
        });
        assert_eq!(text.matches("Please add a photo").count(), 1);
    }
}
