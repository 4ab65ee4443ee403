// Leaderboard tab: individual ranking on the left, team ranking on the right.
//
// Rank 1 is bold yellow in both tables.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::layout::split_columns;
use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (left, right) = split_columns(area, 60);
    render_individual(frame, left, state);
    render_teams(frame, right, state);
}

fn render_individual(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Players");
    if let Some(hint) = state.individual_leaderboard.hint() {
        frame.render_widget(hint_paragraph(hint, block), area);
        return;
    }

    let rows: Vec<Row> = state
        .individual_leaderboard
        .rows()
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.rank.to_string()),
                Cell::from(r.name.clone()),
                Cell::from(r.team.clone()),
                Cell::from(r.score.to_string()),
            ])
            .style(rank_style(r.rank))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Min(12),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["#", "Name", "Team", "Score"]))
        .block(block);
    frame.render_widget(table, area);
}

fn render_teams(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Teams");
    if let Some(hint) = state.team_leaderboard.hint() {
        frame.render_widget(hint_paragraph(hint, block), area);
        return;
    }

    let rows: Vec<Row> = state
        .team_leaderboard
        .rows()
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.rank.to_string()),
                Cell::from(r.team.clone()),
                Cell::from(r.score.to_string()),
            ])
            .style(rank_style(r.rank))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["#", "Team", "Score"]))
        .block(block);
    frame.render_widget(table, area);
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|l| Cell::from(*l))).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint_paragraph<'a>(hint: &'a str, block: Block<'a>) -> Paragraph<'a> {
    Paragraph::new(format!("  {hint}"))
        .style(Style::default().fg(Color::DarkGray))
        .block(block)
}

/// Row style for a 1-based rank.
pub fn rank_style(rank: usize) -> Style {
    if rank == 1 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
