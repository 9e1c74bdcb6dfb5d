use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// Modal asking whether the selected expense should really go.
pub fn render(frame: &mut Frame<'_>, area: Rect, description: &str, theme: &Theme) {
    let width = area.width.saturating_sub(4).clamp(20, 56);
    let rect = centered_box(width, 7, area);

    let block = Block::default()
        .title(Span::styled(
            " Delete expense ",
            Style::default().fg(theme.warning),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.surface));

    let lines = vec![
        Line::from(format!("Delete \"{description}\"?")),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" delete   "),
            Span::styled(
                "n/Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" keep"),
        ]),
    ];

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(theme.text))
        .block(block);

    frame.render_widget(Clear, rect);
    frame.render_widget(content, rect);
}

pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
