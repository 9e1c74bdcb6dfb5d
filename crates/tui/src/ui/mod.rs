pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{Focus, UiState},
    sync::{Connection, LedgerState},
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &LedgerState, ui: &UiState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, stat cards, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, ui, &theme);
    screens::overview::render(frame, layout[1], state);
    render_content(frame, layout[2], state, ui);
    render_bottom_bar(frame, layout[3], ui, &theme);

    if let Some(pending) = &ui.pending_delete {
        components::confirm::render(frame, area, &pending.description, &theme);
    }
    components::toast::render(frame, area, state.toast.current(), &theme);
}

fn render_content(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, ui: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(cols[0]);
    screens::form::render(frame, left[0], state, ui);
    screens::expenses::render(frame, left[1], state, ui);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(cols[1]);
    screens::balances::render(frame, right[0], state);
    screens::settlements::render(frame, right[1], state);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &LedgerState,
    ui: &UiState,
    theme: &Theme,
) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.with_timezone(&ui.timezone).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = match state.connection {
        Connection::Probing => ("...", Style::default().fg(theme.warning)),
        Connection::Online => ("OK", Style::default().fg(theme.positive)),
        Connection::Unreachable => ("ERR", Style::default().fg(theme.error)),
    };

    let line = Line::from(vec![
        Span::styled("Split App", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", ui.base_url)),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, ui: &UiState, theme: &Theme) {
    use components::hints::{common, hint_separator, hints_to_spans};

    let typing = ui.focus == Focus::Form && ui.pending_delete.is_none();
    let context = if ui.pending_delete.is_some() {
        common::confirm()
    } else if typing {
        common::form()
    } else {
        common::list()
    };

    let mut parts = hints_to_spans(&context, theme);
    parts.push(hint_separator(theme));
    let captures_keys = typing || ui.pending_delete.is_some();
    parts.extend(hints_to_spans(&common::quit(captures_keys), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
