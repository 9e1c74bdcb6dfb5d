use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::{Focus, UiState},
    sync::LedgerState,
    ui::{
        components::{card::Card, money::amount_span, panel},
        theme::Theme,
    },
    view::{PanelView, expenses_view},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, ui: &UiState) {
    let theme = Theme::default();
    let card = Card::new("Recent Expenses", &theme).focused(ui.focus == Focus::Expenses);
    let view = expenses_view(&state.expenses, ui.timezone);

    if let Some(placeholder) = panel::placeholder(&view, &theme) {
        card.render_with(frame, area, placeholder);
        return;
    }
    let PanelView::Rows(rows) = view else {
        return;
    };

    let items = rows
        .iter()
        .map(|row| {
            ListItem::new(vec![
                Line::from(vec![
                    amount_span(&row.amount, &theme),
                    Span::raw("  "),
                    Span::styled(row.description.clone(), Style::default().fg(theme.text)),
                ]),
                Line::from(vec![
                    Span::styled("Paid by ", Style::default().fg(theme.dim)),
                    Span::styled(row.paid_by.clone(), Style::default().fg(theme.text_muted)),
                    Span::styled(format!("  {}", row.created), Style::default().fg(theme.dim)),
                ]),
            ])
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if ui.focus == Focus::Expenses {
        list_state.select(Some(ui.selected.min(rows.len().saturating_sub(1))));
    }

    let list = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
