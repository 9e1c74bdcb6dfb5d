use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::{
    sync::LedgerState,
    ui::{
        components::{card::Card, money::standing_span, panel},
        theme::Theme,
    },
    view::{PanelView, balances_view},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState) {
    let theme = Theme::default();
    let card = Card::new("Balances", &theme);
    let view = balances_view(&state.balances);

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
                    Span::styled(format!("{:<16}", row.person), Style::default().fg(theme.text)),
                    standing_span(row.standing, &row.label, &theme),
                ]),
                Line::from(Span::styled(
                    format!("Paid: {} | Share: {}", row.paid, row.share),
                    Style::default().fg(theme.dim),
                )),
            ])
        })
        .collect::<Vec<_>>();

    card.render_with(frame, area, List::new(items));
}
