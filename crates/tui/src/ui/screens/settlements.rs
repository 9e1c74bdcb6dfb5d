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
        components::{card::Card, panel},
        theme::Theme,
    },
    view::{PanelView, settlements_view},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState) {
    let theme = Theme::default();
    let card = Card::new("Settlements", &theme);
    let view = settlements_view(&state.settlements);

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
            ListItem::new(Line::from(vec![
                Span::styled("→ ", Style::default().fg(theme.warning)),
                Span::styled(row.statement(), Style::default().fg(theme.text)),
            ]))
        })
        .collect::<Vec<_>>();

    card.render_with(frame, area, List::new(items));
}
