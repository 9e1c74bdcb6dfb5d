use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    sync::LedgerState,
    ui::{components::card::StatCard, theme::Theme},
    view::stats_view,
};

/// Four headline counters across the top of the dashboard.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState) {
    let theme = Theme::default();
    let stats = stats_view(&state.stats);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    StatCard::new("Total Expenses", &stats.expense_count, &theme).render(frame, cols[0]);
    StatCard::new("Total Amount", &stats.total_amount, &theme).render(frame, cols[1]);
    StatCard::new("People", &stats.distinct_payers, &theme).render(frame, cols[2]);
    StatCard::new("Settlements", &stats.pending_settlements, &theme).render(frame, cols[3]);
}
