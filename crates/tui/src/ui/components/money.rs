use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::{ui::theme::Theme, view::Standing};

/// Neutral amount, e.g. an expense or a settlement.
#[must_use]
pub fn amount_span(formatted: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        formatted.to_string(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

/// Balance label colored by standing: owed money is green, debt red.
#[must_use]
pub fn standing_span(standing: Standing, label: &str, theme: &Theme) -> Span<'static> {
    let color = match standing {
        Standing::Gets(_) => theme.positive,
        Standing::Owes(_) => theme.negative,
        Standing::Even => theme.dim,
    };
    Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
