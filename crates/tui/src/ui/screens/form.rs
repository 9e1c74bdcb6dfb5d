use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{Focus, UiState},
    form::FormField,
    sync::LedgerState,
    ui::{components::card::Card, theme::Theme},
};

const FIELDS: [FormField; 3] = [FormField::Amount, FormField::Description, FormField::PaidBy];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, ui: &UiState) {
    let theme = Theme::default();
    let editing = ui.focus == Focus::Form;

    let lines = FIELDS
        .iter()
        .map(|field| {
            let active = editing && state.form.focus == *field;
            let label_style = if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            let value = state.form.value(*field);
            let mut spans = vec![
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::styled(value.to_string(), Style::default().fg(theme.text)),
            ];
            if active {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            } else if value.is_empty() {
                spans.push(Span::styled(placeholder(*field), Style::default().fg(theme.dim)));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    Card::new("Add Expense", &theme)
        .focused(editing)
        .render_with(frame, area, Paragraph::new(lines));
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Amount => "0.00",
        FormField::Description => "What was it for?",
        FormField::PaidBy => "Who paid?",
    }
}
