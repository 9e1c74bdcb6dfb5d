use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::{ui::theme::Theme, view::PanelView};

/// Paragraph for every non-row state of a panel; `None` when there are rows to draw.
pub fn placeholder<'a, R>(view: &PanelView<R>, theme: &Theme) -> Option<Paragraph<'a>> {
    let lines = match view {
        PanelView::Rows(_) => return None,
        PanelView::Loading(text) => {
            vec![Line::styled(text.clone(), Style::default().fg(theme.dim))]
        }
        PanelView::Failed(text) => {
            vec![Line::styled(text.clone(), Style::default().fg(theme.error))]
        }
        PanelView::Empty { title, hint } => vec![
            Line::styled(
                *title,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(*hint, Style::default().fg(theme.text_muted)),
        ],
    };

    Some(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
    )
}
