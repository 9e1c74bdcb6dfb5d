use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub mod common {
    use super::KeyHint;

    pub fn list() -> Vec<KeyHint> {
        vec![
            KeyHint::new("a", "add"),
            KeyHint::new("↑↓/jk", "select"),
            KeyHint::new("d", "delete"),
            KeyHint::new("r", "refresh"),
        ]
    }

    pub fn form() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "back"),
        ]
    }

    pub fn confirm() -> Vec<KeyHint> {
        vec![KeyHint::new("y", "delete"), KeyHint::new("n/Esc", "keep")]
    }

    pub fn quit(typing: bool) -> Vec<KeyHint> {
        if typing {
            vec![KeyHint::new("Ctrl+C", "quit")]
        } else {
            vec![KeyHint::new("q", "quit")]
        }
    }
}
