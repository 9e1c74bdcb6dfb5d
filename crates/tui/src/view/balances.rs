use api_types::balance::Balance;

use super::{EmptyState, PanelView, format_amount, panel};
use crate::sync::{Collection, CollectionKind};

/// Balances closer to zero than this are treated as settled.
pub const SETTLED_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// Is owed this much.
    Gets(f64),
    /// Owes this much (absolute value).
    Owes(f64),
    Even,
}

impl Standing {
    pub fn classify(balance: f64) -> Self {
        if balance >= SETTLED_THRESHOLD {
            Self::Gets(balance)
        } else if balance <= -SETTLED_THRESHOLD {
            Self::Owes(balance.abs())
        } else {
            Self::Even
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Gets(amount) => format!("Gets {}", format_amount(amount)),
            Self::Owes(amount) => format!("Owes {}", format_amount(amount)),
            Self::Even => "Even".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRow {
    pub person: String,
    pub paid: String,
    pub share: String,
    pub standing: Standing,
    pub label: String,
}

pub fn balances_view(balances: &Collection<Balance>) -> PanelView<BalanceRow> {
    panel(
        balances,
        CollectionKind::Balances,
        EmptyState {
            title: "No balances yet",
            hint: "Add some expenses to see who owes what!",
        },
        |balance| {
            let standing = Standing::classify(balance.balance);
            BalanceRow {
                person: balance.person.clone(),
                paid: format_amount(balance.total_paid),
                share: format_amount(balance.total_share),
                standing,
                label: standing.label(),
            }
        },
    )
}
