use api_types::expense::Expense;
use chrono_tz::Tz;

use super::{EmptyState, PanelView, format_amount, panel};
use crate::sync::{Collection, CollectionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    /// Key for the delete action.
    pub id: String,
    pub amount: String,
    pub description: String,
    pub paid_by: String,
    pub created: String,
}

pub fn expenses_view(expenses: &Collection<Expense>, timezone: Tz) -> PanelView<ExpenseRow> {
    panel(
        expenses,
        CollectionKind::Expenses,
        EmptyState {
            title: "No expenses yet",
            hint: "Add your first expense above to get started!",
        },
        |expense| ExpenseRow {
            id: expense.id.clone(),
            amount: format_amount(expense.amount),
            description: expense.description.clone(),
            paid_by: expense.paid_by.clone(),
            created: expense
                .created_at
                .with_timezone(&timezone)
                .format("%d %b %Y, %H:%M")
                .to_string(),
        },
    )
}
