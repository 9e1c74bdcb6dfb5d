use std::collections::BTreeSet;

use api_types::{expense::Expense, settlement::Settlement};

/// Dashboard counters, always recomputed from the current snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStats {
    pub expense_count: usize,
    pub total_amount: f64,
    pub distinct_payers: usize,
    pub pending_settlements: usize,
}

impl DerivedStats {
    pub fn compute(expenses: &[Expense], settlements: &[Settlement]) -> Self {
        let payers = expenses
            .iter()
            .map(|expense| expense.paid_by.as_str())
            .collect::<BTreeSet<_>>();

        Self {
            expense_count: expenses.len(),
            total_amount: expenses.iter().map(|expense| expense.amount).sum(),
            distinct_payers: payers.len(),
            pending_settlements: settlements.len(),
        }
    }
}
