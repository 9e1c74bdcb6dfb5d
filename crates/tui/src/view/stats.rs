use super::format_amount;
use crate::sync::DerivedStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub expense_count: String,
    pub total_amount: String,
    pub distinct_payers: String,
    pub pending_settlements: String,
}

pub fn stats_view(stats: &DerivedStats) -> StatsView {
    StatsView {
        expense_count: stats.expense_count.to_string(),
        total_amount: format_amount(stats.total_amount),
        distinct_payers: stats.distinct_payers.to_string(),
        pending_settlements: stats.pending_settlements.to_string(),
    }
}
