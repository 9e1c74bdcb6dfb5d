use api_types::settlement::Settlement;

use super::{EmptyState, PanelView, format_amount, panel};
use crate::sync::{Collection, CollectionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRow {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl SettlementRow {
    /// `A should pay B: ₹x.xx`
    pub fn statement(&self) -> String {
        format!("{} should pay {}: {}", self.from, self.to, self.amount)
    }
}

pub fn settlements_view(settlements: &Collection<Settlement>) -> PanelView<SettlementRow> {
    panel(
        settlements,
        CollectionKind::Settlements,
        EmptyState {
            title: "All settled up!",
            hint: "No payments needed right now.",
        },
        |settlement| SettlementRow {
            from: settlement.from_person.clone(),
            to: settlement.to_person.clone(),
            amount: format_amount(settlement.amount),
        },
    )
}
