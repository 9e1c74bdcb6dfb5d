//! Pure renderers: collection snapshots in, typed view models out.
//!
//! Nothing here touches the terminal; `ui` draws whatever these return.

mod balances;
mod expenses;
mod money;
mod settlements;
mod stats;

pub use balances::{Standing, balances_view};
pub use expenses::expenses_view;
pub use money::format_amount;
pub use settlements::settlements_view;
pub use stats::stats_view;

use crate::sync::{Collection, CollectionKind, CollectionStatus};

/// What a list panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView<R> {
    Loading(String),
    Failed(String),
    Empty {
        title: &'static str,
        hint: &'static str,
    },
    /// One row per item, in server order.
    Rows(Vec<R>),
}

struct EmptyState {
    title: &'static str,
    hint: &'static str,
}

fn panel<T, R>(
    collection: &Collection<T>,
    kind: CollectionKind,
    empty: EmptyState,
    row: impl Fn(&T) -> R,
) -> PanelView<R> {
    match collection.status() {
        CollectionStatus::Loading => PanelView::Loading(format!("Loading {}...", kind.name())),
        CollectionStatus::Failed(message) => {
            PanelView::Failed(format!("Error loading {}: {message}", kind.name()))
        }
        CollectionStatus::Ready if collection.items().is_empty() => PanelView::Empty {
            title: empty.title,
            hint: empty.hint,
        },
        CollectionStatus::Ready => PanelView::Rows(collection.items().iter().map(row).collect()),
    }
}
