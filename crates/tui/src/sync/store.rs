#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Expenses,
    Balances,
    Settlements,
}

impl CollectionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Balances => "balances",
            Self::Settlements => "settlements",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    Loading,
    Ready,
    /// Last user-visible fetch failed; the previous items are still held.
    Failed(String),
}

/// Client-side snapshot of one server collection.
///
/// Items are only ever swapped as a whole; a failure or a pending fetch changes
/// the status and keeps the last good snapshot.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    status: CollectionStatus,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: CollectionStatus::Loading,
        }
    }
}

impl<T> Collection<T> {
    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items,
            status: CollectionStatus::Ready,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> &CollectionStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = CollectionStatus::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = CollectionStatus::Failed(message.into());
    }

    pub fn mark_loading(&mut self) {
        self.status = CollectionStatus::Loading;
    }
}
