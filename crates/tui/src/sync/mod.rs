//! Keeps the three ledger collections in step with the server.
//!
//! Network work runs in spawned tasks that report back through an unbounded
//! channel; [`LedgerSync`] is the only owner of [`LedgerState`] and applies the
//! messages in arrival order. Concurrent refreshes are not serialized: the
//! last message for a collection wins.

mod stats;
mod store;

use std::time::{Duration, Instant};

use api_types::{balance::Balance, expense::Expense, settlement::Settlement};
use chrono::{DateTime, Utc};
use tokio::{sync::mpsc, task::JoinHandle};

pub use stats::DerivedStats;
pub use store::{Collection, CollectionKind, CollectionStatus};

use crate::{
    client::{Client, ClientError},
    form::{ExpenseForm, ValidationError},
    toast::Notifier,
};

/// Who asked for a refresh.
///
/// User refreshes show progress and failures in the affected panel;
/// background refreshes are silent and only log failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Probing,
    Online,
    Unreachable,
}

#[derive(Debug)]
pub enum SyncMessage {
    Probed(Result<(), ClientError>),
    Expenses(Origin, Result<Vec<Expense>, ClientError>),
    Balances(Origin, Result<Vec<Balance>, ClientError>),
    Settlements(Origin, Result<Vec<Settlement>, ClientError>),
    ExpenseAdded(Result<Option<Expense>, ClientError>),
    ExpenseDeleted(Result<(), ClientError>),
}

#[derive(Debug, Clone, Copy)]
pub struct SyncSettings {
    pub refresh_every: Duration,
    pub toast_ttl: Duration,
}

#[derive(Debug)]
pub struct LedgerState {
    pub expenses: Collection<Expense>,
    pub balances: Collection<Balance>,
    pub settlements: Collection<Settlement>,
    pub stats: DerivedStats,
    pub toast: Notifier,
    pub form: ExpenseForm,
    pub connection: Connection,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl LedgerState {
    fn new(toast_ttl: Duration) -> Self {
        Self {
            expenses: Collection::default(),
            balances: Collection::default(),
            settlements: Collection::default(),
            stats: DerivedStats::default(),
            toast: Notifier::new(toast_ttl),
            form: ExpenseForm::default(),
            connection: Connection::Probing,
            last_refresh: None,
        }
    }

    fn mark_loading(&mut self) {
        self.expenses.mark_loading();
        self.balances.mark_loading();
        self.settlements.mark_loading();
    }

    /// A collection just landed, so the API is answering again.
    fn refreshed(&mut self) {
        self.last_refresh = Some(Utc::now());
        self.connection = Connection::Online;
    }

    fn recompute_stats(&mut self) {
        self.stats = DerivedStats::compute(self.expenses.items(), self.settlements.items());
    }
}

pub struct LedgerSync {
    client: Client,
    state: LedgerState,
    tx: mpsc::UnboundedSender<SyncMessage>,
    rx: mpsc::UnboundedReceiver<SyncMessage>,
    refresh_every: Duration,
    next_refresh: Instant,
}

impl LedgerSync {
    pub fn new(client: Client, settings: SyncSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            state: LedgerState::new(settings.toast_ttl),
            tx,
            rx,
            refresh_every: settings.refresh_every,
            next_refresh: Instant::now() + settings.refresh_every,
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut ExpenseForm {
        &mut self.state.form
    }

    /// Probes the API root and, when it answers, loads all three collections.
    pub fn start(&mut self) -> JoinHandle<()> {
        tracing::info!(base_url = %self.client.base_url(), "connecting to ledger api");
        self.state.connection = Connection::Probing;
        self.next_refresh = Instant::now() + self.refresh_every;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let probe = client.ping().await;
            let online = probe.is_ok();
            report(&tx, SyncMessage::Probed(probe));
            if online {
                fetch_all(&client, &tx, Origin::User).await;
            }
        })
    }

    pub fn refresh_expenses(&mut self) -> JoinHandle<()> {
        self.state.expenses.mark_loading();
        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move { fetch_expenses(&client, &tx, Origin::User).await })
    }

    pub fn refresh_balances(&mut self) -> JoinHandle<()> {
        self.state.balances.mark_loading();
        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move { fetch_balances(&client, &tx, Origin::User).await })
    }

    pub fn refresh_settlements(&mut self) -> JoinHandle<()> {
        self.state.settlements.mark_loading();
        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move { fetch_settlements(&client, &tx, Origin::User).await })
    }

    /// Fetches the three collections concurrently; each one is applied as soon
    /// as its own response arrives.
    pub fn refresh_all(&mut self, origin: Origin) -> JoinHandle<()> {
        if origin == Origin::User {
            self.state.mark_loading();
        }
        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move { fetch_all(&client, &tx, origin).await })
    }

    /// Validates the form and posts it; a successful post is followed by a
    /// full refresh.
    pub fn submit_expense(&mut self) -> Result<JoinHandle<()>, ValidationError> {
        let payload = match self.state.form.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.state.toast.error(err.to_string(), Instant::now());
                return Err(err);
            }
        };

        let (client, tx) = (self.client.clone(), self.tx.clone());
        Ok(tokio::spawn(async move {
            let created = client.expense_create(&payload).await;
            let refresh = created.is_ok();
            report(&tx, SyncMessage::ExpenseAdded(created));
            if refresh {
                fetch_all(&client, &tx, Origin::User).await;
            }
        }))
    }

    /// Deletes an expense once the user confirmed it; nothing happens otherwise.
    pub fn delete_expense(
        &mut self,
        id: &str,
        confirmation: Confirmation,
    ) -> Option<JoinHandle<()>> {
        if confirmation == Confirmation::Declined {
            return None;
        }

        let id = id.to_string();
        let (client, tx) = (self.client.clone(), self.tx.clone());
        Some(tokio::spawn(async move {
            let deleted = client.expense_delete(&id).await;
            let refresh = deleted.is_ok();
            report(&tx, SyncMessage::ExpenseDeleted(deleted));
            if refresh {
                fetch_all(&client, &tx, Origin::User).await;
            }
        }))
    }

    /// Expires the toast and fires the background refresh when it is due.
    ///
    /// The timer keeps running while requests are in flight.
    pub fn tick(&mut self, now: Instant) -> Option<JoinHandle<()>> {
        self.state.toast.expire(now);
        if now < self.next_refresh {
            return None;
        }
        self.next_refresh = now + self.refresh_every;
        tracing::debug!("background refresh");
        Some(self.refresh_all(Origin::Background))
    }

    /// Applies every message that already arrived.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Waits for the next message and applies it.
    pub async fn recv(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                self.apply(message);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, message: SyncMessage) {
        let now = Instant::now();
        let state = &mut self.state;

        match message {
            SyncMessage::Probed(Ok(())) => {
                tracing::info!("ledger api reachable");
                state.connection = Connection::Online;
                state
                    .toast
                    .success("Connected to Split App API successfully!", now);
            }
            SyncMessage::Probed(Err(err)) => {
                tracing::error!("ledger api unreachable: {err}");
                state.connection = Connection::Unreachable;
                state.toast.error(
                    format!(
                        "Failed to connect to API: {}. Please check if the backend is running.",
                        err.message()
                    ),
                    now,
                );
            }
            SyncMessage::Expenses(origin, result) => {
                if absorb(&mut state.expenses, CollectionKind::Expenses, origin, result) {
                    state.recompute_stats();
                    state.refreshed();
                }
            }
            SyncMessage::Balances(origin, result) => {
                if absorb(&mut state.balances, CollectionKind::Balances, origin, result) {
                    state.refreshed();
                }
            }
            SyncMessage::Settlements(origin, result) => {
                if absorb(&mut state.settlements, CollectionKind::Settlements, origin, result) {
                    state.recompute_stats();
                    state.refreshed();
                }
            }
            SyncMessage::ExpenseAdded(Ok(created)) => {
                match created {
                    Some(expense) => tracing::info!(id = %expense.id, "expense added"),
                    None => tracing::info!("expense added"),
                }
                state.form.reset();
                state.toast.success("Expense added successfully!", now);
                state.mark_loading();
            }
            SyncMessage::ExpenseAdded(Err(err)) => {
                state
                    .toast
                    .error(format!("Error adding expense: {}", err.message()), now);
            }
            SyncMessage::ExpenseDeleted(Ok(())) => {
                state.toast.success("Expense deleted successfully", now);
                state.mark_loading();
            }
            SyncMessage::ExpenseDeleted(Err(err)) => {
                state
                    .toast
                    .error(format!("Error deleting expense: {}", err.message()), now);
            }
        }
    }
}

/// Stores a fetch result; returns `true` when the snapshot was replaced.
fn absorb<T>(
    collection: &mut Collection<T>,
    kind: CollectionKind,
    origin: Origin,
    result: Result<Vec<T>, ClientError>,
) -> bool {
    match (result, origin) {
        (Ok(items), _) => {
            collection.replace(items);
            true
        }
        (Err(err), Origin::User) => {
            collection.fail(err.message());
            false
        }
        (Err(err), Origin::Background) => {
            tracing::warn!(collection = kind.name(), "background refresh failed: {err}");
            false
        }
    }
}

fn report(tx: &mpsc::UnboundedSender<SyncMessage>, message: SyncMessage) {
    if tx.send(message).is_err() {
        tracing::debug!("sync receiver dropped, discarding result");
    }
}

async fn fetch_all(client: &Client, tx: &mpsc::UnboundedSender<SyncMessage>, origin: Origin) {
    tokio::join!(
        fetch_expenses(client, tx, origin),
        fetch_balances(client, tx, origin),
        fetch_settlements(client, tx, origin),
    );
}

async fn fetch_expenses(client: &Client, tx: &mpsc::UnboundedSender<SyncMessage>, origin: Origin) {
    let result = client.expenses().await;
    report(tx, SyncMessage::Expenses(origin, result));
}

async fn fetch_balances(client: &Client, tx: &mpsc::UnboundedSender<SyncMessage>, origin: Origin) {
    let result = client.balances().await;
    report(tx, SyncMessage::Balances(origin, result));
}

async fn fetch_settlements(
    client: &Client,
    tx: &mpsc::UnboundedSender<SyncMessage>,
    origin: Origin,
) {
    let result = client.settlements().await;
    report(tx, SyncMessage::Settlements(origin, result));
}
