use std::time::{Duration, Instant};

use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    sync::{Confirmation, LedgerSync, Origin, SyncSettings},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
    view::{PanelView, expenses_view},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Expenses,
    Form,
}

/// Expense waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub description: String,
}

/// Everything the renderer needs that is not ledger data.
#[derive(Debug)]
pub struct UiState {
    pub focus: Focus,
    pub selected: usize,
    pub pending_delete: Option<PendingDelete>,
    pub timezone: Tz,
    pub base_url: String,
}

pub struct App {
    sync: LedgerSync,
    pub ui: UiState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let ui = UiState {
            focus: Focus::Expenses,
            selected: 0,
            pending_delete: None,
            timezone: config.timezone()?,
            base_url: client.base_url().to_string(),
        };
        let sync = LedgerSync::new(
            client,
            SyncSettings {
                refresh_every: config.refresh_interval(),
                toast_ttl: config.notification_ttl(),
            },
        );

        Ok(Self {
            sync,
            ui,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);
        self.sync.start();

        while !self.should_quit {
            self.sync.drain();
            self.sync.tick(Instant::now());
            self.clamp_selection();

            terminal
                .draw(|frame| ui::render(frame, self.sync.state(), &self.ui))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            tokio::task::yield_now().await;
        }

        tracing::info!("shutting down");
        Ok(())
    }

    /// Plain characters are input rather than commands, so `q` does not quit.
    /// The delete dialog only answers to y/n/Esc.
    fn captures_keys(&self) -> bool {
        self.ui.focus == Focus::Form || self.ui.pending_delete.is_some()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key, self.captures_keys());
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.ui.pending_delete.is_some() {
            self.handle_confirm(action);
        } else if self.ui.focus == Focus::Form {
            self.handle_form(action);
        } else {
            self.handle_list(action);
        }
    }

    fn handle_confirm(&mut self, action: AppAction) {
        let confirmation = match action {
            AppAction::Input('y' | 'Y') => Confirmation::Accepted,
            AppAction::Input('n' | 'N') | AppAction::Cancel => Confirmation::Declined,
            _ => return,
        };
        if let Some(pending) = self.ui.pending_delete.take() {
            tracing::debug!(id = %pending.id, ?confirmation, "delete answered");
            self.sync.delete_expense(&pending.id, confirmation);
        }
    }

    fn handle_form(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.ui.focus = Focus::Expenses,
            AppAction::NextField => self.sync.form_mut().next_field(),
            AppAction::Submit => {
                // A rejected form already raised its toast.
                let _ = self.sync.submit_expense();
            }
            AppAction::Backspace => self.sync.form_mut().pop(),
            AppAction::Input(ch) => self.sync.form_mut().push(ch),
            _ => {}
        }
    }

    fn handle_list(&mut self, action: AppAction) {
        match action {
            AppAction::Input('a') | AppAction::NextField => self.ui.focus = Focus::Form,
            AppAction::Input('j') | AppAction::Down => self.select_next(),
            AppAction::Input('k') | AppAction::Up => self.select_prev(),
            AppAction::Input('d') => self.ask_delete(),
            AppAction::Input('r') => {
                self.sync.refresh_all(Origin::User);
            }
            _ => {}
        }
    }

    fn ask_delete(&mut self) {
        let PanelView::Rows(rows) = expenses_view(&self.sync.state().expenses, self.ui.timezone)
        else {
            return;
        };
        self.ui.pending_delete = rows.into_iter().nth(self.ui.selected).map(|row| PendingDelete {
            id: row.id,
            description: row.description,
        });
    }

    fn select_next(&mut self) {
        let len = self.sync.state().expenses.len();
        if len > 0 {
            self.ui.selected = (self.ui.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        self.ui.selected = self.ui.selected.saturating_sub(1);
    }

    /// Keeps the cursor on a real row after the list shrinks.
    fn clamp_selection(&mut self) {
        let len = self.sync.state().expenses.len();
        self.ui.selected = self.ui.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{
        sync::CollectionStatus,
        testing::{MockLedger, Route},
    };

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            base_url: base_url.to_string(),
            ..AppConfig::default()
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    async fn settle(app: &mut App) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while app.sync.state().expenses.status() != &CollectionStatus::Ready
                || app.sync.state().balances.status() != &CollectionStatus::Ready
                || app.sync.state().settlements.status() != &CollectionStatus::Ready
            {
                app.sync.recv().await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn q_types_into_the_form_but_quits_from_the_list() {
        let server = MockLedger::spawn().await;
        let mut app = App::new(config(&server.base_url())).unwrap();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui.focus, Focus::Form);
        type_text(&mut app, "12");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "quiz night");
        assert_eq!(app.sync.state().form.description, "quiz night");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.focus, Focus::Expenses);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn ctrl_c_quits_while_typing() {
        let server = MockLedger::spawn().await;
        let mut app = App::new(config(&server.base_url())).unwrap();
        press(&mut app, KeyCode::Char('a'));

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let server = MockLedger::spawn().await;
        server.seed_expense(40.0, "Taxi", "Asha");
        let mut app = App::new(config(&server.base_url())).unwrap();
        app.sync.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.ui.pending_delete.as_ref().map(|p| p.description.as_str()),
            Some("Taxi")
        );
        press(&mut app, KeyCode::Char('n'));
        assert!(app.ui.pending_delete.is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(server.hits(Route::DeleteExpense), 0);
        assert_eq!(server.expenses().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_selected_expense() {
        let server = MockLedger::spawn().await;
        let taxi = server.seed_expense(40.0, "Taxi", "Asha");
        server.seed_expense(15.0, "Chai", "Ravi");
        let mut app = App::new(config(&server.base_url())).unwrap();
        app.sync.start();
        settle(&mut app).await;

        // Moving past the end stays on the last row.
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.ui.selected, 1);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.ui.pending_delete.as_ref().map(|p| p.description.as_str()),
            Some("Chai")
        );
        press(&mut app, KeyCode::Char('y'));
        assert!(app.ui.pending_delete.is_none());

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                app.sync.recv().await;
                let deleted = app
                    .sync
                    .state()
                    .toast
                    .current()
                    .is_some_and(|toast| toast.message == "Expense deleted successfully");
                if deleted {
                    break;
                }
            }
        })
        .await
        .unwrap();
        settle(&mut app).await;

        assert_eq!(server.hits(Route::DeleteExpense), 1);
        let remaining = server.expenses();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, taxi.id);

        app.clamp_selection();
        assert_eq!(app.ui.selected, 0);
    }

    #[tokio::test]
    async fn q_does_not_close_the_delete_dialog() {
        let server = MockLedger::spawn().await;
        server.seed_expense(40.0, "Taxi", "Asha");
        let mut app = App::new(config(&server.base_url())).unwrap();
        app.sync.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert!(app.ui.pending_delete.is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.ui.pending_delete.is_none());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
        assert_eq!(server.hits(Route::DeleteExpense), 0);
    }

    #[tokio::test]
    async fn selection_follows_a_shrinking_list() {
        let server = MockLedger::spawn().await;
        let mut app = App::new(config(&server.base_url())).unwrap();
        app.ui.selected = 7;
        app.clamp_selection();
        assert_eq!(app.ui.selected, 0);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.ui.selected, 0);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.ui.pending_delete.is_none());
    }
}
