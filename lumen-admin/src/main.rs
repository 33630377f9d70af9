//! LUMEN admin panel entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lumen_admin::api_client::RestClient;
use lumen_admin::config::AdminConfig;
use lumen_admin::error::AdminError;
use lumen_admin::events::{AdminEvent, PageData};
use lumen_admin::keys::{map_key, Action};
use lumen_admin::nav::Page;
use lumen_admin::notifications::NotificationLevel;
use lumen_admin::state::{App, Modal, ModalAnswer};
use lumen_admin::table::DeleteOutcome;
use lumen_admin::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().await?;
    Ok(())
}

async fn run() -> Result<(), AdminError> {
    let config = AdminConfig::load()?;
    let api = RestClient::new(&config)?;
    let mut app = App::new(config, api);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<AdminEvent>(256);
    let (alert_tx, mut alert_rx) = mpsc::unbounded_channel::<String>();
    let senders = Senders {
        events: event_tx.clone(),
        alerts: alert_tx,
    };

    spawn_input_reader(event_tx.clone());
    for page in Page::all() {
        spawn_load(&app, *page, event_tx.clone());
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(message) = alert_rx.recv() => {
                app.notify(NotificationLevel::Error, message);
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &senders) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Where background work reports back to the event loop.
struct Senders {
    events: mpsc::Sender<AdminEvent>,
    alerts: mpsc::UnboundedSender<String>,
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, AdminError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<AdminEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(AdminEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(AdminEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Fetch one page's records in the background.
fn spawn_load(app: &App, page: Page, sender: mpsc::Sender<AdminEvent>) {
    let api = app.api.clone();
    tokio::spawn(async move {
        let result = match page {
            Page::Projects => api.list_projects().await.map(PageData::Projects),
            Page::Testimonials => api.list_testimonials().await.map(PageData::Testimonials),
            Page::Inquiries => api.list_inquiries().await.map(PageData::Inquiries),
        };
        let event = match result {
            Ok(data) => AdminEvent::Loaded(data),
            Err(err) => AdminEvent::ApiError(format!("Loading {} failed: {}", page.title(), err)),
        };
        let _ = sender.send(event).await;
    });
}

/// Returns true when the panel should exit.
fn handle_event(app: &mut App, event: AdminEvent, senders: &Senders) -> bool {
    let sender = &senders.events;
    match event {
        AdminEvent::Input(key) => return handle_key(app, key, senders),
        AdminEvent::Tick | AdminEvent::Resize { .. } => {}
        AdminEvent::Loaded(data) => app.apply_data(data),
        AdminEvent::ApiError(message) => {
            app.notify(NotificationLevel::Error, message);
        }
        AdminEvent::DeleteFinished { page, outcome } => match outcome {
            DeleteOutcome::Deleted => {
                app.notify(NotificationLevel::Success, "Item deleted");
                spawn_load(app, page, sender.clone());
            }
            DeleteOutcome::AlreadyBusy => {
                app.notify(NotificationLevel::Warning, "Delete already in progress");
            }
            DeleteOutcome::NotConfigured => {
                app.notify(NotificationLevel::Warning, "This list does not support delete");
            }
            DeleteOutcome::Declined | DeleteOutcome::Failed(_) => {}
        },
        AdminEvent::ActionFinished { page, result } => {
            match result {
                Ok(()) => app.notify(NotificationLevel::Success, "Action completed"),
                Err(err) => app.notify(NotificationLevel::Error, format!("Action failed: {}", err)),
            }
            spawn_load(app, page, sender.clone());
        }
        AdminEvent::Synced(response) => {
            app.notify(
                NotificationLevel::Info,
                format!("Portfolio sync: {:?} ({} projects)", response.status, response.count),
            );
        }
    }
    false
}

fn handle_key(app: &mut App, key: KeyEvent, senders: &Senders) -> bool {
    let sender = &senders.events;
    if app.search_active {
        handle_search_key(app, key);
        return false;
    }

    let Some(action) = map_key(key) else {
        return false;
    };

    if let Some(Modal::ConfirmDelete { page, key }) = app.modal.clone() {
        match action {
            Action::Confirm => answer_delete(app, page, &key, true, senders),
            Action::Cancel | Action::Quit => answer_delete(app, page, &key, false, senders),
            _ => {}
        }
        return false;
    }

    match action {
        Action::Quit => return true,
        Action::NextPage => app.active_page = app.active_page.next(),
        Action::PrevPage => app.active_page = app.active_page.previous(),
        Action::SortColumn(column) => {
            app.page_mut().toggle_sort(column);
        }
        Action::MoveUp => app.page_mut().move_selection(-1),
        Action::MoveDown => app.page_mut().move_selection(1),
        Action::PageBack => app.page_mut().prev_page(),
        Action::PageForward => app.page_mut().next_page(),
        Action::OpenSearch => app.search_active = true,
        Action::DeleteItem => {
            app.open_delete_modal();
        }
        Action::RunAction(index) => run_action(app, index, sender),
        Action::SyncPortfolio => {
            let api = app.api.clone();
            let sender = sender.clone();
            tokio::spawn(async move {
                let event = match api.sync_portfolio().await {
                    Ok(response) => AdminEvent::Synced(response),
                    Err(err) => AdminEvent::ApiError(format!("Portfolio sync failed: {}", err)),
                };
                let _ = sender.send(event).await;
            });
        }
        Action::Refresh => spawn_load(app, app.active_page, sender.clone()),
        Action::Confirm | Action::Cancel => {}
    }
    false
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    let mut term = app.page().search_term().to_string();
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.search_active = false;
            return;
        }
        KeyCode::Backspace => {
            term.pop();
        }
        KeyCode::Char(c) => term.push(c),
        _ => return,
    }
    app.page_mut().set_search_term(term);
}

fn answer_delete(
    app: &mut App,
    page: Page,
    key: &str,
    confirmed: bool,
    senders: &Senders,
) {
    app.modal = None;
    let alert = app.alert_sink(senders.alerts.clone());
    let Some(pending) = app
        .page_for(page)
        .request_delete(key, &ModalAnswer(confirmed), alert)
    else {
        if confirmed {
            app.notify(NotificationLevel::Warning, "Item is no longer in the list");
        }
        return;
    };
    let sender = senders.events.clone();
    tokio::spawn(async move {
        let outcome = pending.await;
        let _ = sender.send(AdminEvent::DeleteFinished { page, outcome }).await;
    });
}

fn run_action(app: &mut App, index: usize, sender: &mpsc::Sender<AdminEvent>) {
    let page = app.active_page;
    let Some(pending) = app.page().trigger_action(index) else {
        return;
    };
    let sender = sender.clone();
    tokio::spawn(async move {
        let result = pending.await;
        let _ = sender.send(AdminEvent::ActionFinished { page, result }).await;
    });
}
