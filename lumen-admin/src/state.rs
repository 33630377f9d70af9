//! Application state for the admin panel.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_core::{Inquiry, Project, Testimonial};
use tokio::sync::mpsc;

use crate::api_client::RestClient;
use crate::config::AdminConfig;
use crate::events::PageData;
use crate::nav::Page;
use crate::notifications::{Notification, NotificationLevel};
use crate::pages::{inquiries_table, projects_table, testimonials_table, ListPage, PageState};
use crate::table::{Alert, Confirm};
use crate::theme::AdminTheme;

const MAX_NOTIFICATIONS: usize = 50;

/// A modal that captures input until answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    ConfirmDelete { page: Page, key: String },
}

/// The operator's answer to a confirmation modal.
pub struct ModalAnswer(pub bool);

impl Confirm for ModalAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Forwards alerts into the event loop, where they become notifications.
///
/// The channel is unbounded so a burst of events never drops an alert. Once
/// the loop has stopped listening the message goes to the error log.
pub struct ChannelAlert {
    sender: mpsc::UnboundedSender<String>,
    error_log_path: PathBuf,
}

impl ChannelAlert {
    pub fn new(sender: mpsc::UnboundedSender<String>, error_log_path: PathBuf) -> Self {
        Self {
            sender,
            error_log_path,
        }
    }
}

impl Alert for ChannelAlert {
    fn alert(&self, message: &str) {
        if let Err(mpsc::error::SendError(message)) = self.sender.send(message.to_string()) {
            append_error_log(&self.error_log_path, &message);
        }
    }
}

/// Append an error line to the log at `path`. Failures here are ignored.
fn append_error_log(path: &Path, message: &str) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        let _ = writeln!(file, "{} {}", chrono::Utc::now().to_rfc3339(), message);
    }
}

pub struct App {
    pub config: AdminConfig,
    pub api: RestClient,
    pub theme: AdminTheme,
    pub active_page: Page,
    pub projects: PageState<Project>,
    pub testimonials: PageState<Testimonial>,
    pub inquiries: PageState<Inquiry>,
    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
    pub search_active: bool,
}

impl App {
    pub fn new(config: AdminConfig, api: RestClient) -> Self {
        let per_page = config.items_per_page;
        Self {
            projects: PageState::new(projects_table(api.clone(), per_page)),
            testimonials: PageState::new(testimonials_table(api.clone(), per_page)),
            inquiries: PageState::new(inquiries_table(api.clone(), per_page)),
            config,
            api,
            theme: AdminTheme::lumen(),
            active_page: Page::Projects,
            notifications: Vec::new(),
            modal: None,
            search_active: false,
        }
    }

    pub fn page(&self) -> &dyn ListPage {
        self.page_for(self.active_page)
    }

    pub fn page_mut(&mut self) -> &mut dyn ListPage {
        match self.active_page {
            Page::Projects => &mut self.projects,
            Page::Testimonials => &mut self.testimonials,
            Page::Inquiries => &mut self.inquiries,
        }
    }

    pub fn page_for(&self, page: Page) -> &dyn ListPage {
        match page {
            Page::Projects => &self.projects,
            Page::Testimonials => &self.testimonials,
            Page::Inquiries => &self.inquiries,
        }
    }

    pub fn apply_data(&mut self, data: PageData) {
        match data {
            PageData::Projects(records) => self.projects.replace_records(records),
            PageData::Testimonials(records) => self.testimonials.replace_records(records),
            PageData::Inquiries(records) => self.inquiries.replace_records(records),
        }
    }

    /// Open the delete confirmation for the selected row, if any.
    pub fn open_delete_modal(&mut self) -> bool {
        match self.page().selected_key() {
            Some(key) => {
                self.modal = Some(Modal::ConfirmDelete {
                    page: self.active_page,
                    key,
                });
                true
            }
            None => false,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        if level == NotificationLevel::Error {
            append_error_log(&self.config.error_log_path, &message);
        }
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    pub fn alert_sink(&self, sender: mpsc::UnboundedSender<String>) -> Arc<dyn Alert> {
        Arc::new(ChannelAlert::new(sender, self.config.error_log_path.clone()))
    }
}
