//! Event types flowing through the admin panel loop.

use crossterm::event::KeyEvent;
use lumen_api::types::SyncResponse;
use lumen_core::{Inquiry, Project, Testimonial};

use crate::nav::Page;
use crate::table::{ActionError, DeleteOutcome};

/// A freshly fetched record list for one page.
#[derive(Debug, Clone)]
pub enum PageData {
    Projects(Vec<Project>),
    Testimonials(Vec<Testimonial>),
    Inquiries(Vec<Inquiry>),
}

impl PageData {
    pub fn page(&self) -> Page {
        match self {
            PageData::Projects(_) => Page::Projects,
            PageData::Testimonials(_) => Page::Testimonials,
            PageData::Inquiries(_) => Page::Inquiries,
        }
    }
}

#[derive(Debug)]
pub enum AdminEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Loaded(PageData),
    DeleteFinished { page: Page, outcome: DeleteOutcome },
    ActionFinished { page: Page, result: Result<(), ActionError> },
    Synced(SyncResponse),
    ApiError(String),
}
