//! Admin list pages.
//!
//! Each page owns its records and a [`DataTable`] describing how to show them.
//! Search filtering happens here, before rows reach the renderer.

pub mod inquiries;
pub mod projects;
pub mod testimonials;

pub use inquiries::inquiries_table;
pub use projects::projects_table;
pub use testimonials::testimonials_table;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use lumen_core::{Inquiry, Project, Testimonial};

use crate::table::{ActionError, Alert, Confirm, DataTable, DeleteOutcome, TableRecord, TableView};

/// Records that can be matched against a free-text search term.
pub trait Searchable {
    fn matches_search(&self, term: &str) -> bool;
}

impl Searchable for Project {
    fn matches_search(&self, term: &str) -> bool {
        Project::matches_search(self, term)
    }
}

impl Searchable for Testimonial {
    fn matches_search(&self, term: &str) -> bool {
        Testimonial::matches_search(self, term)
    }
}

impl Searchable for Inquiry {
    fn matches_search(&self, term: &str) -> bool {
        Inquiry::matches_search(self, term)
    }
}

/// Case-insensitive filter. A blank term keeps everything.
pub fn filter_records<R: Searchable + Clone>(records: &[R], term: &str) -> Vec<R> {
    records
        .iter()
        .filter(|r| r.matches_search(term))
        .cloned()
        .collect()
}

/// Type-erased view of one list page, used by the panel's event loop.
pub trait ListPage {
    fn view(&self) -> TableView;
    fn record_count(&self) -> usize;
    fn toggle_sort(&mut self, column: usize) -> bool;
    fn search_term(&self) -> &str;
    fn set_search_term(&mut self, term: String);
    fn next_page(&mut self);
    fn prev_page(&mut self);
    fn selected(&self) -> usize;
    fn move_selection(&mut self, delta: isize);
    fn selected_key(&self) -> Option<String>;
    /// Delete the record with `key`. Returns None when it is no longer loaded.
    fn request_delete(
        &self,
        key: &str,
        confirm: &dyn Confirm,
        alert: Arc<dyn Alert>,
    ) -> Option<BoxFuture<'static, DeleteOutcome>>;
    fn trigger_action(&self, index: usize) -> Option<BoxFuture<'static, Result<(), ActionError>>>;
}

pub struct PageState<R> {
    pub table: DataTable<R>,
    records: Vec<R>,
    selected: usize,
}

impl<R> PageState<R>
where
    R: TableRecord + Searchable + Clone,
{
    pub fn new(table: DataTable<R>) -> Self {
        Self {
            table,
            records: Vec::new(),
            selected: 0,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the page's records with a fresh list from the API.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        let count = self.filtered().len();
        self.table.go_to_page(self.table.current_page(), count);
        self.clamp_selection();
    }

    fn filtered(&self) -> Vec<R> {
        filter_records(&self.records, self.table.search_term())
    }

    fn visible_len(&self) -> usize {
        let filtered = self.filtered();
        self.table.visible(&filtered).len()
    }

    fn selected_record(&self) -> Option<R> {
        let filtered = self.filtered();
        self.table
            .visible(&filtered)
            .get(self.selected)
            .map(|r| (*r).clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl<R> ListPage for PageState<R>
where
    R: TableRecord + Searchable + Clone,
{
    fn view(&self) -> TableView {
        self.table.render(&self.filtered())
    }

    fn record_count(&self) -> usize {
        self.filtered().len()
    }

    fn toggle_sort(&mut self, column: usize) -> bool {
        self.table.toggle_sort(column)
    }

    fn search_term(&self) -> &str {
        self.table.search_term()
    }

    fn set_search_term(&mut self, term: String) {
        self.table.set_search_term(term);
        self.clamp_selection();
    }

    fn next_page(&mut self) {
        let count = self.record_count();
        self.table.next_page(count);
        self.selected = 0;
    }

    fn prev_page(&mut self) {
        let count = self.record_count();
        self.table.prev_page(count);
        self.selected = 0;
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn selected_key(&self) -> Option<String> {
        self.selected_record().map(|r| r.key())
    }

    fn request_delete(
        &self,
        key: &str,
        confirm: &dyn Confirm,
        alert: Arc<dyn Alert>,
    ) -> Option<BoxFuture<'static, DeleteOutcome>> {
        let record = self.records.iter().find(|r| r.key() == key)?;
        Some(self.table.request_delete(record, confirm, alert))
    }

    fn trigger_action(&self, index: usize) -> Option<BoxFuture<'static, Result<(), ActionError>>> {
        let record = self.selected_record()?;
        self.table.trigger_action(index, &record)
    }
}
