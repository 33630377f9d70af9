//! Generic tabular list renderer.
//!
//! A [`DataTable`] holds the column and action descriptors for one list page
//! plus its local view state (sort, page, search term, in-flight deletes).
//! [`DataTable::render`] is a pure function of that state and the records
//! passed in; it never touches the network. Callers own the record list and
//! filter it by search term before rendering.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{self, BoxFuture, FutureExt};
use lumen_core::Timestamp;

/// Rows per page when the page does not choose a size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Message shown in place of rows when nothing is visible.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No items found";

/// Confirmation prompt used before a delete handler runs.
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this item?";

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single field of a record, as seen by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(Timestamp),
}

impl FieldValue {
    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Date(_) => 4,
        }
    }

    /// Natural ordering used for sorting.
    ///
    /// Values of different kinds order by kind (`Null < Bool < Number < Text < Date`).
    /// NaN compares equal to every number.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(true) => write!(f, "Yes"),
            FieldValue::Bool(false) => write!(f, "No"),
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{:.0}", n)
            }
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<Timestamp> for FieldValue {
    fn from(value: Timestamp) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A record the renderer can display.
pub trait TableRecord {
    /// Unique key used for row identity, URLs and busy tracking.
    fn key(&self) -> String;

    /// Look up a named field. Unknown names yield [`FieldValue::Null`].
    fn field(&self, name: &str) -> FieldValue;
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

pub type CellFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;
pub type ActionHandler<R> =
    Arc<dyn Fn(&R) -> BoxFuture<'static, Result<(), ActionError>> + Send + Sync>;
pub type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// How a column obtains its cell value.
///
/// Only named fields can be sortable; computed cells have no ordering.
pub enum ColumnValue<R> {
    Field { name: String, sortable: bool },
    Computed(CellFn<R>),
}

impl<R> Clone for ColumnValue<R> {
    fn clone(&self) -> Self {
        match self {
            ColumnValue::Field { name, sortable } => ColumnValue::Field {
                name: name.clone(),
                sortable: *sortable,
            },
            ColumnValue::Computed(f) => ColumnValue::Computed(Arc::clone(f)),
        }
    }
}

pub struct Column<R> {
    pub header: String,
    pub value: ColumnValue<R>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            value: self.value.clone(),
        }
    }
}

impl<R> Column<R> {
    pub fn field(header: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            value: ColumnValue::Field {
                name: name.into(),
                sortable: false,
            },
        }
    }

    pub fn computed<F>(header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            value: ColumnValue::Computed(Arc::new(f)),
        }
    }

    /// Mark a field column sortable. No effect on computed columns.
    pub fn sortable(mut self) -> Self {
        if let ColumnValue::Field { sortable, .. } = &mut self.value {
            *sortable = true;
        }
        self
    }

    pub fn is_sortable(&self) -> bool {
        matches!(self.value, ColumnValue::Field { sortable: true, .. })
    }

    fn sort_field(&self) -> Option<&str> {
        match &self.value {
            ColumnValue::Field {
                name,
                sortable: true,
            } => Some(name),
            _ => None,
        }
    }

    fn cell(&self, record: &R) -> String
    where
        R: TableRecord,
    {
        match &self.value {
            ColumnValue::Field { name, .. } => record.field(name).to_string(),
            ColumnValue::Computed(f) => f(record),
        }
    }
}

/// Text that is either fixed or derived from the record.
pub enum ActionLabel<R> {
    Static(String),
    Dynamic(CellFn<R>),
}

impl<R> ActionLabel<R> {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        ActionLabel::Dynamic(Arc::new(f))
    }

    pub fn resolve(&self, record: &R) -> String {
        match self {
            ActionLabel::Static(s) => s.clone(),
            ActionLabel::Dynamic(f) => f(record),
        }
    }
}

impl<R> Clone for ActionLabel<R> {
    fn clone(&self) -> Self {
        match self {
            ActionLabel::Static(s) => ActionLabel::Static(s.clone()),
            ActionLabel::Dynamic(f) => ActionLabel::Dynamic(Arc::clone(f)),
        }
    }
}

impl<R> From<&str> for ActionLabel<R> {
    fn from(value: &str) -> Self {
        ActionLabel::Static(value.to_string())
    }
}

impl<R> From<String> for ActionLabel<R> {
    fn from(value: String) -> Self {
        ActionLabel::Static(value)
    }
}

/// Failure reported by an action handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A custom per-row action.
pub struct RowAction<R> {
    pub label: ActionLabel<R>,
    pub handler: ActionHandler<R>,
    pub visible: Option<Predicate<R>>,
    pub style: Option<ActionLabel<R>>,
}

impl<R> Clone for RowAction<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            handler: Arc::clone(&self.handler),
            visible: self.visible.clone(),
            style: self.style.clone(),
        }
    }
}

impl<R> RowAction<R> {
    pub fn new<F, Fut>(label: impl Into<ActionLabel<R>>, handler: F) -> Self
    where
        F: Fn(&R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            handler: boxed_handler(handler),
            visible: None,
            style: None,
        }
    }

    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(predicate));
        self
    }

    pub fn with_style(mut self, style: impl Into<ActionLabel<R>>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn is_visible(&self, record: &R) -> bool {
        self.visible.as_ref().map_or(true, |p| p(record))
    }
}

fn boxed_handler<R, F, Fut>(handler: F) -> ActionHandler<R>
where
    F: Fn(&R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    Arc::new(move |record: &R| handler(record).boxed())
}

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Surfaces a failure to the operator.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

// ============================================================================
// SORTING AND PAGINATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page links to show for `current` out of `total` pages.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always present with a window around the current page, and each elided
/// run becomes one [`PageItem::Ellipsis`].
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= 5 {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current <= 3 {
        items.extend((2..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
    } else if current >= total - 2 {
        items.push(PageItem::Ellipsis);
        items.extend((total - 3..total).map(PageItem::Page));
    } else {
        items.push(PageItem::Ellipsis);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1)).max(1)
}

// ============================================================================
// RENDERED MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowControl {
    View { href: String },
    Edit { href: String },
    Delete { busy: bool },
    Custom {
        index: usize,
        label: String,
        style: Option<String>,
    },
}

impl RowControl {
    pub fn label(&self) -> String {
        match self {
            RowControl::View { .. } => "View".to_string(),
            RowControl::Edit { .. } => "Edit".to_string(),
            RowControl::Delete { busy: false } => "Delete".to_string(),
            RowControl::Delete { busy: true } => "Deleting...".to_string(),
            RowControl::Custom { label, .. } => label.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, RowControl::Delete { busy: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Record {
        key: String,
        cells: Vec<String>,
        controls: Vec<RowControl>,
    },
    Empty {
        message: String,
        span: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub pages: Vec<PageItem>,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub has_actions: bool,
    pub rows: Vec<TableRow>,
    pub pagination: Option<PaginationView>,
    pub search: Option<String>,
}

impl TableView {
    /// Keys of the record rows, in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Record { key, .. } => Some(key.as_str()),
                TableRow::Empty { .. } => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

// ============================================================================
// DATA TABLE
// ============================================================================

/// What happened to a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotConfigured,
    AlreadyBusy,
    Declined,
    Deleted,
    Failed(ActionError),
}

pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    actions: Vec<RowAction<R>>,
    pagination: bool,
    items_per_page: usize,
    view_path: Option<String>,
    edit_path: Option<String>,
    on_delete: Option<ActionHandler<R>>,
    empty_message: String,
    show_search: bool,
    sort: Option<SortState>,
    current_page: usize,
    search_term: String,
    busy: Arc<Mutex<HashSet<String>>>,
}

impl<R: TableRecord> DataTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            actions: Vec::new(),
            pagination: true,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            view_path: None,
            edit_path: None,
            on_delete: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            show_search: false,
            sort: None,
            current_page: 1,
            search_term: String::new(),
            busy: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction<R>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    pub fn with_view_path(mut self, path: impl Into<String>) -> Self {
        self.view_path = Some(path.into());
        self
    }

    pub fn with_edit_path(mut self, path: impl Into<String>) -> Self {
        self.edit_path = Some(path.into());
        self
    }

    pub fn with_on_delete<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(&R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        self.on_delete = Some(boxed_handler(handler));
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_search(mut self) -> Self {
        self.show_search = true;
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn actions(&self) -> &[RowAction<R>] {
        &self.actions
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn has_row_actions(&self) -> bool {
        self.view_path.is_some()
            || self.edit_path.is_some()
            || self.on_delete.is_some()
            || !self.actions.is_empty()
    }

    // ------------------------------------------------------------------------
    // Local state transitions
    // ------------------------------------------------------------------------

    /// Toggle sorting on the column at `index`.
    ///
    /// The active sort column flips direction; any other sortable column
    /// becomes active ascending. Returns false when the column cannot sort.
    pub fn toggle_sort(&mut self, index: usize) -> bool {
        let Some(field) = self.columns.get(index).and_then(Column::sort_field) else {
            return false;
        };
        let next = match &self.sort {
            Some(state) if state.field == field => SortState {
                field: state.field.clone(),
                direction: state.direction.flipped(),
            },
            _ => SortState {
                field: field.to_string(),
                direction: SortDirection::Asc,
            },
        };
        self.sort = Some(next);
        true
    }

    /// Record the caller's search term. A changed term returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.current_page = 1;
        }
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_pages(total_items, self.items_per_page)
    }

    /// Move to `page`, clamped to the pages available for `total_items`.
    pub fn go_to_page(&mut self, page: usize, total_items: usize) {
        self.current_page = page.clamp(1, self.total_pages(total_items));
    }

    pub fn next_page(&mut self, total_items: usize) {
        self.go_to_page(self.current_page.saturating_add(1), total_items);
    }

    pub fn prev_page(&mut self, total_items: usize) {
        self.go_to_page(self.current_page.saturating_sub(1), total_items);
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Records in display order after sorting. Stable for equal values.
    pub fn sorted<'a>(&self, data: &'a [R]) -> Vec<&'a R> {
        let mut records: Vec<&R> = data.iter().collect();
        if let Some(sort) = &self.sort {
            records.sort_by(|a, b| {
                let ordering = a.field(&sort.field).compare(&b.field(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        records
    }

    /// Records on the current page, in display order.
    pub fn visible<'a>(&self, data: &'a [R]) -> Vec<&'a R> {
        let sorted = self.sorted(data);
        if !self.pagination {
            return sorted;
        }
        let page = self.current_page.clamp(1, self.total_pages(sorted.len()));
        sorted
            .into_iter()
            .skip((page - 1) * self.items_per_page)
            .take(self.items_per_page)
            .collect()
    }

    fn pagination_view(&self, total_items: usize) -> Option<PaginationView> {
        if !self.pagination {
            return None;
        }
        let total_pages = self.total_pages(total_items);
        let page = self.current_page.clamp(1, total_pages);
        (total_pages > 1).then(|| PaginationView {
            current_page: page,
            total_pages,
            total_items,
            pages: page_numbers(page, total_pages),
            has_prev: page > 1,
            has_next: page < total_pages,
        })
    }

    pub fn render(&self, data: &[R]) -> TableView {
        let visible = self.visible(data);
        let pagination = self.pagination_view(data.len());

        let has_actions = self.has_row_actions();
        let rows = if visible.is_empty() {
            vec![TableRow::Empty {
                message: self.empty_message.clone(),
                span: self.columns.len() + usize::from(has_actions),
            }]
        } else {
            visible
                .into_iter()
                .map(|record| TableRow::Record {
                    key: record.key(),
                    cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                    controls: self.controls_for(record),
                })
                .collect()
        };

        TableView {
            headers: self.headers(),
            has_actions,
            rows,
            pagination,
            search: self.show_search.then(|| self.search_term.clone()),
        }
    }

    fn headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                label: column.header.clone(),
                sortable: column.is_sortable(),
                sorted: match (&self.sort, column.sort_field()) {
                    (Some(state), Some(field)) if state.field == field => Some(state.direction),
                    _ => None,
                },
            })
            .collect()
    }

    fn controls_for(&self, record: &R) -> Vec<RowControl> {
        let key = record.key();
        let mut controls = Vec::new();
        if let Some(path) = &self.view_path {
            controls.push(RowControl::View {
                href: format!("{}/{}", path, key),
            });
        }
        if let Some(path) = &self.edit_path {
            controls.push(RowControl::Edit {
                href: format!("{}/{}/edit", path, key),
            });
        }
        if self.on_delete.is_some() {
            controls.push(RowControl::Delete {
                busy: self.is_busy(&key),
            });
        }
        for (index, action) in self.actions.iter().enumerate() {
            if action.is_visible(record) {
                controls.push(RowControl::Custom {
                    index,
                    label: action.label.resolve(record),
                    style: action.style.as_ref().map(|s| s.resolve(record)),
                });
            }
        }
        controls
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    pub fn is_busy(&self, key: &str) -> bool {
        lock(&self.busy).contains(key)
    }

    pub fn busy_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.busy).iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Run the delete handler for `record` after confirmation.
    ///
    /// The row is marked busy until the returned future settles. A handler
    /// failure raises exactly one alert; the record list is left to the
    /// caller either way.
    pub fn request_delete(
        &self,
        record: &R,
        confirm: &dyn Confirm,
        alert: Arc<dyn Alert>,
    ) -> BoxFuture<'static, DeleteOutcome> {
        let Some(handler) = &self.on_delete else {
            return future::ready(DeleteOutcome::NotConfigured).boxed();
        };
        let key = record.key();
        if self.is_busy(&key) {
            return future::ready(DeleteOutcome::AlreadyBusy).boxed();
        }
        if !confirm.confirm(DELETE_CONFIRM_MESSAGE) {
            return future::ready(DeleteOutcome::Declined).boxed();
        }

        let guard = BusyGuard::acquire(Arc::clone(&self.busy), key);
        let pending = handler(record);
        async move {
            let _guard = guard;
            match pending.await {
                Ok(()) => DeleteOutcome::Deleted,
                Err(err) => {
                    alert.alert(&format!("Failed to delete item: {}", err));
                    DeleteOutcome::Failed(err)
                }
            }
        }
        .boxed()
    }

    /// Start the `position`-th custom action among those visible for `record`.
    pub fn trigger_action(
        &self,
        position: usize,
        record: &R,
    ) -> Option<BoxFuture<'static, Result<(), ActionError>>> {
        let action = self
            .actions
            .iter()
            .filter(|action| action.is_visible(record))
            .nth(position)?;
        Some((action.handler)(record))
    }
}

fn lock(busy: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a key busy for as long as it lives.
struct BusyGuard {
    busy: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl BusyGuard {
    fn acquire(busy: Arc<Mutex<HashSet<String>>>, key: String) -> Self {
        lock(&busy).insert(key.clone());
        Self { busy, key }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.busy).remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
        name: &'static str,
        score: Option<f64>,
    }

    impl TableRecord for Row {
        fn key(&self) -> String {
            self.id.to_string()
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "id" => FieldValue::from(i64::from(self.id)),
                "name" => self.name.into(),
                "score" => self.score.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "beta", score: Some(2.0) },
            Row { id: 2, name: "alpha", score: None },
            Row { id: 3, name: "gamma", score: Some(2.0) },
        ]
    }

    fn table() -> DataTable<Row> {
        DataTable::new(vec![
            Column::field("Name", "name").sortable(),
            Column::field("Score", "score").sortable(),
            Column::computed("Label", |r: &Row| format!("#{}", r.id)),
            Column::field("Id", "id"),
        ])
    }

    #[test]
    fn test_field_value_kind_ordering() {
        let date = FieldValue::Date(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(FieldValue::Null.compare(&FieldValue::Bool(false)), Ordering::Less);
        assert_eq!(FieldValue::Bool(true).compare(&FieldValue::Number(0.0)), Ordering::Less);
        assert_eq!(FieldValue::Number(9.0).compare(&FieldValue::from("a")), Ordering::Less);
        assert_eq!(FieldValue::from("z").compare(&date), Ordering::Less);
        assert_eq!(
            FieldValue::Number(f64::NAN).compare(&FieldValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(5.0).to_string(), "5");
        assert_eq!(FieldValue::Number(4.5).to_string(), "4.5");
        assert_eq!(FieldValue::Bool(true).to_string(), "Yes");
        assert_eq!(FieldValue::Null.to_string(), "");
        let date = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 0, 0).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "2024-03-09");
    }

    #[test]
    fn test_toggle_sort_cycles_direction() {
        let mut table = table();
        assert!(table.toggle_sort(0));
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Asc));
        assert!(table.toggle_sort(0));
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert!(table.toggle_sort(0));
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Asc));

        table.toggle_sort(0);
        assert!(table.toggle_sort(1));
        let sort = table.sort().cloned();
        assert_eq!(
            sort,
            Some(SortState { field: "score".to_string(), direction: SortDirection::Asc })
        );
    }

    #[test]
    fn test_toggle_sort_ignores_computed_and_plain_columns() {
        let mut table = table();
        assert!(!table.toggle_sort(2));
        assert!(!table.toggle_sort(3));
        assert!(!table.toggle_sort(99));
        assert!(table.sort().is_none());
    }

    #[test]
    fn test_render_sorted_rows_and_headers() {
        let mut table = table();
        table.toggle_sort(0);
        let view = table.render(&rows());
        assert_eq!(view.keys(), vec!["2", "1", "3"]);
        assert_eq!(view.headers[0].sorted, Some(SortDirection::Asc));
        assert!(!view.headers[2].sortable);
        assert!(view.pagination.is_none());

        match &view.rows[0] {
            TableRow::Record { cells, .. } => {
                assert_eq!(cells, &vec!["alpha".to_string(), String::new(), "#2".to_string(), "2".to_string()]);
            }
            other => panic!("unexpected row: {:?}", other),
        }
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_order() {
        let mut table = table();
        table.toggle_sort(1);
        table.toggle_sort(1);
        let view = table.render(&rows());
        assert_eq!(view.keys(), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_page_numbers_windows() {
        use PageItem::{Ellipsis, Page};
        assert_eq!(page_numbers(1, 1), vec![Page(1)]);
        assert_eq!(page_numbers(3, 5), (1..=5).map(Page).collect::<Vec<_>>());
        assert_eq!(
            page_numbers(2, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_numbers(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_numbers(9, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut table = table().with_items_per_page(1);
        table.go_to_page(3, 3);
        assert_eq!(table.current_page(), 3);
        table.set_search_term("");
        assert_eq!(table.current_page(), 3);
        table.set_search_term("al");
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_page_requests_clamp() {
        let mut table = table().with_items_per_page(2);
        table.go_to_page(0, 3);
        assert_eq!(table.current_page(), 1);
        table.go_to_page(50, 3);
        assert_eq!(table.current_page(), 2);
        table.next_page(3);
        assert_eq!(table.current_page(), 2);
        table.prev_page(3);
        table.prev_page(3);
        assert_eq!(table.current_page(), 1);
        table.go_to_page(4, 0);
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_empty_state_spans_all_columns() {
        let table = table()
            .with_view_path("/admin/rows")
            .with_empty_message("Nothing here");
        let view = table.render(&[]);
        assert_eq!(
            view.rows,
            vec![TableRow::Empty { message: "Nothing here".to_string(), span: 5 }]
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_row_controls_order() {
        let table = table()
            .with_view_path("/admin/rows")
            .with_edit_path("/admin/rows")
            .with_on_delete(|_: &Row| async { Ok(()) })
            .with_actions(vec![
                RowAction::new(ActionLabel::dynamic(|r: &Row| format!("Bump {}", r.name)), |_: &Row| async {
                    Ok(())
                })
                .with_style("primary"),
                RowAction::new("Hidden", |_: &Row| async { Ok(()) }).visible_when(|r: &Row| r.id == 99),
            ]);
        let view = table.render(&rows()[..1]);
        match &view.rows[0] {
            TableRow::Record { controls, .. } => assert_eq!(
                controls,
                &vec![
                    RowControl::View { href: "/admin/rows/1".to_string() },
                    RowControl::Edit { href: "/admin/rows/1/edit".to_string() },
                    RowControl::Delete { busy: false },
                    RowControl::Custom {
                        index: 0,
                        label: "Bump beta".to_string(),
                        style: Some("primary".to_string()),
                    },
                ]
            ),
            other => panic!("unexpected row: {:?}", other),
        }
        assert!(table.trigger_action(1, &rows()[0]).is_none());
        assert!(table.trigger_action(0, &rows()[0]).is_some());
    }

    #[tokio::test]
    async fn test_trigger_action_counts_visible_actions_only() {
        let table = table().with_actions(vec![
            RowAction::new("Hidden", |_: &Row| async { Err(ActionError::new("hidden")) })
                .visible_when(|r: &Row| r.id == 99),
            RowAction::new("Shown", |_: &Row| async { Err(ActionError::new("shown")) }),
        ]);
        let pending = table.trigger_action(0, &rows()[0]);
        let result = match pending {
            Some(pending) => pending.await,
            None => panic!("first visible action should run"),
        };
        assert_eq!(result, Err(ActionError::new("shown")));
        assert!(table.trigger_action(1, &rows()[0]).is_none());
    }

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct Alerts(Mutex<Vec<String>>);

    impl Alert for Alerts {
        fn alert(&self, message: &str) {
            lock_alerts(&self.0).push(message.to_string());
        }
    }

    fn lock_alerts(m: &Mutex<Vec<String>>) -> MutexGuard<'_, Vec<String>> {
        m.lock().unwrap_or_else(|p| p.into_inner())
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let table = table().with_on_delete(|_: &Row| async { Err(ActionError::new("never")) });
        let alerts = Arc::new(Alerts::default());
        let outcome = table
            .request_delete(&rows()[0], &Answer(false), alerts.clone())
            .await;
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(lock_alerts(&alerts.0).is_empty());
    }

    #[tokio::test]
    async fn test_row_is_busy_while_delete_in_flight() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let rx = Arc::new(Mutex::new(Some(rx)));
        let table = table().with_on_delete(move |_: &Row| {
            let rx = rx.lock().ok().and_then(|mut slot| slot.take());
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(())
            }
        });
        let alerts: Arc<dyn Alert> = Arc::new(Alerts::default());
        let data = rows();

        let pending = table.request_delete(&data[0], &Answer(true), Arc::clone(&alerts));
        assert_eq!(table.busy_keys(), vec!["1".to_string()]);
        assert_eq!(
            table.request_delete(&data[0], &Answer(true), Arc::clone(&alerts)).await,
            DeleteOutcome::AlreadyBusy
        );

        let view = table.render(&data);
        let busy: Vec<bool> = view
            .rows
            .iter()
            .map(|row| match row {
                TableRow::Record { controls, .. } => {
                    controls.contains(&RowControl::Delete { busy: true })
                }
                TableRow::Empty { .. } => false,
            })
            .collect();
        assert_eq!(busy, vec![true, false, false]);

        let _ = tx.send(());
        assert_eq!(pending.await, DeleteOutcome::Deleted);
        assert!(table.busy_keys().is_empty());
    }

    #[tokio::test]
    async fn test_missing_delete_handler() {
        let table = table();
        let outcome = table
            .request_delete(&rows()[0], &Answer(true), Arc::new(Alerts::default()))
            .await;
        assert_eq!(outcome, DeleteOutcome::NotConfigured);
    }
}
