//! Property and scenario tests for the generic list renderer.

use lumen_admin::pages::{ListPage, PageState, Searchable};
use lumen_admin::table::{
    ActionError, Alert, Column, Confirm, DataTable, DeleteOutcome, FieldValue, PageItem,
    RowControl, TableRecord, TableRow,
};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Item {
    id: usize,
    value: FieldValue,
}

impl TableRecord for Item {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Number(self.id as f64),
            "value" => self.value.clone(),
            _ => FieldValue::Null,
        }
    }
}

impl Searchable for Item {
    fn matches_search(&self, term: &str) -> bool {
        self.id.to_string().contains(term.trim())
    }
}

fn arb_field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (0i64..5).prop_map(|n| FieldValue::Number(n as f64)),
        prop::sample::select(vec!["amber", "Beacon", "cove", "dusk"])
            .prop_map(|s| FieldValue::Text(s.to_string())),
    ]
}

fn arb_items(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_field_value(), 0..max).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(id, value)| Item { id, value })
            .collect()
    })
}

fn table() -> DataTable<Item> {
    DataTable::new(vec![
        Column::field("Id", "id"),
        Column::field("Value", "value").sortable(),
    ])
}

fn sorted_ids(table: &DataTable<Item>, items: &[Item]) -> Vec<usize> {
    table.sorted(items).into_iter().map(|i| i.id).collect()
}

fn position(ids: &[usize], id: usize) -> usize {
    ids.iter().position(|x| *x == id).unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn sort_is_stable_and_reversible(items in arb_items(40)) {
        let mut table = table();
        table.toggle_sort(1);
        let asc = sorted_ids(&table, &items);
        table.toggle_sort(1);
        let desc = sorted_ids(&table, &items);

        let asc_values: Vec<FieldValue> = asc.iter().map(|id| items[*id].value.clone()).collect();
        let mut desc_values: Vec<FieldValue> = desc.iter().map(|id| items[*id].value.clone()).collect();
        desc_values.reverse();
        for (a, d) in asc_values.iter().zip(desc_values.iter()) {
            prop_assert_eq!(a.compare(d), std::cmp::Ordering::Equal);
        }

        for a in &items {
            for b in &items {
                if a.id < b.id && a.value.compare(&b.value) == std::cmp::Ordering::Equal {
                    prop_assert!(position(&asc, a.id) < position(&asc, b.id));
                    prop_assert!(position(&desc, a.id) < position(&desc, b.id));
                }
            }
        }
    }

    #[test]
    fn pages_cover_sorted_list_exactly(
        items in arb_items(60),
        per_page in 1usize..15,
        sort in any::<bool>(),
    ) {
        let mut table = table().with_items_per_page(per_page);
        if sort {
            table.toggle_sort(1);
        }
        let expected: Vec<String> = sorted_ids(&table, &items).iter().map(|id| id.to_string()).collect();

        let pages = table.total_pages(items.len());
        let mut seen = Vec::new();
        for page in 1..=pages {
            table.go_to_page(page, items.len());
            let view = table.render(&items);
            seen.extend(view.keys().into_iter().map(str::to_string));
        }
        prop_assert_eq!(seen, expected);
    }
}

#[test]
fn twelve_records_ten_per_page() {
    let items: Vec<Item> = (1..=12)
        .map(|id| Item {
            id,
            value: FieldValue::Null,
        })
        .collect();
    let mut table = table();

    let view = table.render(&items);
    let expected: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
    assert_eq!(view.keys(), expected.iter().map(String::as_str).collect::<Vec<_>>());
    let pagination = view.pagination.expect("two pages");
    assert_eq!(pagination.pages, vec![PageItem::Page(1), PageItem::Page(2)]);
    assert!(!pagination.has_prev);
    assert!(pagination.has_next);

    table.next_page(items.len());
    let view = table.render(&items);
    assert_eq!(view.keys(), vec!["11", "12"]);

    table.next_page(items.len());
    assert_eq!(table.current_page(), 2);
}

#[test]
fn pagination_disabled_shows_everything() {
    let items: Vec<Item> = (0..25)
        .map(|id| Item {
            id,
            value: FieldValue::Null,
        })
        .collect();
    let view = table().with_pagination(false).render(&items);
    assert_eq!(view.keys().len(), 25);
    assert!(view.pagination.is_none());
}

struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[derive(Default)]
struct RecordingAlert {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlert {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[tokio::test]
async fn rejected_delete_alerts_once_and_keeps_row() {
    let items: Vec<Item> = [41, 42, 43]
        .into_iter()
        .map(|id| Item {
            id,
            value: FieldValue::Null,
        })
        .collect();
    let table = table().with_on_delete(|item: &Item| {
        let key = item.key();
        async move {
            if key == "42" {
                Err(ActionError::new("server refused"))
            } else {
                Ok(())
            }
        }
    });
    let alert = Arc::new(RecordingAlert::default());

    let outcome = table
        .request_delete(&items[1], &AlwaysYes, alert.clone())
        .await;

    assert_eq!(
        outcome,
        DeleteOutcome::Failed(ActionError::new("server refused"))
    );
    assert_eq!(
        alert.messages(),
        vec!["Failed to delete item: server refused".to_string()]
    );
    assert!(table.busy_keys().is_empty());

    let view = table.render(&items);
    assert_eq!(view.keys(), vec!["41", "42", "43"]);
    for row in &view.rows {
        if let TableRow::Record { controls, .. } = row {
            assert!(controls.contains(&RowControl::Delete { busy: false }));
        }
    }
}

#[tokio::test]
async fn concurrent_deletes_are_tracked_per_row() {
    let items: Vec<Item> = (0..3)
        .map(|id| Item {
            id,
            value: FieldValue::Null,
        })
        .collect();
    let table = table().with_on_delete(|_: &Item| async {
        tokio::task::yield_now().await;
        Ok(())
    });
    let alert = Arc::new(RecordingAlert::default());

    let first = table.request_delete(&items[0], &AlwaysYes, alert.clone());
    let second = table.request_delete(&items[2], &AlwaysYes, alert.clone());
    assert_eq!(table.busy_keys(), vec!["0".to_string(), "2".to_string()]);
    assert!(!table.is_busy("1"));

    let (a, b) = tokio::join!(first, second);
    assert_eq!(a, DeleteOutcome::Deleted);
    assert_eq!(b, DeleteOutcome::Deleted);
    assert!(table.busy_keys().is_empty());
    assert!(alert.messages().is_empty());
}

#[tokio::test]
async fn confirmed_delete_follows_the_confirmed_key() {
    let item = |id| Item {
        id,
        value: FieldValue::Null,
    };
    let deleted = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&deleted);
    let mut page = PageState::new(table().with_on_delete(move |item: &Item| {
        if let Ok(mut log) = log.lock() {
            log.push(item.key());
        }
        async { Ok(()) }
    }));
    page.replace_records(vec![item(1), item(2)]);
    assert_eq!(page.selected_key().as_deref(), Some("1"));

    // A reload reorders the list while the confirmation is open.
    page.replace_records(vec![item(2), item(1)]);
    assert_eq!(page.selected_key().as_deref(), Some("2"));

    let alert = Arc::new(RecordingAlert::default());
    let outcome = match page.request_delete("1", &AlwaysYes, alert.clone()) {
        Some(pending) => pending.await,
        None => panic!("confirmed record is still loaded"),
    };
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(deleted.lock().map(|d| d.clone()).unwrap_or_default(), vec!["1"]);

    // Gone after the next reload: answering the stale confirmation does nothing.
    page.replace_records(vec![item(2)]);
    assert!(page.request_delete("1", &AlwaysYes, alert.clone()).is_none());
    assert_eq!(deleted.lock().map(|d| d.len()).unwrap_or_default(), 1);
    assert!(alert.messages().is_empty());
}
