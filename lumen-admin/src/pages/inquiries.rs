//! Inquiries list page.

use lumen_core::{Inquiry, InquiryStatus, InquiryUpdate};

use crate::api_client::RestClient;
use crate::table::{ActionError, Column, DataTable, FieldValue, RowAction, TableRecord};

pub const INQUIRIES_PATH: &str = "/admin/inquiries";

impl TableRecord for Inquiry {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.to_string().into(),
            "name" => self.name.as_str().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.clone().into(),
            "service" => self.service.clone().into(),
            "message" => self.message.as_str().into(),
            "status" => self.status.to_string().into(),
            "createdAt" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

pub fn inquiry_columns() -> Vec<Column<Inquiry>> {
    vec![
        Column::field("Name", "name").sortable(),
        Column::field("Email", "email"),
        Column::field("Service", "service").sortable(),
        Column::field("Status", "status").sortable(),
        Column::field("Received", "createdAt").sortable(),
    ]
}

fn set_status(client: RestClient, label: &'static str, status: InquiryStatus) -> RowAction<Inquiry> {
    RowAction::new(label, move |i: &Inquiry| {
        let client = client.clone();
        let id = i.id.clone();
        let update = InquiryUpdate {
            status: Some(status),
            ..InquiryUpdate::default()
        };
        async move {
            client
                .update_inquiry(&id, &update)
                .await
                .map(|_| ())
                .map_err(ActionError::from)
        }
    })
}

pub fn inquiries_table(client: RestClient, items_per_page: usize) -> DataTable<Inquiry> {
    let delete_client = client.clone();

    let actions = vec![
        set_status(client.clone(), "Mark contacted", InquiryStatus::Contacted)
            .visible_when(|i: &Inquiry| i.status == InquiryStatus::New)
            .with_style("primary"),
        set_status(client, "Close", InquiryStatus::Closed)
            .visible_when(|i: &Inquiry| i.status != InquiryStatus::Closed),
    ];

    DataTable::new(inquiry_columns())
        .with_items_per_page(items_per_page)
        .with_view_path(INQUIRIES_PATH)
        .with_on_delete(move |i: &Inquiry| {
            let client = delete_client.clone();
            let id = i.id.clone();
            async move { client.delete_inquiry(&id).await.map_err(ActionError::from) }
        })
        .with_actions(actions)
        .with_empty_message("No inquiries received")
        .with_search()
}
