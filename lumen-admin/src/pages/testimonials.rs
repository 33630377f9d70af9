//! Testimonials list page.

use lumen_core::{Testimonial, TestimonialUpdate};

use crate::api_client::RestClient;
use crate::table::{ActionError, ActionLabel, Column, DataTable, FieldValue, RowAction, TableRecord};

pub const TESTIMONIALS_PATH: &str = "/admin/testimonials";

impl TableRecord for Testimonial {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.to_string().into(),
            "clientName" => self.client_name.as_str().into(),
            "company" => self.company.clone().into(),
            "role" => self.role.clone().into(),
            "quote" => self.quote.as_str().into(),
            "rating" => self.rating.into(),
            "featured" => self.featured.into(),
            "createdAt" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

pub fn testimonial_columns() -> Vec<Column<Testimonial>> {
    vec![
        Column::field("Client", "clientName").sortable(),
        Column::field("Company", "company").sortable(),
        Column::computed("Rating", |t: &Testimonial| {
            "★".repeat(usize::from(t.rating.min(5)))
        }),
        Column::field("Featured", "featured").sortable(),
        Column::field("Created", "createdAt").sortable(),
    ]
}

pub fn testimonials_table(client: RestClient, items_per_page: usize) -> DataTable<Testimonial> {
    let delete_client = client.clone();
    let feature_client = client;

    let toggle_featured = RowAction::new(
        ActionLabel::dynamic(|t: &Testimonial| {
            let label = if t.featured { "Unfeature" } else { "Feature" };
            label.to_string()
        }),
        move |t: &Testimonial| {
            let client = feature_client.clone();
            let id = t.id.clone();
            let update = TestimonialUpdate {
                featured: Some(!t.featured),
                ..TestimonialUpdate::default()
            };
            async move {
                client
                    .update_testimonial(&id, &update)
                    .await
                    .map(|_| ())
                    .map_err(ActionError::from)
            }
        },
    );

    DataTable::new(testimonial_columns())
        .with_items_per_page(items_per_page)
        .with_edit_path(TESTIMONIALS_PATH)
        .with_on_delete(move |t: &Testimonial| {
            let client = delete_client.clone();
            let id = t.id.clone();
            async move { client.delete_testimonial(&id).await.map_err(ActionError::from) }
        })
        .with_actions(vec![toggle_featured])
        .with_empty_message("No testimonials yet")
        .with_search()
}
