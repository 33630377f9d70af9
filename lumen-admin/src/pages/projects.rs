//! Projects list page.

use lumen_core::{Project, ProjectUpdate};

use crate::api_client::RestClient;
use crate::table::{ActionError, ActionLabel, Column, DataTable, FieldValue, RowAction, TableRecord};

pub const PROJECTS_PATH: &str = "/admin/projects";

impl TableRecord for Project {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.to_string().into(),
            "title" => self.title.as_str().into(),
            "slug" => self.slug.clone().into(),
            "category" => self.category.as_str().into(),
            "location" => self.location.clone().into(),
            "description" => self.description.clone().into(),
            "featured" => self.featured.into(),
            "mainImage" => self.main_image.clone().into(),
            "completionDate" => self.completion_date.clone().into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

pub fn project_columns() -> Vec<Column<Project>> {
    vec![
        Column::field("Title", "title").sortable(),
        Column::field("Category", "category").sortable(),
        Column::computed("Location", |p: &Project| {
            p.location
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "Not specified".to_string())
        }),
        Column::field("Featured", "featured").sortable(),
        Column::field("Completed", "completionDate").sortable(),
        Column::field("Created", "createdAt").sortable(),
    ]
}

pub fn projects_table(client: RestClient, items_per_page: usize) -> DataTable<Project> {
    let delete_client = client.clone();
    let feature_client = client;

    let toggle_featured = RowAction::new(
        ActionLabel::dynamic(|p: &Project| {
            let label = if p.featured { "Unfeature" } else { "Feature" };
            label.to_string()
        }),
        move |p: &Project| {
            let client = feature_client.clone();
            let id = p.id.clone();
            let update = ProjectUpdate {
                featured: Some(!p.featured),
                ..ProjectUpdate::default()
            };
            async move {
                client
                    .update_project(&id, &update)
                    .await
                    .map(|_| ())
                    .map_err(ActionError::from)
            }
        },
    )
    .with_style("primary");

    DataTable::new(project_columns())
        .with_items_per_page(items_per_page)
        .with_view_path(PROJECTS_PATH)
        .with_edit_path(PROJECTS_PATH)
        .with_on_delete(move |p: &Project| {
            let client = delete_client.clone();
            let id = p.id.clone();
            async move { client.delete_project(&id).await.map_err(ActionError::from) }
        })
        .with_actions(vec![toggle_featured])
        .with_empty_message("No projects yet")
        .with_search()
}
