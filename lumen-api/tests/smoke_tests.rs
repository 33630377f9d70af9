//! End-to-end smoke tests for LUMEN API
//!
//! Each test drives the full router with `tower::ServiceExt::oneshot` over an
//! in-memory (or deliberately failing) keyed store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use lumen_api::{create_api_router, ApiConfig, AppState};
use lumen_core::{builtin_portfolio, DEFAULT_CHALLENGE, DEFAULT_LOCATION};
use lumen_test_utils::fixtures::office_retrofit_legacy_json;
use lumen_test_utils::{FailingKeyedStore, InMemoryKeyedStore, KeyedStore, StoreKey};
use serde_json::{json, Value};
use tower::ServiceExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn app_on(store: Arc<dyn KeyedStore>) -> Router {
    create_api_router(AppState::new(store), &ApiConfig::default())
}

fn app() -> Router {
    app_on(Arc::new(InMemoryKeyedStore::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), Box<dyn std::error::Error>> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    Ok((status, value))
}

fn office_retrofit_request() -> Value {
    json!({
        "title": "Office Retrofit",
        "slug": "office-retrofit",
        "category": "Commercial",
        "mainImage": "/img/a.jpg",
        "galleryImages": [{"id": "g1", "url": "/img/b.jpg"}]
    })
}

#[tokio::test]
async fn smoke_test_project_crud_drives_portfolio() -> TestResult {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().ok_or("missing id")?.to_string();

    let (status, entry) = send(&app, Method::GET, "/api/v1/portfolio/office-retrofit", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["imageSrc"], "/img/a.jpg");
    assert_eq!(entry["galleryImages"], json!(["/img/b.jpg"]));
    assert_eq!(entry["location"], DEFAULT_LOCATION);
    assert_eq!(entry["challenge"], DEFAULT_CHALLENGE);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/projects/{}", id),
        Some(json!({"location": "Springfield", "featured": true})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["featured"], true);
    assert!(updated["updatedAt"].is_string());

    let (_, entry) = send(&app, Method::GET, "/api/v1/portfolio/office-retrofit", None).await?;
    assert_eq!(entry["location"], "Springfield");
    assert_eq!(entry["featured"], true);

    let (status, list) = send(&app, Method::GET, "/api/v1/projects?search=OFFICE", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    Ok(())
}

#[tokio::test]
async fn smoke_test_delete_resyncs_remaining_projects() -> TestResult {
    let app = app();
    send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    let (_, warehouse) = send(
        &app,
        Method::POST,
        "/api/v1/projects",
        Some(json!({"title": "Warehouse High Bay", "category": "Industrial"})),
    )
    .await?;
    let warehouse_id = warehouse["id"].as_str().ok_or("missing id")?;
    assert_eq!(warehouse["slug"], "warehouse-high-bay");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/projects/{}", warehouse_id), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, portfolio) = send(&app, Method::GET, "/api/v1/portfolio", None).await?;
    assert_eq!(portfolio["total"], 1);
    assert_eq!(portfolio["projects"][0]["id"], "office-retrofit");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/projects/{}", warehouse_id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn smoke_test_deleting_last_project_leaves_cache_untouched() -> TestResult {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    let id = created["id"].as_str().ok_or("missing id")?;

    send(&app, Method::DELETE, &format!("/api/v1/projects/{}", id), None).await?;

    // An empty canonical collection never overwrites the cache.
    let (_, portfolio) = send(&app, Method::GET, "/api/v1/portfolio", None).await?;
    assert_eq!(portfolio["total"], 1);
    assert_eq!(portfolio["projects"][0]["id"], "office-retrofit");

    let (_, outcome) = send(&app, Method::POST, "/api/v1/portfolio/sync", None).await?;
    assert_eq!(outcome, json!({"status": "skipped", "count": 0}));
    Ok(())
}

#[tokio::test]
async fn smoke_test_empty_store_serves_builtin_portfolio() -> TestResult {
    let app = app();
    let (status, portfolio) = send(&app, Method::GET, "/api/v1/portfolio", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["total"], 3);
    assert_eq!(portfolio["projects"], serde_json::to_value(builtin_portfolio())?);

    let (status, body) = send(&app, Method::GET, "/api/v1/portfolio/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn smoke_test_legacy_gallery_is_normalized() -> TestResult {
    let store = Arc::new(InMemoryKeyedStore::new());
    let legacy = json!([office_retrofit_legacy_json()]);
    store.set(StoreKey::Projects, &serde_json::to_vec(&legacy)?)?;
    let app = app_on(store);

    let (_, project) = send(&app, Method::GET, "/api/v1/projects/p1", None).await?;
    assert_eq!(project["galleryImages"][0]["id"], "gallery-1");
    assert_eq!(project["galleryImages"][0]["url"], "/img/b.jpg");

    let (_, entry) = send(&app, Method::GET, "/api/v1/portfolio/office-retrofit", None).await?;
    assert_eq!(entry["galleryImages"], json!(["/img/b.jpg"]));
    Ok(())
}

#[tokio::test]
async fn smoke_test_unreadable_collection_is_not_overwritten() -> TestResult {
    let store = Arc::new(InMemoryKeyedStore::new());
    let stored = json!([office_retrofit_legacy_json(), {"id": "p2", "title": "No date", "category": "Commercial"}]);
    let bytes = serde_json::to_vec(&stored)?;
    store.set(StoreKey::Projects, &bytes)?;
    let app = app_on(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/projects",
        Some(json!({"title": "Warehouse High Bay", "category": "Industrial"})),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(store.get(StoreKey::Projects)?, Some(bytes));
    Ok(())
}

#[tokio::test]
async fn smoke_test_project_validation_errors() -> TestResult {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/projects",
        Some(json!({"title": "  ", "category": "Commercial"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");

    send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    let (status, body) = send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ENTITY_ALREADY_EXISTS");

    let (status, body) = send(&app, Method::PATCH, "/api/v1/projects/missing", Some(json!({"title": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");

    let (status, _) = send(&app, Method::GET, "/api/v1/projects?limit=0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn smoke_test_inquiry_lifecycle() -> TestResult {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/inquiries",
        Some(json!({"name": "Sam", "email": "not-an-email", "message": "Hi"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, inquiry) = send(
        &app,
        Method::POST,
        "/api/v1/inquiries",
        Some(json!({"name": "Sam", "email": "sam@example.com", "message": "Quote for a warehouse"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(inquiry["status"], "new");
    let id = inquiry["id"].as_str().ok_or("missing id")?;

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/inquiries/{}", id),
        Some(json!({"status": "contacted"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "contacted");

    let (_, list) = send(&app, Method::GET, "/api/v1/inquiries?status=new", None).await?;
    assert_eq!(list["total"], 0);
    let (_, list) = send(&app, Method::GET, "/api/v1/inquiries?status=contacted", None).await?;
    assert_eq!(list["total"], 1);
    Ok(())
}

#[tokio::test]
async fn smoke_test_testimonial_rating_bounds() -> TestResult {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/testimonials",
        Some(json!({"clientName": "Dana", "quote": "Bright!", "rating": 6})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "rating");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/testimonials",
        Some(json!({"clientName": "Dana", "quote": "Bright!"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["rating"], 5);
    Ok(())
}

#[tokio::test]
async fn smoke_test_settings_roundtrip() -> TestResult {
    let app = app();
    let (status, mut settings) = send(&app, Method::GET, "/api/v1/settings", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["companyName"], "Lumen Lighting Co.");

    settings["tagline"] = json!("Light, done right.");
    let (status, _) = send(&app, Method::PUT, "/api/v1/settings", Some(settings.clone())).await?;
    assert_eq!(status, StatusCode::OK);

    settings["contactEmail"] = json!("nobody");
    let (status, _) = send(&app, Method::PUT, "/api/v1/settings", Some(settings)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, "/api/v1/settings", None).await?;
    assert_eq!(stored["tagline"], "Light, done right.");
    Ok(())
}

#[tokio::test]
async fn smoke_test_store_failures() -> TestResult {
    let store = Arc::new(FailingKeyedStore::new());
    let app = app_on(store.clone());

    let (status, _) = send(&app, Method::GET, "/health/ready", None).await?;
    assert_eq!(status, StatusCode::OK);

    store.fail_writes(true);
    let (status, body) = send(&app, Method::POST, "/api/v1/projects", Some(office_retrofit_request())).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORAGE_ERROR");

    store.fail_reads(true);
    let (status, body) = send(&app, Method::GET, "/health/ready", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    // Reads fail, so the portfolio degrades to the built-in examples.
    let (status, portfolio) = send(&app, Method::GET, "/api/v1/portfolio", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["total"], 3);
    Ok(())
}

#[tokio::test]
async fn smoke_test_health_and_openapi() -> TestResult {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health/ping", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("pong".to_string()));

    let (status, spec) = send(&app, Method::GET, "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spec["info"]["title"], "LUMEN API");
    Ok(())
}
