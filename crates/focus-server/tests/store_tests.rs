//! Tests for the REST and file event stores.
//!
//! The REST store is pointed at a small axum app that mimics a PostgREST
//! `events` table, so no external service is needed.

use std::collections::HashMap;
use std::io::Write;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};
use focus_engine::{EventStore, Interval, StoreError};
use focus_server::config::RestStoreConfig;
use focus_server::store::{FileEventStore, RestEventStore};
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

fn work_day() -> Interval {
    Interval::new(at(9, 0), at(17, 0)).unwrap()
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn rest_config(base_url: String) -> RestStoreConfig {
    RestStoreConfig {
        base_url,
        api_key: "service-key".to_string(),
        user_id: "user-1".to_string(),
        ..RestStoreConfig::default()
    }
}

/// PostgREST stand-in: checks auth and filters, returns rows with extra columns.
async fn events_table(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if headers.get("apikey").map(|v| v.as_bytes()) != Some(b"service-key".as_slice()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no api key"})));
    }
    let filters_ok = params.get("user_id").map(String::as_str) == Some("eq.user-1")
        && params.get("start").map(String::as_str) == Some("lt.2026-03-02T17:00:00Z")
        && params.get("end").map(String::as_str) == Some("gt.2026-03-02T09:00:00Z");
    if !filters_ok {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad filters"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {
                "start": "2026-03-02T10:00:00+00:00",
                "end": "2026-03-02T11:00:00+00:00",
                "title": "Team Sync",
                "category": "work"
            },
            {
                "start": "2026-03-02T08:30:00+00:00",
                "end": "2026-03-02T09:15:00+00:00",
                "title": "Commute call"
            }
        ])),
    )
}

// ── RestEventStore ──────────────────────────────────────────────────────────

#[tokio::test]
async fn rest_store_fetches_user_events_in_window() {
    let base = spawn(Router::new().route("/rest/v1/events", get(events_table))).await;
    let store = RestEventStore::new(&rest_config(base)).unwrap();

    let events = store.list_events(&work_day()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start, at(10, 0));
    assert_eq!(events[0].end, at(11, 0));
    assert_eq!(events[1].start, at(8, 30));
}

#[tokio::test]
async fn rest_store_reports_http_errors_as_unavailable() {
    let app = Router::new().route(
        "/rest/v1/events",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = spawn(app).await;
    let store = RestEventStore::new(&rest_config(base)).unwrap();

    let err = store.list_events(&work_day()).await.unwrap_err();

    match err {
        StoreError::Unavailable(message) => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("maintenance"), "{message}");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn rest_store_reports_bad_rows_as_malformed() {
    let app = Router::new().route(
        "/rest/v1/events",
        get(|| async { Json(json!([{ "start": "yesterday", "end": 3 }])) }),
    );
    let base = spawn(app).await;
    let store = RestEventStore::new(&rest_config(base)).unwrap();

    let err = store.list_events(&work_day()).await.unwrap_err();

    assert!(matches!(err, StoreError::Malformed(_)));
}

#[tokio::test]
async fn rest_store_unreachable_host_is_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let store = RestEventStore::new(&rest_config(format!("http://{addr}"))).unwrap();

    let err = store.list_events(&work_day()).await.unwrap_err();

    assert!(matches!(err, StoreError::Unavailable(_)));
}

// ── FileEventStore ──────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_filters_to_window() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"title": "Standup", "start": "2026-03-02T09:30:00Z", "end": "2026-03-02T09:45:00Z"}},
            {{"title": "Dinner", "start": "2026-03-02T19:00:00Z", "end": "2026-03-02T20:00:00Z"}},
            {{"title": "Ends at open", "start": "2026-03-02T08:00:00Z", "end": "2026-03-02T09:00:00Z"}}
        ]"#
    )
    .unwrap();
    let store = FileEventStore::new(file.path().to_path_buf());

    let events = store.list_events(&work_day()).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start, at(9, 30));
}

#[tokio::test]
async fn file_store_missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileEventStore::new(dir.path().join("missing.json"));

    let err = store.list_events(&work_day()).await.unwrap_err();

    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[tokio::test]
async fn file_store_invalid_json_is_malformed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let store = FileEventStore::new(file.path().to_path_buf());

    let err = store.list_events(&work_day()).await.unwrap_err();

    assert!(matches!(err, StoreError::Malformed(_)));
}
