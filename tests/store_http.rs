//! The HTTP store client against an in-process axum server.

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

use taskdeck::io::remote::HttpRemote;
use taskdeck::io::snapshot::Snapshot;
use taskdeck::io::store::{StoreClient, StoreError, TaskService};
use taskdeck::model::task::parse_due;
use taskdeck::model::{ListQuery, Priority, Sort, SortField, SortOrder, StatusFilter, Task};

/// What the fake store saw
#[derive(Default)]
struct Seen {
    queries: Vec<HashMap<String, String>>,
    bodies: Vec<(String, Value)>,
    deleted: Vec<u64>,
}

type Shared = Arc<Mutex<Seen>>;

fn stored_tasks() -> Value {
    json!([
        {"id": 1, "title": "Pay rent", "priority": 3, "priorityDisplay": "High",
         "dueDate": "2025-06-08T23:59:59.999Z", "completed": false},
        {"id": 2, "title": "Buy milk", "description": "2 liters", "priority": 2,
         "dueDate": 1749686399999i64, "completed": true}
    ])
}

async fn list(State(seen): State<Shared>, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    seen.lock().unwrap().queries.push(q);
    Json(stored_tasks())
}

async fn create(State(seen): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().bodies.push(("POST".into(), body.clone()));
    body["id"] = json!(42);
    Json(body)
}

async fn update(
    State(seen): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.lock().unwrap().bodies.push((format!("PUT {}", id), body.clone()));
    Json(body)
}

async fn delete(State(seen): State<Shared>, Path(id): Path<u64>) -> StatusCode {
    seen.lock().unwrap().deleted.push(id);
    StatusCode::NO_CONTENT
}

/// Serve `app` on an ephemeral port from a background runtime; returns the
/// base URL
fn spawn_server(app: Router) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{}/api", addr)
}

fn fake_store() -> (String, Shared) {
    let seen = Shared::default();
    let app = Router::new()
        .route("/api/tasks", get(list).post(create))
        .route("/api/tasks/{id}", axum::routing::put(update).delete(delete))
        .with_state(seen.clone());
    (spawn_server(app), seen)
}

fn broken_store() -> String {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    spawn_server(app)
}

fn garbled_store() -> String {
    let app = Router::new().route("/api/tasks", get(|| async { "not json" }));
    spawn_server(app)
}

fn remote(url: &str) -> HttpRemote {
    HttpRemote::new(url, Duration::from_secs(5)).unwrap()
}

fn new_task() -> Task {
    Task::new("Call mom", parse_due("2025-06-12").unwrap()).with_priority(Priority::Medium)
}

#[test]
fn list_sends_query_parameters() {
    let (url, seen) = fake_store();
    let remote = remote(&url);

    let query = ListQuery {
        sort: Sort::new(SortField::Priority, SortOrder::Desc),
        status: StatusFilter::Active,
        search: "  milk ".into(),
    };
    let tasks = remote.list(&query).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Pay rent");
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[1].description.as_deref(), Some("2 liters"));
    assert!(tasks[1].completed);

    remote.list(&ListQuery::default()).unwrap();

    let seen = seen.lock().unwrap();
    let expected: HashMap<String, String> = [
        ("sort", "priority-desc"),
        ("status", "active"),
        ("search", "milk"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(seen.queries[0], expected);
    // status=all and a blank search are left off
    let expected: HashMap<String, String> =
        [("sort".to_string(), "dueDate-asc".to_string())].into_iter().collect();
    assert_eq!(seen.queries[1], expected);
}

#[test]
fn create_posts_body_without_id() {
    let (url, seen) = fake_store();
    let created = remote(&url).create(&new_task()).unwrap();
    assert_eq!(created.id, Some(42));
    assert_eq!(created.title, "Call mom");
    assert_eq!(created.due, new_task().due);

    let seen = seen.lock().unwrap();
    let (method, body) = &seen.bodies[0];
    assert_eq!(method, "POST");
    assert!(body.get("id").is_none());
    assert_eq!(body["priority"], 2);
    assert_eq!(body["priorityDisplay"], "Medium");
    assert_eq!(body["completed"], false);
}

#[test]
fn update_puts_full_task_to_its_url() {
    let (url, seen) = fake_store();
    let task = new_task().with_id(7).completed(true);
    let updated = remote(&url).update(7, &task).unwrap();
    assert_eq!(updated, task);

    let seen = seen.lock().unwrap();
    let (method, body) = &seen.bodies[0];
    assert_eq!(method, "PUT 7");
    assert_eq!(body["id"], 7);
    assert_eq!(body["completed"], true);
}

#[test]
fn delete_accepts_no_content() {
    let (url, seen) = fake_store();
    remote(&url).delete(3).unwrap();
    assert_eq!(seen.lock().unwrap().deleted, vec![3]);
}

#[test]
fn non_success_status_is_an_error() {
    let url = broken_store();
    let remote = remote(&url);
    assert!(matches!(
        remote.list(&ListQuery::default()),
        Err(StoreError::Status { status: 500 })
    ));
    assert!(matches!(
        remote.delete(1),
        Err(StoreError::Status { status: 500 })
    ));
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let url = garbled_store();
    assert!(matches!(
        remote(&url).list(&ListQuery::default()),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn client_lists_from_snapshot_when_store_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[{"id": 9, "title": "Cached", "priority": 1, "dueDate": "2025-06-01"}]"#,
    )
    .unwrap();

    let client = StoreClient::new(Some(Box::new(remote(&broken_store()))), Snapshot::new(&path));
    let tasks = client.list(&ListQuery::default()).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Cached");

    // Mutations still go to the store and report its failure
    assert!(matches!(
        client.create(&new_task()),
        Err(StoreError::Status { status: 500 })
    ));
}

#[test]
fn client_prefers_store_when_it_answers() {
    let (url, _) = fake_store();
    let dir = TempDir::new().unwrap();
    let client = StoreClient::new(
        Some(Box::new(remote(&url))),
        Snapshot::new(dir.path().join("missing.json")),
    );
    assert_eq!(client.list(&ListQuery::default()).unwrap().len(), 2);
    assert_eq!(client.create(&new_task()).unwrap().id, Some(42));
}

#[test]
fn read_only_client_rejects_mutations() {
    let dir = TempDir::new().unwrap();
    let client = StoreClient::new(None, Snapshot::new(dir.path().join("missing.json")));
    assert!(client.is_read_only());
    assert!(matches!(
        client.list(&ListQuery::default()),
        Err(StoreError::SnapshotRead { .. })
    ));
    assert!(matches!(
        client.update(1, &new_task().with_id(1)),
        Err(StoreError::ReadOnly { op: "update" })
    ));
    assert!(matches!(
        client.delete(1),
        Err(StoreError::ReadOnly { .. })
    ));
}
