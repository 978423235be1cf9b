//! Common test utilities for integration tests
//!
//! Provides a stub of the hosted store's REST interface (tables under
//! `/rest/v1/:table`, `select` projections, `column=eq.value` filters,
//! inserts answered with `return=representation`) plus helpers to drive the
//! real router with `tower::ServiceExt::oneshot`.

use axum::{
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use momsquad_api::app::{build_router, AppState};
use momsquad_api::config::{ApiConfig, Config, GoogleConfig, StoreConfig, UrlConfig};
use momsquad_shared::store::StoreClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory tables behind the stub store
#[derive(Debug, Default)]
pub struct Tables {
    /// Rows per table name
    pub rows: HashMap<String, Vec<Value>>,

    /// Tables whose reads answer with a JSON `null` body (the store's
    /// "absent result" shape)
    pub null_reads: Vec<String>,

    /// Forced failure for the next insert: (table, status, body text)
    pub insert_error: Option<(String, u16, String)>,
}

#[derive(Clone)]
struct StubState {
    tables: Arc<Mutex<Tables>>,
    requests: Arc<AtomicUsize>,
}

fn apply_projection(row: &Value, select: &str) -> Value {
    if select == "*" {
        return row.clone();
    }
    let mut out = serde_json::Map::new();
    for column in select.split(',') {
        if let Some(v) = row.get(column) {
            out.insert(column.to_string(), v.clone());
        }
    }
    Value::Object(out)
}

async fn stub_select(
    State(state): State<StubState>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let tables = state.tables.lock().unwrap();

    if tables.null_reads.contains(&table) {
        return Json(Value::Null);
    }

    let select = params.get("select").map(String::as_str).unwrap_or("*");
    let rows = tables.rows.get(&table).cloned().unwrap_or_default();
    let matched: Vec<Value> = rows
        .into_iter()
        .filter(|row| {
            params.iter().all(|(key, value)| {
                if key == "select" {
                    return true;
                }
                let Some(wanted) = value.strip_prefix("eq.") else {
                    return true;
                };
                match row.get(key) {
                    Some(Value::String(s)) => s == wanted,
                    Some(other) => other.to_string() == wanted,
                    None => false,
                }
            })
        })
        .map(|row| apply_projection(&row, select))
        .collect();

    Json(Value::Array(matched))
}

async fn stub_insert(
    State(state): State<StubState>,
    Path(table): Path<String>,
    Json(mut row): Json<Value>,
) -> impl IntoResponse {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let mut tables = state.tables.lock().unwrap();

    if let Some((failing_table, status, message)) = tables.insert_error.clone() {
        if failing_table == table {
            tables.insert_error = None;
            return (
                StatusCode::from_u16(status).unwrap(),
                message,
            )
                .into_response();
        }
    }

    // The real store fills these defaults for user rows
    if table == "users" {
        let object = row.as_object_mut().unwrap();
        object
            .entry("id")
            .or_insert_with(|| json!(uuid::Uuid::new_v4().to_string()));
        object.entry("hours").or_insert(json!(0));
        object.entry("sessions").or_insert(json!(0));
    }

    tables.rows.entry(table).or_default().push(row.clone());
    Json(json!([row])).into_response()
}

fn stub_store_router(state: StubState) -> Router {
    Router::new()
        .route("/rest/v1/:table", get(stub_select).post(stub_insert))
        .with_state(state)
}

/// The application under test plus handles into the stub store
pub struct TestApp {
    pub app: Router,
    pub tables: Arc<Mutex<Tables>>,

    /// Number of requests the stub store has served
    pub store_requests: Arc<AtomicUsize>,
}

impl TestApp {
    /// Spawns the stub store on an ephemeral port and builds the router
    /// against it.
    pub async fn spawn() -> Self {
        let tables = Arc::new(Mutex::new(Tables::default()));
        let requests = Arc::new(AtomicUsize::new(0));
        let stub_state = StubState {
            tables: tables.clone(),
            requests: requests.clone(),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub store");
        let addr = listener.local_addr().expect("stub store addr");
        tokio::spawn(async move {
            axum::serve(listener, stub_store_router(stub_state))
                .await
                .expect("stub store serve");
        });

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            store: StoreConfig {
                url: format!("http://{}", addr),
                service_key: "test-service-key".to_string(),
            },
            google: GoogleConfig {
                client_id: "test-client-id".to_string(),
                client_secret: "test-client-secret".to_string(),
                token_url: format!("http://{}/oauth/token", addr),
                jwks_url: format!("http://{}/oauth/certs", addr),
            },
            urls: UrlConfig {
                frontend: "http://frontend.test".to_string(),
                backend: "http://backend.test".to_string(),
            },
        };

        let store = StoreClient::new(&config.store.url, &config.store.service_key)
            .expect("store client");
        let app = build_router(AppState::new(store, config));

        TestApp {
            app,
            tables,
            store_requests: requests,
        }
    }

    /// Number of store round trips so far
    pub fn store_request_count(&self) -> usize {
        self.store_requests.load(Ordering::SeqCst)
    }

    /// Seeds a full user row and returns it.
    pub fn seed_user(&self, username: &str, email: &str, name_first: &str) -> Value {
        let row = json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "username": username,
            "password": "hunter2222",
            "nameFirst": name_first,
            "nameLast": "Tester",
            "email": email,
            "phoneNumber": "555 123 4567",
            "hours": 0,
            "sessions": 0,
        });
        self.tables
            .lock()
            .unwrap()
            .rows
            .entry("users".to_string())
            .or_default()
            .push(row.clone());
        row
    }

    /// Sends a GET and returns (status, parsed JSON body).
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(path)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        split_response(response).await
    }

    /// Sends a JSON POST and returns (status, parsed JSON body).
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        split_response(response).await
    }
}

async fn split_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// A well-formed create-user body.
pub fn valid_user_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "password": "hunter2222",
        "nameFirst": "Mary",
        "nameLast": "Major",
        "email": email,
        "phoneNumber": "(555) 123-4567",
    })
}
