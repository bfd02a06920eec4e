//! HTTP boundary over a single shared [`RecordStore`].
//!
//! One `RwLock` guards the store, so mutations are applied one at a time in
//! arrival order. Each successful mutation is written through the backend
//! while the write guard is still held. The write runs on the blocking pool
//! and takes the backend's own lock, so a concurrent `lt` process is kept out.

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use locate_core::persist::{PersistError, RecordBackend};
use locate_core::query::{aggregate, filter};
use locate_core::{Counters, Draft, ErrorCode, Record, RecordStore, StoreError};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared application state
pub struct AppState {
    pub store: RwLock<RecordStore>,
    backend: Arc<dyn RecordBackend + Send + Sync>,
}

impl AppState {
    pub fn new(store: RecordStore, backend: Arc<dyn RecordBackend + Send + Sync>) -> Self {
        Self {
            store: RwLock::new(store),
            backend,
        }
    }

    async fn persist(&self, store: &RecordStore) -> Result<(), ApiError> {
        let backend = Arc::clone(&self.backend);
        let records = store.list().to_vec();
        let saved = tokio::task::spawn_blocking(move || backend.save_locked(&records)).await;
        match saved {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                error!(error = %err, "failed to persist records; in-memory state kept");
                Err(ApiError::Persist(err))
            }
            Err(err) => {
                error!(error = %err, "save task did not complete; in-memory state kept");
                Err(ApiError::Task(err))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("save task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(
                StoreError::DuplicateIdentity { .. }
                | StoreError::IdentityChanged { .. }
                | StoreError::InvalidTransition { .. },
            ) => StatusCode::CONFLICT,
            Self::Persist(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            Self::Store(err) => err.code(),
            Self::Persist(err) => err.code(),
            Self::Task(_) => ErrorCode::InternalUnexpected,
        };
        let body = serde_json::json!({
            "error": {
                "code": code.code(),
                "message": self.to_string(),
                "hint": code.hint(),
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/records", get(list_records).post(create_record))
        .route("/records/summary", get(summary))
        .route(
            "/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "locate server listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("locate server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Record>> {
    let store = state.store.read().await;
    Json(filter(store.list(), &params.q).into_iter().cloned().collect())
}

async fn summary(State(state): State<Arc<AppState>>) -> Json<Counters> {
    let store = state.store.read().await;
    Json(aggregate(store.list()))
}

async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let store = state.store.read().await;
    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StoreError::NotFound { id }.into())
}

async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<Draft>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let mut store = state.store.write().await;
    let record = store.create(&draft)?;
    state.persist(&store).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut draft): Json<Draft>,
) -> Result<Json<Record>, ApiError> {
    if draft.id.trim().is_empty() {
        draft.id.clone_from(&id);
    }
    let mut store = state.store.write().await;
    let record = store.update(&id, &draft)?;
    state.persist(&store).await?;
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete(&id)?;
    state.persist(&store).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use locate_core::lock::LockKind;
    use locate_core::persist::{JsonFileBackend, MemoryBackend};
    use locate_core::seed::seed_records;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn seeded() -> (Router, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let state = Arc::new(AppState::new(RecordStore::with_seed(), backend.clone()));
        (create_router(state), backend)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    fn ids(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|r| r["id"].as_str())
            .collect()
    }

    fn new_ticket() -> Value {
        json!({
            "id": "FM-2331",
            "location": "Hendry St & Main St",
            "description": "Locate gas service for curb ramp",
            "priority": "Urgent",
            "type": "Gas"
        })
    }

    #[tokio::test]
    async fn list_returns_seed_in_order() {
        let (app, _) = seeded();
        let (status, body) = send(&app, "GET", "/records", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["FM-2317", "FM-2318", "FM-2320", "FM-2324"]);
    }

    #[tokio::test]
    async fn list_filters_by_query() {
        let (app, _) = seeded();
        let (_, body) = send(&app, "GET", "/records?q=WATER", None).await;
        assert_eq!(ids(&body), ["FM-2317", "FM-2320"]);
    }

    #[tokio::test]
    async fn summary_counts_seed() {
        let (app, _) = seeded();
        let (status, body) = send(&app, "GET", "/records/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "open": 3, "resolved": 1, "urgent": 1 }));
    }

    #[tokio::test]
    async fn missing_record_is_404_with_code() {
        let (app, _) = seeded();
        let (status, body) = send(&app, "GET", "/records/FM-0000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "E2001");
        assert!(body["error"]["message"].as_str().expect("message").contains("FM-0000"));
    }

    #[tokio::test]
    async fn create_prepends_and_persists() {
        let (app, backend) = seeded();
        let (status, body) = send(&app, "POST", "/records", Some(new_ticket())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["utility"], "Gas");
        assert_eq!(body["due"], "TBD");
        assert_eq!(body["status"], "Open");

        let (_, list) = send(&app, "GET", "/records", None).await;
        assert_eq!(ids(&list)[0], "FM-2331");

        let saved = backend.load().expect("load").expect("saved");
        assert_eq!(saved.len(), 5);
        assert_eq!(saved[0].id, "FM-2331");
    }

    #[tokio::test]
    async fn create_duplicate_is_conflict() {
        let (app, backend) = seeded();
        let mut ticket = new_ticket();
        ticket["id"] = json!("FM-2317");
        let (status, body) = send(&app, "POST", "/records", Some(ticket)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "E2003");
        assert!(backend.load().expect("load").is_none());
    }

    #[tokio::test]
    async fn create_with_blank_description_is_bad_request() {
        let (app, _) = seeded();
        let mut ticket = new_ticket();
        ticket["description"] = json!("   ");
        let (status, body) = send(&app, "POST", "/records", Some(ticket)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "E2005");

        let (_, list) = send(&app, "GET", "/records", None).await;
        assert_eq!(ids(&list).len(), 4);
    }

    #[tokio::test]
    async fn update_without_body_id_uses_path() {
        let (app, _) = seeded();
        let (_, mut current) = send(&app, "GET", "/records/FM-2320", None).await;
        current["id"] = json!("");
        current["status"] = json!("Resolved");

        let (status, body) = send(&app, "PUT", "/records/FM-2320", Some(current)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "FM-2320");
        assert_eq!(body["status"], "Resolved");

        let (_, summary) = send(&app, "GET", "/records/summary", None).await;
        assert_eq!(summary["resolved"], 2);
    }

    #[tokio::test]
    async fn update_cannot_change_id() {
        let (app, _) = seeded();
        let (_, mut current) = send(&app, "GET", "/records/FM-2318", None).await;
        current["id"] = json!("FM-9999");
        let (status, body) = send(&app, "PUT", "/records/FM-2318", Some(current)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "E2004");
    }

    #[tokio::test]
    async fn update_missing_is_404() {
        let (app, _) = seeded();
        let (status, _) = send(&app, "PUT", "/records/FM-0001", Some(new_ticket())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let (app, backend) = seeded();
        let (status, body) = send(&app, "DELETE", "/records/FM-2324", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
        assert_eq!(backend.load().expect("load").expect("saved").len(), 3);

        let (status, body) = send(&app, "DELETE", "/records/FM-2324", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "E2001");
    }

    struct BrokenBackend;

    impl RecordBackend for BrokenBackend {
        fn load(&self) -> Result<Option<Vec<Record>>, PersistError> {
            Ok(None)
        }

        fn save(&self, _records: &[Record]) -> Result<(), PersistError> {
            Err(PersistError::Poisoned)
        }
    }

    #[tokio::test]
    async fn persistence_failure_is_500_but_memory_wins() {
        let state = Arc::new(AppState::new(RecordStore::with_seed(), Arc::new(BrokenBackend)));
        let app = create_router(state);

        let (status, body) = send(&app, "DELETE", "/records/FM-2317", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "E9001");

        let (status, _) = send(&app, "GET", "/records/FM-2317", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn save_waits_for_the_project_lock() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let backend = JsonFileBackend::for_project(dir.path());
        backend.save(&seed_records()).expect("seed file");
        let state = Arc::new(AppState::new(
            RecordStore::with_seed(),
            Arc::new(backend.clone()),
        ));
        let app = create_router(state);

        let held = backend.lock(LockKind::Exclusive).expect("lock");
        let (status, body) = send(&app, "DELETE", "/records/FM-2317", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "E5002");
        assert_eq!(backend.load().expect("load").expect("some").len(), 4);

        held.release();
        let (status, _) = send(&app, "DELETE", "/records/FM-2318", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let on_disk = backend.load().expect("load").expect("some");
        let ids: Vec<&str> = on_disk.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["FM-2320", "FM-2324"]);
    }
}
