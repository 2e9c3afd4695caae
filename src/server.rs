//! HTTP surface over a shared [`ContactStore`].
//!
//! Every handler takes the single store lock for the whole request, reads
//! included, so requests see the store one at a time.

use crate::config::ServerConfig;
use crate::contact::ContactRecord;
use crate::store::{lock_store, ContactStore, SearchOutcome, SharedStore};
use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub applied: bool,
    pub contacts: Vec<ContactRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryDepth {
    pub undo_depth: usize,
    pub redo_depth: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts).post(add_contact))
        .route("/search", get(search_contact))
        .route("/contacts/:name", delete(delete_contact))
        .route("/undo", post(undo))
        .route("/redo", post(redo))
        .route("/history", get(history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Bind and serve until the process is stopped
pub async fn serve(store: ContactStore, config: &ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(target: "server", "Contact service listening on {}", address);
    axum::serve(listener, router(store.into_shared()))
        .await
        .context("Server error")?;
    Ok(())
}

async fn list_contacts(State(store): State<SharedStore>) -> Json<Vec<ContactRecord>> {
    Json(lock_store(&store).list_all())
}

async fn add_contact(
    State(store): State<SharedStore>,
    Json(contact): Json<NewContact>,
) -> (StatusCode, Json<Vec<ContactRecord>>) {
    let mut store = lock_store(&store);
    store.add(&contact.name, &contact.email);
    debug!(target: "server", "Added '{}' over HTTP", contact.name.trim());
    (StatusCode::CREATED, Json(store.list_all()))
}

async fn delete_contact(State(store): State<SharedStore>, Path(name): Path<String>) -> StatusCode {
    lock_store(&store).delete(&name);
    StatusCode::NO_CONTENT
}

async fn search_contact(
    State(store): State<SharedStore>,
    Query(params): Query<SearchParams>,
) -> Response {
    match lock_store(&store).search(params.name.trim()) {
        SearchOutcome::Found(record) => Json(record).into_response(),
        SearchOutcome::NotFound => error_response(StatusCode::NOT_FOUND, "not found"),
        SearchOutcome::NoQuery => error_response(StatusCode::BAD_REQUEST, "no query"),
    }
}

async fn undo(State(store): State<SharedStore>) -> Json<HistoryResponse> {
    let mut store = lock_store(&store);
    let applied = store.undo();
    Json(HistoryResponse {
        applied,
        contacts: store.list_all(),
    })
}

async fn redo(State(store): State<SharedStore>) -> Json<HistoryResponse> {
    let mut store = lock_store(&store);
    let applied = store.redo();
    Json(HistoryResponse {
        applied,
        contacts: store.list_all(),
    })
}

async fn history(State(store): State<SharedStore>) -> Json<HistoryDepth> {
    let store = lock_store(&store);
    Json(HistoryDepth {
        undo_depth: store.undo_depth(),
        redo_depth: store.redo_depth(),
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
