//! Demo/static server routes.
//!
//! - `GET /api/news[?category=]` lists the fixed records, optionally filtered
//! - `GET /api/news/{id}` returns one record or 404
//! - every other path is served from the static directory, falling back to
//!   its `index.html`

pub mod data;

pub use data::{NewsItem, seed_items};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use std::path::Path as FsPath;
use std::sync::Arc;
use techtrends_core::Error;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::ApiError;

/// Body text for unknown record ids.
pub const NOT_FOUND_MESSAGE: &str = "News item not found";

#[derive(Clone)]
pub struct DemoState {
    items: Arc<Vec<NewsItem>>,
}

impl DemoState {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items: Arc::new(items) }
    }
}

#[derive(Debug, Deserialize)]
struct NewsFilter {
    category: Option<String>,
}

/// Build the demo router serving `static_dir` for non-API paths.
pub fn router(state: DemoState, static_dir: &FsPath) -> Router {
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/news", get(list_news))
        .route("/api/news/{id}", get(get_news))
        .route("/health", get(crate::health))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_news(State(state): State<DemoState>, Query(filter): Query<NewsFilter>) -> Json<Vec<NewsItem>> {
    let items = match filter.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state
            .items
            .iter()
            .filter(|item| item.in_category(category))
            .cloned()
            .collect(),
        None => state.items.as_ref().clone(),
    };

    tracing::debug!("listing {} news items", items.len());
    Json(items)
}

async fn get_news(State(state): State<DemoState>, Path(id): Path<String>) -> Result<Json<NewsItem>, ApiError> {
    id.parse::<u64>()
        .ok()
        .and_then(|id| state.items.iter().find(|item| item.id == id))
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.into()).into())
}
