use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tfidf_core::tfidf::idf;
use tfidf_core::tokenizer::{normalize_word, tokenize};
use tfidf_core::{build_from_collection, Collection, DocumentEntry, InvertedIndex, ScoreResult};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    /// Overrides the collection size used for IDF.
    pub d: Option<usize>,
}
fn default_k() -> usize { 10 }

#[derive(Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub words: Vec<String>,
    pub total_documents: usize,
    pub total_hits: usize,
    pub took_s: f64,
    pub results: Vec<ScoreResult>,
}

#[derive(Serialize, Deserialize)]
pub struct WordResponse {
    pub word: String,
    pub idf: f64,
    pub documents: Vec<DocumentEntry>,
}

#[derive(Clone)]
pub struct AppState {
    pub collection_path: PathBuf,
    /// Queries only ever read; a rebuild swaps in a fresh index.
    pub index: Arc<RwLock<InvertedIndex>>,
    pub admin_token: Option<String>,
}

fn load_index(collection_path: &std::path::Path) -> Result<InvertedIndex> {
    let collection = Collection::open(collection_path)?;
    build_from_collection(&collection)
}

pub fn build_app(collection_path: String) -> Result<Router> {
    build_app_with_token(collection_path, std::env::var("ADMIN_TOKEN").ok())
}

pub fn build_app_with_token(collection_path: String, admin_token: Option<String>) -> Result<Router> {
    let collection_path = PathBuf::from(collection_path);
    let index = load_index(&collection_path)?;
    tracing::info!(num_docs = index.num_documents(), num_words = index.tree.len(), "index loaded");
    let app_state = AppState { collection_path, index: Arc::new(RwLock::new(index)), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/word/:word", get(word_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let words = tokenize(&params.q);
    let index = state.index.read();
    let total_documents = params.d.unwrap_or_else(|| index.num_documents());

    let mut list = match words.as_slice() {
        [] => Default::default(),
        [word] => index.query(word, total_documents),
        _ => index.query_multi(&words, total_documents),
    };
    drop(index);

    let total_hits = list.len();
    list.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, "search");
    Json(SearchResponse {
        query: params.q,
        words,
        total_documents,
        total_hits,
        took_s: elapsed.as_secs_f64(),
        results: list.into_vec(),
    })
}

pub async fn word_handler(State(state): State<AppState>, Path(word): Path<String>) -> Result<Json<WordResponse>, (StatusCode, String)> {
    let word = normalize_word(&word);
    let index = state.index.read();
    let docs = index
        .tree
        .find(&word)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("{word:?} is not indexed")))?;
    let resp = WordResponse {
        idf: idf(docs.len(), index.num_documents()),
        documents: docs.iter().cloned().collect(),
        word,
    };
    Ok(Json(resp))
}

async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let path = state.collection_path.clone();
    let fresh = tokio::task::spawn_blocking(move || load_index(&path))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "index rebuild failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
        })?;
    let body = serde_json::json!({ "num_docs": fresh.num_documents(), "num_words": fresh.tree.len() });
    *state.index.write() = fresh;
    tracing::info!(%body, "index rebuilt");
    Ok(Json(body))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
