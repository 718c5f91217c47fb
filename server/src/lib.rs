use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use docret_core::loader::{load_documents, LoaderOptions};
use docret_core::{Corpus, Model, SearchResults};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub docs_dir: PathBuf,
    pub loader: LoaderOptions,
    /// Required in `X-ADMIN-TOKEN` for admin endpoints; admin is disabled when unset.
    pub admin_token: Option<String>,
    /// Comma-separated allowed origins; any origin when unset or unparsable.
    pub cors_allow_origin: Option<String>,
}

/// `model` value that lets the engine choose between the probabilistic models.
pub const AUTO_MODEL: &str = "auto";

#[derive(Deserialize)]
pub struct SearchParams {
    pub model: String,
    #[serde(default)]
    pub q: String,
    /// Comma-separated raw terms for the non-overlapped model.
    pub terms: Option<String>,
    #[serde(default = "default_k")]
    pub k: usize,
    /// Keep zero-score entries.
    #[serde(default)]
    pub all: bool,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub model: Model,
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: SearchResults,
}

#[derive(Serialize)]
pub struct RebuildResponse {
    pub num_docs: usize,
    pub num_terms: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Queries clone the inner `Arc` and never hold the lock while searching.
    pub corpus: Arc<RwLock<Arc<Corpus>>>,
}

impl AppState {
    fn snapshot(&self) -> Arc<Corpus> {
        self.corpus.read().clone()
    }
}

pub fn load_corpus(config: &ServerConfig) -> Result<Corpus> {
    let documents = load_documents(&config.docs_dir, &config.loader)?;
    Ok(Corpus::build(documents))
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Build the corpus at startup
    let corpus = load_corpus(&config)?;
    tracing::info!(num_docs = corpus.len(), num_terms = corpus.index().len(), "corpus ready");

    let cors = match config.cors_allow_origin.as_deref() {
        Some(val) => {
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
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app_state = AppState { config: Arc::new(config), corpus: Arc::new(RwLock::new(Arc::new(corpus))) };
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/models", get(models_handler))
        .route("/search", get(search_handler))
        .route("/doc/:name", get(doc_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn models_handler() -> Json<Vec<serde_json::Value>> {
    Json(
        Model::ALL
            .iter()
            .map(|m| serde_json::json!({ "name": m.as_str(), "description": m.description() }))
            .collect(),
    )
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let corpus = state.snapshot();

    // `auto` picks between the probabilistic models; the response names the one used.
    let (model, mut results, query) = if params.model.eq_ignore_ascii_case(AUTO_MODEL) {
        let query = docret_core::Query::text(params.q.as_str());
        let (model, results) = corpus.search_auto(&query);
        (model, results, query)
    } else {
        let model: Model = params.model.parse().map_err(|e: anyhow::Error| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let query = match params.terms.as_deref() {
            Some(terms) if model == Model::NonOverlapped => {
                docret_core::Query::terms(terms.split(',').map(str::trim).filter(|t| !t.is_empty()))
            }
            _ => docret_core::Query::text(params.q.as_str()),
        };
        (model, corpus.search(model, &query), query)
    };
    if !params.all {
        results = results.positive();
    }
    let total_hits = results.len();
    let k = params.k.max(1).min(100);
    let results = results.top_k(k);

    let elapsed = start.elapsed();
    tracing::debug!(%model, total_hits, took_s = elapsed.as_secs_f64(), "search");
    Ok(Json(SearchResponse { model, query: query.text, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let corpus = state.snapshot();
    match corpus.document(&name) {
        Some(doc) => Ok(Json(serde_json::json!({ "name": doc.name, "text": doc.text }))),
        None => Err((StatusCode::NOT_FOUND, format!("document '{name}' not found"))),
    }
}

/// Reload the folder and swap the corpus in one step.
async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<RebuildResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let config = state.config.clone();
    let corpus = tokio::task::spawn_blocking(move || load_corpus(&config))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;

    let response = RebuildResponse { num_docs: corpus.len(), num_terms: corpus.index().len() };
    *state.corpus.write() = Arc::new(corpus);
    tracing::info!(num_docs = response.num_docs, num_terms = response.num_terms, "corpus rebuilt");
    Ok(Json(response))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.config.admin_token {
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
