// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

use folio::api::cache::QueryCache;
use folio::api::client::ArticleClient;
use folio::config::ApiConfig;
use folio::models::article::ArticleDraft;

/// In-process stand-in for the article backend: the full endpoint surface
/// over an in-memory store, plus recording of update payloads so tests
/// can assert what actually went over the wire.
///
/// Held for as long as a test runs; the spawned server task dies with the
/// runtime.
pub struct TestEnv {
    pub client: ArticleClient,
    pub cache: QueryCache,
    pub addr: SocketAddr,
    state: BackendState,
}

impl TestEnv {
    /// Bind an ephemeral port, serve the mock router, and build a client
    /// pointed at it.
    pub async fn start() -> Self {
        let state = BackendState::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("failed to read local addr");

        let router = mock_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock backend stopped");
        });

        let cache = QueryCache::new();
        let client = ArticleClient::new(ApiConfig::new(format!("http://{addr}")), cache.clone());

        Self {
            client,
            cache,
            addr,
            state,
        }
    }

    /// Every PUT body the mock received, in order.
    pub fn recorded_updates(&self) -> Vec<Value> {
        self.state.inner.lock().unwrap().update_bodies.clone()
    }

    pub fn article_count(&self) -> usize {
        self.state.inner.lock().unwrap().articles.len()
    }
}

pub fn draft(title: &str, content: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        content: content.to_string(),
        description: String::new(),
        summary: String::new(),
    }
}

#[derive(Clone, Default)]
struct BackendState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    articles: Vec<Value>,
    next_id: u64,
    update_bodies: Vec<Value>,
}

impl Inner {
    fn timestamp(&self) -> String {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (base + Duration::seconds(self.next_id as i64))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }
}

fn mock_router(state: BackendState) -> Router {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/search", get(search_articles))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/articles/{id}/summarize", post(summarize_article))
        .route("/articles/{id}/embed", post(embed_article))
        .with_state(state)
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Article not found"})),
    )
}

async fn list_articles(State(state): State<BackendState>) -> Json<Value> {
    let inner = state.inner.lock().unwrap();
    Json(Value::Array(inner.articles.clone()))
}

async fn get_article(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let inner = state.inner.lock().unwrap();
    inner
        .articles
        .iter()
        .find(|a| a["_id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_article(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = state.inner.lock().unwrap();
    inner.next_id += 1;
    let now = inner.timestamp();
    let article = json!({
        "_id": format!("mock{:04}", inner.next_id),
        "title": body["title"].as_str().unwrap_or_default(),
        "content": body["content"].as_str().unwrap_or_default(),
        "description": body["description"].as_str().unwrap_or_default(),
        "summary": body["summary"].as_str().unwrap_or_default(),
        "created_at": now,
        "updated_at": now,
    });
    inner.articles.push(article.clone());
    (StatusCode::CREATED, Json(article))
}

async fn update_article(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut inner = state.inner.lock().unwrap();
    inner.update_bodies.push(body.clone());

    let now = inner.timestamp();
    let article = inner
        .articles
        .iter_mut()
        .find(|a| a["_id"] == id.as_str())
        .ok_or_else(not_found)?;

    for field in ["title", "content", "description", "summary"] {
        if let Some(value) = body.get(field).and_then(Value::as_str) {
            article[field] = json!(value);
        }
    }
    article["updated_at"] = json!(now);
    Ok(Json(article.clone()))
}

async fn delete_article(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut inner = state.inner.lock().unwrap();
    let before = inner.articles.len();
    inner.articles.retain(|a| a["_id"] != id.as_str());
    if inner.articles.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn search_articles(
    State(state): State<BackendState>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    let query = params
        .get("query")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(10);

    let inner = state.inner.lock().unwrap();
    let hits: Vec<Value> = inner
        .articles
        .iter()
        .filter(|a| {
            let title = a["title"].as_str().unwrap_or_default().to_lowercase();
            let content = a["content"].as_str().unwrap_or_default().to_lowercase();
            title.contains(&query) || content.contains(&query)
        })
        .take(limit)
        .cloned()
        .collect();
    Json(Value::Array(hits))
}

async fn summarize_article(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut inner = state.inner.lock().unwrap();
    let article = inner
        .articles
        .iter_mut()
        .find(|a| a["_id"] == id.as_str())
        .ok_or_else(not_found)?;

    let summary = format!("Summary of {}", article["title"].as_str().unwrap_or_default());
    article["summary"] = json!(summary);
    Ok(Json(json!({"summary": summary})))
}

async fn embed_article(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let inner = state.inner.lock().unwrap();
    if !inner.articles.iter().any(|a| a["_id"] == id.as_str()) {
        return Err(not_found());
    }
    Ok(Json(json!({
        "message": format!("Embedding stored for article {id}")
    })))
}
