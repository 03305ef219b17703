use serde::de::DeserializeOwned;

use crate::api::cache::{QueryCache, READ_TAGS};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::article::{
    Article, ArticleDraft, ArticleUpdate, EmbedResponse, SummaryResponse,
};

/// The single source of truth for backend communication: one operation
/// per endpoint, each mutation invalidating the read tags on success.
///
/// Holds no connection state: requests are built per call, which keeps
/// the struct `Send + Sync` on every target and lets the same code drive
/// the browser and the native test harness.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    config: ApiConfig,
    cache: QueryCache,
}

impl ArticleClient {
    pub fn new(config: ApiConfig, cache: QueryCache) -> Self {
        Self { config, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// `GET /articles`: the collection, in server order.
    pub async fn list(&self) -> Result<Vec<Article>, ApiError> {
        let resp = reqwest::get(self.config.endpoint("/articles")).await?;
        decode(resp).await
    }

    /// `GET /articles/{id}`.
    pub async fn get(&self, id: &str) -> Result<Article, ApiError> {
        let resp = reqwest::get(self.config.endpoint(&format!("/articles/{id}"))).await?;
        decode(resp).await
    }

    /// `POST /articles`. Invalidates the read tags on success.
    pub async fn create(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        let resp = reqwest::Client::new()
            .post(self.config.endpoint("/articles"))
            .json(draft)
            .send()
            .await?;
        let article: Article = decode(resp).await?;
        tracing::debug!(id = %article.id, "article created");
        self.cache.invalidate(READ_TAGS);
        Ok(article)
    }

    /// `PUT /articles/{id}`. Invalidates the read tags on success.
    pub async fn update(&self, id: &str, update: &ArticleUpdate) -> Result<Article, ApiError> {
        let resp = reqwest::Client::new()
            .put(self.config.endpoint(&format!("/articles/{id}")))
            .json(update)
            .send()
            .await?;
        let article: Article = decode(resp).await?;
        tracing::debug!(id = %article.id, "article updated");
        self.cache.invalidate(READ_TAGS);
        Ok(article)
    }

    /// `DELETE /articles/{id}`. Invalidates the read tags on success.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = reqwest::Client::new()
            .delete(self.config.endpoint(&format!("/articles/{id}")))
            .send()
            .await?;
        check_status(resp).await?;
        tracing::debug!(id, "article deleted");
        self.cache.invalidate(READ_TAGS);
        Ok(())
    }

    /// `GET /articles/search`: server-ranked, never cached.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>, ApiError> {
        let resp = reqwest::Client::new()
            .get(self.config.endpoint("/articles/search"))
            .query(&[("query", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /articles/{id}/summarize`. The summary lands server-side, so
    /// the read tags are invalidated for the views to pick it up.
    pub async fn summarize(&self, id: &str) -> Result<SummaryResponse, ApiError> {
        let resp = reqwest::Client::new()
            .post(self.config.endpoint(&format!("/articles/{id}/summarize")))
            .send()
            .await?;
        let summary: SummaryResponse = decode(resp).await?;
        self.cache.invalidate(READ_TAGS);
        Ok(summary)
    }

    /// `POST /articles/{id}/embed`. Changes nothing the client reads.
    pub async fn embed(&self, id: &str) -> Result<EmbedResponse, ApiError> {
        let resp = reqwest::Client::new()
            .post(self.config.endpoint(&format!("/articles/{id}/embed")))
            .send()
            .await?;
        decode(resp).await
    }
}

/// Map a non-2xx response to `ApiError`, passing 2xx through.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message: error_detail(&body),
    })
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let resp = check_status(resp).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the message out of the backend's `{"detail": "..."}` error body;
/// fall back to the raw body when it doesn't parse.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "unexpected server error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}
