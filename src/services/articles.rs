use std::sync::Arc;

use chrono::DateTime;
use tracing::{debug, error};

use crate::api::ArticlesApi;
use crate::error::ApiError;
use crate::models::Article;
use crate::store::AppState;

use super::with_slot;

/// Keeps the shared article list in sync with the `/articles` resource.
#[derive(Debug, Clone)]
pub struct ArticleService {
    api: ArticlesApi,
    state: Arc<AppState>,
}

impl ArticleService {
    pub fn new(api: ArticlesApi, state: Arc<AppState>) -> Self {
        Self { api, state }
    }

    pub async fn load_all(&self) -> Result<Vec<Article>, ApiError> {
        let token = self.state.articles_gen.begin();
        let state = &self.state;
        with_slot(
            &state.loading.articles,
            &state.errors.articles,
            "Failed to load articles. Please check if the backend is running.",
            async {
                let articles = self.api.list().await?;
                if state.articles_gen.is_current(token) {
                    state.articles.set(articles.clone());
                } else {
                    debug!("discarding stale article list response");
                }
                Ok(articles)
            },
        )
        .await
    }

    pub async fn load_by_feed(
        &self,
        feed_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Article>, ApiError> {
        let token = self.state.articles_gen.begin();
        let state = &self.state;
        with_slot(
            &state.loading.articles,
            &state.errors.articles,
            "Failed to load articles for this feed.",
            async {
                let articles = self.api.by_feed(feed_id, limit).await?;
                if state.articles_gen.is_current(token) {
                    state.articles.set(articles.clone());
                } else {
                    debug!(feed_id, "discarding stale by-feed response");
                }
                Ok(articles)
            },
        )
        .await
    }

    /// Search the article index. An empty or whitespace-only query falls
    /// back to loading everything via the all-articles endpoint.
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Article>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_all().await;
        }

        let token = self.state.articles_gen.begin();
        let state = &self.state;
        with_slot(
            &state.loading.articles,
            &state.errors.articles,
            "Search failed. Please try again.",
            async {
                let articles = self.api.search(query, limit).await?;
                if state.articles_gen.is_current(token) {
                    state.articles.set(articles.clone());
                } else {
                    debug!(query, "discarding stale search response");
                }
                Ok(articles)
            },
        )
        .await
    }

    pub async fn article_by_id(&self, id: i64) -> Result<Article, ApiError> {
        self.api.by_id(id).await
    }

    /// Flip an article's read status on the server, then patch exactly that
    /// article in place. Returns the new status.
    pub async fn toggle_read(&self, id: i64, current: bool) -> Result<bool, ApiError> {
        let new_status = !current;
        if let Err(err) = self.api.set_read(id, new_status).await {
            error!(id, error = %err, "failed to update read status");
            self.state
                .errors
                .articles
                .set(Some("Failed to update article status".to_string()));
            return Err(err);
        }

        self.state.articles.update(|articles| {
            for article in articles.iter_mut() {
                if article.id == id {
                    article.read = new_status;
                }
            }
        });
        Ok(new_status)
    }

    /// Delete an article on the server, then drop it from the container.
    pub async fn delete_article(&self, id: i64, title: Option<&str>) -> Result<(), ApiError> {
        if let Err(err) = self.api.delete(id).await {
            error!(id, error = %err, "failed to delete article");
            let label = title.unwrap_or("this article");
            self.state
                .errors
                .articles
                .set(Some(format!("Failed to delete {label}")));
            return Err(err);
        }

        self.state
            .articles
            .update(|articles| articles.retain(|article| article.id != id));
        Ok(())
    }

    pub async fn refresh(&self) -> Result<Vec<Article>, ApiError> {
        self.load_all().await
    }

    /// Reload without touching loading or error state, for background
    /// polling that must not disturb the visible UI. Failures still
    /// propagate to the caller.
    pub async fn refresh_silently(&self) -> Result<Vec<Article>, ApiError> {
        let token = self.state.articles_gen.begin();
        let articles = self.api.list().await.map_err(|err| {
            error!(error = %err, "silent refresh failed");
            err
        })?;
        if self.state.articles_gen.is_current(token) {
            self.state.articles.set(articles.clone());
        } else {
            debug!("discarding stale silent refresh response");
        }
        Ok(articles)
    }

    /// Silent counterpart of [`load_by_feed`](Self::load_by_feed).
    pub async fn load_by_feed_silently(
        &self,
        feed_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Article>, ApiError> {
        let token = self.state.articles_gen.begin();
        let articles = self.api.by_feed(feed_id, limit).await.map_err(|err| {
            error!(feed_id, error = %err, "silent by-feed load failed");
            err
        })?;
        if self.state.articles_gen.is_current(token) {
            self.state.articles.set(articles.clone());
        } else {
            debug!(feed_id, "discarding stale silent by-feed response");
        }
        Ok(articles)
    }
}

/// Human-readable publication date: RFC 3339 or RFC 2822 input renders as
/// e.g. "Oct 21, 2024 07:28"; anything unparseable passes through raw.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.filter(|value| !value.trim().is_empty()) else {
        return "No date".to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(raw).or_else(|_| DateTime::parse_from_rfc2822(raw));
    match parsed {
        Ok(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Shorten a description for list display, respecting char boundaries.
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    if description.chars().count() <= max_chars {
        return description.to_string();
    }
    let truncated: String = description.chars().take(max_chars).collect();
    format!("{truncated}...")
}
