use std::sync::Arc;

use tracing::debug;

use crate::api::{FeedUpdate, FeedsApi};
use crate::error::ApiError;
use crate::models::{Feed, FeedStats};
use crate::store::AppState;

use super::with_slot;

/// Keeps the shared feed list in sync with the `/rss` resource.
#[derive(Debug, Clone)]
pub struct FeedService {
    api: FeedsApi,
    state: Arc<AppState>,
}

impl FeedService {
    pub fn new(api: FeedsApi, state: Arc<AppState>) -> Self {
        Self { api, state }
    }

    /// Fetch all feeds and replace the container with the result. A load
    /// that has been superseded by a newer one leaves the container alone.
    pub async fn load_feeds(&self) -> Result<Vec<Feed>, ApiError> {
        let token = self.state.feeds_gen.begin();
        let state = &self.state;
        with_slot(
            &state.loading.feeds,
            &state.errors.feeds,
            "Failed to load feeds. Please check if the backend is running.",
            async {
                let feeds = self.api.list().await?;
                if state.feeds_gen.is_current(token) {
                    state.feeds.set(feeds.clone());
                } else {
                    debug!("discarding stale feed list response");
                }
                Ok(feeds)
            },
        )
        .await
    }

    /// Register a new feed, then reload the list so the server-assigned
    /// entry (id, title, parsed metadata) shows up.
    pub async fn add_feed(&self, url: &str) -> Result<Vec<Feed>, ApiError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ApiError::InvalidInput(
                "please enter a valid RSS URL".to_string(),
            ));
        }

        let state = &self.state;
        with_slot(
            &state.loading.adding,
            &state.errors.feeds,
            "Failed to add RSS feed. Please check the URL and try again.",
            async {
                self.api.create(url).await?;
                self.load_feeds().await
            },
        )
        .await
    }

    /// Delete a feed on the server, then drop it from the container without
    /// refetching; every other entry keeps its position.
    pub async fn delete_feed(&self, id: i64) -> Result<(), ApiError> {
        let state = &self.state;
        with_slot(
            &state.loading.deleting,
            &state.errors.feeds,
            "Failed to delete feed",
            async {
                self.api.delete(id).await?;
                state.feeds.update(|feeds| feeds.retain(|feed| feed.id != id));
                Ok(())
            },
        )
        .await
    }

    pub async fn feed_by_id(&self, id: i64) -> Result<Feed, ApiError> {
        self.api.by_id(id).await
    }

    pub async fn update_feed(&self, id: i64, update: &FeedUpdate) -> Result<Vec<Feed>, ApiError> {
        self.api.update(id, update).await?;
        self.load_feeds().await
    }

    pub async fn feed_stats(&self, id: i64) -> Result<FeedStats, ApiError> {
        self.api.stats(id).await
    }
}
