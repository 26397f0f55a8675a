use serde::Deserialize;
use serde_json::json;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::models::{Article, Category, Feed, FeedList, FeedStats};
use crate::transport::{ApiTransport, RawBody};

/// Article count when listing by feed without an explicit limit.
pub const DEFAULT_FEED_ARTICLE_LIMIT: u32 = 100;
/// Article count for search results without an explicit limit.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Color assigned to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

/// Key/value query-string builder shared by every resource client. Values
/// are percent-encoded, so free text (search queries) is safe to pass.
fn query_string(pairs: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Fields accepted by `PUT /rss`. Only set fields make it into the query.
#[derive(Debug, Clone, Default)]
pub struct FeedUpdate {
    pub url: Option<String>,
    pub feed_size: Option<i64>,
    pub sync: Option<i64>,
    pub category_id: Option<i64>,
}

impl FeedUpdate {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(url) = &self.url {
            pairs.push(("url", url.clone()));
        }
        if let Some(feed_size) = self.feed_size {
            pairs.push(("feedsize", feed_size.to_string()));
        }
        if let Some(sync) = self.sync {
            pairs.push(("sync", sync.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryid", category_id.to_string()));
        }
        pairs
    }
}

/// Client for the `/rss` resource.
#[derive(Debug, Clone)]
pub struct FeedsApi {
    transport: ApiTransport,
}

impl FeedsApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Feed>, ApiError> {
        let list: FeedList = self.transport.get_json("/rss").await?;
        Ok(list.into_vec())
    }

    pub async fn by_id(&self, id: i64) -> Result<Feed, ApiError> {
        let path = format!("/rss?{}", query_string(&[("id", id.to_string())]));
        self.transport.get_json(&path).await
    }

    /// Register a new feed URL. The creation response shape has varied
    /// between backend versions, so it is returned raw; callers reload the
    /// list to observe the new entry.
    pub async fn create(&self, url: &str) -> Result<RawBody, ApiError> {
        self.transport.post("/rss", json!({ "url": url })).await
    }

    pub async fn update(&self, id: i64, update: &FeedUpdate) -> Result<RawBody, ApiError> {
        let mut pairs = vec![("id", id.to_string())];
        pairs.extend(update.to_pairs());
        let path = format!("/rss?{}", query_string(&pairs));
        self.transport.put(&path).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/rss?{}", query_string(&[("id", id.to_string())]));
        self.transport.delete(&path).await?;
        Ok(())
    }

    pub async fn stats(&self, id: i64) -> Result<FeedStats, ApiError> {
        let path = format!("/rss/stats?{}", query_string(&[("id", id.to_string())]));
        self.transport.get_json(&path).await
    }
}

/// `GET /articles/single` answers with either a bare object or a
/// one-element array depending on backend version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SingleArticle {
    One(Article),
    Many(Vec<Article>),
}

/// Client for the `/articles` resource.
#[derive(Debug, Clone)]
pub struct ArticlesApi {
    transport: ApiTransport,
}

impl ArticlesApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Article>, ApiError> {
        self.transport.get_json("/articles").await
    }

    pub async fn by_id(&self, id: i64) -> Result<Article, ApiError> {
        let path = format!(
            "/articles/single?{}",
            query_string(&[("id", id.to_string())])
        );
        let single: SingleArticle = self.transport.get_json(&path).await?;
        match single {
            SingleArticle::One(article) => Ok(article),
            SingleArticle::Many(mut articles) => {
                if articles.is_empty() {
                    Err(ApiError::NotFound(format!("article {id}")))
                } else {
                    Ok(articles.remove(0))
                }
            }
        }
    }

    pub async fn by_feed(&self, rss_id: i64, limit: Option<u32>) -> Result<Vec<Article>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_FEED_ARTICLE_LIMIT);
        let path = format!(
            "/articles/by-rss?{}",
            query_string(&[("rssid", rss_id.to_string()), ("limit", limit.to_string())])
        );
        self.transport.get_json(&path).await
    }

    pub async fn set_read(&self, id: i64, read: bool) -> Result<(), ApiError> {
        let path = format!(
            "/articles/update?{}",
            query_string(&[("id", id.to_string()), ("read", read.to_string())])
        );
        self.transport.put(&path).await?;
        Ok(())
    }

    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Article>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let path = format!(
            "/articles/search?{}",
            query_string(&[("query", query.to_string()), ("limit", limit.to_string())])
        );
        self.transport.get_json(&path).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!(
            "/articles/delete?{}",
            query_string(&[("id", id.to_string())])
        );
        self.transport.delete(&path).await?;
        Ok(())
    }
}

/// Client for the `/categories` resource.
#[derive(Debug, Clone)]
pub struct CategoriesApi {
    transport: ApiTransport,
}

impl CategoriesApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.transport.get_json("/categories").await
    }

    pub async fn create(&self, name: &str, color: Option<&str>) -> Result<Category, ApiError> {
        let color = color.unwrap_or(DEFAULT_CATEGORY_COLOR);
        let body = json!({ "name": name, "color": color });
        self.transport
            .post("/categories", body)
            .await?
            .decode("/categories")
    }

    pub async fn update(&self, id: i64, name: &str, color: &str) -> Result<(), ApiError> {
        let path = format!(
            "/categories?{}",
            query_string(&[
                ("id", id.to_string()),
                ("name", name.to_string()),
                ("color", color.to_string()),
            ])
        );
        self.transport.put(&path).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/categories?{}", query_string(&[("id", id.to_string())]));
        self.transport.delete(&path).await?;
        Ok(())
    }
}
