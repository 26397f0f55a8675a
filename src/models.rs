use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscribed feed as returned by the `/rss` endpoints.
///
/// The backend has emitted both lowercase (`id`, `url`) and Go-default
/// (`ID`, `URL`) field names across versions; aliases accept either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(rename = "id", alias = "ID")]
    pub id: i64,
    #[serde(rename = "url", alias = "URL")]
    pub url: String,
    #[serde(rename = "title", alias = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "description", alias = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "feedSize", alias = "FeedSize", default)]
    pub feed_size: Option<i64>,
    #[serde(rename = "sync", alias = "Sync", default)]
    pub sync: Option<i64>,
    #[serde(rename = "CategoryID", alias = "categoryID", default)]
    pub category_id: Option<i64>,
}

/// `GET /rss` has returned both a bare array and an `{"entries": [...]}`
/// wrapper; both decode to the same list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedList {
    Entries { entries: Vec<Feed> },
    Flat(Vec<Feed>),
}

impl FeedList {
    pub fn into_vec(self) -> Vec<Feed> {
        match self {
            FeedList::Entries { entries } => entries,
            FeedList::Flat(feeds) => feeds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    #[serde(rename = "RssID", alias = "rssID", default)]
    pub rss_id: i64,
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Link", alias = "link", default)]
    pub link: String,
    #[serde(rename = "GUID", alias = "guid", default)]
    pub guid: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
    #[serde(rename = "PublishDate", alias = "publishDate", default)]
    pub publish_date: Option<String>,
    #[serde(rename = "Format", alias = "format", default)]
    pub format: Option<String>,
    #[serde(rename = "Identifier", alias = "identifier", default)]
    pub identifier: Option<String>,
    #[serde(rename = "Read", alias = "read", default)]
    pub read: bool,
    #[serde(rename = "CreatedAt", alias = "created_at", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt", alias = "updated_at", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Color", alias = "color", default)]
    pub color: String,
}

/// Per-feed statistics from `GET /rss/stats?id=`. Lenient on purpose: the
/// backend grows counters over time and absent fields read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedStats {
    #[serde(rename = "TotalArticles", alias = "total_articles", default)]
    pub total_articles: i64,
    #[serde(rename = "ReadArticles", alias = "read_articles", default)]
    pub read_articles: i64,
    #[serde(rename = "UnreadArticles", alias = "unread_articles", default)]
    pub unread_articles: i64,
}
