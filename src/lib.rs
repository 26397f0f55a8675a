pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod transport;

pub use api::{ArticlesApi, CategoriesApi, FeedUpdate, FeedsApi};
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::{Article, Category, Feed, FeedStats};
pub use services::{ArticleService, CategoryService, FeedService};
pub use store::{shared_state, AppState, Store};
pub use transport::{ApiTransport, RawBody, RequestOptions};

use std::sync::Arc;

/// Everything wired together: one transport, one shared state, the three
/// services a UI talks to.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    pub state: Arc<AppState>,
    pub feeds: FeedService,
    pub articles: ArticleService,
    pub categories: CategoryService,
}

impl ReaderClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(ApiTransport::new(config))
    }

    pub fn with_transport(transport: ApiTransport) -> Self {
        let state = shared_state();
        Self {
            feeds: FeedService::new(FeedsApi::new(transport.clone()), state.clone()),
            articles: ArticleService::new(ArticlesApi::new(transport.clone()), state.clone()),
            categories: CategoryService::new(CategoriesApi::new(transport), state.clone()),
            state,
        }
    }
}
