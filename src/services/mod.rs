use std::future::Future;

use tracing::error;

use crate::error::ApiError;
use crate::store::Store;

mod articles;
mod categories;
mod feeds;

pub use articles::{format_date, truncate_description, ArticleService};
pub use categories::{category_color, category_name, CategoryService};
pub use feeds::FeedService;

/// The one loading/error template every stateful service operation follows:
/// raise the named loading flag, clear the named error slot, run the call,
/// on failure log and store a user-facing message, always lower the flag.
/// Errors are returned to the caller either way; nothing is retried.
pub(crate) async fn with_slot<T, F>(
    loading: &Store<bool>,
    error_slot: &Store<Option<String>>,
    user_message: &str,
    fut: F,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    loading.set(true);
    error_slot.set(None);

    let result = fut.await;
    if let Err(err) = &result {
        error!(error = %err, "service call failed");
        error_slot.set(Some(user_message.to_string()));
    }

    loading.set(false);
    result
}
