use std::sync::Arc;

use tracing::debug;

use crate::api::CategoriesApi;
use crate::error::ApiError;
use crate::models::Category;
use crate::store::AppState;

use super::with_slot;

/// Fallback shown for feeds with no category assigned.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
/// Fallback shown when a feed references a category that no longer exists.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown Category";
/// Neutral gray used when no category color applies.
pub const FALLBACK_CATEGORY_COLOR: &str = "#64748b";

/// Keeps the shared category list in sync with the `/categories` resource.
#[derive(Debug, Clone)]
pub struct CategoryService {
    api: CategoriesApi,
    state: Arc<AppState>,
}

impl CategoryService {
    pub fn new(api: CategoriesApi, state: Arc<AppState>) -> Self {
        Self { api, state }
    }

    pub async fn load_categories(&self) -> Result<Vec<Category>, ApiError> {
        let token = self.state.categories_gen.begin();
        let state = &self.state;
        with_slot(
            &state.loading.categories,
            &state.errors.categories,
            "Failed to load categories",
            async {
                let categories = self.api.list().await?;
                if state.categories_gen.is_current(token) {
                    state.categories.set(categories.clone());
                } else {
                    debug!("discarding stale category list response");
                }
                Ok(categories)
            },
        )
        .await
    }

    /// Create a category and append it to the container.
    pub async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput(
                "category name is required".to_string(),
            ));
        }

        let state = &self.state;
        with_slot(
            &state.loading.adding,
            &state.errors.categories,
            "Failed to create category",
            async {
                let category = self.api.create(name, color).await?;
                state
                    .categories
                    .update(|categories| categories.push(category.clone()));
                Ok(category)
            },
        )
        .await
    }

    /// Update a category on the server, then patch name and color in place.
    pub async fn update_category(
        &self,
        id: i64,
        name: &str,
        color: &str,
    ) -> Result<(), ApiError> {
        let state = &self.state;
        with_slot(
            &state.loading.adding,
            &state.errors.categories,
            "Failed to update category",
            async {
                self.api.update(id, name, color).await?;
                state.categories.update(|categories| {
                    for category in categories.iter_mut() {
                        if category.id == id {
                            category.name = name.to_string();
                            category.color = color.to_string();
                        }
                    }
                });
                Ok(())
            },
        )
        .await
    }

    /// Delete a category on the server, then drop it from the container.
    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let state = &self.state;
        with_slot(
            &state.loading.deleting,
            &state.errors.categories,
            "Failed to delete category",
            async {
                self.api.delete(id).await?;
                state
                    .categories
                    .update(|categories| categories.retain(|category| category.id != id));
                Ok(())
            },
        )
        .await
    }
}

/// Display name for a feed's category, with fallbacks for unassigned and
/// dangling references. No referential integrity is enforced client-side.
pub fn category_name(category_id: Option<i64>, categories: &[Category]) -> String {
    let Some(id) = category_id else {
        return UNCATEGORIZED_LABEL.to_string();
    };
    categories
        .iter()
        .find(|category| category.id == id)
        .map(|category| category.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_string())
}

/// Display color for a feed's category, falling back to a neutral gray.
pub fn category_color(category_id: Option<i64>, categories: &[Category]) -> String {
    let Some(id) = category_id else {
        return FALLBACK_CATEGORY_COLOR.to_string();
    };
    categories
        .iter()
        .find(|category| category.id == id)
        .map(|category| category.color.clone())
        .unwrap_or_else(|| FALLBACK_CATEGORY_COLOR.to_string())
}
