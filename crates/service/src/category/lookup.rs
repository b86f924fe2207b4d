use async_trait::async_trait;
use std::sync::Arc;

use models::Category;

use crate::errors::ServiceError;

/// Capability to resolve a category from its textual id.
///
/// Errors are `InvalidIdentifier` for malformed ids and `NotFound` for misses.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    async fn find_category(&self, id: &str) -> Result<Category, ServiceError>;
}

#[async_trait]
impl<T: CategoryLookup + ?Sized> CategoryLookup for Arc<T> {
    async fn find_category(&self, id: &str) -> Result<Category, ServiceError> {
        (**self).find_category(id).await
    }
}
