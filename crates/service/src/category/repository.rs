use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use models::Category;

use super::domain::CategoryRequest;
use crate::errors::ServiceError;

/// Persistence port for categories.
///
/// `page` is 1-based. Mutations return whether a record matched.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create_category(&self, category: &Category) -> Result<(), ServiceError>;
    async fn replace_category(&self, category: &Category) -> Result<bool, ServiceError>;
    async fn update_category(&self, id: Uuid, fields: &CategoryRequest, updated_at: DateTimeWithTimeZone) -> Result<bool, ServiceError>;
    async fn get_category_by_id(&self, id: Uuid) -> Result<Option<Category>, ServiceError>;
    async fn get_categories(&self, page: u64, size: u64) -> Result<Vec<Category>, ServiceError>;
    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Slice an already ordered listing into the requested 1-based page.
pub(crate) fn page_of<T>(items: Vec<T>, page: u64, size: u64) -> Vec<T> {
    let skip = page.saturating_sub(1).saturating_mul(size);
    items
        .into_iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(size).unwrap_or(usize::MAX))
        .collect()
}

/// Row offset of a 1-based page, or `None` when it falls outside what a SQL
/// `OFFSET` can address. Such a page can only be empty.
pub(crate) fn page_offset(page: u64, size: u64) -> Option<u64> {
    page.saturating_sub(1)
        .checked_mul(size)
        .filter(|offset| *offset <= i64::MAX as u64)
}

/// Simple in-memory repository for tests and embedding without a database.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, RwLock};

    #[derive(Default)]
    pub struct InMemoryCategoryRepository {
        items: RwLock<Vec<Category>>, // insertion order
        writes: AtomicUsize,
        last_page: Mutex<Option<(u64, u64)>>,
    }

    impl InMemoryCategoryRepository {
        /// Number of create/replace/update/delete calls that reached the store.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        /// The `(page, size)` of the most recent listing call.
        pub async fn last_page_request(&self) -> Option<(u64, u64)> { *self.last_page.lock().await }

        /// Stored categories in insertion order.
        pub async fn all(&self) -> Vec<Category> { self.items.read().await.clone() }

        pub async fn len(&self) -> usize { self.items.read().await.len() }

        pub async fn is_empty(&self) -> bool { self.items.read().await.is_empty() }
    }

    #[async_trait]
    impl CategoryRepository for InMemoryCategoryRepository {
        async fn create_category(&self, category: &Category) -> Result<(), ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            if items.iter().any(|c| c.id == category.id) {
                return Err(ServiceError::Db(format!("duplicate category id {}", category.id)));
            }
            items.push(category.clone());
            Ok(())
        }

        async fn replace_category(&self, category: &Category) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            match items.iter_mut().find(|c| c.id == category.id) {
                Some(stored) => {
                    stored.name = category.name.clone();
                    stored.description = category.description.clone();
                    stored.updated_at = category.updated_at;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn update_category(&self, id: Uuid, fields: &CategoryRequest, updated_at: DateTimeWithTimeZone) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            match items.iter_mut().find(|c| c.id == id) {
                Some(stored) => {
                    stored.name = fields.name.clone();
                    stored.description = fields.description.clone();
                    stored.updated_at = updated_at;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn get_category_by_id(&self, id: Uuid) -> Result<Option<Category>, ServiceError> {
            let items = self.items.read().await;
            Ok(items.iter().find(|c| c.id == id).cloned())
        }

        async fn get_categories(&self, page: u64, size: u64) -> Result<Vec<Category>, ServiceError> {
            *self.last_page.lock().await = Some((page, size));
            let mut all = self.items.read().await.clone();
            all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(page_of(all, page, size))
        }

        async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            let before = items.len();
            items.retain(|c| c.id != id);
            Ok(items.len() != before)
        }
    }
}
