use async_trait::async_trait;
use uuid::Uuid;

use models::Product;

use crate::category::repository::page_of;
use crate::errors::ServiceError;

/// Persistence port for products.
///
/// `page` is 1-based; `category_id` narrows the listing when present.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: &Product) -> Result<(), ServiceError>;
    async fn replace_product(&self, product: &Product) -> Result<bool, ServiceError>;
    async fn get_product_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    async fn get_products(&self, category_id: Option<Uuid>, page: u64, size: u64) -> Result<Vec<Product>, ServiceError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and embedding without a database.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, RwLock};

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        items: RwLock<Vec<Product>>, // insertion order
        writes: AtomicUsize,
        last_query: Mutex<Option<(Option<Uuid>, u64, u64)>>,
    }

    impl InMemoryProductRepository {
        /// Number of create/replace/delete calls that reached the store.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        /// `(category filter, page, size)` of the most recent listing call.
        pub async fn last_query(&self) -> Option<(Option<Uuid>, u64, u64)> { *self.last_query.lock().await }

        pub async fn len(&self) -> usize { self.items.read().await.len() }

        pub async fn is_empty(&self) -> bool { self.items.read().await.is_empty() }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn create_product(&self, product: &Product) -> Result<(), ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            if items.iter().any(|p| p.id == product.id) {
                return Err(ServiceError::Db(format!("duplicate product id {}", product.id)));
            }
            items.push(product.clone());
            Ok(())
        }

        async fn replace_product(&self, product: &Product) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            match items.iter_mut().find(|p| p.id == product.id) {
                Some(stored) => {
                    let created_at = stored.created_at;
                    *stored = Product { created_at, ..product.clone() };
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn get_product_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
            let items = self.items.read().await;
            Ok(items.iter().find(|p| p.id == id).cloned())
        }

        async fn get_products(&self, category_id: Option<Uuid>, page: u64, size: u64) -> Result<Vec<Product>, ServiceError> {
            *self.last_query.lock().await = Some((category_id, page, size));
            let mut matching: Vec<Product> = self.items
                .read()
                .await
                .iter()
                .filter(|p| category_id.map_or(true, |cid| p.category_id == cid))
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(page_of(matching, page, size))
        }

        async fn delete_product(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut items = self.items.write().await;
            let before = items.len();
            items.retain(|p| p.id != id);
            Ok(items.len() != before)
        }
    }
}
