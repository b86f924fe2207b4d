use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use models::{product, Category, Product};

use super::domain::{ProductPatch, ProductRequest};
use super::repository::ProductRepository;
use crate::category::CategoryLookup;
use crate::errors::ServiceError;
use crate::ids::parse_id;

/// Application service for the product lifecycle.
///
/// Every write that sets a category, and every category-filtered listing,
/// first resolves the category through `C`. The check is not atomic with the
/// write that follows it.
pub struct ProductService<R: ProductRepository, C: CategoryLookup> {
    repo: Arc<R>,
    categories: Arc<C>,
}

impl<R: ProductRepository, C: CategoryLookup> ProductService<R, C> {
    pub fn new(repo: Arc<R>, categories: Arc<C>) -> Self { Self { repo, categories } }

    #[instrument(skip(self, request), fields(name = %request.name, category_id = %request.category_id))]
    pub async fn create_product(&self, request: ProductRequest) -> Result<Product, ServiceError> {
        let category = self.ensure_category(&request.category_id).await?;
        let product = Product::new(
            &request.name,
            request.price,
            category.id,
            &request.description,
            &request.image,
        )?;

        self.repo
            .create_product(&product)
            .await
            .map_err(ServiceError::repository("failed to create product"))?;
        info!(product_id = %product.id, category_id = %product.category_id, "product_created");
        Ok(product)
    }

    /// Overwrite every mutable field of an existing product.
    #[instrument(skip(self, request))]
    pub async fn replace_product(&self, id: &str, request: ProductRequest) -> Result<Product, ServiceError> {
        let id = parse_id(id)?;
        let category = self.ensure_category(&request.category_id).await?;
        let mut product = self.fetch(id).await?;
        product::validate_name(&request.name)?;
        product::validate_price(request.price)?;

        product.name = request.name;
        product.price = request.price;
        product.category_id = category.id;
        product.description = request.description;
        product.image = request.image;
        product.updated_at = models::now();

        self.store(&product, "failed to replace product").await?;
        info!(product_id = %product.id, "product_replaced");
        Ok(product)
    }

    /// Merge the supplied fields into the stored product.
    ///
    /// A price can never be reset to zero this way; `Some(0.0)` fails price
    /// validation and the request conversion drops zero prices altogether.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, ServiceError> {
        let id = parse_id(id)?;
        let mut product = self.fetch(id).await?;

        if let Some(name) = patch.name {
            product::validate_name(&name)?;
            product.name = name;
        }
        if let Some(price) = patch.price {
            product::validate_price(price)?;
            product.price = price;
        }
        if let Some(raw) = patch.category_id {
            product.category_id = self.ensure_category(&raw).await?.id;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }
        product.updated_at = models::now();

        self.store(&product, "failed to update product").await?;
        info!(product_id = %product.id, "product_updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &str) -> Result<Product, ServiceError> {
        let id = parse_id(id)?;
        self.fetch(id).await
    }

    /// List products, optionally restricted to one category.
    ///
    /// An empty `category` means no filter; otherwise it must name an
    /// existing category.
    #[instrument(skip(self))]
    pub async fn get_products(&self, category: &str, page: i64, size: i64) -> Result<Vec<Product>, ServiceError> {
        let (page, size) = Pagination::new(page, size).normalize();
        let filter = if category.is_empty() {
            None
        } else {
            Some(self.ensure_category(category).await?.id)
        };

        self.repo
            .get_products(filter, page, size)
            .await
            .map_err(ServiceError::repository("error retrieving products"))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        let existed = self.repo
            .delete_product(id)
            .await
            .map_err(ServiceError::repository("error deleting product"))?;
        if !existed {
            debug!(product_id = %id, "product_delete_miss");
            return Err(ServiceError::not_found("product"));
        }
        info!(product_id = %id, "product_deleted");
        Ok(())
    }

    async fn ensure_category(&self, raw: &str) -> Result<Category, ServiceError> {
        self.categories.find_category(raw).await.map_err(|e| {
            warn!(category_id = raw, error = %e, "category_validation_failed");
            ServiceError::CategoryValidationFailed(Box::new(e))
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.repo
            .get_product_by_id(id)
            .await
            .map_err(ServiceError::repository("failed to fetch product"))?
            .ok_or_else(|| {
                debug!(product_id = %id, "product_lookup_miss");
                ServiceError::not_found("product")
            })
    }

    async fn store(&self, product: &Product, context: &'static str) -> Result<(), ServiceError> {
        let matched = self.repo
            .replace_product(product)
            .await
            .map_err(ServiceError::repository(context))?;
        if !matched {
            return Err(ServiceError::not_found("product"));
        }
        Ok(())
    }
}
