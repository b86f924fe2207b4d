use std::sync::Arc;

use async_trait::async_trait;
use common::pagination::Pagination;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::{category, Category};

use super::domain::CategoryRequest;
use super::lookup::CategoryLookup;
use super::repository::CategoryRepository;
use super::seed;
use crate::errors::ServiceError;
use crate::ids::parse_id;

/// Application service for the category lifecycle.
pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and persist a new category.
    ///
    /// # Examples
    /// ```
    /// use service::category::{CategoryService, domain::CategoryRequest, repository::mock::InMemoryCategoryRepository};
    /// use std::sync::Arc;
    /// let svc = CategoryService::new(Arc::new(InMemoryCategoryRepository::default()));
    /// let created = tokio_test::block_on(svc.create_category(CategoryRequest::new("Lanche", "Categoria de Lanches"))).unwrap();
    /// assert_eq!(created.created_at, created.updated_at);
    /// ```
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(&self, request: CategoryRequest) -> Result<Category, ServiceError> {
        let category = Category::new(&request.name, &request.description)?;
        self.repo
            .create_category(&category)
            .await
            .map_err(ServiceError::repository("failed to create category"))?;
        info!(category_id = %category.id, "category_created");
        Ok(category)
    }

    /// Overwrite name and description of an existing category.
    #[instrument(skip(self, request))]
    pub async fn replace_category(&self, id: &str, request: CategoryRequest) -> Result<Category, ServiceError> {
        let id = parse_id(id)?;
        let mut category = self.fetch(id).await?;
        category::validate_name(&request.name)?;

        category.name = request.name;
        category.description = request.description;
        category.updated_at = models::now();

        let matched = self.repo
            .replace_category(&category)
            .await
            .map_err(ServiceError::repository("failed to replace category"))?;
        if !matched {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %category.id, "category_replaced");
        Ok(category)
    }

    /// Store the supplied fields as-is and return the record as persisted.
    #[instrument(skip(self, request))]
    pub async fn update_category(&self, id: &str, request: CategoryRequest) -> Result<Category, ServiceError> {
        let id = parse_id(id)?;
        category::validate_name(&request.name)?;

        let matched = self.repo
            .update_category(id, &request, models::now())
            .await
            .map_err(ServiceError::repository("failed to update category"))?;
        if !matched {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %id, "category_updated");
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_category_by_id(&self, id: &str) -> Result<Category, ServiceError> {
        let id = parse_id(id)?;
        self.fetch(id).await
    }

    /// List categories; non-positive `page`/`size` fall back to 1 and 10.
    #[instrument(skip(self))]
    pub async fn get_categories(&self, page: i64, size: i64) -> Result<Vec<Category>, ServiceError> {
        let (page, size) = Pagination::new(page, size).normalize();
        self.repo
            .get_categories(page, size)
            .await
            .map_err(ServiceError::repository("failed to list categories"))
    }

    /// Delete a category. Products referencing it are left untouched.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        let existed = self.repo
            .delete_category(id)
            .await
            .map_err(ServiceError::repository("error deleting category"))?;
        if !existed {
            debug!(category_id = %id, "category_delete_miss");
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %id, "category_deleted");
        Ok(())
    }

    /// Create the default categories when the store holds none.
    ///
    /// Returns how many were created. A failure aborts immediately; categories
    /// created before it are kept.
    #[instrument(skip(self))]
    pub async fn initialize_categories(&self) -> Result<usize, ServiceError> {
        let existing = self.get_categories(1, 1).await?;
        if !existing.is_empty() {
            debug!("categories_already_seeded");
            return Ok(0);
        }

        let mut created = 0;
        for request in seed::seed_requests() {
            self.create_category(request).await?;
            created += 1;
        }
        info!(created, "categories_seeded");
        Ok(created)
    }

    async fn fetch(&self, id: Uuid) -> Result<Category, ServiceError> {
        self.repo
            .get_category_by_id(id)
            .await
            .map_err(ServiceError::repository("failed to fetch category"))?
            .ok_or_else(|| {
                debug!(category_id = %id, "category_lookup_miss");
                ServiceError::not_found("category")
            })
    }
}

#[async_trait]
impl<R: CategoryRepository> CategoryLookup for CategoryService<R> {
    async fn find_category(&self, id: &str) -> Result<Category, ServiceError> {
        self.get_category_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::repository::mock::InMemoryCategoryRepository;
    use crate::category::seed::SEED_CATEGORIES;
    use sea_orm::prelude::DateTimeWithTimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> (CategoryService<InMemoryCategoryRepository>, Arc<InMemoryCategoryRepository>) {
        let repo = Arc::new(InMemoryCategoryRepository::default());
        (CategoryService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let created = svc.create_category(CategoryRequest::new("Lanche", "Categoria de Lanches")).await?;
        assert!(!created.id.is_nil());
        assert_eq!(created.created_at, created.updated_at);

        let found = svc.get_category_by_id(&created.id.to_string()).await?;
        assert_eq!(found.name, "Lanche");
        assert_eq!(found.description, "Categoria de Lanches");
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_empty_name_without_writing() {
        let (svc, repo) = service();
        let err = svc.create_category(CategoryRequest::new("", "no name")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn get_with_malformed_or_unknown_id() {
        let (svc, _) = service();
        let err = svc.get_category_by_id("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidIdentifier(_)));

        let err = svc.get_category_by_id(&Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_bumps_updated_at() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let created = svc.create_category(CategoryRequest::new("Bebida", "Categoria de Bebidas")).await?;
        let replaced = svc
            .replace_category(&created.id.to_string(), CategoryRequest::new("Bebidas", "Refrigerantes e sucos"))
            .await?;
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.created_at, created.created_at);
        assert!(replaced.updated_at >= created.updated_at);

        let stored = svc.get_category_by_id(&created.id.to_string()).await?;
        assert_eq!(stored.name, "Bebidas");
        assert_eq!(stored.description, "Refrigerantes e sucos");
        Ok(())
    }

    #[tokio::test]
    async fn replace_unknown_category_is_not_found() {
        let (svc, repo) = service();
        let err = svc
            .replace_category(&Uuid::new_v4().to_string(), CategoryRequest::new("x", "y"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn update_stores_supplied_fields_verbatim() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let created = svc.create_category(CategoryRequest::new("Sobremesa", "Categoria de Sobremesas")).await?;
        // an empty description is written as given, unlike product updates
        let updated = svc
            .update_category(&created.id.to_string(), CategoryRequest::new("Doces", ""))
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Doces");
        assert_eq!(updated.description, "");
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_or_invalid() {
        let (svc, _) = service();
        let err = svc
            .update_category(&Uuid::new_v4().to_string(), CategoryRequest::new("x", ""))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = svc.update_category("nope", CategoryRequest::new("x", "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn listing_normalizes_pagination() -> Result<(), anyhow::Error> {
        let (svc, repo) = service();
        svc.get_categories(0, -5).await?;
        assert_eq!(repo.last_page_request().await, Some((1, 10)));

        svc.get_categories(3, 500).await?;
        assert_eq!(repo.last_page_request().await, Some((3, 500)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let created = svc.create_category(CategoryRequest::new("Lanche", "")).await?;
        let id = created.id.to_string();
        svc.delete_category(&id).await?;
        let err = svc.delete_category(&id).await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn initialize_seeds_once_in_order() -> Result<(), anyhow::Error> {
        let (svc, repo) = service();
        assert_eq!(svc.initialize_categories().await?, 4);
        assert_eq!(svc.initialize_categories().await?, 0);
        assert_eq!(repo.len().await, 4);

        // creation order; the listing may reorder seeds sharing a timestamp
        let created: Vec<String> = repo.all().await.into_iter().map(|c| c.name).collect();
        let expected: Vec<String> = SEED_CATEGORIES.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(created, expected);

        let mut listed: Vec<String> = svc.get_categories(1, 10).await?.into_iter().map(|c| c.name).collect();
        let mut sorted = expected.clone();
        listed.sort();
        sorted.sort();
        assert_eq!(listed, sorted);
        Ok(())
    }

    #[tokio::test]
    async fn initialize_skips_non_empty_store() -> Result<(), anyhow::Error> {
        let (svc, repo) = service();
        svc.create_category(CategoryRequest::new("Combo", "Categoria de Combos")).await?;
        assert_eq!(svc.initialize_categories().await?, 0);
        assert_eq!(repo.len().await, 1);
        Ok(())
    }

    /// Fails every create after the first `allowed` ones.
    struct FailingAfter {
        inner: InMemoryCategoryRepository,
        allowed: usize,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl CategoryRepository for FailingAfter {
        async fn create_category(&self, category: &Category) -> Result<(), ServiceError> {
            if self.creates.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(ServiceError::Db("disk full".into()));
            }
            self.inner.create_category(category).await
        }
        async fn replace_category(&self, category: &Category) -> Result<bool, ServiceError> {
            self.inner.replace_category(category).await
        }
        async fn update_category(&self, id: Uuid, fields: &CategoryRequest, updated_at: DateTimeWithTimeZone) -> Result<bool, ServiceError> {
            self.inner.update_category(id, fields, updated_at).await
        }
        async fn get_category_by_id(&self, id: Uuid) -> Result<Option<Category>, ServiceError> {
            self.inner.get_category_by_id(id).await
        }
        async fn get_categories(&self, page: u64, size: u64) -> Result<Vec<Category>, ServiceError> {
            self.inner.get_categories(page, size).await
        }
        async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.inner.delete_category(id).await
        }
    }

    #[tokio::test]
    async fn initialize_aborts_and_keeps_partial_seed() {
        let repo = Arc::new(FailingAfter { inner: InMemoryCategoryRepository::default(), allowed: 2, creates: AtomicUsize::new(0) });
        let svc = CategoryService::new(repo.clone());

        let err = svc.initialize_categories().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository { context: "failed to create category", .. }));
        assert_eq!(repo.inner.len().await, 2);
        assert_eq!(repo.creates.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn lookup_resolves_existing_category() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let created = svc.create_category(CategoryRequest::new("Lanche", "")).await?;
        let via_trait = CategoryLookup::find_category(&svc, &created.id.to_string()).await?;
        assert_eq!(via_trait.id, created.id);
        Ok(())
    }
}
