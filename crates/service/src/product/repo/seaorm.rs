use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use models::{product, Product};

use crate::category::repository::page_offset;
use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create_product(&self, p: &Product) -> Result<(), ServiceError> {
        let am = product::ActiveModel {
            id: Set(p.id),
            name: Set(p.name.clone()),
            price: Set(p.price),
            category_id: Set(p.category_id),
            description: Set(p.description.clone()),
            image: Set(p.image.clone()),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
        };
        product::Entity::insert(am).exec_without_returning(&self.db).await?;
        Ok(())
    }

    async fn replace_product(&self, p: &Product) -> Result<bool, ServiceError> {
        // id and created_at are immutable
        let am = product::ActiveModel {
            name: Set(p.name.clone()),
            price: Set(p.price),
            category_id: Set(p.category_id),
            description: Set(p.description.clone()),
            image: Set(p.image.clone()),
            updated_at: Set(p.updated_at),
            ..Default::default()
        };
        let res = product::Entity::update_many()
            .set(am)
            .filter(product::Column::Id.eq(p.id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn get_product_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn get_products(&self, category_id: Option<Uuid>, page: u64, size: u64) -> Result<Vec<Product>, ServiceError> {
        let Some(offset) = page_offset(page, size) else {
            return Ok(Vec::new());
        };
        let mut query = product::Entity::find();
        if let Some(cid) = category_id {
            query = query.filter(product::Column::CategoryId.eq(cid));
        }
        let items = query
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .limit(size.min(i64::MAX as u64))
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn product_crud_and_filter_on_sqlite() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let lanche = Uuid::new_v4();
        let bebida = Uuid::new_v4();

        let burger = Product::new("X-Burger", 9.90, lanche, "pão, carne e queijo", "burger.png")?;
        let soda = Product::new("Refrigerante", 5.50, bebida, "lata 350ml", "soda.png")?;
        repo.create_product(&burger).await?;
        repo.create_product(&soda).await?;

        let found = repo.get_product_by_id(burger.id).await?.expect("stored");
        assert_eq!(found.price, 9.90);
        assert_eq!(found.category_id, lanche);

        let drinks = repo.get_products(Some(bebida), 1, 10).await?;
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].id, soda.id);
        assert_eq!(repo.get_products(None, 1, 10).await?.len(), 2);

        let mut changed = found.clone();
        changed.price = 11.0;
        changed.updated_at = models::now();
        assert!(repo.replace_product(&changed).await?);
        let stored = repo.get_product_by_id(burger.id).await?.unwrap();
        assert_eq!(stored.price, 11.0);
        assert_eq!(stored.created_at, burger.created_at);

        let ghost = Product::new("ghost", 1.0, lanche, "", "")?;
        assert!(!repo.replace_product(&ghost).await?);

        assert!(repo.delete_product(soda.id).await?);
        assert!(!repo.delete_product(soda.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn far_page_is_empty_on_sqlite() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let lanche = Uuid::new_v4();
        repo.create_product(&Product::new("X-Burger", 9.90, lanche, "", "")?).await?;
        assert!(repo.get_products(None, i64::MAX as u64, 3).await?.is_empty());
        assert!(repo.get_products(Some(lanche), u64::MAX, u64::MAX).await?.is_empty());
        assert_eq!(repo.get_products(Some(lanche), 1, u64::MAX).await?.len(), 1);
        Ok(())
    }
}
