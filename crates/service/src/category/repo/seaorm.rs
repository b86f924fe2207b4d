use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use models::{category, Category};

use crate::category::domain::CategoryRequest;
use crate::category::repository::{page_offset, CategoryRepository};
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn create_category(&self, c: &Category) -> Result<(), ServiceError> {
        let am = category::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            description: Set(c.description.clone()),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };
        category::Entity::insert(am).exec_without_returning(&self.db).await?;
        Ok(())
    }

    async fn replace_category(&self, c: &Category) -> Result<bool, ServiceError> {
        let am = category::ActiveModel {
            name: Set(c.name.clone()),
            description: Set(c.description.clone()),
            updated_at: Set(c.updated_at),
            ..Default::default()
        };
        let res = category::Entity::update_many()
            .set(am)
            .filter(category::Column::Id.eq(c.id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn update_category(&self, id: Uuid, fields: &CategoryRequest, updated_at: DateTimeWithTimeZone) -> Result<bool, ServiceError> {
        let am = category::ActiveModel {
            name: Set(fields.name.clone()),
            description: Set(fields.description.clone()),
            updated_at: Set(updated_at),
            ..Default::default()
        };
        let res = category::Entity::update_many()
            .set(am)
            .filter(category::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn get_category_by_id(&self, id: Uuid) -> Result<Option<Category>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn get_categories(&self, page: u64, size: u64) -> Result<Vec<Category>, ServiceError> {
        let Some(offset) = page_offset(page, size) else {
            return Ok(Vec::new());
        };
        let items = category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .order_by_asc(category::Column::Id)
            .limit(size.min(i64::MAX as u64))
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
