//! Listing indexes: products filtered by category, both tables ordered by creation time.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_category_created")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_category_created")
                    .table(Category::Table)
                    .col(Category::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_category_created").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_category_created").table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, CategoryId, CreatedAt }

#[derive(DeriveIden)]
enum Category { Table, CreatedAt }
