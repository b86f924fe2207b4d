//! Create `product` table.
//! `category_id` is checked by the service layer; there is no foreign key, so
//! deleting a category leaves its products in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(string_len(Product::Name, 256).not_null())
                    .col(double(Product::Price).not_null())
                    .col(uuid(Product::CategoryId).not_null())
                    .col(text(Product::Description).not_null())
                    .col(string_len(Product::Image, 1024).not_null())
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Product::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Price,
    CategoryId,
    Description,
    Image,
    CreatedAt,
    UpdatedAt,
}
