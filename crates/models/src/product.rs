use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{category, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category_id: Uuid,
    pub description: String,
    pub image: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

// Query-side relation only; the table carries no foreign key.
#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("product name required".into()));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(errors::ModelError::Validation("price must be greater than zero".into()));
    }
    Ok(())
}

impl Model {
    pub fn new(
        name: &str,
        price: f64,
        category_id: Uuid,
        description: &str,
        image: &str,
    ) -> Result<Self, errors::ModelError> {
        validate_name(name)?;
        validate_price(price)?;
        let now = crate::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            category_id,
            description: description.to_string(),
            image: image.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}
