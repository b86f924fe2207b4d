use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("category name required".into()));
    }
    Ok(())
}

impl Model {
    /// Build a new category with a fresh id; `created_at == updated_at`.
    pub fn new(name: &str, description: &str) -> Result<Self, errors::ModelError> {
        validate_name(name)?;
        let now = crate::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_identity_and_equal_timestamps() {
        let c = Model::new("Lanche", "Categoria de Lanches").unwrap();
        assert!(!c.id.is_nil());
        assert_eq!(c.created_at, c.updated_at);
        assert_eq!(c.name, "Lanche");
        assert_eq!(c.description, "Categoria de Lanches");
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Model::new("   ", "whatever").unwrap_err();
        assert!(matches!(err, errors::ModelError::Validation(_)));
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let c = Model::new("Bebida", "Categoria de Bebidas").unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["name"], "Bebida");
        assert!(json.get("created_at").is_some());
    }
}
