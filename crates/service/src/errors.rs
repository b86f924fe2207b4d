use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid ID format: {0}")]
    InvalidIdentifier(#[from] uuid::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("category validation failed: {0}")]
    CategoryValidationFailed(#[source] Box<ServiceError>),
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: Box<ServiceError>,
    },
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }

    /// Wrap a repository failure with a short description of what was attempted.
    pub fn repository(context: &'static str) -> impl FnOnce(ServiceError) -> ServiceError {
        move |source| ServiceError::Repository { context, source: Box::new(source) }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, ServiceError::NotFound(_)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidIdentifier(_) => 1001,
            ServiceError::Validation(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::CategoryValidationFailed(_) => 1004,
            ServiceError::Repository { .. } => 1200,
            ServiceError::Db(_) => 1201,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self { ServiceError::Db(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn repository_wrapper_keeps_source_and_prefix() {
        let err = ServiceError::repository("failed to replace category")(ServiceError::Db("connection reset".into()));
        assert_eq!(err.to_string(), "failed to replace category: database error: connection reset");
        assert!(err.source().is_some());
        assert_eq!(err.code(), 1200);
    }

    #[test]
    fn model_validation_maps_to_validation() {
        let err: ServiceError = ModelError::Validation("category name required".into()).into();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn invalid_identifier_message() {
        let err: ServiceError = uuid::Uuid::parse_str("not-a-uuid").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid ID format"));
        assert!(!err.is_not_found());
    }
}
