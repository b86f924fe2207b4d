use uuid::Uuid;

use crate::errors::ServiceError;

/// Parse an identifier received as text.
pub fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Ok(Uuid::parse_str(id)?)
}
