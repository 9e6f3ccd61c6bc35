use crate::types::DbId;

/// Boxed cause carried by [`CoreError::CreationFailed`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("The id is invalid")]
    InvalidId,

    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Error while creating {entity}")]
    CreationFailed {
        entity: &'static str,
        #[source]
        source: BoxedCause,
    },

    #[error("Invalid sort direction '{0}'. Must be one of: asc, desc")]
    InvalidSortDirection(String),

    #[error("Unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Reject ids that are absent or not strictly positive.
///
/// Runs before any store lookup so that malformed ids never reach the store.
pub fn validate_id(id: Option<DbId>) -> Result<DbId, CoreError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::InvalidId),
    }
}
