use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by the catalog store, the carousel, and renderers
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Store corrupt: {0}")]
    StoreCorrupt(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CatalogError::NotFound { entity, id }
    }
}
