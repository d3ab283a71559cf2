// ==========================================
// Inventario Intranet - Errores de la capa de datos
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use thiserror::Error;

/// Errores de la capa de repositorios
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Registro no encontrado: {entidad} con id={id}")]
    NotFound { entidad: String, id: String },

    #[error("Fallo de conexión a la base de datos: {0}")]
    DatabaseConnectionError(String),

    #[error("Fallo al adquirir el candado de la base de datos: {0}")]
    LockError(String),

    #[error("Fallo de consulta a la base de datos: {0}")]
    DatabaseQueryError(String),

    #[error("Violación de restricción de unicidad: {0}")]
    UniqueConstraintViolation(String),

    #[error("Violación de clave foránea: {0}")]
    ForeignKeyViolation(String),

    #[error("Violación de regla de negocio: {0}")]
    BusinessRuleViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entidad: "desconocida".to_string(),
                id: "desconocido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result para la capa de repositorios
pub type RepositoryResult<T> = Result<T, RepositoryError>;
