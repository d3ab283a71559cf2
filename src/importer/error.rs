// ==========================================
// Inventario Intranet - Errores del importador
// ==========================================
// Taxonomía cerrada de fallos por fila; ninguno aborta la corrida.
// Solo LecturaArchivo (E/S dura distinta de "no existe") cruza la
// frontera del conciliador.
// Herramienta: macro derive de thiserror
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Mensaje del error sintético cuando el CSV no existe.
pub const MENSAJE_ARCHIVO_NO_ENCONTRADO: &str = "No se encontró el archivo CSV.";

/// Errores del módulo de importación
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Fatales para la corrida =====
    #[error("Fallo al leer el archivo CSV: {0}")]
    LecturaArchivo(String),

    // ===== Fatales para la fila, recuperables para la corrida =====
    #[error("Fila CSV malformada: {0}")]
    FilaInvalida(String),

    #[error("Identificador vacío (Número de inventario, Clave o Número de serie).")]
    IdentificadorVacio,

    #[error("Número de serie vacío.")]
    NumeroSerieVacio,

    #[error("Sociedad vacía.")]
    SociedadVacia,

    #[error("División vacía.")]
    DivisionVacia,

    #[error("Centro de costo vacío.")]
    CentroCostoVacio,

    #[error("Número de inventario ya existe en otro equipo.")]
    InventarioDuplicado,

    #[error(transparent)]
    Repositorio(#[from] RepositoryError),
}

/// Alias de Result para el módulo de importación
pub type ImportResult<T> = Result<T, ImportError>;
