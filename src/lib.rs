// ==========================================
// Inventario Intranet - Biblioteca principal
// ==========================================
// Sistema de inventario de equipos de cómputo: importación y
// conciliación CSV, jerarquía organizacional, bajas y bitácoras
// Pila técnica: Rust + SQLite
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de repositorios - acceso a datos
pub mod repository;

// Capa de importación - conciliador CSV
pub mod importer;

// Infraestructura de base de datos (conexión/PRAGMA/esquema)
pub mod db;

// Exportación de informes de errores
pub mod export;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexportación de tipos centrales
// ==========================================

pub use domain::{
    AuditAccion, AuditLog, BajaEquipo, CatalogoEntrada, CentroCosto, Division, Equipo,
    EquipoCampos, ErrorFila, ImportLog, ImportResumen, ModoImportacion, ResultadoImportacion,
    Sociedad, TipoBaja, TipoCatalogo,
};

pub use importer::{CsvReconciler, ImportError};

pub use repository::{
    BajaRepository, InventarioRepository, InventarioRepositoryImpl, RegistroRepository,
    RepositoryError,
};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Inventario Intranet";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
