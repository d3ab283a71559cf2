// ==========================================
// Inventario Intranet - Capa de importación
// ==========================================
// Responsabilidad: lectura del CSV de inventario y conciliación
// contra el almacén
// Restricción: sin acceso directo a SQL; todo pasa por el
// repositorio inyectado
// ==========================================

pub mod columnas;
pub mod error;
pub mod normalize;
pub mod reconciler;


// Reexportación de tipos centrales
pub use error::{ImportError, ImportResult, MENSAJE_ARCHIVO_NO_ENCONTRADO};
pub use reconciler::CsvReconciler;
