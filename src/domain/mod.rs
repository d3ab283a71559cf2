// ==========================================
// Inventario Intranet - Modelo de dominio
// ==========================================
// Responsabilidad: entidades y tipos de negocio
// Restricción: sin acceso a datos, sin lógica de importación
// ==========================================

pub mod catalogo;
pub mod equipo;
pub mod organizacion;
pub mod registro;

// Reexportación de tipos centrales
pub use catalogo::{CatalogoEntrada, TipoCatalogo};
pub use equipo::{BajaEquipo, Equipo, EquipoCampos, TipoBaja};
pub use organizacion::{CentroCosto, Division, Sociedad};
pub use registro::{
    AuditAccion, AuditLog, ErrorFila, ImportLog, ImportResumen, ModoImportacion,
    ResultadoImportacion,
};
