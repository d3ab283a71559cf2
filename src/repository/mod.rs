// ==========================================
// Inventario Intranet - Capa de repositorios
// ==========================================
// Responsabilidad: acceso a datos, sin reglas de importación
// Restricción: todas las consultas son parametrizadas
// ==========================================

pub mod baja_repo;
pub mod error;
pub mod inventario_repo;
pub mod inventario_repo_impl;
pub mod registro_repo;

// Reexportación de los repositorios centrales
pub use baja_repo::BajaRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use inventario_repo::InventarioRepository;
pub use inventario_repo_impl::InventarioRepositoryImpl;
pub use registro_repo::RegistroRepository;
