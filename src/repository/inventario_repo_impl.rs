// ==========================================
// Inventario Intranet - Almacén de inventario (rusqlite)
// ==========================================
// Implementación SQLite del trait InventarioRepository
// Restricción: consultas parametrizadas, sin lógica de importación
// ==========================================

mod core;


pub use self::core::InventarioRepositoryImpl;
