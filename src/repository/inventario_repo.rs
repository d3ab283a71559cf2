// ==========================================
// Inventario Intranet - Trait del almacén de inventario
// ==========================================
// Responsabilidad: interfaz de acceso a datos del conciliador
// Restricción: el repositorio no contiene reglas de importación,
//              solo operaciones CRUD con semántica get-or-create
// ==========================================

use crate::domain::{CatalogoEntrada, CentroCosto, Division, Equipo, EquipoCampos, Sociedad, TipoCatalogo};
use crate::repository::error::RepositoryResult;

// ==========================================
// InventarioRepository
// ==========================================
// El conciliador recibe esta interfaz inyectada; las pruebas pueden
// sustituir la implementación rusqlite por un almacén en memoria.
//
// Semántica de los find_or_create jerárquicos: buscan por clave de
// negocio y crean si no existe; si ya existe y el `nombre` recibido
// no está vacío y difiere, actualizan el nombre en el lugar (backfill).
// Sin coordinación entre corridas concurrentes: dos importaciones
// simultáneas pueden competir en el get-or-create y el último backfill
// de nombre gana. Limitación aceptada, no se agrega bloqueo.
pub trait InventarioRepository: Send + Sync {
    // ===== Jerarquía organizacional =====

    fn find_or_create_sociedad(&self, codigo: &str, nombre: &str) -> RepositoryResult<Sociedad>;

    fn find_or_create_division(
        &self,
        sociedad_id: i64,
        codigo: &str,
        nombre: &str,
    ) -> RepositoryResult<Division>;

    fn find_or_create_centro_costo(
        &self,
        division_id: i64,
        codigo: &str,
        nombre: &str,
    ) -> RepositoryResult<CentroCosto>;

    // ===== Catálogos =====

    /// Alta perezosa por `nombre`; las entradas existentes nunca cambian.
    fn find_or_create_catalogo(
        &self,
        tipo: TipoCatalogo,
        nombre: &str,
    ) -> RepositoryResult<CatalogoEntrada>;

    // ===== Equipos =====

    /// Búsqueda por la clave de conciliación del importador.
    fn equipo_por_numero_serie(&self, numero_serie: &str) -> RepositoryResult<Option<Equipo>>;

    /// ¿Otro equipo (distinto de `excluir_id`) ya tiene este número de inventario?
    fn inventario_en_otro_equipo(
        &self,
        numero_inventario: &str,
        excluir_id: Option<i64>,
    ) -> RepositoryResult<bool>;

    fn crear_equipo(&self, identificador: &str, campos: &EquipoCampos) -> RepositoryResult<Equipo>;

    /// Sobrescribe los campos controlados por la importación.
    /// `identificador` no se toca tras la creación.
    fn actualizar_equipo(&self, equipo_id: i64, campos: &EquipoCampos) -> RepositoryResult<()>;

    // ===== Conteos (verificación e informes) =====

    fn contar_sociedades(&self) -> RepositoryResult<u32>;
    fn contar_divisiones(&self) -> RepositoryResult<u32>;
    fn contar_centros_costo(&self) -> RepositoryResult<u32>;
    fn contar_equipos(&self) -> RepositoryResult<u32>;
}
