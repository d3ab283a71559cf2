// ==========================================
// Inventario Intranet - Inicialización SQLite
// ==========================================
// Objetivo:
// - Unificar los PRAGMA de todas las conexiones (foreign_keys, busy_timeout)
// - Crear el esquema de forma idempotente (CREATE TABLE IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout por defecto (milisegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura los PRAGMA unificados de una conexión SQLite
///
/// foreign_keys y busy_timeout se aplican por conexión, no por base,
/// así que toda apertura debe pasar por aquí.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre una conexión SQLite con la configuración unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Crea el esquema completo si no existe
///
/// Nota: la unicidad de `numero_inventario` no es una restricción de tabla;
/// los valores vacíos se repiten libremente y la política de colisión la
/// aplica el importador fila por fila.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sociedad (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            codigo TEXT NOT NULL UNIQUE,
            nombre TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS division (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sociedad_id INTEGER NOT NULL REFERENCES sociedad(id),
            codigo TEXT NOT NULL,
            nombre TEXT NOT NULL,
            UNIQUE (sociedad_id, codigo)
        );

        CREATE TABLE IF NOT EXISTS centro_costo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            division_id INTEGER NOT NULL REFERENCES division(id),
            codigo TEXT NOT NULL,
            nombre TEXT NOT NULL,
            UNIQUE (division_id, codigo)
        );

        CREATE TABLE IF NOT EXISTS marca (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sistema_operativo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS tipo_equipo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS modelo_equipo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS equipo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identificador TEXT NOT NULL UNIQUE,
            centro_costo_id INTEGER NOT NULL REFERENCES centro_costo(id),
            clave TEXT NOT NULL DEFAULT '',
            numero_inventario TEXT NOT NULL DEFAULT '',
            nombre TEXT NOT NULL,
            numero_serie TEXT NOT NULL UNIQUE,
            marca_id INTEGER REFERENCES marca(id),
            sistema_operativo_id INTEGER REFERENCES sistema_operativo(id),
            tipo_equipo_id INTEGER REFERENCES tipo_equipo(id),
            modelo_id INTEGER REFERENCES modelo_equipo(id),
            codigo_postal TEXT,
            domicilio TEXT,
            antiguedad TEXT,
            rpe_responsable TEXT,
            nombre_responsable TEXT,
            infraestructura_critica INTEGER NOT NULL DEFAULT 0,
            direccion_ip TEXT,
            direccion_mac TEXT,
            entidad TEXT,
            municipio TEXT,
            is_baja INTEGER NOT NULL DEFAULT 0,
            fecha_baja TEXT,
            creado_en TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS baja_equipo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            equipo_id INTEGER NOT NULL REFERENCES equipo(id),
            fecha_baja TEXT NOT NULL,
            tipo_baja TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS import_log (
            id TEXT PRIMARY KEY,
            usuario TEXT,
            archivo TEXT NOT NULL,
            fecha TEXT NOT NULL,
            total_filas INTEGER NOT NULL,
            creados INTEGER NOT NULL,
            actualizados INTEGER NOT NULL,
            omitidos INTEGER NOT NULL,
            errores INTEGER NOT NULL,
            resumen_errores TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id TEXT PRIMARY KEY,
            usuario TEXT,
            accion TEXT NOT NULL,
            resumen TEXT NOT NULL,
            fecha TEXT NOT NULL
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotente() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        // Segunda pasada no debe fallar
        init_schema(&conn).unwrap();

        let tablas: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN (
                    'sociedad','division','centro_costo','marca','sistema_operativo',
                    'tipo_equipo','modelo_equipo','equipo','baja_equipo',
                    'import_log','audit_log')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tablas, 11);
    }
}
