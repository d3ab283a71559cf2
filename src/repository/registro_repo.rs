// ==========================================
// Inventario Intranet - Bitácoras de importación y auditoría
// ==========================================
// Persistencia de import_log y audit_log
// Restricción: toda importación y toda baja dejan rastro
// ==========================================

use crate::domain::{AuditAccion, AuditLog, ErrorFila, ImportLog};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct RegistroRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RegistroRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_import_log(row: &Row<'_>) -> rusqlite::Result<ImportLog> {
        let resumen_json: String = row.get(9)?;
        let resumen_errores: Vec<ErrorFila> =
            serde_json::from_str(&resumen_json).unwrap_or_default();
        Ok(ImportLog {
            id: row.get(0)?,
            usuario: row.get(1)?,
            archivo: row.get(2)?,
            fecha: row.get(3)?,
            total_filas: row.get::<_, i64>(4)? as u32,
            creados: row.get::<_, i64>(5)? as u32,
            actualizados: row.get::<_, i64>(6)? as u32,
            omitidos: row.get::<_, i64>(7)? as u32,
            errores: row.get::<_, i64>(8)? as u32,
            resumen_errores,
        })
    }

    // ==========================================
    // import_log
    // ==========================================

    pub fn insert_import_log(&self, log: &ImportLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let resumen_json = serde_json::to_string(&log.resumen_errores)
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO import_log (
                id, usuario, archivo, fecha, total_filas,
                creados, actualizados, omitidos, errores, resumen_errores
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                log.id,
                log.usuario,
                log.archivo,
                log.fecha,
                log.total_filas,
                log.creados,
                log.actualizados,
                log.omitidos,
                log.errores,
                resumen_json,
            ],
        )?;
        Ok(log.id.clone())
    }

    pub fn import_log_por_id(&self, id: &str) -> RepositoryResult<Option<ImportLog>> {
        let conn = self.get_conn()?;
        let log = conn
            .query_row(
                "SELECT id, usuario, archivo, fecha, total_filas, creados, actualizados, \
                 omitidos, errores, resumen_errores FROM import_log WHERE id = ?1",
                params![id],
                Self::map_import_log,
            )
            .optional()?;
        Ok(log)
    }

    pub fn import_logs_recientes(&self, limite: usize) -> RepositoryResult<Vec<ImportLog>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, usuario, archivo, fecha, total_filas, creados, actualizados, \
             omitidos, errores, resumen_errores FROM import_log \
             ORDER BY fecha DESC LIMIT ?1",
        )?;
        let logs = stmt
            .query_map(params![limite as i64], Self::map_import_log)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs)
    }

    // ==========================================
    // audit_log
    // ==========================================

    pub fn insert_audit_log(&self, log: &AuditLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO audit_log (id, usuario, accion, resumen, fecha) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                log.id,
                log.usuario,
                log.accion.as_str(),
                log.resumen,
                log.fecha,
            ],
        )?;
        Ok(log.id.clone())
    }

    pub fn audit_logs_recientes(&self, limite: usize) -> RepositoryResult<Vec<AuditLog>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, usuario, accion, resumen, fecha FROM audit_log \
             ORDER BY fecha DESC LIMIT ?1",
        )?;
        let logs = stmt
            .query_map(params![limite as i64], |row| {
                let accion: String = row.get(2)?;
                Ok(AuditLog {
                    id: row.get(0)?,
                    usuario: row.get(1)?,
                    accion: match accion.as_str() {
                        "BAJA" => AuditAccion::Baja,
                        _ => AuditAccion::Import,
                    },
                    resumen: row.get(3)?,
                    fecha: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::Utc;
    use uuid::Uuid;

    fn setup_repo() -> RegistroRepository {
        let conn = Connection::open_in_memory().unwrap();
        db::configure_sqlite_connection(&conn).unwrap();
        db::init_schema(&conn).unwrap();
        RegistroRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_import_log_ida_y_vuelta() {
        let repo = setup_repo();
        let log = ImportLog {
            id: Uuid::new_v4().to_string(),
            usuario: Some("soporte1".to_string()),
            archivo: "/datos/inventario.csv".to_string(),
            fecha: Utc::now(),
            total_filas: 10,
            creados: 7,
            actualizados: 1,
            omitidos: 2,
            errores: 2,
            resumen_errores: vec![ErrorFila::nueva(3, "INV003", "Sociedad vacía.".to_string())],
        };

        repo.insert_import_log(&log).unwrap();
        let leido = repo.import_log_por_id(&log.id).unwrap().unwrap();

        assert_eq!(leido.total_filas, 10);
        assert_eq!(leido.resumen_errores.len(), 1);
        assert_eq!(leido.resumen_errores[0].fila, "3");
        assert!(repo.import_log_por_id("no-existe").unwrap().is_none());
    }

    #[test]
    fn test_audit_log_recientes() {
        let repo = setup_repo();
        for i in 0..3 {
            repo.insert_audit_log(&AuditLog {
                id: Uuid::new_v4().to_string(),
                usuario: None,
                accion: AuditAccion::Import,
                resumen: format!("Importación {i}"),
                fecha: Utc::now(),
            })
            .unwrap();
        }

        let logs = repo.audit_logs_recientes(2).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].accion, AuditAccion::Import);
    }
}
