// ==========================================
// Inventario Intranet - Bajas de equipo
// ==========================================
// Registro de eventos de baja (decomiso) de equipos
// Un equipo dado de baja no admite una segunda baja
// ==========================================

use crate::domain::{BajaEquipo, TipoBaja};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct BajaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BajaRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Marca el equipo como dado de baja y registra el evento.
    pub fn registrar_baja(&self, equipo_id: i64, tipo: TipoBaja) -> RepositoryResult<BajaEquipo> {
        let conn = self.get_conn()?;

        let estado: Option<bool> = conn
            .query_row(
                "SELECT is_baja FROM equipo WHERE id = ?1",
                params![equipo_id],
                |row| row.get::<_, i64>(0).map(|v| v != 0),
            )
            .optional()?;

        match estado {
            None => {
                return Err(RepositoryError::NotFound {
                    entidad: "equipo".to_string(),
                    id: equipo_id.to_string(),
                })
            }
            Some(true) => {
                return Err(RepositoryError::BusinessRuleViolation(
                    "El equipo ya se encuentra dado de baja.".to_string(),
                ))
            }
            Some(false) => {}
        }

        let fecha_baja = Utc::now();
        conn.execute(
            "UPDATE equipo SET is_baja = 1, fecha_baja = ?1 WHERE id = ?2",
            params![fecha_baja, equipo_id],
        )?;
        conn.execute(
            "INSERT INTO baja_equipo (equipo_id, fecha_baja, tipo_baja) VALUES (?1, ?2, ?3)",
            params![equipo_id, fecha_baja, tipo.as_str()],
        )?;

        Ok(BajaEquipo {
            id: conn.last_insert_rowid(),
            equipo_id,
            fecha_baja,
            tipo_baja: tipo,
        })
    }

    /// Bajas registradas, de la más reciente a la más antigua.
    pub fn listar_bajas(&self) -> RepositoryResult<Vec<BajaEquipo>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, equipo_id, fecha_baja, tipo_baja FROM baja_equipo \
             ORDER BY fecha_baja DESC",
        )?;
        let bajas = stmt
            .query_map([], |row| {
                let tipo_crudo: String = row.get(3)?;
                Ok(BajaEquipo {
                    id: row.get(0)?,
                    equipo_id: row.get(1)?,
                    fecha_baja: row.get::<_, DateTime<Utc>>(2)?,
                    tipo_baja: TipoBaja::parse(&tipo_crudo).unwrap_or(TipoBaja::Otro),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(bajas)
    }
}
