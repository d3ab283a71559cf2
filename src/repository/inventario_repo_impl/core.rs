use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::{
    CatalogoEntrada, CentroCosto, Division, Equipo, EquipoCampos, Sociedad, TipoCatalogo,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::inventario_repo::InventarioRepository;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Columnas de la tabla equipo, en el orden que espera `map_equipo`
const EQUIPO_COLUMNAS: &str = "id, identificador, centro_costo_id, clave, numero_inventario, \
     nombre, numero_serie, marca_id, sistema_operativo_id, tipo_equipo_id, modelo_id, \
     codigo_postal, domicilio, antiguedad, rpe_responsable, nombre_responsable, \
     infraestructura_critica, direccion_ip, direccion_mac, entidad, municipio, \
     is_baja, fecha_baja, creado_en";

// ==========================================
// InventarioRepositoryImpl
// ==========================================
pub struct InventarioRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl InventarioRepositoryImpl {
    /// Abre la base en `db_path` y garantiza el esquema.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Envuelve una conexión ya abierta (pruebas, conexión compartida).
    /// El esquema debe existir de antemano.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_equipo(row: &Row<'_>) -> rusqlite::Result<Equipo> {
        Ok(Equipo {
            id: row.get(0)?,
            identificador: row.get(1)?,
            campos: EquipoCampos {
                centro_costo_id: row.get(2)?,
                clave: row.get(3)?,
                numero_inventario: row.get(4)?,
                nombre: row.get(5)?,
                numero_serie: row.get(6)?,
                marca_id: row.get(7)?,
                sistema_operativo_id: row.get(8)?,
                tipo_equipo_id: row.get(9)?,
                modelo_id: row.get(10)?,
                codigo_postal: row.get(11)?,
                domicilio: row.get(12)?,
                antiguedad: row.get(13)?,
                rpe_responsable: row.get(14)?,
                nombre_responsable: row.get(15)?,
                infraestructura_critica: row.get::<_, i64>(16)? != 0,
                direccion_ip: row.get(17)?,
                direccion_mac: row.get(18)?,
                entidad: row.get(19)?,
                municipio: row.get(20)?,
            },
            is_baja: row.get::<_, i64>(21)? != 0,
            fecha_baja: row.get::<_, Option<DateTime<Utc>>>(22)?,
            creado_en: row.get(23)?,
        })
    }

    fn contar(&self, tabla: &str) -> RepositoryResult<u32> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {tabla}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as u32)
    }
}

impl InventarioRepository for InventarioRepositoryImpl {
    fn find_or_create_sociedad(&self, codigo: &str, nombre: &str) -> RepositoryResult<Sociedad> {
        let conn = self.get_conn()?;

        let existente: Option<Sociedad> = conn
            .query_row(
                "SELECT id, codigo, nombre FROM sociedad WHERE codigo = ?1",
                params![codigo],
                |row| {
                    Ok(Sociedad {
                        id: row.get(0)?,
                        codigo: row.get(1)?,
                        nombre: row.get(2)?,
                    })
                },
            )
            .optional()?;

        if let Some(mut sociedad) = existente {
            if !nombre.is_empty() && sociedad.nombre != nombre {
                conn.execute(
                    "UPDATE sociedad SET nombre = ?1 WHERE id = ?2",
                    params![nombre, sociedad.id],
                )?;
                sociedad.nombre = nombre.to_string();
            }
            return Ok(sociedad);
        }

        conn.execute(
            "INSERT INTO sociedad (codigo, nombre) VALUES (?1, ?2)",
            params![codigo, nombre],
        )?;
        Ok(Sociedad {
            id: conn.last_insert_rowid(),
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
        })
    }

    fn find_or_create_division(
        &self,
        sociedad_id: i64,
        codigo: &str,
        nombre: &str,
    ) -> RepositoryResult<Division> {
        let conn = self.get_conn()?;

        let existente: Option<Division> = conn
            .query_row(
                "SELECT id, sociedad_id, codigo, nombre FROM division \
                 WHERE sociedad_id = ?1 AND codigo = ?2",
                params![sociedad_id, codigo],
                |row| {
                    Ok(Division {
                        id: row.get(0)?,
                        sociedad_id: row.get(1)?,
                        codigo: row.get(2)?,
                        nombre: row.get(3)?,
                    })
                },
            )
            .optional()?;

        if let Some(mut division) = existente {
            if !nombre.is_empty() && division.nombre != nombre {
                conn.execute(
                    "UPDATE division SET nombre = ?1 WHERE id = ?2",
                    params![nombre, division.id],
                )?;
                division.nombre = nombre.to_string();
            }
            return Ok(division);
        }

        conn.execute(
            "INSERT INTO division (sociedad_id, codigo, nombre) VALUES (?1, ?2, ?3)",
            params![sociedad_id, codigo, nombre],
        )?;
        Ok(Division {
            id: conn.last_insert_rowid(),
            sociedad_id,
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
        })
    }

    fn find_or_create_centro_costo(
        &self,
        division_id: i64,
        codigo: &str,
        nombre: &str,
    ) -> RepositoryResult<CentroCosto> {
        let conn = self.get_conn()?;

        let existente: Option<CentroCosto> = conn
            .query_row(
                "SELECT id, division_id, codigo, nombre FROM centro_costo \
                 WHERE division_id = ?1 AND codigo = ?2",
                params![division_id, codigo],
                |row| {
                    Ok(CentroCosto {
                        id: row.get(0)?,
                        division_id: row.get(1)?,
                        codigo: row.get(2)?,
                        nombre: row.get(3)?,
                    })
                },
            )
            .optional()?;

        if let Some(mut centro) = existente {
            if !nombre.is_empty() && centro.nombre != nombre {
                conn.execute(
                    "UPDATE centro_costo SET nombre = ?1 WHERE id = ?2",
                    params![nombre, centro.id],
                )?;
                centro.nombre = nombre.to_string();
            }
            return Ok(centro);
        }

        conn.execute(
            "INSERT INTO centro_costo (division_id, codigo, nombre) VALUES (?1, ?2, ?3)",
            params![division_id, codigo, nombre],
        )?;
        Ok(CentroCosto {
            id: conn.last_insert_rowid(),
            division_id,
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
        })
    }

    fn find_or_create_catalogo(
        &self,
        tipo: TipoCatalogo,
        nombre: &str,
    ) -> RepositoryResult<CatalogoEntrada> {
        let conn = self.get_conn()?;
        let tabla = tipo.tabla();

        let existente: Option<i64> = conn
            .query_row(
                &format!("SELECT id FROM {tabla} WHERE nombre = ?1"),
                params![nombre],
                |row| row.get(0),
            )
            .optional()?;

        let id = match existente {
            Some(id) => id,
            None => {
                conn.execute(
                    &format!("INSERT INTO {tabla} (nombre) VALUES (?1)"),
                    params![nombre],
                )?;
                conn.last_insert_rowid()
            }
        };

        Ok(CatalogoEntrada {
            id,
            tipo,
            nombre: nombre.to_string(),
        })
    }

    fn equipo_por_numero_serie(&self, numero_serie: &str) -> RepositoryResult<Option<Equipo>> {
        let conn = self.get_conn()?;
        let equipo = conn
            .query_row(
                &format!("SELECT {EQUIPO_COLUMNAS} FROM equipo WHERE numero_serie = ?1"),
                params![numero_serie],
                Self::map_equipo,
            )
            .optional()?;
        Ok(equipo)
    }

    fn inventario_en_otro_equipo(
        &self,
        numero_inventario: &str,
        excluir_id: Option<i64>,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM equipo \
             WHERE numero_inventario = ?1 AND (?2 IS NULL OR id <> ?2)",
            params![numero_inventario, excluir_id],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    fn crear_equipo(&self, identificador: &str, campos: &EquipoCampos) -> RepositoryResult<Equipo> {
        let conn = self.get_conn()?;
        let creado_en = Utc::now();

        conn.execute(
            r#"
            INSERT INTO equipo (
                identificador, centro_costo_id, clave, numero_inventario, nombre,
                numero_serie, marca_id, sistema_operativo_id, tipo_equipo_id, modelo_id,
                codigo_postal, domicilio, antiguedad, rpe_responsable, nombre_responsable,
                infraestructura_critica, direccion_ip, direccion_mac, entidad, municipio,
                is_baja, fecha_baja, creado_en
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
                0, NULL, ?21
            )
            "#,
            params![
                identificador,
                campos.centro_costo_id,
                campos.clave,
                campos.numero_inventario,
                campos.nombre,
                campos.numero_serie,
                campos.marca_id,
                campos.sistema_operativo_id,
                campos.tipo_equipo_id,
                campos.modelo_id,
                campos.codigo_postal,
                campos.domicilio,
                campos.antiguedad,
                campos.rpe_responsable,
                campos.nombre_responsable,
                campos.infraestructura_critica as i32,
                campos.direccion_ip,
                campos.direccion_mac,
                campos.entidad,
                campos.municipio,
                creado_en,
            ],
        )?;

        Ok(Equipo {
            id: conn.last_insert_rowid(),
            identificador: identificador.to_string(),
            campos: campos.clone(),
            is_baja: false,
            fecha_baja: None,
            creado_en,
        })
    }

    fn actualizar_equipo(&self, equipo_id: i64, campos: &EquipoCampos) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let afectadas = conn.execute(
            r#"
            UPDATE equipo SET
                centro_costo_id = ?1, clave = ?2, numero_inventario = ?3, nombre = ?4,
                numero_serie = ?5, marca_id = ?6, sistema_operativo_id = ?7,
                tipo_equipo_id = ?8, modelo_id = ?9, codigo_postal = ?10, domicilio = ?11,
                antiguedad = ?12, rpe_responsable = ?13, nombre_responsable = ?14,
                infraestructura_critica = ?15, direccion_ip = ?16, direccion_mac = ?17,
                entidad = ?18, municipio = ?19
            WHERE id = ?20
            "#,
            params![
                campos.centro_costo_id,
                campos.clave,
                campos.numero_inventario,
                campos.nombre,
                campos.numero_serie,
                campos.marca_id,
                campos.sistema_operativo_id,
                campos.tipo_equipo_id,
                campos.modelo_id,
                campos.codigo_postal,
                campos.domicilio,
                campos.antiguedad,
                campos.rpe_responsable,
                campos.nombre_responsable,
                campos.infraestructura_critica as i32,
                campos.direccion_ip,
                campos.direccion_mac,
                campos.entidad,
                campos.municipio,
                equipo_id,
            ],
        )?;

        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "equipo".to_string(),
                id: equipo_id.to_string(),
            });
        }
        Ok(())
    }

    fn contar_sociedades(&self) -> RepositoryResult<u32> {
        self.contar("sociedad")
    }

    fn contar_divisiones(&self) -> RepositoryResult<u32> {
        self.contar("division")
    }

    fn contar_centros_costo(&self) -> RepositoryResult<u32> {
        self.contar("centro_costo")
    }

    fn contar_equipos(&self) -> RepositoryResult<u32> {
        self.contar("equipo")
    }
}
