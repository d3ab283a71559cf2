// ==========================================
// Inventario Intranet - Registros de importación y auditoría
// ==========================================
// Tipos de resultado del conciliador CSV más las bitácoras
// persistidas (import_log / audit_log)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tope de errores detallados conservados por corrida de importación.
/// Las filas con error por encima del tope siguen contando en `errores`
/// y `omitidos`, pero no generan detalle.
pub const LIMITE_ERRORES: usize = 50;

// ==========================================
// ModoImportacion - política de conciliación
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModoImportacion {
    /// Crea equipos nuevos y actualiza los existentes (por defecto).
    #[default]
    UpdateCreate,
    /// Solo actualiza; omite filas cuyo número de serie no existe.
    UpdateOnly,
    /// Solo crea; omite filas cuyo número de serie ya existe.
    CreateOnly,
}

impl ModoImportacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModoImportacion::UpdateCreate => "update_create",
            ModoImportacion::UpdateOnly => "update_only",
            ModoImportacion::CreateOnly => "create_only",
        }
    }
}

impl FromStr for ModoImportacion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "update_create" => Ok(ModoImportacion::UpdateCreate),
            "update_only" => Ok(ModoImportacion::UpdateOnly),
            "create_only" => Ok(ModoImportacion::CreateOnly),
            otro => Err(format!(
                "Modo de importación inválido: {otro} (use update_create, update_only o create_only)"
            )),
        }
    }
}

impl fmt::Display for ModoImportacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ImportResumen - contadores agregados
// ==========================================
// `total` = filas de datos leídas (o 1 si el archivo no existe).
// Cada fila incrementa exactamente uno de {creados, actualizados}
// o cuenta como omitida; las filas con error cuentan en `errores`
// y también en `omitidos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResumen {
    pub total: u32,
    pub creados: u32,
    pub actualizados: u32,
    pub omitidos: u32,
    pub errores: u32,
}

// ==========================================
// ErrorFila - detalle de un error por fila
// ==========================================
// `fila` es el número de línea física (el encabezado es la 1) o "-"
// para el error sintético de archivo inexistente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFila {
    pub fila: String,
    pub identificador: String,
    pub mensaje: String,
}

impl ErrorFila {
    pub fn nueva(fila: u32, identificador: &str, mensaje: String) -> Self {
        Self {
            fila: fila.to_string(),
            identificador: identificador.to_string(),
            mensaje,
        }
    }

    /// Error sintético sin fila asociada (archivo no encontrado).
    pub fn sintetico(mensaje: &str) -> Self {
        Self {
            fila: "-".to_string(),
            identificador: "-".to_string(),
            mensaje: mensaje.to_string(),
        }
    }
}

// ==========================================
// ResultadoImportacion - salida del conciliador
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultadoImportacion {
    pub resumen: ImportResumen,
    pub errores: Vec<ErrorFila>,
}

// ==========================================
// ImportLog - bitácora de una corrida de importación
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLog {
    pub id: String, // UUID
    pub usuario: Option<String>,
    pub archivo: String,
    pub fecha: DateTime<Utc>,
    pub total_filas: u32,
    pub creados: u32,
    pub actualizados: u32,
    pub omitidos: u32,
    pub errores: u32,
    pub resumen_errores: Vec<ErrorFila>, // persistido como JSON
}

// ==========================================
// AuditLog - bitácora de acciones de operador
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAccion {
    Import,
    Baja,
}

impl AuditAccion {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAccion::Import => "IMPORT",
            AuditAccion::Baja => "BAJA",
        }
    }
}

impl fmt::Display for AuditAccion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String, // UUID
    pub usuario: Option<String>,
    pub accion: AuditAccion,
    pub resumen: String,
    pub fecha: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modo_importacion_parse() {
        assert_eq!(
            "update_create".parse::<ModoImportacion>().unwrap(),
            ModoImportacion::UpdateCreate
        );
        assert_eq!(
            "update_only".parse::<ModoImportacion>().unwrap(),
            ModoImportacion::UpdateOnly
        );
        assert_eq!(
            "create_only".parse::<ModoImportacion>().unwrap(),
            ModoImportacion::CreateOnly
        );
        assert!("upsert".parse::<ModoImportacion>().is_err());
    }

    #[test]
    fn test_error_fila_sintetico() {
        let error = ErrorFila::sintetico("No se encontró el archivo CSV.");
        assert_eq!(error.fila, "-");
        assert_eq!(error.identificador, "-");
    }
}
