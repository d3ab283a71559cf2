// ==========================================
// Inventario Intranet - Equipo y bajas
// ==========================================
// Equipo: registro de activo de TI inventariado
// Claves: `identificador` (derivada, única) y `numero_serie`
//         (única global, clave de conciliación del importador)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// EquipoCampos - campos controlados por la importación
// ==========================================
// Conjunto fijo y nombrado de campos mutables: la actualización
// de un equipo existente sobrescribe exactamente estos campos.
// `identificador` queda fuera: es inmutable tras la creación.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipoCampos {
    pub centro_costo_id: i64,
    pub clave: String,             // código interno; puede quedar vacío
    pub numero_inventario: String, // único global cuando no está vacío (política del importador)
    pub nombre: String,
    pub numero_serie: String,

    // Referencias de catálogo, todas opcionales
    pub marca_id: Option<i64>,
    pub sistema_operativo_id: Option<i64>,
    pub tipo_equipo_id: Option<i64>,
    pub modelo_id: Option<i64>,

    // Atributos descriptivos, anulables
    pub codigo_postal: Option<String>,
    pub domicilio: Option<String>,
    pub antiguedad: Option<String>,
    pub rpe_responsable: Option<String>,
    pub nombre_responsable: Option<String>,
    pub infraestructura_critica: bool,
    pub direccion_ip: Option<String>,
    pub direccion_mac: Option<String>,
    pub entidad: Option<String>,
    pub municipio: Option<String>,
}

// ==========================================
// Equipo - activo inventariado
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipo {
    pub id: i64,
    pub identificador: String, // numero_inventario OR clave OR numero_serie al crearse
    pub campos: EquipoCampos,

    // Ciclo de vida
    pub is_baja: bool,
    pub fecha_baja: Option<DateTime<Utc>>,
    pub creado_en: DateTime<Utc>,
}

impl fmt::Display for Equipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.campos.nombre, self.campos.numero_serie)
    }
}

// ==========================================
// TipoBaja - motivo de la baja
// ==========================================
// Serialización: MAYÚSCULAS_CON_GUION (igual que la base de datos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoBaja {
    Obsolescencia,
    Danio,
    RoboExtravio,
    Donacion,
    Otro,
}

impl TipoBaja {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoBaja::Obsolescencia => "OBSOLESCENCIA",
            TipoBaja::Danio => "DANIO",
            TipoBaja::RoboExtravio => "ROBO_EXTRAVIO",
            TipoBaja::Donacion => "DONACION",
            TipoBaja::Otro => "OTRO",
        }
    }

    pub fn parse(valor: &str) -> Option<Self> {
        match valor.trim().to_uppercase().as_str() {
            "OBSOLESCENCIA" => Some(TipoBaja::Obsolescencia),
            "DANIO" => Some(TipoBaja::Danio),
            "ROBO_EXTRAVIO" => Some(TipoBaja::RoboExtravio),
            "DONACION" => Some(TipoBaja::Donacion),
            "OTRO" => Some(TipoBaja::Otro),
            _ => None,
        }
    }
}

impl fmt::Display for TipoBaja {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// BajaEquipo - evento de baja registrado
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BajaEquipo {
    pub id: i64,
    pub equipo_id: i64,
    pub fecha_baja: DateTime<Utc>,
    pub tipo_baja: TipoBaja,
}
