// ==========================================
// Inventario Intranet - Catálogos planos
// ==========================================
// Marca / Sistema operativo / Tipo de equipo / Modelo
// Conjuntos planos de `nombre` único, creados bajo demanda
// Restricción: una vez creados no se actualizan (solo alta perezosa)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TipoCatalogo - discrimina los cuatro catálogos
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoCatalogo {
    Marca,
    SistemaOperativo,
    TipoEquipo,
    ModeloEquipo,
}

impl TipoCatalogo {
    /// Nombre de la tabla SQLite que respalda el catálogo.
    pub fn tabla(&self) -> &'static str {
        match self {
            TipoCatalogo::Marca => "marca",
            TipoCatalogo::SistemaOperativo => "sistema_operativo",
            TipoCatalogo::TipoEquipo => "tipo_equipo",
            TipoCatalogo::ModeloEquipo => "modelo_equipo",
        }
    }
}

impl fmt::Display for TipoCatalogo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tabla())
    }
}

// ==========================================
// CatalogoEntrada - una fila de catálogo
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogoEntrada {
    pub id: i64,
    pub tipo: TipoCatalogo,
    pub nombre: String,
}
