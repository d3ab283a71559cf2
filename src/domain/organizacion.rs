// ==========================================
// Inventario Intranet - Jerarquía organizacional
// ==========================================
// Sociedad → División → Centro de costo
// Clave de negocio: `codigo` (único por nivel padre)
// Los nodos se deduplican por clave, nunca se recrean por fila importada
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Sociedad - entidad raíz de la jerarquía
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sociedad {
    pub id: i64,
    pub codigo: String, // clave de negocio, única global
    pub nombre: String,
}

impl fmt::Display for Sociedad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.codigo, self.nombre)
    }
}

// ==========================================
// Division - unidad bajo una Sociedad
// ==========================================
// `codigo` es único dentro de su Sociedad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: i64,
    pub sociedad_id: i64,
    pub codigo: String,
    pub nombre: String,
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.codigo, self.nombre)
    }
}

// ==========================================
// CentroCosto - unidad a la que se asigna el equipo
// ==========================================
// `codigo` es único dentro de su División
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentroCosto {
    pub id: i64,
    pub division_id: i64,
    pub codigo: String,
    pub nombre: String,
}

impl fmt::Display for CentroCosto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.codigo, self.nombre)
    }
}
