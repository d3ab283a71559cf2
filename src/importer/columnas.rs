// ==========================================
// Inventario Intranet - Columnas lógicas del CSV
// ==========================================
// Cada campo lógico acepta varias grafías literales de encabezado
// (con/sin acento, con/sin asterisco final). La búsqueda intenta
// primero la grafía literal y después el mapa de encabezados
// normalizados.
// ==========================================

use crate::importer::normalize::normalizar_encabezado;
use std::collections::HashMap;

pub const COL_INVENTARIO: &[&str] = &[
    "Número de inventario",
    "Numero de inventario",
    "No. de inventario",
    "Inventario",
];
pub const COL_SERIE: &[&str] = &[
    "Número de serie",
    "Numero de serie",
    "No. de serie",
    "Serie",
];
pub const COL_CLAVE: &[&str] = &["Clave"];
pub const COL_NOMBRE: &[&str] = &["Nombre"];
pub const COL_SOCIEDAD: &[&str] = &["Sociedad"];
pub const COL_SOCIEDAD_NOMBRE: &[&str] = &["Nombre de Sociedad"];
pub const COL_DIVISION: &[&str] = &["División", "Division"];
pub const COL_DIVISION_NOMBRE: &[&str] = &["Nombre de División", "Nombre de Division"];
pub const COL_CENTRO_COSTO: &[&str] = &["Centro de Costo", "Centro de costo"];
pub const COL_MARCA: &[&str] = &["Marca"];
pub const COL_SISTEMA_OPERATIVO: &[&str] = &["Sistema operativo"];
pub const COL_TIPO_EQUIPO: &[&str] = &["Tipo de equipos", "Tipo de equipo"];
pub const COL_MODELO: &[&str] = &["Modelo"];
pub const COL_CODIGO_POSTAL: &[&str] = &["Código Postal", "Codigo Postal"];
pub const COL_DOMICILIO: &[&str] = &["Domicilio"];
pub const COL_ANTIGUEDAD: &[&str] = &["Antigüedad", "Antiguedad"];
pub const COL_RPE_RESPONSABLE: &[&str] = &["RPE de Responsable"];
pub const COL_NOMBRE_RESPONSABLE: &[&str] = &["Nombre de Responsable"];
pub const COL_INFRAESTRUCTURA_CRITICA: &[&str] = &[
    "Es infraestructura crítica?",
    "Es infraestructura critica?",
];
pub const COL_DIRECCION_IP: &[&str] = &["Dirección IP", "Direccion IP", "IP"];
pub const COL_DIRECCION_MAC: &[&str] = &["Dirección MAC", "Direccion MAC", "MAC"];
pub const COL_ENTIDAD: &[&str] = &["Entidad"];
pub const COL_MUNICIPIO: &[&str] = &["Municipio"];

/// Vista de la fila con encabezados normalizados.
/// Ante encabezados duplicados gana el último, igual que el lector.
pub fn construir_fila_normalizada(fila: &HashMap<String, String>) -> HashMap<String, String> {
    fila.iter()
        .map(|(clave, valor)| (normalizar_encabezado(clave), valor.clone()))
        .collect()
}

/// Resuelve el valor de un campo lógico: por cada grafía candidata
/// intenta la clave literal y cae al mapa normalizado. Devuelve
/// cadena vacía si ninguna columna está presente.
pub fn valor_de_columna(
    fila: &HashMap<String, String>,
    fila_normalizada: &HashMap<String, String>,
    candidatos: &[&str],
) -> String {
    for candidato in candidatos {
        if let Some(valor) = fila.get(*candidato) {
            return valor.clone();
        }
        if let Some(valor) = fila_normalizada.get(&normalizar_encabezado(candidato)) {
            return valor.clone();
        }
    }
    String::new()
}
