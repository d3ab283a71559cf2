// ==========================================
// Inventario Intranet - Normalización de valores y encabezados
// ==========================================
// Responsabilidad: limpieza Unicode de celdas y encabezados CSV
// para tolerar la deriva entre exportaciones (acentos, BOM,
// asteriscos finales, espacios repetidos)
// ==========================================

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Literales que el origen usa como "sin dato"; se tratan como vacío.
const VALORES_SIN_DATO: [&str; 4] = ["no disponible", "no aplica", "n/a", "na"];

/// Tokens afirmativos para campos booleanos, ya sin diacríticos
/// ("sí" entra como "si" después de la limpieza).
const TOKENS_AFIRMATIVOS: [&str; 6] = ["si", "s", "true", "1", "x", "yes"];

/// Normaliza el valor de una celda: NFKC, recorte de espacios y
/// conversión de los literales "sin dato" a cadena vacía.
pub fn normalizar_valor(valor: &str) -> String {
    let limpio: String = valor.nfkc().collect();
    let limpio = limpio.trim();
    if VALORES_SIN_DATO.contains(&limpio.to_lowercase().as_str()) {
        return String::new();
    }
    limpio.to_string()
}

/// Normaliza un encabezado de columna: quita el BOM, recorta,
/// elimina dos puntos y asteriscos finales, colapsa espacios
/// internos, pasa a minúsculas y elimina diacríticos.
pub fn normalizar_encabezado(valor: &str) -> String {
    let sin_bom = valor.trim_start_matches('\u{feff}');
    let recortado = sin_bom.trim().trim_end_matches(|c| c == ':' || c == '*');
    let colapsado = recortado.split_whitespace().collect::<Vec<_>>().join(" ");
    sin_diacriticos(&colapsado.to_lowercase())
}

/// Descompone (NFD) y descarta las marcas combinantes.
pub fn sin_diacriticos(valor: &str) -> String {
    valor.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Interpreta un campo booleano con el conjunto de tokens afirmativos.
/// Cualquier otro valor, incluido el vacío, es falso.
pub fn parse_booleano(valor: &str) -> bool {
    let limpio = normalizar_valor(valor);
    if limpio.is_empty() {
        return false;
    }
    let normalizado = sin_diacriticos(&limpio).to_lowercase();
    TOKENS_AFIRMATIVOS.contains(&normalizado.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizar_valor_sin_dato() {
        assert_eq!(normalizar_valor("No disponible"), "");
        assert_eq!(normalizar_valor("  N/A  "), "");
        assert_eq!(normalizar_valor("no aplica"), "");
        assert_eq!(normalizar_valor("NA"), "");
        assert_eq!(normalizar_valor("  Dell  "), "Dell");
    }

    #[test]
    fn test_normalizar_valor_nfkc() {
        // La forma de compatibilidad unifica anchos y ligaduras
        assert_eq!(normalizar_valor("Ｄｅｌｌ"), "Dell");
    }

    #[test]
    fn test_normalizar_encabezado() {
        assert_eq!(normalizar_encabezado("Número de serie*"), "numero de serie");
        assert_eq!(normalizar_encabezado("\u{feff}Clave"), "clave");
        assert_eq!(normalizar_encabezado("  División:  "), "division");
        assert_eq!(
            normalizar_encabezado("Centro   de    Costo"),
            "centro de costo"
        );
    }

    #[test]
    fn test_parse_booleano() {
        assert!(parse_booleano("Sí"));
        assert!(parse_booleano("si"));
        assert!(parse_booleano("S"));
        assert!(parse_booleano("1"));
        assert!(parse_booleano("X"));
        assert!(parse_booleano("TRUE"));
        assert!(parse_booleano("yes"));
        assert!(!parse_booleano(""));
        assert!(!parse_booleano("no"));
        assert!(!parse_booleano("0"));
        assert!(!parse_booleano("No disponible"));
    }
}
