// ==========================================
// Inventario Intranet - Exportación del detalle de errores
// ==========================================
// Genera el CSV descargable de errores de una importación:
// columnas fila, identificador, mensaje; una fila por error capturado
// ==========================================

use crate::domain::ErrorFila;
use chrono::Local;
use std::io::Write;

/// Nombre de archivo con marca de tiempo para la descarga.
pub fn nombre_archivo_errores() -> String {
    format!(
        "errores_importacion_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Escribe el detalle de errores como CSV en `destino`.
pub fn escribir_errores_csv<W: Write>(errores: &[ErrorFila], destino: W) -> csv::Result<()> {
    let mut escritor = csv::Writer::from_writer(destino);
    escritor.write_record(["fila", "identificador", "mensaje"])?;
    for error in errores {
        escritor.write_record([&error.fila, &error.identificador, &error.mensaje])?;
    }
    escritor.flush()?;
    Ok(())
}
