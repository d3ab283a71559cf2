// ==========================================
// Inventario Intranet - Punto de entrada CLI
// ==========================================
// Subcomandos:
//   importar <csv> [--modo M] [--usuario U]   conciliación de inventario
//   errores <log_id> [--salida RUTA]          exporta el detalle de errores
//   baja <numero_serie> --tipo T [--usuario U] registra una baja
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Utc;
use inventario_intranet::db::{init_schema, open_sqlite_connection};
use inventario_intranet::export::{escribir_errores_csv, nombre_archivo_errores};
use inventario_intranet::{
    logging, AuditAccion, AuditLog, BajaRepository, CsvReconciler, ImportLog,
    InventarioRepository, InventarioRepositoryImpl, ModoImportacion, RegistroRepository, TipoBaja,
};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", inventario_intranet::APP_NAME, inventario_intranet::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(comando) = args.first() else {
        imprimir_uso();
        bail!("Falta el subcomando.");
    };

    match comando.as_str() {
        "importar" => cmd_importar(&args[1..]),
        "errores" => cmd_errores(&args[1..]),
        "baja" => cmd_baja(&args[1..]),
        otro => {
            imprimir_uso();
            bail!("Subcomando desconocido: {otro}");
        }
    }
}

fn imprimir_uso() {
    eprintln!("Uso:");
    eprintln!("  inventario-intranet importar <csv> [--modo update_create|update_only|create_only] [--usuario U]");
    eprintln!("  inventario-intranet errores <log_id> [--salida RUTA]");
    eprintln!("  inventario-intranet baja <numero_serie> --tipo OBSOLESCENCIA|DANIO|ROBO_EXTRAVIO|DONACION|OTRO [--usuario U]");
}

/// Ruta de la base de datos: variable de entorno o directorio de datos
/// del usuario.
fn ruta_base_datos() -> String {
    if let Ok(ruta) = std::env::var("INVENTARIO_DB_PATH") {
        let recortada = ruta.trim();
        if !recortada.is_empty() {
            return recortada.to_string();
        }
    }

    let mut ruta = std::path::PathBuf::from("./inventario_intranet.db");
    if let Some(dir_datos) = dirs::data_dir() {
        let dir = dir_datos.join("inventario-intranet");
        if std::fs::create_dir_all(&dir).is_ok() {
            ruta = dir.join("inventario.db");
        }
    }
    ruta.to_string_lossy().to_string()
}

fn abrir_conexion() -> Result<Arc<Mutex<Connection>>> {
    let ruta = ruta_base_datos();
    tracing::info!(base_de_datos = %ruta, "Abriendo base de datos");
    let conn = open_sqlite_connection(&ruta)
        .with_context(|| format!("No se pudo abrir la base de datos en {ruta}"))?;
    init_schema(&conn).context("No se pudo inicializar el esquema")?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Valor de una bandera `--nombre valor`.
fn bandera(args: &[String], nombre: &str) -> Option<String> {
    args.iter()
        .position(|a| a == nombre)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn cmd_importar(args: &[String]) -> Result<()> {
    let Some(ruta_csv) = args.first().filter(|a| !a.starts_with("--")) else {
        imprimir_uso();
        bail!("Falta la ruta del archivo CSV.");
    };
    let modo: ModoImportacion = match bandera(args, "--modo") {
        Some(crudo) => crudo.parse().map_err(anyhow::Error::msg)?,
        None => ModoImportacion::default(),
    };
    let usuario = bandera(args, "--usuario");

    let conn = abrir_conexion()?;
    let inventario = Arc::new(InventarioRepositoryImpl::from_connection(conn.clone()));
    let registros = RegistroRepository::new(conn);

    let reconciler = CsvReconciler::new(inventario);
    let resultado = reconciler.reconcile(Path::new(ruta_csv), modo)?;
    let resumen = &resultado.resumen;

    let log = ImportLog {
        id: Uuid::new_v4().to_string(),
        usuario: usuario.clone(),
        archivo: ruta_csv.clone(),
        fecha: Utc::now(),
        total_filas: resumen.total,
        creados: resumen.creados,
        actualizados: resumen.actualizados,
        omitidos: resumen.omitidos,
        errores: resumen.errores,
        resumen_errores: resultado.errores.clone(),
    };
    registros.insert_import_log(&log)?;
    registros.insert_audit_log(&AuditLog {
        id: Uuid::new_v4().to_string(),
        usuario,
        accion: AuditAccion::Import,
        resumen: format!(
            "Importación CSV ejecutada. Total: {}, Creados: {}, Actualizados: {}, Omitidos: {}, Errores: {}.",
            resumen.total, resumen.creados, resumen.actualizados, resumen.omitidos, resumen.errores
        ),
        fecha: Utc::now(),
    })?;

    println!("Importación finalizada.");
    println!(
        "Log ID: {} | Total: {} | Creados: {} | Actualizados: {} | Omitidos: {} | Errores: {}",
        log.id, resumen.total, resumen.creados, resumen.actualizados, resumen.omitidos,
        resumen.errores
    );
    if !resultado.errores.is_empty() {
        println!(
            "Primeros errores capturados ({} de {}):",
            resultado.errores.len(),
            resumen.errores
        );
        for error in resultado.errores.iter().take(10) {
            println!("  fila {}: [{}] {}", error.fila, error.identificador, error.mensaje);
        }
        println!("Use `errores {}` para descargar el detalle completo.", log.id);
    }
    Ok(())
}

fn cmd_errores(args: &[String]) -> Result<()> {
    let Some(log_id) = args.first().filter(|a| !a.starts_with("--")) else {
        imprimir_uso();
        bail!("Falta el identificador del log.");
    };
    let salida = bandera(args, "--salida").unwrap_or_else(nombre_archivo_errores);

    let conn = abrir_conexion()?;
    let registros = RegistroRepository::new(conn);
    let Some(log) = registros.import_log_por_id(log_id)? else {
        bail!("No se encontró el log solicitado.");
    };

    let archivo = std::fs::File::create(&salida)
        .with_context(|| format!("No se pudo crear el archivo {salida}"))?;
    escribir_errores_csv(&log.resumen_errores, archivo)?;
    println!(
        "Se exportaron {} errores a {salida}.",
        log.resumen_errores.len()
    );
    Ok(())
}

fn cmd_baja(args: &[String]) -> Result<()> {
    let Some(numero_serie) = args.first().filter(|a| !a.starts_with("--")) else {
        imprimir_uso();
        bail!("Falta el número de serie del equipo.");
    };
    let Some(tipo_crudo) = bandera(args, "--tipo") else {
        imprimir_uso();
        bail!("Seleccione un tipo de baja válido.");
    };
    let Some(tipo) = TipoBaja::parse(&tipo_crudo) else {
        bail!("Seleccione un tipo de baja válido.");
    };
    let usuario = bandera(args, "--usuario");

    let conn = abrir_conexion()?;
    let inventario = InventarioRepositoryImpl::from_connection(conn.clone());
    let bajas = BajaRepository::new(conn.clone());
    let registros = RegistroRepository::new(conn);

    let Some(equipo) = inventario.equipo_por_numero_serie(numero_serie)? else {
        bail!("No existe un equipo con número de serie {numero_serie}.");
    };

    bajas.registrar_baja(equipo.id, tipo)?;
    registros.insert_audit_log(&AuditLog {
        id: Uuid::new_v4().to_string(),
        usuario,
        accion: AuditAccion::Baja,
        resumen: format!(
            "Baja registrada para el equipo {} ({}).",
            equipo.identificador, equipo.campos.numero_serie
        ),
        fecha: Utc::now(),
    })?;

    println!("La baja se registró correctamente.");
    Ok(())
}
