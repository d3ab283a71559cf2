// ==========================================
// Prueba de extremo a extremo del flujo de importación
// ==========================================
// CSV temporal + base SQLite en disco: conciliación, persistencia
// de bitácoras y exportación del detalle de errores
// ==========================================

use inventario_intranet::db::{init_schema, open_sqlite_connection};
use inventario_intranet::export::escribir_errores_csv;
use inventario_intranet::{
    logging, AuditAccion, AuditLog, BajaRepository, CsvReconciler, ImportLog,
    InventarioRepository, InventarioRepositoryImpl, ModoImportacion, RegistroRepository, TipoBaja,
};
use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

struct Entorno {
    _dir: TempDir,
    conn: Arc<Mutex<Connection>>,
    dir_csv: PathBuf,
}

fn setup() -> Entorno {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let ruta_db = dir.path().join("inventario.db");
    let conn = open_sqlite_connection(ruta_db.to_str().unwrap()).unwrap();
    init_schema(&conn).unwrap();
    let dir_csv = dir.path().to_path_buf();
    Entorno {
        _dir: dir,
        conn: Arc::new(Mutex::new(conn)),
        dir_csv,
    }
}

fn escribir_csv(entorno: &Entorno, nombre: &str, contenido: &str) -> PathBuf {
    let ruta = entorno.dir_csv.join(nombre);
    std::fs::write(&ruta, contenido).unwrap();
    ruta
}

const ENCABEZADO: &str = "Sociedad,Nombre de Sociedad,División,Nombre de División,Centro de Costo,\
     Número de serie,Número de inventario,Clave,Nombre,Marca,Sistema operativo,\
     Tipo de equipos,Modelo,Es infraestructura crítica?";

#[test]
fn test_flujo_completo_de_importacion() {
    let entorno = setup();
    let repo = Arc::new(InventarioRepositoryImpl::from_connection(entorno.conn.clone()));
    let registros = RegistroRepository::new(entorno.conn.clone());
    let reconciler = CsvReconciler::new(repo.clone());

    let csv = format!(
        "{ENCABEZADO}\n\
         S1,Sociedad Uno,D1,División Uno,C1,SN001,INV001,CLV-1,PC Uno,Dell,Windows 11,Laptop,Latitude,Sí\n\
         S1,Sociedad Uno,D1,División Uno,C1,SN002,INV002,CLV-2,PC Dos,HP,Windows 10,Escritorio,ProDesk,No\n\
         S1,Sociedad Uno,D2,División Dos,C2,SN003,,CLV-3,PC Tres,Dell,Windows 11,Laptop,Latitude,\n\
         S1,Sociedad Uno,D1,División Uno,C1,,,,Sin Identificador,,,,,\n"
    );
    let ruta = escribir_csv(&entorno, "inventario.csv", &csv);

    let resultado = reconciler
        .reconcile(&ruta, ModoImportacion::UpdateCreate)
        .unwrap();

    assert_eq!(resultado.resumen.total, 4);
    assert_eq!(resultado.resumen.creados, 3);
    assert_eq!(resultado.resumen.errores, 1);
    assert_eq!(resultado.resumen.omitidos, 1);

    // Jerarquía deduplicada: 1 sociedad, 2 divisiones, 2 centros
    assert_eq!(repo.contar_sociedades().unwrap(), 1);
    assert_eq!(repo.contar_divisiones().unwrap(), 2);
    assert_eq!(repo.contar_centros_costo().unwrap(), 2);

    // El identificador cae a la clave cuando no hay inventario
    let tres = repo.equipo_por_numero_serie("SN003").unwrap().unwrap();
    assert_eq!(tres.identificador, "CLV-3");

    // Persistencia de la bitácora, igual que lo haría el operador
    let log = ImportLog {
        id: Uuid::new_v4().to_string(),
        usuario: Some("soporte1".to_string()),
        archivo: ruta.to_string_lossy().to_string(),
        fecha: Utc::now(),
        total_filas: resultado.resumen.total,
        creados: resultado.resumen.creados,
        actualizados: resultado.resumen.actualizados,
        omitidos: resultado.resumen.omitidos,
        errores: resultado.resumen.errores,
        resumen_errores: resultado.errores.clone(),
    };
    registros.insert_import_log(&log).unwrap();
    registros
        .insert_audit_log(&AuditLog {
            id: Uuid::new_v4().to_string(),
            usuario: Some("soporte1".to_string()),
            accion: AuditAccion::Import,
            resumen: "Importación CSV ejecutada.".to_string(),
            fecha: Utc::now(),
        })
        .unwrap();

    let leido = registros.import_log_por_id(&log.id).unwrap().unwrap();
    assert_eq!(leido.total_filas, 4);
    assert_eq!(leido.resumen_errores.len(), 1);

    // Exportación del detalle de errores
    let mut buffer = Vec::new();
    escribir_errores_csv(&leido.resumen_errores, &mut buffer).unwrap();
    let texto = String::from_utf8(buffer).unwrap();
    assert!(texto.starts_with("fila,identificador,mensaje"));
    assert!(texto.contains("Identificador vacío"));
}

#[test]
fn test_reimportacion_y_modos() {
    let entorno = setup();
    let repo = Arc::new(InventarioRepositoryImpl::from_connection(entorno.conn.clone()));
    let reconciler = CsvReconciler::new(repo.clone());

    let csv = format!(
        "{ENCABEZADO}\n\
         S1,Sociedad Uno,D1,División Uno,C1,SN001,INV001,CLV-1,PC Uno,Dell,Windows 11,Laptop,Latitude,No\n"
    );
    let ruta = escribir_csv(&entorno, "inventario.csv", &csv);

    let primera = reconciler
        .reconcile(&ruta, ModoImportacion::UpdateCreate)
        .unwrap();
    assert_eq!(primera.resumen.creados, 1);

    // update_only sobre serie conocida: actualiza
    let segunda = reconciler
        .reconcile(&ruta, ModoImportacion::UpdateOnly)
        .unwrap();
    assert_eq!(segunda.resumen.actualizados, 1);
    assert_eq!(segunda.resumen.creados, 0);

    // create_only sobre serie conocida: omite sin error
    let tercera = reconciler
        .reconcile(&ruta, ModoImportacion::CreateOnly)
        .unwrap();
    assert_eq!(tercera.resumen.omitidos, 1);
    assert_eq!(tercera.resumen.errores, 0);
    assert!(tercera.errores.is_empty());

    assert_eq!(repo.contar_equipos().unwrap(), 1);
}

#[test]
fn test_baja_tras_importacion() {
    let entorno = setup();
    let repo = Arc::new(InventarioRepositoryImpl::from_connection(entorno.conn.clone()));
    let bajas = BajaRepository::new(entorno.conn.clone());
    let reconciler = CsvReconciler::new(repo.clone());

    let csv = format!(
        "{ENCABEZADO}\n\
         S1,Sociedad Uno,D1,División Uno,C1,SN001,INV001,CLV-1,PC Uno,Dell,Windows 11,Laptop,Latitude,No\n"
    );
    let ruta = escribir_csv(&entorno, "inventario.csv", &csv);
    reconciler
        .reconcile(&ruta, ModoImportacion::UpdateCreate)
        .unwrap();

    let equipo = repo.equipo_por_numero_serie("SN001").unwrap().unwrap();
    bajas
        .registrar_baja(equipo.id, TipoBaja::Obsolescencia)
        .unwrap();

    let dado_de_baja = repo.equipo_por_numero_serie("SN001").unwrap().unwrap();
    assert!(dado_de_baja.is_baja);
    assert_eq!(bajas.listar_bajas().unwrap().len(), 1);

    // Una reimportación sigue actualizando el equipo dado de baja
    let resultado = reconciler
        .reconcile(&ruta, ModoImportacion::UpdateCreate)
        .unwrap();
    assert_eq!(resultado.resumen.actualizados, 1);
}
