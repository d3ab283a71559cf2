// ==========================================
// Inventario Intranet - Conciliador CSV de inventario
// ==========================================
// Responsabilidad:
// 1. Leer el CSV de inventario (UTF-8, tolerante a BOM, columnas en
//    cualquier orden)
// 2. Normalizar valores y encabezados
// 3. Resolver/crear la jerarquía Sociedad → División → Centro de costo
//    y los cuatro catálogos
// 4. Crear o actualizar equipos conciliando por número de serie
// 5. Acumular contadores y un detalle de errores con tope de 50
//
// Restricción: ningún problema de calidad de datos aborta la corrida;
// cada get-or-create y cada guardado es su propia unidad de trabajo
// (sin transacción que abarque el archivo completo).
// ==========================================

use crate::domain::registro::LIMITE_ERRORES;
use crate::domain::{
    EquipoCampos, ErrorFila, ImportResumen, ModoImportacion, ResultadoImportacion, TipoCatalogo,
};
use crate::importer::columnas::{self, construir_fila_normalizada, valor_de_columna};
use crate::importer::error::{ImportError, MENSAJE_ARCHIVO_NO_ENCONTRADO};
use crate::importer::normalize::{normalizar_valor, parse_booleano};
use crate::repository::inventario_repo::InventarioRepository;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Resultado de procesar una fila válida
enum AccionFila {
    Creado,
    Actualizado,
    /// Fila válida pero excluida por la política del modo; no es error.
    Omitido,
}

// ==========================================
// CsvReconciler - conciliador de inventario
// ==========================================
pub struct CsvReconciler<R: ?Sized>
where
    R: InventarioRepository,
{
    repo: Arc<R>,
}

impl<R: ?Sized> CsvReconciler<R>
where
    R: InventarioRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Concilia el CSV en `path` contra el almacén según `modo`.
    ///
    /// # Retorno
    /// - `Ok(ResultadoImportacion)`: contadores más detalle de errores
    ///   (tope de 50 entradas). Un archivo inexistente NO es `Err`:
    ///   produce un resultado sintético con total = omitidos = errores = 1.
    /// - `Err(ImportError::LecturaArchivo)`: solo fallos duros de E/S
    ///   (p. ej. permiso denegado).
    pub fn reconcile(
        &self,
        path: &Path,
        modo: ModoImportacion,
    ) -> Result<ResultadoImportacion, ImportError> {
        tracing::info!(archivo = %path.display(), modo = %modo, "Iniciando importación CSV");

        let mut resumen = ImportResumen::default();
        let mut errores: Vec<ErrorFila> = Vec::new();

        if !path.exists() {
            tracing::warn!(archivo = %path.display(), "Archivo CSV inexistente");
            resumen.total = 1;
            resumen.omitidos = 1;
            resumen.errores = 1;
            errores.push(ErrorFila::sintetico(MENSAJE_ARCHIVO_NO_ENCONTRADO));
            return Ok(ResultadoImportacion { resumen, errores });
        }

        let mut lector = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| ImportError::LecturaArchivo(e.to_string()))?;

        let encabezados = lector
            .headers()
            .map_err(|e| ImportError::LecturaArchivo(e.to_string()))?
            .clone();

        for (indice, registro) in lector.records().enumerate() {
            // La fila 1 es el encabezado; la primera de datos es la 2
            let numero_fila = (indice + 2) as u32;
            resumen.total += 1;

            let registro = match registro {
                Ok(registro) => registro,
                Err(e) => {
                    Self::registrar_error(
                        &mut resumen,
                        &mut errores,
                        numero_fila,
                        "",
                        ImportError::FilaInvalida(e.to_string()).to_string(),
                    );
                    continue;
                }
            };

            let fila: HashMap<String, String> = encabezados
                .iter()
                .zip(registro.iter())
                .map(|(clave, valor)| (clave.to_string(), valor.to_string()))
                .collect();
            let fila_normalizada = construir_fila_normalizada(&fila);

            let inventario = normalizar_valor(&valor_de_columna(
                &fila,
                &fila_normalizada,
                columnas::COL_INVENTARIO,
            ));
            let numero_serie = normalizar_valor(&valor_de_columna(
                &fila,
                &fila_normalizada,
                columnas::COL_SERIE,
            ));
            let clave =
                normalizar_valor(&valor_de_columna(&fila, &fila_normalizada, columnas::COL_CLAVE));

            // Cadena de prioridad de la clave derivada
            let identificador = if !inventario.is_empty() {
                inventario.clone()
            } else if !clave.is_empty() {
                clave.clone()
            } else {
                numero_serie.clone()
            };

            match self.procesar_fila(
                &fila,
                &fila_normalizada,
                &inventario,
                &clave,
                &numero_serie,
                &identificador,
                modo,
            ) {
                Ok(AccionFila::Creado) => resumen.creados += 1,
                Ok(AccionFila::Actualizado) => resumen.actualizados += 1,
                Ok(AccionFila::Omitido) => resumen.omitidos += 1,
                Err(e) => {
                    Self::registrar_error(
                        &mut resumen,
                        &mut errores,
                        numero_fila,
                        &identificador,
                        e.to_string(),
                    );
                }
            }
        }

        tracing::info!(
            total = resumen.total,
            creados = resumen.creados,
            actualizados = resumen.actualizados,
            omitidos = resumen.omitidos,
            errores = resumen.errores,
            "Importación CSV finalizada"
        );

        Ok(ResultadoImportacion { resumen, errores })
    }

    /// Una fila con error cuenta en `errores` y también en `omitidos`;
    /// el detalle solo se conserva hasta el tope.
    fn registrar_error(
        resumen: &mut ImportResumen,
        errores: &mut Vec<ErrorFila>,
        numero_fila: u32,
        identificador: &str,
        mensaje: String,
    ) {
        resumen.errores += 1;
        resumen.omitidos += 1;
        if errores.len() < LIMITE_ERRORES {
            errores.push(ErrorFila::nueva(numero_fila, identificador, mensaje));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn procesar_fila(
        &self,
        fila: &HashMap<String, String>,
        fila_normalizada: &HashMap<String, String>,
        inventario: &str,
        clave: &str,
        numero_serie: &str,
        identificador: &str,
        modo: ModoImportacion,
    ) -> Result<AccionFila, ImportError> {
        if identificador.is_empty() {
            return Err(ImportError::IdentificadorVacio);
        }
        if numero_serie.is_empty() {
            return Err(ImportError::NumeroSerieVacio);
        }

        let valor = |candidatos: &[&str]| -> String {
            normalizar_valor(&valor_de_columna(fila, fila_normalizada, candidatos))
        };

        let nombre_equipo = {
            let nombre = valor(columnas::COL_NOMBRE);
            if nombre.is_empty() {
                identificador.to_string()
            } else {
                nombre
            }
        };

        // === Jerarquía organizacional (get-or-create con backfill) ===
        let sociedad_codigo = valor(columnas::COL_SOCIEDAD);
        if sociedad_codigo.is_empty() {
            return Err(ImportError::SociedadVacia);
        }
        let sociedad_nombre = {
            let nombre = valor(columnas::COL_SOCIEDAD_NOMBRE);
            if nombre.is_empty() {
                sociedad_codigo.clone()
            } else {
                nombre
            }
        };
        let sociedad = self
            .repo
            .find_or_create_sociedad(&sociedad_codigo, &sociedad_nombre)?;

        let division_codigo = valor(columnas::COL_DIVISION);
        if division_codigo.is_empty() {
            return Err(ImportError::DivisionVacia);
        }
        let division_nombre = {
            let nombre = valor(columnas::COL_DIVISION_NOMBRE);
            if nombre.is_empty() {
                division_codigo.clone()
            } else {
                nombre
            }
        };
        let division =
            self.repo
                .find_or_create_division(sociedad.id, &division_codigo, &division_nombre)?;

        let centro_codigo = valor(columnas::COL_CENTRO_COSTO);
        if centro_codigo.is_empty() {
            return Err(ImportError::CentroCostoVacio);
        }
        // El CSV no trae nombre de centro de costo; se usa el código
        let centro = self
            .repo
            .find_or_create_centro_costo(division.id, &centro_codigo, &centro_codigo)?;

        // === Catálogos (alta perezosa; vacío = sin referencia) ===
        let marca_id = self.catalogo(TipoCatalogo::Marca, &valor(columnas::COL_MARCA))?;
        let sistema_operativo_id = self.catalogo(
            TipoCatalogo::SistemaOperativo,
            &valor(columnas::COL_SISTEMA_OPERATIVO),
        )?;
        let tipo_equipo_id =
            self.catalogo(TipoCatalogo::TipoEquipo, &valor(columnas::COL_TIPO_EQUIPO))?;
        let modelo_id = self.catalogo(TipoCatalogo::ModeloEquipo, &valor(columnas::COL_MODELO))?;

        // === Atributos descriptivos ===
        let codigo_postal = opcional(valor(columnas::COL_CODIGO_POSTAL));
        let domicilio = opcional(valor(columnas::COL_DOMICILIO));
        let antiguedad = opcional(valor(columnas::COL_ANTIGUEDAD));
        let rpe_responsable = opcional(valor(columnas::COL_RPE_RESPONSABLE));
        let nombre_responsable = opcional(valor(columnas::COL_NOMBRE_RESPONSABLE));
        let direccion_ip = opcional(valor(columnas::COL_DIRECCION_IP));
        let direccion_mac = opcional(valor(columnas::COL_DIRECCION_MAC));
        let entidad = opcional(valor(columnas::COL_ENTIDAD));
        let municipio = opcional(valor(columnas::COL_MUNICIPIO));
        let infraestructura_critica = parse_booleano(&valor_de_columna(
            fila,
            fila_normalizada,
            columnas::COL_INFRAESTRUCTURA_CRITICA,
        ));

        // === Conciliación por número de serie + política del modo ===
        let existente = self.repo.equipo_por_numero_serie(numero_serie)?;
        if existente.is_some() && modo == ModoImportacion::CreateOnly {
            return Ok(AccionFila::Omitido);
        }
        if existente.is_none() && modo == ModoImportacion::UpdateOnly {
            return Ok(AccionFila::Omitido);
        }

        // === Política de colisión del número de inventario ===
        // Un inventario entrante vacío nunca borra el valor previo.
        let mut actualizar_inventario = false;
        if !inventario.is_empty() {
            match &existente {
                Some(equipo) => {
                    if equipo.campos.numero_inventario.is_empty()
                        || equipo.campos.numero_inventario != inventario
                    {
                        if self
                            .repo
                            .inventario_en_otro_equipo(inventario, Some(equipo.id))?
                        {
                            return Err(ImportError::InventarioDuplicado);
                        }
                        actualizar_inventario = true;
                    }
                }
                None => {
                    if self.repo.inventario_en_otro_equipo(inventario, None)? {
                        return Err(ImportError::InventarioDuplicado);
                    }
                }
            }
        }

        let numero_inventario = match &existente {
            Some(equipo) if !actualizar_inventario => equipo.campos.numero_inventario.clone(),
            _ => inventario.to_string(),
        };

        let campos = EquipoCampos {
            centro_costo_id: centro.id,
            clave: clave.to_string(),
            numero_inventario,
            nombre: nombre_equipo,
            numero_serie: numero_serie.to_string(),
            marca_id,
            sistema_operativo_id,
            tipo_equipo_id,
            modelo_id,
            codigo_postal,
            domicilio,
            antiguedad,
            rpe_responsable,
            nombre_responsable,
            infraestructura_critica,
            direccion_ip,
            direccion_mac,
            entidad,
            municipio,
        };

        match existente {
            Some(equipo) => {
                self.repo.actualizar_equipo(equipo.id, &campos)?;
                Ok(AccionFila::Actualizado)
            }
            None => {
                self.repo.crear_equipo(identificador, &campos)?;
                Ok(AccionFila::Creado)
            }
        }
    }

    fn catalogo(&self, tipo: TipoCatalogo, valor: &str) -> Result<Option<i64>, ImportError> {
        if valor.is_empty() {
            return Ok(None);
        }
        let entrada = self.repo.find_or_create_catalogo(tipo, valor)?;
        Ok(Some(entrada.id))
    }
}

fn opcional(valor: String) -> Option<String> {
    if valor.is_empty() {
        None
    } else {
        Some(valor)
    }
}
