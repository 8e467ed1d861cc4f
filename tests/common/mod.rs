//! Helpers shared by the integration tests: small in-memory renditions of
//! the dataset CSV and its zipped archives.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::FileOptions;
use zip::ZipWriter;

/// Header row matching the published column order of the dataset.
pub const HEADER: &str = "FECHA_ACTUALIZACION,ID_REGISTRO,ORIGEN,SECTOR,\
ENTIDAD_UM,SEXO,ENTIDAD_NAC,ENTIDAD_RES,MUNICIPIO_RES,TIPO_PACIENTE,\
FECHA_INGRESO,FECHA_SINTOMAS,FECHA_DEF,INTUBADO,NEUMONIA,EDAD,NACIONALIDAD,\
EMBARAZO,HABLA_LENGUA_INDIG,INDIGENA,DIABETES,EPOC,ASMA,INMUSUPR,\
HIPERTENSION,OTRA_COM,CARDIOVASCULAR,OBESIDAD,RENAL_CRONICA,TABAQUISMO,\
OTRO_CASO,TOMA_MUESTRA_LAB,RESULTADO_LAB,TOMA_MUESTRA_ANTIGENO,\
RESULTADO_ANTIGENO,CLASIFICACION_FINAL,MIGRANTE,PAIS_NACIONALIDAD,\
PAIS_ORIGEN,UCI";

/// Format one dataset row, defaulting the columns the tests ignore.
pub fn row(
    id: &str,
    entidad_res: u32,
    fecha_sintomas: &str,
    fecha_def: &str,
    clasificacion_final: u32,
) -> String {
    format!(
        "2023-01-15,{id},1,12,{entidad_res},1,{entidad_res},{entidad_res},1,1,\
{fecha_sintomas},{fecha_sintomas},{fecha_def},97,2,45,1,97,2,2,2,2,2,2,2,2,2,2,2,2,\
2,1,1,2,97,{clasificacion_final},99,México,97,97"
    )
}

/// Assemble a complete CSV document from dataset rows.
pub fn csv_document(rows: &[String]) -> String {
    let mut doc = String::from(HEADER);
    for row in rows {
        doc.push('\n');
        doc.push_str(row);
    }
    doc.push('\n');
    doc
}

/// A small sample dataset: three confirmed cases (one fatal) and one
/// suspected case.
pub fn sample_dataset() -> String {
    csv_document(&[
        row("a1", 9, "2021-02-01", "9999-99-99", 3),
        row("a2", 9, "2021-02-01", "2021-02-08", 1),
        row("a3", 14, "2021-02-03", "9999-99-99", 3),
        row("a4", 14, "2021-02-03", "9999-99-99", 6),
    ])
}

/// Write a zip archive holding the given members.
pub fn write_archive(path: &Path, members: &[(&str, &[u8])]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, contents) in members {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(contents).unwrap();
    }
    writer.finish().unwrap();
}
