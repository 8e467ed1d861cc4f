//! Row model of the national COVID-19 open dataset.
//!
//! Field names follow the CSV headers published with the dataset; the data
//! dictionary describes every coded column. `FECHA_DEF` uses the sentinel
//! `9999-99-99` when the patient did not die, so it maps to an `Option`.

use chrono::NaiveDate;
use serde::{Deserialize as _, Deserializer};
use serde_derive::{Deserialize, Serialize};

/// One row of the `COVID19MEXICO.csv` dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(rename = "FECHA_ACTUALIZACION")]
    pub fecha_actualizacion: NaiveDate,
    #[serde(rename = "ID_REGISTRO")]
    pub id_registro: String,
    #[serde(rename = "ORIGEN")]
    pub origen: u32,
    #[serde(rename = "SECTOR")]
    pub sector: u32,
    #[serde(rename = "ENTIDAD_UM")]
    pub entidad_um: u32,
    #[serde(rename = "SEXO")]
    pub sexo: u32,
    #[serde(rename = "ENTIDAD_NAC")]
    pub entidad_nac: u32,
    #[serde(rename = "ENTIDAD_RES")]
    pub entidad_res: u32,
    #[serde(rename = "MUNICIPIO_RES")]
    pub municipio_res: u32,
    #[serde(rename = "TIPO_PACIENTE")]
    pub tipo_paciente: u32,
    #[serde(rename = "FECHA_INGRESO")]
    pub fecha_ingreso: NaiveDate,
    #[serde(rename = "FECHA_SINTOMAS")]
    pub fecha_sintomas: NaiveDate,
    #[serde(rename = "FECHA_DEF", deserialize_with = "optional_date")]
    pub fecha_def: Option<NaiveDate>,
    #[serde(rename = "INTUBADO")]
    pub intubado: u32,
    #[serde(rename = "NEUMONIA")]
    pub neumonia: u32,
    #[serde(rename = "EDAD")]
    pub edad: u32,
    #[serde(rename = "NACIONALIDAD")]
    pub nacionalidad: u32,
    #[serde(rename = "EMBARAZO")]
    pub embarazo: u32,
    #[serde(rename = "HABLA_LENGUA_INDIG")]
    pub habla_lengua_indig: u32,
    #[serde(rename = "INDIGENA")]
    pub indigena: u32,
    #[serde(rename = "DIABETES")]
    pub diabetes: u32,
    #[serde(rename = "EPOC")]
    pub epoc: u32,
    #[serde(rename = "ASMA")]
    pub asma: u32,
    #[serde(rename = "INMUSUPR")]
    pub inmusupr: u32,
    #[serde(rename = "HIPERTENSION")]
    pub hipertension: u32,
    #[serde(rename = "OTRA_COM")]
    pub otra_com: u32,
    #[serde(rename = "CARDIOVASCULAR")]
    pub cardiovascular: u32,
    #[serde(rename = "OBESIDAD")]
    pub obesidad: u32,
    #[serde(rename = "RENAL_CRONICA")]
    pub renal_cronica: u32,
    #[serde(rename = "TABAQUISMO")]
    pub tabaquismo: u32,
    #[serde(rename = "OTRO_CASO")]
    pub otro_caso: u32,
    #[serde(rename = "TOMA_MUESTRA_LAB")]
    pub toma_muestra_lab: u32,
    #[serde(rename = "RESULTADO_LAB")]
    pub resultado_lab: u32,
    #[serde(rename = "TOMA_MUESTRA_ANTIGENO")]
    pub toma_muestra_antigeno: u32,
    #[serde(rename = "RESULTADO_ANTIGENO")]
    pub resultado_antigeno: u32,
    #[serde(rename = "CLASIFICACION_FINAL")]
    pub clasificacion_final: u32,
    #[serde(rename = "MIGRANTE")]
    pub migrante: u32,
    #[serde(rename = "PAIS_NACIONALIDAD")]
    pub pais_nacionalidad: String,
    #[serde(rename = "PAIS_ORIGEN")]
    pub pais_origen: String,
    #[serde(rename = "UCI")]
    pub uci: u32,
}

impl CaseRecord {
    /// Whether the record is a confirmed COVID-19 case
    /// (CLASIFICACION_FINAL 1, 2, or 3).
    pub fn is_confirmed(&self) -> bool {
        (1..=3).contains(&self.clasificacion_final)
    }

    /// Whether the record carries a real date of death.
    pub fn is_death(&self) -> bool {
        self.fecha_def.is_some()
    }
}

/// Parse a date column that uses `9999-99-99` as its "not applicable"
/// sentinel. Any unparseable value counts as absent.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok())
}
