//! Static lookup tables taken from the dataset's data dictionary.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Federal entity codes (ENTIDAD_UM, ENTIDAD_NAC, ENTIDAD_RES).
pub static ENTIDADES: Lazy<HashMap<u32, &str>> = Lazy::new(|| {
    HashMap::from([
        (1, "AGUASCALIENTES"),
        (2, "BAJA CALIFORNIA"),
        (3, "BAJA CALIFORNIA SUR"),
        (4, "CAMPECHE"),
        (5, "COAHUILA DE ZARAGOZA"),
        (6, "COLIMA"),
        (7, "CHIAPAS"),
        (8, "CHIHUAHUA"),
        (9, "CIUDAD DE MÉXICO"),
        (10, "DURANGO"),
        (11, "GUANAJUATO"),
        (12, "GUERRERO"),
        (13, "HIDALGO"),
        (14, "JALISCO"),
        (15, "MÉXICO"),
        (16, "MICHOACÁN DE OCAMPO"),
        (17, "MORELOS"),
        (18, "NAYARIT"),
        (19, "NUEVO LEÓN"),
        (20, "OAXACA"),
        (21, "PUEBLA"),
        (22, "QUERÉTARO"),
        (23, "QUINTANA ROO"),
        (24, "SAN LUIS POTOSÍ"),
        (25, "SINALOA"),
        (26, "SONORA"),
        (27, "TABASCO"),
        (28, "TAMAULIPAS"),
        (29, "TLAXCALA"),
        (30, "VERACRUZ DE IGNACIO DE LA LLAVE"),
        (31, "YUCATÁN"),
        (32, "ZACATECAS"),
        (36, "ESTADOS UNIDOS MEXICANOS"),
        (97, "NO APLICA"),
        (98, "SE IGNORA"),
        (99, "NO ESPECIFICADO"),
    ])
});

/// CLASIFICACION_FINAL codes. Codes 1 to 3 are confirmed cases.
pub static CLASIFICACIONES: Lazy<HashMap<u32, &str>> = Lazy::new(|| {
    HashMap::from([
        (1, "CASO DE COVID-19 CONFIRMADO POR ASOCIACIÓN CLÍNICA EPIDEMIOLÓGICA"),
        (2, "CASO DE COVID-19 CONFIRMADO POR COMITÉ DE DICTAMINACIÓN"),
        (3, "CASO DE SARS-COV-2 CONFIRMADO"),
        (4, "INVÁLIDO POR LABORATORIO"),
        (5, "NO REALIZADO POR LABORATORIO"),
        (6, "CASO SOSPECHOSO"),
        (7, "NEGATIVO A SARS-COV-2"),
    ])
});

/// Name of a federal entity by its numeric code.
pub fn entity_name(code: u32) -> Option<&'static str> {
    ENTIDADES.get(&code).copied()
}

/// Whether the code names an actual state (not a national or sentinel code).
pub fn is_state(code: u32) -> bool {
    (1..=32).contains(&code)
}
