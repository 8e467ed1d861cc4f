//! Project configuration parameters.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base URL of the health ministry's open data server.
pub const BASE_DATA_SOURCE_URL: &str =
    "https://datosabiertos.salud.gob.mx/gobmx/salud/datos_abiertos";

/// Filename of the zipped national case dataset.
pub const COVID_DATA_FILENAME: &str = "datos_abiertos_covid19.zip";

/// Filename of the zipped data dictionary.
pub const DATA_DICTIONARY_FILENAME: &str = "diccionario_datos_covid19.zip";

pub static COVID_DATA_URL: Lazy<String> =
    Lazy::new(|| format!("{BASE_DATA_SOURCE_URL}/{COVID_DATA_FILENAME}"));

pub static DATA_DICTIONARY_URL: Lazy<String> =
    Lazy::new(|| format!("{BASE_DATA_SOURCE_URL}/{DATA_DICTIONARY_FILENAME}"));

/// Default directory where downloaded and extracted data lands.
pub const DATA_DIR_NAME: &str = "data";

/// Tool configuration, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory used to store downloaded and extracted data.
    pub data_dir: PathBuf,

    /// Remote URL of the zipped COVID case data.
    pub covid_data_url: String,

    /// Remote URL of the zipped data dictionary.
    pub data_dictionary_url: String,

    /// Filename assigned to the downloaded case archive.
    pub covid_data_filename: String,

    /// Filename assigned to the downloaded dictionary archive.
    pub data_dictionary_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR_NAME),
            covid_data_url: COVID_DATA_URL.clone(),
            data_dictionary_url: DATA_DICTIONARY_URL.clone(),
            covid_data_filename: COVID_DATA_FILENAME.to_string(),
            data_dictionary_filename: DATA_DICTIONARY_FILENAME.to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from a TOML file.
    ///
    /// With no explicit path we look under the platform config directory;
    /// a missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Location of the downloaded case archive.
    pub fn zipped_covid_data_file(&self) -> PathBuf {
        self.data_dir.join(&self.covid_data_filename)
    }

    /// Location of the downloaded dictionary archive.
    pub fn zipped_data_dictionary_file(&self) -> PathBuf {
        self.data_dir.join(&self.data_dictionary_filename)
    }

    fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("cannot find the config directory".into()))?;
        Ok(config_dir.join("covid19mx").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_open_data_server() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.covid_data_url.starts_with(BASE_DATA_SOURCE_URL));
        assert!(config.covid_data_url.ends_with(COVID_DATA_FILENAME));
        assert!(config
            .data_dictionary_url
            .ends_with(DATA_DICTIONARY_FILENAME));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.covid_data_filename, COVID_DATA_FILENAME);
    }

    #[test]
    fn partial_config_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/covid\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/covid"));
        assert_eq!(config.covid_data_url, *COVID_DATA_URL);
    }

    #[test]
    fn archive_paths_live_under_the_data_dir() {
        let config = Config::default();
        assert_eq!(
            config.zipped_covid_data_file(),
            PathBuf::from("data").join(COVID_DATA_FILENAME)
        );
    }
}
