//! Orchestration of the source data tasks: download and extraction.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::download::{DataChunkInfo, DataDownloader};
use crate::error::{Error, Result};
use crate::extract;

/// Handle all the tasks to download and extract the data sources.
pub struct SourceDataHandler {
    config: Config,
    work_dir: PathBuf,
    covid_data_file: Option<PathBuf>,
    data_dictionary_files: Vec<PathBuf>,
}

impl SourceDataHandler {
    pub fn new(config: Config, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            work_dir: work_dir.into(),
            covid_data_file: None,
            data_dictionary_files: Vec::new(),
        }
    }

    /// Location of the downloaded case archive.
    pub fn zipped_covid_data_file(&self) -> PathBuf {
        self.work_dir.join(&self.config.covid_data_filename)
    }

    /// Location of the downloaded dictionary archive.
    pub fn zipped_data_dictionary_file(&self) -> PathBuf {
        self.work_dir.join(&self.config.data_dictionary_filename)
    }

    /// Location of the extracted case CSV, once extracted.
    pub fn covid_data_file(&self) -> Option<&Path> {
        self.covid_data_file.as_deref()
    }

    /// Locations of the extracted dictionary files, once extracted.
    pub fn data_dictionary_files(&self) -> &[PathBuf] {
        &self.data_dictionary_files
    }

    /// Download the case archive in parts, reporting each written chunk.
    pub async fn download_covid_data<F>(&self, chunk_size: usize, on_chunk: F) -> Result<u64>
    where
        F: FnMut(DataChunkInfo),
    {
        info!(url = %self.config.covid_data_url, "downloading COVID data");
        DataDownloader::new(&self.config.covid_data_url)?
            .download(&self.zipped_covid_data_file(), chunk_size, on_chunk)
            .await
    }

    /// Download the data dictionary archive.
    pub async fn download_data_dictionary(&self) -> Result<u64> {
        info!(url = %self.config.data_dictionary_url, "downloading dictionary data");
        DataDownloader::new(&self.config.data_dictionary_url)?
            .download_buffered(&self.zipped_data_dictionary_file())
            .await
    }

    /// Extract the case CSV from the downloaded archive, recording its
    /// location.
    pub fn extract_covid_data(&mut self) -> Result<&Path> {
        let path = extract::extract_covid_data(&self.zipped_covid_data_file(), &self.work_dir)?;
        Ok(self.covid_data_file.insert(path).as_path())
    }

    /// Extract the dictionary files from the downloaded archive, recording
    /// their locations.
    pub fn extract_data_dictionary(&mut self) -> Result<&[PathBuf]> {
        self.data_dictionary_files =
            extract::extract_data_dictionary(&self.zipped_data_dictionary_file(), &self.work_dir)?;
        Ok(&self.data_dictionary_files)
    }

    /// Locate an extracted case CSV under the working directory.
    pub fn find_covid_data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.covid_data_file {
            return Ok(path.clone());
        }
        find_member_file(&self.work_dir, extract::COVID_DATA_MEMBER)?
            .ok_or_else(|| Error::MissingCovidData(self.work_dir.clone()))
    }
}

fn find_member_file(dir: &Path, member: &str) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(found) = find_member_file(&path, member)? {
                return Ok(Some(found));
            }
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.contains(member))
            .unwrap_or(false)
        {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_paths_live_under_the_work_dir() {
        let handler = SourceDataHandler::new(Config::default(), "/tmp/work");
        assert_eq!(
            handler.zipped_covid_data_file(),
            PathBuf::from("/tmp/work").join(crate::config::COVID_DATA_FILENAME)
        );
        assert_eq!(
            handler.zipped_data_dictionary_file(),
            PathBuf::from("/tmp/work").join(crate::config::DATA_DICTIONARY_FILENAME)
        );
    }

    #[test]
    fn finds_an_extracted_case_file_in_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("extracted");
        std::fs::create_dir_all(&nested).unwrap();
        let csv = nested.join("230115COVID19MEXICO.csv");
        std::fs::write(&csv, "header\n").unwrap();

        let handler = SourceDataHandler::new(Config::default(), dir.path());
        assert_eq!(handler.find_covid_data_file().unwrap(), csv);
    }

    #[test]
    fn missing_case_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let handler = SourceDataHandler::new(Config::default(), dir.path());
        assert!(matches!(
            handler.find_covid_data_file(),
            Err(Error::MissingCovidData(_))
        ));
    }
}
