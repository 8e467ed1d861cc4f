//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced while downloading, extracting, or analyzing the data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] hyper::http::uri::InvalidUri),

    #[error("data source answered with status {0}")]
    Status(hyper::StatusCode),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("the archive does not contain any {0} entry")]
    MissingArchiveEntry(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no extracted COVID data file found under {}", .0.display())]
    MissingCovidData(std::path::PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
