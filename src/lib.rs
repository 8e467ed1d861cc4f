//! Download, extract, and analyze the evolution of the COVID-19 pandemic
//! in Mexico from the national open dataset.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod output;
pub mod records;
pub mod sources;

pub use analysis::{CaseFilter, EvolutionSeries};
pub use config::Config;
pub use download::{DataChunkInfo, DataDownloader, DEFAULT_CHUNK_SIZE};
pub use error::{Error, Result};
pub use records::CaseRecord;
pub use sources::SourceDataHandler;
