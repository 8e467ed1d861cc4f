//! Routines to extract the downloaded archives.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Substring identifying the case dataset inside its archive.
pub const COVID_DATA_MEMBER: &str = "COVID19MEXICO.csv";

/// Substrings identifying the dictionary files inside their archive.
pub const DICTIONARY_MEMBERS: [&str; 2] = ["Catalogos", "Descriptores"];

/// Extract the case CSV from the downloaded archive into `dest`.
pub fn extract_covid_data(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let mut zip = open(archive)?;
    std::fs::create_dir_all(dest)?;

    let name = member_names(&mut zip)?
        .into_iter()
        .find(|name| name.contains(COVID_DATA_MEMBER))
        .ok_or(Error::MissingArchiveEntry(COVID_DATA_MEMBER))?;
    extract_member(&mut zip, &name, dest)
}

/// Extract the data dictionary files (catalogs and column descriptors)
/// from the downloaded archive into `dest`.
pub fn extract_data_dictionary(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut zip = open(archive)?;
    std::fs::create_dir_all(dest)?;

    let names: Vec<String> = member_names(&mut zip)?
        .into_iter()
        .filter(|name| !name.ends_with('/'))
        .filter(|name| DICTIONARY_MEMBERS.iter().any(|member| name.contains(member)))
        .collect();
    if names.is_empty() {
        return Err(Error::MissingArchiveEntry("data dictionary"));
    }

    names
        .iter()
        .map(|name| extract_member(&mut zip, name, dest))
        .collect()
}

fn open(archive: &Path) -> Result<ZipArchive<File>> {
    Ok(ZipArchive::new(File::open(archive)?)?)
}

// `file_names` iterates in hash-map order; walk the indices so member
// selection follows archive order.
fn member_names(zip: &mut ZipArchive<File>) -> Result<Vec<String>> {
    (0..zip.len())
        .map(|index| Ok(zip.by_index(index)?.name().to_string()))
        .collect()
}

fn extract_member(zip: &mut ZipArchive<File>, name: &str, dest: &Path) -> Result<PathBuf> {
    let mut member = zip.by_name(name)?;
    // Member paths may carry directories; keep them relative to `dest`.
    let out_path = dest.join(member.mangled_name());
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = File::create(&out_path)?;
    std::io::copy(&mut member, &mut out)?;
    debug!(member = name, path = %out_path.display(), "extracted archive member");
    Ok(out_path)
}
