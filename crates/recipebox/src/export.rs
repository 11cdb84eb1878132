//! Exporting recipes as downloadable files.
//!
//! A [`Downloader`] hands a finished document to the host. The
//! [`DirectoryDownloader`] writes it into a directory through a staging file
//! that is removed on every exit path, so nothing is left behind once
//! [`Downloader::trigger_download`] returns.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Hands exported documents to the host.
pub trait Downloader: std::fmt::Debug {
    /// Deliver `bytes` as a file called `file_name`.
    ///
    /// Returns where the file ended up.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be delivered.
    fn trigger_download(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf>;
}

/// Writes exported documents into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    /// Create a downloader writing into `dir`.
    ///
    /// The directory is created on the first download if it does not exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.as_os_str().is_empty() || self.dir.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|source| Error::DirectoryCreate {
            path: self.dir.clone(),
            source,
        })
    }
}

impl Downloader for DirectoryDownloader {
    fn trigger_download(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf> {
        check_file_name(file_name)?;
        self.ensure_dir()?;

        let target = self.dir.join(file_name);
        let mut staging = NamedTempFile::new_in(&self.dir)
            .map_err(|source| export_error(file_name, source))?;
        debug!("Staging export at {}", staging.path().display());

        staging
            .write_all(bytes)
            .and_then(|()| staging.as_file().sync_all())
            .map_err(|source| export_error(file_name, source))?;
        // On failure the staging file comes back inside the error and is
        // removed when that is dropped.
        staging
            .persist(&target)
            .map_err(|e| export_error(file_name, e.error))?;

        info!("Exported {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }
}

/// A file name must name a single entry inside the export directory.
fn check_file_name(file_name: &str) -> Result<()> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(export_error(
            file_name,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "file name must not contain a directory",
            ),
        )),
    }
}

fn export_error(file_name: &str, source: io::Error) -> Error {
    Error::Export {
        file_name: file_name.to_string(),
        source,
    }
}

/// Keeps exported documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDownloader {
    downloads: Vec<(String, Vec<u8>)>,
}

impl MemoryDownloader {
    /// Create an empty downloader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delivered document as `(file_name, bytes)`, oldest first.
    #[must_use]
    pub fn downloads(&self) -> &[(String, Vec<u8>)] {
        &self.downloads
    }
}

impl Downloader for MemoryDownloader {
    fn trigger_download(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf> {
        self.downloads.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
