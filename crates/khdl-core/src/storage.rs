//! Output directory and track file I/O.
//!
//! Files land in `<root>/<album id>/NNN - <title>.mp3`. The files themselves are
//! the only state: a later run compares their sizes to decide what to skip.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to inspect {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// `NNN - <title>.mp3`, with the number zero-padded to three digits.
pub fn track_file_name(number: u32, title: &str) -> String {
    format!("{number:03} - {title}.mp3")
}

/// Base name used when a title sanitizes to nothing.
pub fn fallback_title(number: u32) -> String {
    format!("track_{number:03}")
}

/// The output directory of one album.
#[derive(Debug, Clone)]
pub struct AlbumDir {
    path: PathBuf,
}

impl AlbumDir {
    /// Creates `root/` and `root/<album_id>/` if they do not exist yet.
    pub fn prepare(root: &Path, album_id: &str) -> Result<Self, StorageError> {
        let path = root.join(album_id);
        fs::create_dir_all(&path).map_err(|source| StorageError::CreateDir {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Size of an existing output file, or `None` if nothing is there.
    pub fn existing_len(&self, file_name: &str) -> Result<Option<u64>, StorageError> {
        let path = self.file_path(file_name);
        match fs::metadata(&path) {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Stat { path, source }),
        }
    }

    /// Writes the whole body in one pass, truncating any previous content.
    ///
    /// No temp file or resume: an interrupted write leaves a short file that the
    /// next run's size check will overwrite.
    pub fn write_track(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.file_path(file_name);
        let write = |path: &Path| -> io::Result<()> {
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            file.flush()
        };
        write(&path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
