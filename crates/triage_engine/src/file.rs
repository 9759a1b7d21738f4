use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use triage_core::{FileHandle, MAX_FILE_BYTES};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}: not a regular file")]
    NotAFile(String),
}

/// Reads a file from disk as a picker/drop candidate.
///
/// Oversized files are not read; the returned handle only carries their
/// name and size so validation can reject them.
pub fn load_candidate(path: &Path) -> Result<FileHandle, LoadError> {
    let display = path.display().to_string();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());

    let metadata = fs::metadata(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(LoadError::NotAFile(display));
    }
    if metadata.len() > MAX_FILE_BYTES {
        return Ok(FileHandle::metadata_only(name, metadata.len()));
    }

    let contents = fs::read(path).map_err(|source| LoadError::Io {
        path: display,
        source,
    })?;
    Ok(FileHandle::new(name, contents))
}
