use std::fs;
use std::path::{Path, PathBuf};

use crate::api::ExportPayload;
use crate::error::ExportError;

const FALLBACK_FILENAME: &str = "roster.csv";

/// Receives an exported file and hands it to the user.
pub trait DownloadSink: Send + Sync {
    /// Stores the payload, returning where it ended up.
    fn save(&self, payload: &ExportPayload) -> Result<PathBuf, ExportError>;
}

/// Saves downloads into one directory, like a browser's download folder.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, payload: &ExportPayload) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(safe_filename(&payload.filename));
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, payload.content.as_bytes()))
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Keeps only the last path component of a server-supplied file name.
pub fn safe_filename(name: &str) -> String {
    let last = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();
    if last.is_empty() || last == "." || last == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        last.to_string()
    }
}
