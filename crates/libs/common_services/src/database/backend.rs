use crate::database::DbError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Raw storage for the whole-state document.
///
/// Backends deal in the serialized text only; the codec lives in
/// [`crate::database::DocStore`]. `read` returns `None` when nothing has
/// been stored yet.
pub trait DocumentBackend: Send + Sync {
    fn read(&self) -> Result<Option<String>, DbError>;
    fn write(&self, raw: &str) -> Result<(), DbError>;
}

/// File-backed storage. Writes go through a temp file in the same directory
/// and a rename, so the overwrite is atomic and readers never observe a
/// half-written document.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, DbError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, raw: &str) -> Result<(), DbError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(raw.as_bytes())?;
        tmp.persist(&self.path).map_err(|error| error.error)?;
        Ok(())
    }
}

/// In-memory storage for tests and embedding.
#[derive(Default)]
pub struct MemoryBackend {
    raw: Mutex<Option<String>>,
}

impl DocumentBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, DbError> {
        let guard = self.raw.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn write(&self, raw: &str) -> Result<(), DbError> {
        let mut guard = self.raw.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backend_reads_none_before_first_write() -> Result<(), DbError> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path().join("data.json"));

        assert_eq!(backend.read()?, None);
        Ok(())
    }

    #[test]
    fn file_backend_overwrites_atomically_in_place() -> Result<(), DbError> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path().join("data.json"));

        backend.write("{\"items\": {}}")?;
        backend.write("{\"items\": {\"a\": 1}}")?;

        assert_eq!(backend.read()?.as_deref(), Some("{\"items\": {\"a\": 1}}"));
        // The temp file must not linger next to the document.
        let entries = fs::read_dir(dir.path())?.count();
        assert_eq!(entries, 1);
        Ok(())
    }

    #[test]
    fn memory_backend_round_trips() -> Result<(), DbError> {
        let backend = MemoryBackend::default();

        assert_eq!(backend.read()?, None);
        backend.write("{}")?;
        assert_eq!(backend.read()?.as_deref(), Some("{}"));
        Ok(())
    }
}
