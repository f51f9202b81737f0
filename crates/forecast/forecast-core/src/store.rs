//! Artifact stores
//!
//! [`FileArtifactStore`] keeps the regressor and scaler in two files and
//! replaces them by write-to-temp-then-rename, so a reader never observes a
//! half-written file. [`InMemoryArtifactStore`] keeps them in memory.

use forecast_spi::{ArtifactBundle, ArtifactStore, ForecastError, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn io_error(path: &Path, source: std::io::Error) -> ForecastError {
    ForecastError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Sibling path with `.tmp` appended to the file name
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Temporary file that replaces its target on commit
struct AtomicFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    committed: bool,
}

impl AtomicFile {
    fn create(final_path: &Path) -> Result<Self> {
        let temp_path = temp_path(final_path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| io_error(&temp_path, e))?;

        Ok(Self {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            committed: false,
        })
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .and_then(|_| self.file.sync_all())
            .map_err(|e| io_error(&self.temp_path, e))
    }

    fn commit(mut self) -> Result<()> {
        fs::rename(&self.temp_path, &self.final_path)
            .map_err(|e| io_error(&self.final_path, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Artifact store backed by two files
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    regressor_path: PathBuf,
    scaler_path: PathBuf,
}

impl FileArtifactStore {
    pub fn new(regressor_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            regressor_path: regressor_path.into(),
            scaler_path: scaler_path.into(),
        }
    }

    pub fn regressor_path(&self) -> &Path {
        &self.regressor_path
    }

    pub fn scaler_path(&self) -> &Path {
        &self.scaler_path
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| io_error(dir, e))
            }
            _ => Ok(()),
        }
    }
}

impl ArtifactStore for FileArtifactStore {
    fn save(&self, bundle: &ArtifactBundle) -> Result<()> {
        Self::ensure_parent(&self.regressor_path)?;
        Self::ensure_parent(&self.scaler_path)?;

        // Both temp files are complete before either target is replaced
        let mut regressor = AtomicFile::create(&self.regressor_path)?;
        regressor.write_all(&bundle.regressor)?;
        let mut scaler = AtomicFile::create(&self.scaler_path)?;
        scaler.write_all(&bundle.scaler)?;

        regressor.commit()?;
        scaler.commit()?;

        tracing::debug!(
            regressor = %self.regressor_path.display(),
            scaler = %self.scaler_path.display(),
            "artifacts written"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<ArtifactBundle>> {
        let regressor = match fs::read(&self.regressor_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.regressor_path, e)),
        };
        let scaler = match fs::read(&self.scaler_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ForecastError::ArtifactMismatch(format!(
                    "regressor {} exists but scaler {} is missing",
                    self.regressor_path.display(),
                    self.scaler_path.display()
                )))
            }
            Err(e) => return Err(io_error(&self.scaler_path, e)),
        };

        Ok(Some(ArtifactBundle::new(regressor, scaler)))
    }

    fn describe(&self) -> String {
        format!(
            "files {} and {}",
            self.regressor_path.display(),
            self.scaler_path.display()
        )
    }
}

/// Artifact store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    bundle: Mutex<Option<ArtifactBundle>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been saved yet
    pub fn is_empty(&self) -> bool {
        self.bundle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn save(&self, bundle: &ArtifactBundle) -> Result<()> {
        let mut slot = self
            .bundle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(bundle.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<ArtifactBundle>> {
        Ok(self
            .bundle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> FileArtifactStore {
        FileArtifactStore::new(dir.path().join("sales_model.bin"), dir.path().join("scaler.bin"))
    }

    #[test]
    fn test_file_store_empty_dir_loads_none() {
        let dir = TempDir::new().unwrap();
        assert!(file_store(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_and_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);

        store.save(&ArtifactBundle::new(vec![1, 2, 3], vec![4, 5])).unwrap();
        store.save(&ArtifactBundle::new(vec![9], vec![8, 7, 6])).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, ArtifactBundle::new(vec![9], vec![8, 7, 6]));
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);
        store.save(&ArtifactBundle::new(vec![1], vec![2])).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["sales_model.bin", "scaler.bin"]);
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("models").join("v1");
        let store = FileArtifactStore::new(nested.join("r.bin"), nested.join("s.bin"));
        store.save(&ArtifactBundle::new(vec![1], vec![2])).unwrap();
        assert!(nested.join("r.bin").exists());
    }

    #[test]
    fn test_file_store_missing_scaler_is_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);
        fs::write(store.regressor_path(), [1u8, 2, 3]).unwrap();

        assert!(matches!(
            store.load(),
            Err(ForecastError::ArtifactMismatch(_))
        ));
    }

    #[test]
    fn test_file_store_failed_save_keeps_previous_artifacts() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);
        store.save(&ArtifactBundle::new(vec![1, 2], vec![3, 4])).unwrap();

        // a directory squatting on the scaler temp path makes it unwritable
        fs::create_dir(dir.path().join("scaler.bin.tmp")).unwrap();

        assert!(matches!(
            store.save(&ArtifactBundle::new(vec![9], vec![9])),
            Err(ForecastError::Io { .. })
        ));
        assert_eq!(
            store.load().unwrap(),
            Some(ArtifactBundle::new(vec![1, 2], vec![3, 4]))
        );

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["sales_model.bin", "scaler.bin", "scaler.bin.tmp"]);
        assert!(dir.path().join("scaler.bin.tmp").is_dir());
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("/data/sales_model.bin")),
            PathBuf::from("/data/sales_model.bin.tmp")
        );
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryArtifactStore::new();
        assert!(store.is_empty());
        assert!(store.load().unwrap().is_none());

        store.save(&ArtifactBundle::new(vec![1], vec![2])).unwrap();
        assert!(!store.is_empty());
        assert_eq!(
            store.load().unwrap(),
            Some(ArtifactBundle::new(vec![1], vec![2]))
        );
    }
}
