use std::io::Write;
use std::path::{Path, PathBuf};

use super::{validate_key, KeyValueStore};
use crate::error::StorageError;

/// One JSON document per key under a data directory.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{}.json", key)))
    }

    fn ensure_directory(&self) -> Result<(), StorageError> {
        if !self.directory.exists() {
            std::fs::create_dir_all(&self.directory).map_err(|e| {
                StorageError::CreateDirectory {
                    path: self.directory.clone(),
                    source: e,
                }
            })?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFile { path, source: e }),
        }
    }

    /// Writes to a temp file next to the target, then renames it into
    /// place. A failed write removes the temp file and leaves the previous
    /// document untouched.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.ensure_directory()?;

        let tmp_path = self.directory.join(format!(".{}.json.tmp", key));
        let result = write_then_rename(&tmp_path, &path, value);
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        result
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    let mut file = std::fs::File::create(tmp_path).map_err(|e| StorageError::WriteFile {
        path: tmp_path.to_path_buf(),
        source: e,
    })?;
    file.write_all(value.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| StorageError::WriteFile {
            path: tmp_path.to_path_buf(),
            source: e,
        })?;
    drop(file);

    std::fs::rename(tmp_path, path).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
