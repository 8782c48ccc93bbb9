use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.base_path.join(path);
        fs::create_dir_all(&full_path).map_err(|source| ConvertError::WriteError {
            path: full_path,
            source,
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConvertError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&full_path, data).map_err(|source| ConvertError::WriteError {
            path: full_path,
            source,
        })
    }
}
