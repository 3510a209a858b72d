use crate::error::RollcallError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory that uploaded files are saved into before extraction.
///
/// Backed either by a fixed directory or by a temporary one that is removed
/// when the store is dropped.
pub struct UploadStore {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl UploadStore {
    /// Use `dir`, creating it if needed.
    pub fn at(dir: &Path) -> Result<Self, RollcallError> {
        std::fs::create_dir_all(dir)?;
        Ok(UploadStore {
            root: dir.to_path_buf(),
            _temp: None,
        })
    }

    pub fn temporary() -> Result<Self, RollcallError> {
        let temp = tempfile::Builder::new().prefix("rollcall-uploads").tempdir()?;
        Ok(UploadStore {
            root: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    /// Store from configuration: the given directory, or a temporary one.
    pub fn from_config(upload_dir: Option<&Path>) -> Result<Self, RollcallError> {
        match upload_dir {
            Some(dir) => Self::at(dir),
            None => Self::temporary(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save `bytes` under `filename`, replacing any earlier upload of that name.
    ///
    /// Only the final path component of `filename` is used.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, RollcallError> {
        let name = Path::new(filename)
            .file_name()
            .ok_or(RollcallError::InvalidFileType)?;
        let path = self.root.join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_overwrite() {
        let store = UploadStore::temporary().unwrap();
        let path = store.save("class.xlsx", b"one").unwrap();
        store.save("class.xlsx", b"two").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"two");
        assert!(path.starts_with(store.root()));
    }

    #[test]
    fn test_save_strips_directories() {
        let store = UploadStore::temporary().unwrap();
        let path = store.save("../../etc/scan.png", b"x").unwrap();
        assert_eq!(path, store.root().join("scan.png"));
    }

    #[test]
    fn test_temporary_store_is_removed_on_drop() {
        let store = UploadStore::temporary().unwrap();
        let root = store.root().to_path_buf();
        assert!(root.exists());
        drop(store);
        assert!(!root.exists());
    }

    #[test]
    fn test_fixed_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let store = UploadStore::at(&uploads).unwrap();
        store.save("a.pdf", b"%PDF").unwrap();
        assert!(uploads.join("a.pdf").exists());
    }
}
