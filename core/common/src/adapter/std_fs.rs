//! 標準ファイルシステム実装（std::fs / tempfile を委譲）

use crate::error::Error;
use crate::ports::outbound::{FileMetadata, FileSystem, TempFile};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

/// tempfile::NamedTempFile を包んだ一時ファイル（drop で削除）
struct StdTempFile(tempfile::NamedTempFile);

impl TempFile for StdTempFile {
    fn path(&self) -> &Path {
        self.0.path()
    }
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error> {
        let m = std::fs::metadata(path).map_err(|e| {
            Error::io(format!("Failed to get metadata for '{}'", path.display()), e)
        })?;
        let meta = FileMetadata::new(m.len(), m.is_file(), m.is_dir());
        let modified_ms = m
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64);
        Ok(match modified_ms {
            Some(ms) => meta.with_modified_ms(ms),
            None => meta,
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io(format!("Failed to create directory '{}'", path.display()), e)
        })
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_dir_all(path).map_err(|e| {
            Error::io(format!("Failed to remove directory '{}'", path.display()), e)
        })
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::copy(from, to).map(|_| ()).map_err(|e| {
            Error::io(
                format!("Failed to copy '{}' to '{}'", from.display(), to.display()),
                e,
            )
        })
    }

    fn create_temp_file(&self, dir: &Path) -> Result<Box<dyn TempFile>, Error> {
        let file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            Error::io(
                format!("Failed to create temporary file in '{}'", dir.display()),
                e,
            )
        })?;
        Ok(Box::new(StdTempFile(file)))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::io(format!("Failed to open '{}' for append", path.display()), e))?;
        Ok(Box::new(f))
    }
}
