//! Advisory file locking for the storage file.
//!
//! Readers take a shared lock and writers an exclusive one. A write opens
//! the file without truncating it, locks, and only then truncates and writes,
//! so a reader can never observe a half-replaced file.
//!
//! Locks block without timeout and are released in `Drop` before the handle
//! closes, on every exit path.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Result, StoreError};

/// Lock mode requested on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Shared,
    Exclusive,
}

/// An open file holding an advisory lock for its whole lifetime.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    mode: Mode,
}

impl LockedFile {
    /// Open an existing file for reading and take a shared lock.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file cannot be opened and
    /// `StoreError::Lock` if the lock cannot be acquired.
    pub fn shared(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::lock(file, path, Mode::Shared)
    }

    /// Open (creating if needed) for writing and take an exclusive lock.
    ///
    /// The existing content is left intact until [`LockedFile::replace`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the file cannot be opened and
    /// `StoreError::Lock` if the lock cannot be acquired.
    pub fn exclusive(path: &Path) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(false);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(crate::core::constants::FILE_MODE);
        }

        let file = options.open(path).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Self::lock(file, path, Mode::Exclusive)
    }

    fn lock(file: File, path: &Path, mode: Mode) -> Result<Self> {
        trace!(path = %path.display(), ?mode, "acquiring lock");
        sys::lock(&file, mode).map_err(|source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), ?mode, "lock acquired");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode,
        })
    }

    /// Read the whole file.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.file
            .read_to_end(&mut data)
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(data)
    }

    /// Replace the whole file content with `data`.
    pub fn replace(&mut self, data: &[u8]) -> Result<()> {
        debug_assert_eq!(self.mode, Mode::Exclusive);
        self.write_through(data).map_err(|source| {
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
            .into()
        })
    }

    fn write_through(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(data)?;
        self.file.sync_all()
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        // Unlock errors are not actionable; closing the descriptor releases it anyway.
        let _ = sys::unlock(&self.file);
        trace!(path = %self.path.display(), mode = ?self.mode, "lock released");
    }
}

/// Read a file under a shared lock.
pub fn read_locked(path: &Path) -> Result<Vec<u8>> {
    LockedFile::shared(path)?.read_all()
}

/// Replace a file's content under an exclusive lock.
pub fn write_locked(path: &Path, data: &[u8]) -> Result<()> {
    LockedFile::exclusive(path)?.replace(data)
}

mod sys {
    use std::fs::File;
    use std::io;

    use fs2::FileExt;

    use super::Mode;

    // Called through the trait so inherent `File` lock methods never shadow it.
    pub fn lock(file: &File, mode: Mode) -> io::Result<()> {
        match mode {
            Mode::Shared => FileExt::lock_shared(file),
            Mode::Exclusive => FileExt::lock_exclusive(file),
        }
    }

    pub fn unlock(file: &File) -> io::Result<()> {
        FileExt::unlock(file)
    }
}
