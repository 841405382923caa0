//! File locking and atomic writes for the tasks file
//!
//! Mutating commands hold a lock on `<tasks-file>.lock` for the whole
//! load-mutate-save window, so parallel invocations serialize instead of
//! overwriting each other's tasks. Saves go through a temp-file-plus-
//! rename so a crash mid-write cannot leave a torn tasks file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Default lock timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// How long to sleep between lock attempts while waiting
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Exclusive lock over a tasks file's `.lock` sibling; released on drop.
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire the lock, creating the lock file if needed.
    ///
    /// Keeps retrying until `timeout_ms` elapses; a lock still held by
    /// another process past the deadline fails with `Error::LockFailed`.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(err) if is_contended(&err) => {
                    if Instant::now() >= deadline {
                        return Err(Error::LockFailed(path.to_path_buf()));
                    }
                    std::thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(err) => return Err(Error::Io(err)),
            }
        }
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock errors cannot be surfaced from drop
        let _ = self.file.unlock();
    }
}

fn is_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    // Windows reports lock/sharing violations as raw OS errors rather
    // than WouldBlock
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Write `data` to `path` via a temp file and an atomic rename, so
/// readers see either the old contents or the new, never a partial
/// write.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Sibling of the target so the rename stays on one filesystem;
    // pid-suffixed so a stale temp from a crashed run is never picked up
    let temp_path = PathBuf::from(format!("{}.tmp.{}", path.display(), std::process::id()));

    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;
    Ok(())
}
