use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use crate::error::{GarageError, Result};

const STALE_AFTER: Duration = Duration::from_secs(30);
const RETRY_EVERY: Duration = Duration::from_millis(50);
const GIVE_UP_AFTER: Duration = Duration::from_secs(5);

/// Advisory lock held as a sibling `<file>.lock`; removed on drop.
#[derive(Debug)]
pub struct RecordLock {
    path: PathBuf,
}

impl RecordLock {
    pub fn acquire(file_path: &Path) -> Result<Self> {
        Self::acquire_within(file_path, GIVE_UP_AFTER)
    }

    fn acquire_within(file_path: &Path, timeout: Duration) -> Result<Self> {
        let path = lock_path(file_path);
        let deadline = Instant::now() + timeout;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if lock_age(&path).is_some_and(|age| age > STALE_AFTER) {
                        tracing::warn!(lock = %path.display(), "removing stale lock");
                        let _ = fs::remove_file(&path);
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(GarageError::LockTimeout(path.display().to_string()));
                    }
                    thread::sleep(RETRY_EVERY);
                }
                Err(e) => return Err(GarageError::Io(e)),
            }
        }
    }
}

impl Drop for RecordLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn lock_path(file_path: &Path) -> PathBuf {
    let mut p = file_path.as_os_str().to_owned();
    p.push(".lock");
    PathBuf::from(p)
}

fn lock_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO),
    )
}

/// Run `f` while holding the lock for `file_path`.
pub fn with_file_lock<T, F>(file_path: &Path, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let _lock = RecordLock::acquire(file_path)?;
    f()
}
