//! Cross-process lock guarding read-modify-write of the store file

use log::debug;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use crate::error::{Result, ZedError};

static LOCK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique per acquisition attempt, across threads and processes
fn unique_tag() -> String {
    format!(
        "{}.{}",
        std::process::id(),
        LOCK_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Held while a writer owns the store; removes the lock file on drop
pub(crate) struct StoreLock {
    path: PathBuf,
    owner: String,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Only remove the file if it is still ours
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim() == self.owner => {
                let _ = fs::remove_file(&self.path);
            }
            Ok(_) => debug!(
                "Store lock {} was taken over, leaving it in place",
                self.path.display()
            ),
            Err(_) => {}
        }
    }
}

impl StoreLock {
    /// Acquire the lock file at `path`, waiting up to `timeout`.
    /// Lock files older than `stale_after` are reclaimed.
    pub(crate) fn acquire(
        path: &Path,
        timeout: Duration,
        stale_after: Duration,
        retry: Duration,
    ) -> Result<StoreLock> {
        let start = Instant::now();

        loop {
            match OpenOptions::new().create_new(true).write(true).open(path) {
                Ok(mut file) => {
                    let owner = unique_tag();
                    if let Err(e) = writeln!(file, "{}", owner) {
                        let _ = fs::remove_file(path);
                        return Err(ZedError::Persistence(format!(
                            "Failed to write config lock {}: {}",
                            path.display(),
                            e
                        )));
                    }
                    debug!("Acquired store lock {}", path.display());
                    return Ok(StoreLock {
                        path: path.to_path_buf(),
                        owner,
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if reclaim_stale_lock(path, stale_after) {
                        debug!("Reclaimed stale store lock {}", path.display());
                        continue;
                    }
                    if start.elapsed() >= timeout {
                        return Err(ZedError::Persistence(format!(
                            "Timed out acquiring config lock {} (another zed process may be \
                             writing; remove the file if no other process is running)",
                            path.display()
                        )));
                    }
                    thread::sleep(retry);
                }
                Err(e) => {
                    return Err(ZedError::Persistence(format!(
                        "Failed to acquire config lock {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }
    }
}

fn is_stale(path: &Path, stale_after: Duration) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return false,
    };
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    age >= stale_after
}

/// Move a stale lock aside under a unique name, then delete it.
///
/// Only one waiter can win the rename. If the file we moved turns out to be
/// a fresh lock (a competing waiter reclaimed and re-created it in between),
/// it is linked back in place instead of being deleted.
fn reclaim_stale_lock(path: &Path, stale_after: Duration) -> bool {
    if !is_stale(path, stale_after) {
        return false;
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}.stale", unique_tag()));
    let claimed = PathBuf::from(name);

    if fs::rename(path, &claimed).is_err() {
        return false;
    }

    if is_stale(&claimed, stale_after) {
        let _ = fs::remove_file(&claimed);
        return true;
    }

    if fs::hard_link(&claimed, path).is_err() {
        debug!(
            "Could not restore live store lock {}; another writer holds it",
            path.display()
        );
    }
    let _ = fs::remove_file(&claimed);
    false
}
