//! Log file sink for `--log-file`.
//!
//! Hooks run as short-lived processes, so every write is flushed and synced
//! before the lock is released.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// A thread-safe writer that flushes and syncs a shared log file on every write.
///
/// Cloning shares the underlying file.
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(Arc::new(Mutex::new(file))))
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file mutex was poisoned"))
    }
}

impl io::Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_writes_are_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/hookgate.log");

        let mut writer = FileWriterGuard::open(&path).unwrap();
        writer.write_all(b"first\n").unwrap();
        let mut clone = writer.clone();
        clone.write_all(b"second\n").unwrap();

        let mut reopened = FileWriterGuard::open(&path).unwrap();
        reopened.write_all(b"third\n").unwrap();
        reopened.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\nthird\n");
    }
}
