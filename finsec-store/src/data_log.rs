//! Append-only data log.
//!
//! Every insert appends one line of the form
//! `[<timestamp>] Received Data: <value>` to the backing file. Lines are only
//! ever added at the end; nothing rewrites or reorders previously written
//! bytes. Rotation and read-back are out of scope — external log management
//! owns deletion.
//!
//! Thread-safe: a `Mutex<BufWriter>` keeps concurrent appends from
//! interleaving within a single line.

use finsec_core::clock;
use finsec_core::config::DataLogConfig;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Writer for the append-only data log file.
///
/// Opening the writer is the service's storage bootstrap: the parent
/// directory and the file are created if absent. Re-opening an existing log
/// is a no-op beyond acquiring the append handle.
pub struct DataLogWriter {
    path: PathBuf,
    inner: Mutex<BufWriter<File>>,
}

impl DataLogWriter {
    /// Open (or create) the data log, creating parent directories as needed.
    pub fn open(config: &DataLogConfig) -> io::Result<Self> {
        if let Some(parent) = config.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file_path)?;

        info!(path = %config.file_path.display(), "Data log opened");

        Ok(Self {
            path: config.file_path.clone(),
            inner: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append one `[<timestamp>] Received Data: <value>` line.
    ///
    /// Returns the timestamp that was written into the line. The full line is
    /// written and flushed under the lock, so appends from concurrent
    /// requests never interleave mid-line.
    pub fn append(&self, value: &str) -> io::Result<String> {
        let timestamp = clock::now_stamp();
        let line = format!("[{timestamp}] Received Data: {value}\n");

        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "data log lock poisoned"))?;
        writer.write_all(line.as_bytes())?;
        writer.flush()?;

        Ok(timestamp)
    }

    /// Path of the backing file, as reported in insert responses.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use std::sync::atomic::{AtomicU64, Ordering as AtomOrd};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let n = COUNTER.fetch_add(1, AtomOrd::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "finsec-data-log-test-{}-{}",
            std::process::id(),
            n,
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(path: PathBuf) -> DataLogConfig {
        DataLogConfig { file_path: path }
    }

    fn read_log(path: &Path) -> String {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn open_creates_file_and_parent_directories() {
        let dir = temp_dir();
        let path = dir.join("deep").join("nested").join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();
        assert!(path.exists());
        assert_eq!(writer.path(), path.as_path());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn open_twice_is_idempotent() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        {
            let writer = DataLogWriter::open(&config(path.clone())).unwrap();
            writer.append("first").unwrap();
        }
        // Second open must neither fail nor truncate.
        let _writer = DataLogWriter::open(&config(path.clone())).unwrap();
        assert!(read_log(&path).contains("Received Data: first"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_writes_single_formatted_line() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();
        writer.append("hello").unwrap();

        let content = read_log(&path);
        assert!(content.starts_with('['), "got: {content}");
        assert!(content.contains("] Received Data: hello"), "got: {content}");
        assert!(content.ends_with('\n'));
        assert_eq!(content.lines().count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_returns_the_written_timestamp() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();
        let timestamp = writer.append("payload").unwrap();

        let content = read_log(&path);
        assert_eq!(content, format!("[{timestamp}] Received Data: payload\n"));
        assert_eq!(timestamp.len(), 19);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn sequential_appends_preserve_order() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();
        for value in ["alpha", "beta", "gamma"] {
            writer.append(value).unwrap();
        }

        let content = read_log(&path);
        let values: Vec<&str> = content
            .lines()
            .map(|line| line.rsplit("Received Data: ").next().unwrap())
            .collect();
        assert_eq!(values, vec!["alpha", "beta", "gamma"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reopen_appends_rather_than_truncates() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        {
            let writer = DataLogWriter::open(&config(path.clone())).unwrap();
            writer.append("one").unwrap();
        }
        {
            let writer = DataLogWriter::open(&config(path.clone())).unwrap();
            writer.append("two").unwrap();
        }

        let content = read_log(&path);
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().next().unwrap().ends_with("Received Data: one"));
        assert!(content.lines().last().unwrap().ends_with("Received Data: two"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_fails_cleanly_when_lock_poisoned() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();

        // Poison the mutex by panicking while holding the guard.
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = writer.inner.lock().unwrap();
            panic!("poison");
        }));

        assert!(writer.append("never-written").is_err());
        // The failed append must not leave a partial line behind.
        assert_eq!(read_log(&path), "");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_accepts_arbitrary_text() {
        let dir = temp_dir();
        let path = dir.join("log.txt");
        let writer = DataLogWriter::open(&config(path.clone())).unwrap();
        writer.append("크레딧 {\"k\": [1]} — 100%").unwrap();

        let content = read_log(&path);
        assert!(content.contains("Received Data: 크레딧 {\"k\": [1]} — 100%"));

        let _ = fs::remove_dir_all(&dir);
    }
}
