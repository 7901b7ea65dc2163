//! Rolling file logger
//!
//! Installs a `tracing` subscriber that writes to `<log_dir>/<app_name>.log`.
//! The file keeps only the most recent lines: a circular buffer mirrors
//! the file and the file is rewritten from it when the buffer wraps.
//! Records emitted through the `log` facade are forwarded as well.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Lines kept in the log file
pub const DEFAULT_CAPACITY: usize = 2000;

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| format!("Failed to create log dir {}: {}", log_dir.display(), e))?;
    let path = log_dir.join(format!("{}.log", app_name));
    let writer = RollingWriter::open(&path, DEFAULT_CAPACITY)
        .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;

    WRITER
        .set(writer.clone())
        .map_err(|_| "Logger already initialized".to_string())?;

    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| format!("Failed to install log subscriber: {}", e))
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Lines currently kept by the global logger, oldest first
pub fn recent_lines() -> Vec<String> {
    WRITER.get().map(RollingWriter::lines).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    match WRITER.get() {
        Some(_) => Ok(()),
        None => Err("Logger not initialized".to_string()),
    }
}

/// Timestamps in local time
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

struct Inner {
    path: PathBuf,
    file: File,
    lines: VecDeque<String>,
    /// Bytes after the last newline
    partial: String,
    capacity: usize,
}

impl Inner {
    fn push(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)?;
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.lines.push_back(line.trim_end_matches('\n').to_string());
        }
        // Rewrite in batches, not on every line past capacity
        if self.lines.len() > self.capacity + self.capacity / 4 {
            self.roll()?;
        }
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        for line in &self.lines {
            writeln!(file, "{}", line)?;
        }
        file.write_all(self.partial.as_bytes())?;
        self.file = file;
        Ok(())
    }
}

/// File writer backed by a bounded line buffer. Cheap to clone.
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    /// Open `path`, keeping the tail of any existing content
    pub fn open(path: &Path, capacity: usize) -> io::Result<Self> {
        let existing = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut inner = Inner {
            path: path.to_path_buf(),
            file,
            lines: existing.lines().map(str::to_string).collect(),
            partial: String::new(),
            capacity: capacity.max(1),
        };
        if inner.lines.len() > inner.capacity {
            inner.roll()?;
        }
        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
        })
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().push(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_keeps_recent_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RollingWriter::open(&path, 8).unwrap();

        for i in 0..40 {
            writeln!(writer, "line {}", i).unwrap();
        }

        let lines = writer.lines();
        assert!(lines.len() <= 10);
        assert_eq!(lines.last().map(String::as_str), Some("line 39"));

        let on_disk: Vec<String> = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(on_disk, lines);
    }

    #[test]
    fn test_partial_writes_join_into_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(&dir.path().join("app.log"), 8).unwrap();

        write!(writer, "hello ").unwrap();
        assert!(writer.lines().is_empty());
        writeln!(writer, "world").unwrap();

        assert_eq!(writer.lines(), vec!["hello world".to_string()]);
    }

    #[test]
    fn test_reopen_trims_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let content: String = (0..20).map(|i| format!("old {}\n", i)).collect();
        std::fs::write(&path, content).unwrap();

        let writer = RollingWriter::open(&path, 5).unwrap();

        assert_eq!(writer.lines().first().map(String::as_str), Some("old 15"));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_global_logger_lifecycle() {
        assert!(info("too early").is_err());

        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path().join("logs"), "Test").expect("first init succeeds");
        assert!(init_logger(dir.path().join("logs"), "Test").is_err());

        info("hello from info").unwrap();
        error("hello from error").unwrap();
        log::warn!("hello from log");

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("INFO") && l.contains("hello from info")));
        assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("hello from error")));
        assert!(lines.iter().any(|l| l.contains("hello from log")));

        let file = std::fs::read_to_string(dir.path().join("logs").join("Test.log")).unwrap();
        assert!(file.contains("hello from info"));
    }
}
