//! Rolling Logger
//!
//! File logger for desktop/CLI apps:
//! - writes to `<log_dir>/<app_name>.log`
//! - rotates the file once it grows past a size limit (`.1`, `.2`, ... backups)
//! - keeps the most recent lines in a circular buffer for in-app display
//!
//! `log` records are bridged into the `tracing` subscriber, so callers can use
//! either facade.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file reaches this many bytes
pub const DEFAULT_MAX_BYTES: u64 = 2 * 1024 * 1024;
/// Number of rotated backups kept next to the active file
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines kept in the in-memory buffer
pub const DEFAULT_RECENT_LINES: usize = 500;

static LOGGER: OnceLock<RollingFile> = OnceLock::new();

/// Initialize the global logger at `info` level
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with_level(log_dir, app_name, log::LevelFilter::Info)
}

/// Initialize the global logger with an explicit level
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with_level(
    log_dir: PathBuf,
    app_name: &str,
    level: log::LevelFilter,
) -> Result<(), String> {
    fs::create_dir_all(&log_dir)
        .map_err(|e| format!("Failed to create log dir {}: {}", log_dir.display(), e))?;

    let file = RollingFile::new(&log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES);

    tracing_subscriber::fmt()
        .with_writer(file.clone())
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_max_level(to_tracing_level(level))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    let _ = LOGGER.set(file);
    Ok(())
}

/// Log an info message
pub fn info(msg: &str) -> Result<(), String> {
    tracing::info!("{}", msg);
    Ok(())
}

/// Log an error message
pub fn error(msg: &str) -> Result<(), String> {
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingFile::recent_lines).unwrap_or_default()
}

fn to_tracing_level(level: log::LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    use tracing_subscriber::filter::LevelFilter;
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Timestamps in local time, millisecond precision
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

// ========================
// Rolling file + buffer
// ========================

/// Size-rotated log file shared between writer handles
#[derive(Clone)]
pub struct RollingFile {
    state: Arc<Mutex<RollingState>>,
}

struct RollingState {
    dir: PathBuf,
    base_name: String,
    max_bytes: u64,
    max_files: usize,
    file: Option<File>,
    written: u64,
    recent: VecDeque<String>,
    recent_capacity: usize,
    partial_line: String,
}

impl RollingFile {
    pub fn new(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> Self {
        let active = dir.join(format!("{}.log", app_name));
        let written = fs::metadata(&active).map(|m| m.len()).unwrap_or(0);
        Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: dir.to_path_buf(),
                base_name: app_name.to_string(),
                max_bytes,
                max_files,
                file: None,
                written,
                recent: VecDeque::new(),
                recent_capacity: DEFAULT_RECENT_LINES,
                partial_line: String::new(),
            })),
        }
    }

    /// Path of the file currently written to
    pub fn active_path(&self) -> PathBuf {
        match self.state.lock() {
            Ok(state) => state.active_path(),
            Err(poisoned) => poisoned.into_inner().active_path(),
        }
    }

    pub fn recent_lines(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl RollingState {
    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.base_name))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.base_name, index))
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.active_path())?;
            self.file = Some(file);
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }

    /// Move the active file to `.1`. A missing active file counts as rotated,
    /// so the next write starts a fresh one.
    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.written = 0;
        if self.max_files == 0 {
            return ignore_missing(fs::remove_file(self.active_path()));
        }
        for index in (1..self.max_files).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        ignore_missing(fs::rename(self.active_path(), self.backup_path(1)))
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial_line.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial_line.find('\n') {
            let line: String = self.partial_line.drain(..=pos).collect();
            self.recent.push_back(line.trim_end().to_string());
            if self.recent.len() > self.recent_capacity {
                self.recent.pop_front();
            }
        }
    }
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Writer handle handed out to the subscriber for each event
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingFile {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RollingWriter {
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_line(file: &RollingFile, line: &str) {
        let mut writer = file.make_writer();
        writer.write_all(line.as_bytes()).unwrap();
        writer.write_all(b"\n").unwrap();
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 1024, 2);

        write_line(&file, "hello");

        let content = fs::read_to_string(dir.path().join("App.log")).unwrap();
        assert_eq!(content, "hello\n");
        assert_eq!(file.active_path(), dir.path().join("App.log"));
    }

    #[test]
    fn test_rotates_past_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 16, 2);

        write_line(&file, "first line 1234");
        write_line(&file, "second line 123");
        write_line(&file, "third line 1234");

        assert_eq!(fs::read_to_string(dir.path().join("App.log")).unwrap(), "third line 1234\n");
        assert_eq!(fs::read_to_string(dir.path().join("App.log.1")).unwrap(), "second line 123\n");
        assert_eq!(fs::read_to_string(dir.path().join("App.log.2")).unwrap(), "first line 1234\n");
    }

    #[test]
    fn test_drops_oldest_backup() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 8, 1);

        write_line(&file, "aaaaaaa");
        write_line(&file, "bbbbbbb");
        write_line(&file, "ccccccc");

        assert!(!dir.path().join("App.log.2").exists());
        assert_eq!(fs::read_to_string(dir.path().join("App.log.1")).unwrap(), "bbbbbbb\n");
    }

    #[test]
    fn test_recovers_when_active_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 16, 2);

        write_line(&file, "first line 1234");
        fs::remove_file(dir.path().join("App.log")).unwrap();
        write_line(&file, "second line 123");
        write_line(&file, "third line 1234");

        assert_eq!(fs::read_to_string(dir.path().join("App.log")).unwrap(), "third line 1234\n");
        assert_eq!(fs::read_to_string(dir.path().join("App.log.1")).unwrap(), "second line 123\n");
        assert!(!dir.path().join("App.log.2").exists());
    }

    #[test]
    fn test_recovers_without_backups() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 8, 0);

        write_line(&file, "aaaaaaa");
        fs::remove_file(dir.path().join("App.log")).unwrap();
        write_line(&file, "bbbbbbb");

        assert_eq!(fs::read_to_string(dir.path().join("App.log")).unwrap(), "bbbbbbb\n");
    }

    #[test]
    fn test_global_logger() {
        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path().to_path_buf(), "Global").unwrap();
        // Only one global subscriber per process
        assert!(init_logger(dir.path().to_path_buf(), "Global").is_err());

        info("logger ready").unwrap();
        error("something failed").unwrap();

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("INFO") && l.contains("logger ready")));
        assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("something failed")));
        let content = fs::read_to_string(dir.path().join("Global.log")).unwrap();
        assert!(content.contains("logger ready"));
    }

    #[test]
    fn test_recent_lines_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", 1024, 2);

        let mut writer = file.make_writer();
        writer.write_all(b"one\ntw").unwrap();
        assert_eq!(file.recent_lines(), vec!["one".to_string()]);

        writer.write_all(b"o\n").unwrap();
        assert_eq!(file.recent_lines(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_recent_lines_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::new(dir.path(), "App", u64::MAX, 2);

        for i in 0..DEFAULT_RECENT_LINES + 10 {
            write_line(&file, &format!("line {}", i));
        }

        let lines = file.recent_lines();
        assert_eq!(lines.len(), DEFAULT_RECENT_LINES);
        assert_eq!(lines[0], "line 10");
    }
}
