// src/logging.rs
// DOCUMENTATION: Logger initialization
// PURPOSE: env_logger with a size-capped rotating log file

use crate::config::Config;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Initialize the global logger
/// DOCUMENTATION: RUST_LOG takes precedence over the configured level.
/// An empty `log_file` sends output to stderr.
pub fn init(config: &Config) {
    let default_filter = if config.log_level.is_empty() {
        "info,actix_web=info"
    } else {
        config.log_level.as_str()
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} in {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if !config.log_file.is_empty() {
        let writer = RotatingFileWriter::new(
            &config.log_file,
            config.log_max_bytes,
            config.log_backup_count,
        );
        builder.target(Target::Pipe(Box::new(writer)));
    }

    builder.init();
}

/// Append-only log file rotated by size
/// DOCUMENTATION: The file is opened on first write. When a write would push the
/// file past `max_bytes`, `path` becomes `path.1`, `path.1` becomes `path.2` and so
/// on; files beyond `backup_count` are dropped. A `max_bytes` of 0 disables rotation.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: Option<File>,
    written: u64,
}

impl RotatingFileWriter {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64, backup_count: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes,
            backup_count,
            file: None,
            written: 0,
        }
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.written = file.metadata()?.len();
            self.file = Some(file);
        }

        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file not open"))
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        if self.backup_count == 0 {
            // Nothing to keep: start the file over
            File::create(&self.path)?;
        } else {
            for index in (1..self.backup_count).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            if self.path.exists() {
                fs::rename(&self.path, self.backup_path(1))?;
            }
        }

        self.written = 0;
        Ok(())
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0 && self.written > 0 && self.written + incoming as u64 > self.max_bytes
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?;
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }

        let written = self.open()?.write(buf)?;
        self.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}
