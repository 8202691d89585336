//! Runtime configuration: where tasks are stored and where logs go.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Directory under `$HOME` used when no storage path is given.
pub const DATA_DIR_NAME: &str = ".tarefas";
/// File name of the default storage file.
pub const STORAGE_FILE_NAME: &str = "storage.json";
/// File name of the TUI log, next to the storage file.
pub const LOG_FILE_NAME: &str = "tarefas.log";

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the storage location, creating its directory if needed.
    ///
    /// An explicit path (flag or `TAREFAS_STORAGE`) wins; otherwise
    /// `$HOME/.tarefas/storage.json`.
    pub fn resolve(storage: Option<PathBuf>) -> io::Result<Self> {
        let config = match storage {
            Some(path) => Self::for_storage_path(path),
            None => {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let data_dir = PathBuf::from(home).join(DATA_DIR_NAME);
                Config {
                    storage_path: data_dir.join(STORAGE_FILE_NAME),
                    data_dir,
                }
            }
        };
        std::fs::create_dir_all(&config.data_dir)?;
        debug!(storage = %config.storage_path.display(), "resolved configuration");
        Ok(config)
    }

    fn for_storage_path(path: PathBuf) -> Self {
        let data_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        Config {
            storage_path: path,
            data_dir,
        }
    }

    /// Log file used while the TUI owns the terminal.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}
