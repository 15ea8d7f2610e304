use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors that can occur while touching the local settings store.
#[derive(Debug)]
pub enum StoreError {
    /// Failed to read a stored blob from disk.
    Read {
        /// Path to the blob that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a blob to disk.
    Write {
        /// Path to the blob that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize a record before writing it.
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            StoreError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            StoreError::Serialize(source) => {
                write!(f, "Failed to serialize settings: {}", source)
            }
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::Read { source, .. } => Some(source),
            StoreError::Write { source, .. } => Some(source),
            StoreError::Serialize(source) => Some(source),
        }
    }
}

/// Flat key-value store over a directory of blobs, one file per key.
///
/// The Rust-native stand-in for the browser/device key-value settings cache:
/// no schema, no versioning beyond the suffix embedded in each key name.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Store rooted at the platform config directory.
    pub fn open_default() -> Self {
        let dir = ProjectDirs::from("dev", "contextiq", "contextiq")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    /// Store rooted at an explicit directory. Tests point this at a temp dir.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Directory the blobs live in.
    pub fn location(&self) -> &Path {
        &self.dir
    }

    /// Read the blob stored under `key`, or `None` if it was never written.
    pub fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StoreError::Read { path, source })
    }

    /// Write `contents` under `key` atomically (temp file then rename).
    pub fn write(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(&path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

/// Which client shape this process stores settings for.
///
/// The two variants keep distinct storage keys and distinct default shapes;
/// there is no migration between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Web,
    Mobile,
}

impl Variant {
    pub fn settings_key(self) -> &'static str {
        match self {
            Variant::Web => "contextiq_web_settings_v1",
            Variant::Mobile => "contextiq_settings_v1",
        }
    }
}

/// Storage key for the mobile client's standalone profile record.
pub const PROFILE_KEY: &str = "contextiq_profile_v1";

/// Storage key for the mobile client's color-scheme record.
pub const THEME_KEY: &str = "contextiq_theme_v1";

/// User-friendly display string for a store path (`~` notation on Unix).
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
