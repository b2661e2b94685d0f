// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// On-disk layout rooted at one data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self { root: PathBuf::from(DEFAULT_DATA_DIR) }
    }
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }
    pub fn uploaded_dir(&self) -> PathBuf { self.root.join(UPLOADED_SUBDIR) }
    pub fn processed_dir(&self) -> PathBuf { self.root.join(PROCESSED_SUBDIR) }
    pub fn latest_file(&self) -> PathBuf { self.root.join(LATEST_FILE) }
    pub fn log_file(&self) -> PathBuf { self.root.join(LOG_FILE_NAME) }

    pub fn uploaded_file(&self, date: &str) -> PathBuf {
        self.uploaded_dir().join(join!(date, ".csv"))
    }

    pub fn processed_file(&self, date: &str) -> PathBuf {
        self.processed_dir().join(join!(PROCESSED_PREFIX, date, ".csv"))
    }
}

/// Everything the glue layers need. The pipeline itself takes none of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub paths: DataPaths,
    pub upload_password: String,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: DataPaths::default(),
            upload_password: s!(DEFAULT_UPLOAD_PASSWORD),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// The one place that reads the environment.
    /// Serverless runtime → writable /tmp root and password from the env.
    pub fn detect() -> Self {
        Self::from_env_vars(|k| std::env::var(k).ok())
    }

    /// `detect` with an injectable lookup, so tests don't touch the process env.
    pub fn from_env_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if get(ENV_SERVERLESS_MARKER).is_some() {
            Self {
                paths: DataPaths::new(SERVERLESS_DATA_DIR),
                upload_password: get(ENV_UPLOAD_PASSWORD)
                    .unwrap_or_else(|| s!(DEFAULT_UPLOAD_PASSWORD)),
                ..Self::default()
            }
        } else {
            Self::default()
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths = DataPaths::new(dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_defaults() {
        let cfg = AppConfig::from_env_vars(|_| None);
        assert_eq!(cfg.paths.root(), Path::new("data"));
        assert_eq!(cfg.upload_password, "admin");
        assert_eq!(cfg.paths.latest_file(), Path::new("data").join("latest_data.csv"));
    }

    #[test]
    fn serverless_uses_tmp_and_env_password() {
        let cfg = AppConfig::from_env_vars(|k| match k {
            "TENCENTCLOUD_RUNENV" => Some(s!("SCF")),
            "UPLOAD_PASSWORD" => Some(s!("s3cret")),
            _ => None,
        });
        assert_eq!(cfg.paths.root(), Path::new("/tmp/data"));
        assert_eq!(cfg.upload_password, "s3cret");
    }

    #[test]
    fn file_names_follow_date() {
        let p = DataPaths::new("root");
        assert_eq!(p.uploaded_file("2025-12-24"), Path::new("root/uploaded/2025-12-24.csv"));
        assert_eq!(p.processed_file("2025-12-24"), Path::new("root/processed/processed_2025-12-24.csv"));
    }
}
