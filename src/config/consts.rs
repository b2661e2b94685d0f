// src/config/consts.rs

// Local data layout
pub const DEFAULT_DATA_DIR: &str = "data";
pub const SERVERLESS_DATA_DIR: &str = "/tmp/data";
pub const UPLOADED_SUBDIR: &str = "uploaded";
pub const PROCESSED_SUBDIR: &str = "processed";
pub const LATEST_FILE: &str = "latest_data.csv";
pub const PROCESSED_PREFIX: &str = "processed_";
pub const LOG_FILE_NAME: &str = "debug.log";

// Environment (read only by AppConfig::detect)
pub const ENV_SERVERLESS_MARKER: &str = "TENCENTCLOUD_RUNENV";
pub const ENV_UPLOAD_PASSWORD: &str = "UPLOAD_PASSWORD";
pub const DEFAULT_UPLOAD_PASSWORD: &str = "admin";

// Uploads
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;
pub const HISTORY_LIMIT: usize = 15;

// Snapshot timestamp format
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
