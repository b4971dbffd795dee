//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Chunked upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Chunk size in bytes. The server rejects chunks over 10 MiB.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    #[serde(default = "default_subject")]
    pub default_subject: String,

    #[serde(default = "default_grade")]
    pub default_grade: String,
}

fn default_chunk_size() -> u64 {
    5 * 1024 * 1024
}

fn default_subject() -> String {
    "uncategorized".to_string()
}

fn default_grade() -> String {
    "unspecified".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            default_subject: default_subject(),
            default_grade: default_grade(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Override the session file location. Defaults to
    /// `<data dir>/edushare/session.toml`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Maximum chunk size accepted by the backend per chunk upload
pub const MAX_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

impl Config {
    /// Effective chunk size, clamped to the server's per-chunk limit
    pub fn chunk_size(&self) -> u64 {
        self.upload.chunk_size.clamp(1, MAX_CHUNK_SIZE)
    }

    /// Resolve the session file path, honoring the config override
    pub fn session_file(&self) -> PathBuf {
        if let Some(path) = &self.session.file {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edushare")
            .join("session.toml")
    }
}
