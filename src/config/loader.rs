//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

const CONFIG_FILENAME: &str = "edushare.toml";

/// Load configuration from edushare.toml.
///
/// A missing config file is not an error: the client runs against the
/// default backend address with default settings.
pub fn load_config() -> Result<Config> {
    match find_config_file() {
        Some(path) => load_config_from_path(&path),
        None => Ok(Config::default()),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file: search upward from the current directory,
/// then fall back to the user config directory.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = env::current_dir() {
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("edushare").join(CONFIG_FILENAME);
    user_config.exists().then_some(user_config)
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# edushare configuration

[api]
# Base URL of the platform backend
base_url = "http://127.0.0.1:8000"
# Fixed request timeout in seconds (also applies to chunk uploads)
timeout_secs = 30

[upload]
# Chunk size in bytes. The server caps single chunks at 10485760 (10 MiB).
chunk_size = 5242880
default_subject = "uncategorized"
default_grade = "unspecified"

# [session]
# Override where the login session is stored
# file = "/home/me/.local/share/edushare/session.toml"

# Values support environment interpolation:
# base_url = "${EDUSHARE_API:-http://127.0.0.1:8000}"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("TEST_VAR", "hello");
        let content = "value = \"${TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: Config =
            toml::from_str(default_config_content()).expect("Failed to parse default config");
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.upload.chunk_size, 5242880);
    }
}
