//! Layered configuration for both the batch CLI and an eventual LSP
//! server (§7.2): defaults → `vdl.toml` → `VDL_`-prefixed environment
//! variables, via `figment`, matching the reference monorepo's
//! `mill-config`/`cb-core::config` convention.

pub mod logging;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Log output format, mirroring the reference monorepo's `LogFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Parsed by `tracing::Level::from_str`; invalid values fall back
    /// to `info` at init time rather than failing config load.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

/// The application's full layered configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub logging: LoggingConfig,
    /// The `.vdl` file analyzed when no entry path is given on the
    /// command line.
    pub entry_file: Option<PathBuf>,
    /// Base directory relative paths in config (not source files) are
    /// resolved against; defaults to the process working directory.
    pub workspace_root: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

impl AppConfig {
    /// Load configuration layering defaults, an optional `vdl.toml` in
    /// the current directory, and `VDL_`-prefixed environment
    /// variables (highest precedence), matching §7.1's RUST_LOG >
    /// LOG_FORMAT env > config file precedence for logging specifically.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::path::Path::new("vdl.toml"))
    }

    /// As [`Self::load`], but reading the TOML layer from an explicit
    /// path — used by tests and by a CLI flag that overrides the
    /// default `vdl.toml` location.
    pub fn load_from(toml_path: &std::path::Path) -> Result<Self, ConfigError> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed("VDL_").split("__"));

        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Mutex;

    // `std::env::set_var` is process-global; serialize tests that touch it so
    // they don't race with `defaults_apply_with_no_file_or_env`'s assumption
    // that no VDL_* vars are set.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_apply_with_no_file_or_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = AppConfig::load_from(std::path::Path::new("/nonexistent/vdl.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.entry_file.is_none());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "entryFile = \"main.vdl\"\n[logging]\nlevel = \"debug\"").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.entry_file, Some(PathBuf::from("main.vdl")));
    }

    #[test]
    fn env_var_overrides_toml_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();
        unsafe {
            std::env::set_var("VDL_LOGGING__LEVEL", "trace");
        }
        let config = AppConfig::load_from(file.path()).unwrap();
        unsafe {
            std::env::remove_var("VDL_LOGGING__LEVEL");
        }
        assert_eq!(config.logging.level, "trace");
    }
}
