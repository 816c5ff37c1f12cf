use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data_log: DataLogConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

/// Append-only data log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataLogConfig {
    /// Backing file; the parent directory is created on startup if absent.
    #[serde(default = "default_log_path")]
    pub file_path: PathBuf,
}

/// Static mount for well-known metadata files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:8000".into() }
fn default_log_path() -> PathBuf { PathBuf::from("data/log.txt") }
fn default_true() -> bool { true }
fn default_mount_path() -> String { "/.well-known".into() }
fn default_static_dir() -> PathBuf { PathBuf::from("static/.well-known") }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data_log: DataLogConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr() }
    }
}

impl Default for DataLogConfig {
    fn default() -> Self {
        Self { file_path: default_log_path() }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mount_path: default_mount_path(),
            dir: default_static_dir(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: ServiceConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("FINSEC_").split("_"))
            .extract()?;
        Ok(config)
    }
}
