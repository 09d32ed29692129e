//! CLI-owned configuration: TOML file, environment overlay, and
//! translation to `larder_core::BackendConfig`.
//!
//! Core never sees these types -- it receives a pre-built `BackendConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use larder_core::{BackendConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

/// CLI-owned TOML configuration.
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Where the item backend lives.
    #[serde(default)]
    pub backend: BackendSection,

    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct BackendSection {
    /// Base URL, e.g. "http://localhost:3000/api".
    pub url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default)]
    pub color: ColorMode,
}

fn default_timeout() -> u64 {
    30
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path: `--config` / `LARDER_CONFIG`, else the
/// platform config directory.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    ProjectDirs::from("dev", "larder", "larder")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".larder.toml"))
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config: defaults, then the TOML file (if any), then
/// `LARDER_`-prefixed env vars with `__` as the section separator
/// (e.g. `LARDER_BACKEND__URL`).
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LARDER_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Resolution ───────────────────────────────────────────────────────

/// Translate the config file + global flags into a `BackendConfig`.
///
/// Flag (and flag env var) values take priority over the file.
pub fn resolve_backend(config: &Config, global: &GlobalOpts) -> Result<BackendConfig, CliError> {
    let url_str = global
        .url
        .as_deref()
        .or(config.backend.url.as_deref())
        .ok_or_else(|| CliError::NoBackend {
            path: config_path(global).display().to_string(),
        })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let tls = if global.insecure || config.backend.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.backend.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut backend = BackendConfig::new(url);
    backend.tls = tls;
    backend.timeout = Duration::from_secs(global.timeout.unwrap_or(config.backend.timeout));
    Ok(backend)
}

/// Output format: flag, then config default.
pub fn output_format(config: &Config, global: &GlobalOpts) -> OutputFormat {
    global.output.unwrap_or(config.defaults.output)
}

/// Color mode: flag, then config default.
pub fn color_mode(config: &Config, global: &GlobalOpts) -> ColorMode {
    global.color.unwrap_or(config.defaults.color)
}
