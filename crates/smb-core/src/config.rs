use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Per-build settings. Immutable once handed to `Builder::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Base URL for generated links (e.g. `https://example.com`).
    pub host: String,
    /// Directory the documents are written into. Must already exist.
    pub output_dir: PathBuf,
    /// Base name: index is `<filename>.xml`, chunks `<filename><N>.xml`.
    pub filename: String,
    /// Gzip every document into `<name>.xml.gz`.
    pub compress: bool,
    /// Promote progress lines to `info`. Never changes produced files.
    pub verbose: bool,
}

impl BuilderConfig {
    pub fn new(
        host: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            output_dir: output_dir.into(),
            filename: filename.into(),
            compress: false,
            verbose: false,
        }
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Search engine ping settings (optional `[ping]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingConfig {
    /// Extra ping URL templates; `%s` is replaced by the encoded index URL.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Also ping the built-in Google and Bing endpoints.
    #[serde(default = "default_true")]
    pub include_defaults: bool,
    /// Per-target timeout in seconds.
    #[serde(default = "default_ping_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_filename() -> String {
    "sitemap".to_string()
}

fn default_ping_timeout_secs() -> u64 {
    5
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            include_defaults: true,
            timeout_secs: default_ping_timeout_secs(),
        }
    }
}

impl PingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Global configuration loaded from `~/.config/smb/config.toml`.
/// Command-line flags override every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmbConfig {
    /// Default base URL for generated links.
    #[serde(default)]
    pub host: Option<String>,
    /// Default output directory (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Default base filename.
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Gzip documents by default.
    #[serde(default = "default_true")]
    pub compress: bool,
    #[serde(default)]
    pub ping: PingConfig,
}

impl Default for SmbConfig {
    fn default() -> Self {
        Self {
            host: None,
            output_dir: None,
            filename: default_filename(),
            compress: true,
            ping: PingConfig::default(),
        }
    }
}

impl SmbConfig {
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("smb")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SmbConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SmbConfig::default();
        let toml = default_cfg.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SmbConfig = toml::from_str(&data)?;
    Ok(cfg)
}
