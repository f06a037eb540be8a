// PeerLens - platform/config.rs
//
// Platform-specific configuration: data directory resolution and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::ClassificationRules;
use crate::util::constants;
use crate::util::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Platform paths
// =============================================================================

/// Resolved platform paths for PeerLens data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/peerlens/ or %APPDATA%\PeerLens\)
    pub config_dir: PathBuf,

    /// Data directory for exports, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// TOML deserialisation structures (raw input)
// =============================================================================

/// Raw config.toml structure. Every field is optional: compiled-in
/// defaults fill the gaps, and a missing file is not an error.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub router: RouterSection,

    #[serde(default)]
    pub classification: ClassificationSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct RouterSection {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ClassificationSection {
    pub reserved_ids: Option<Vec<u32>>,
    pub pool_capacity: Option<usize>,
    pub infrastructure_prefixes: Option<Vec<String>>,

    /// TOML table keys are strings; validated into integer tunnel-numbers
    /// at load time.
    pub static_overrides: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoggingSection {
    pub level: Option<String>,
}

// =============================================================================
// Validated runtime configuration
// =============================================================================

/// Router connection settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Base URL of the router REST API (no trailing slash required).
    /// None until supplied by config.toml or the CLI.
    pub base_url: Option<String>,

    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,

    /// Routers routinely present self-signed TLS certificates; this is an
    /// explicit opt-in, never a default.
    pub accept_invalid_certs: bool,
}

/// Fully validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub router: RouterConfig,
    pub rules: ClassificationRules,
    pub pool_capacity: usize,
    pub infrastructure_prefixes: Vec<String>,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig {
                base_url: None,
                username: None,
                password: None,
                timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
                accept_invalid_certs: false,
            },
            rules: ClassificationRules::default(),
            pool_capacity: constants::DEFAULT_POOL_CAPACITY,
            infrastructure_prefixes: constants::DEFAULT_INFRASTRUCTURE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_level: None,
        }
    }
}

/// Load and validate configuration from `path`.
///
/// A missing file yields the compiled-in defaults. A present file that
/// fails to parse or validate is an error — silently running with
/// half-applied settings would misclassify peers.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = validate(file)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Validate a parsed `ConfigFile` into an `AppConfig`.
///
/// Sections replace their defaults wholesale: a `[classification]` table
/// with `reserved_ids = []` genuinely empties the reserved set rather
/// than merging with the compiled-in one.
pub fn validate(file: ConfigFile) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    // [router]
    config.router.base_url = file.router.base_url.filter(|s| !s.is_empty());
    config.router.username = file.router.username;
    config.router.password = file.router.password;
    if let Some(secs) = file.router.timeout_secs {
        if !(constants::MIN_TIMEOUT_SECS..=constants::MAX_TIMEOUT_SECS).contains(&secs) {
            return Err(ConfigError::ValueOutOfRange {
                field: "router.timeout_secs".to_string(),
                value: secs.to_string(),
                expected: format!(
                    "{}..={}",
                    constants::MIN_TIMEOUT_SECS,
                    constants::MAX_TIMEOUT_SECS
                ),
            });
        }
        config.router.timeout_secs = secs;
    }
    if let Some(accept) = file.router.accept_invalid_certs {
        config.router.accept_invalid_certs = accept;
    }

    // [classification]
    if let Some(ids) = file.classification.reserved_ids {
        config.rules.reserved_ids = ids.into_iter().collect();
    }
    if let Some(capacity) = file.classification.pool_capacity {
        if !(constants::MIN_POOL_CAPACITY..=constants::MAX_POOL_CAPACITY).contains(&capacity) {
            return Err(ConfigError::ValueOutOfRange {
                field: "classification.pool_capacity".to_string(),
                value: capacity.to_string(),
                expected: format!(
                    "{}..={}",
                    constants::MIN_POOL_CAPACITY,
                    constants::MAX_POOL_CAPACITY
                ),
            });
        }
        config.pool_capacity = capacity;
    }
    if let Some(prefixes) = file.classification.infrastructure_prefixes {
        if prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValueOutOfRange {
                field: "classification.infrastructure_prefixes".to_string(),
                value: "(empty string)".to_string(),
                expected: "non-empty address prefixes".to_string(),
            });
        }
        config.infrastructure_prefixes = prefixes;
    }
    if let Some(overrides) = file.classification.static_overrides {
        let mut table = HashMap::with_capacity(overrides.len());
        for (key, address) in overrides {
            let id: u32 = key
                .parse()
                .map_err(|_| ConfigError::InvalidOverrideKey { key: key.clone() })?;
            table.insert(id, address);
        }
        config.rules.static_overrides = table;
    }

    // [logging]
    config.log_level = file.logging.level;

    Ok(config)
}
