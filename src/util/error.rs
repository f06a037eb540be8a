// PeerLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.
//
// The core pipeline itself is total and has no failure modes: missing
// fields become sentinels. The error surface lives at the boundaries —
// fetching from the router, loading configuration, writing exports.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PeerLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PeerLensError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Fetching or decoding the peer list failed.
    Source(SourceError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for PeerLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Source(e) => write!(f, "Peer source error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PeerLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// A static-override table key is not a valid tunnel-number.
    InvalidOverrideKey { key: String },

    /// The router base URL is missing or empty.
    MissingBaseUrl,

    /// I/O error reading the config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::InvalidOverrideKey { key } => write!(
                f,
                "Config '[classification.static_overrides]' key '{key}' is not \
                 an integer tunnel-number"
            ),
            Self::MissingBaseUrl => write!(
                f,
                "No router base URL configured. Set [router] base_url in \
                 config.toml or pass --url"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for PeerLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

/// Errors related to fetching the peer list from the router.
#[derive(Debug)]
pub enum SourceError {
    /// The HTTP request could not be completed (connection, TLS, timeout).
    Request { url: String, source: reqwest::Error },

    /// The router answered with a non-success status code.
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON array of peer records.
    /// Fail fast here: the source offers no recovery path for a malformed
    /// document, so it is never silently coerced into an empty list.
    MalformedResponse {
        url: String,
        source: serde_json::Error,
    },

    /// The response contained more records than the configured ceiling.
    TooManyPeers { count: usize, max: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { url, source } => {
                write!(f, "Request to '{url}' failed: {source}")
            }
            Self::Status { url, status } => {
                write!(f, "Router returned HTTP {status} for '{url}'")
            }
            Self::MalformedResponse { url, source } => {
                write!(
                    f,
                    "Response from '{url}' is not a peer record array: {source}"
                )
            }
            Self::TooManyPeers { count, max } => write!(
                f,
                "Response contained {count} peer records, exceeds maximum of {max}"
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::MalformedResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SourceError> for PeerLensError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum peer count.
    TooManyPeers { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyPeers { count, max } => write!(
                f,
                "Export of {count} peers exceeds maximum of {max}. \
                 Apply filters to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for PeerLensError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for PeerLens results.
pub type Result<T> = std::result::Result<T, PeerLensError>;
