// PeerLens - app/source.rs
//
// The peer data source boundary. The core pipeline treats fetching as an
// opaque request/response collaborator: it receives the full raw record
// sequence once per refresh cycle, never streams or paginates.
//
// Failures here are the application's only real error surface — the
// pipeline itself is total. A malformed or non-array response fails
// fast rather than being coerced into an empty list, since the source
// offers no recovery path for that case.

use crate::core::model::RawPeerRecord;
use crate::platform::config::RouterConfig;
use crate::util::constants;
use crate::util::error::SourceError;
use std::time::Duration;

/// Anything that can produce one full batch of raw peer records.
///
/// The trait seam keeps the refresh path testable without a router:
/// tests substitute an in-memory implementation.
pub trait PeerSource {
    /// Fetch the complete current peer list.
    fn fetch_peers(&self) -> Result<Vec<RawPeerRecord>, SourceError>;

    /// Human-readable origin for status messages ("https://…", "fixture").
    fn origin(&self) -> String;
}

// =============================================================================
// Router REST source
// =============================================================================

/// Fetches the peer collection from a router's REST API.
pub struct RouterRestSource {
    url: String,
    username: Option<String>,
    password: Option<String>,
    client: reqwest::blocking::Client,
}

impl RouterRestSource {
    /// Build a source from validated router settings.
    ///
    /// `base_url` must be present in `config` (the caller surfaces
    /// `ConfigError::MissingBaseUrl` before getting here).
    pub fn new(config: &RouterConfig, base_url: &str) -> Result<Self, SourceError> {
        let url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            constants::PEERS_REST_PATH
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SourceError::Request {
                url: url.clone(),
                source: e,
            })?;

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled for router requests");
        }

        Ok(Self {
            url,
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }
}

impl PeerSource for RouterRestSource {
    fn fetch_peers(&self) -> Result<Vec<RawPeerRecord>, SourceError> {
        tracing::debug!(url = %self.url, "Fetching peer list");

        let mut request = self.client.get(&self.url);
        if let Some(ref username) = self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().map_err(|e| SourceError::Request {
            url: self.url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| SourceError::Request {
            url: self.url.clone(),
            source: e,
        })?;

        parse_peer_body(&body, &self.url)
    }

    fn origin(&self) -> String {
        self.url.clone()
    }
}

/// Decode a response body into raw peer records.
///
/// Anything other than a JSON array of record objects is rejected.
pub fn parse_peer_body(body: &str, url: &str) -> Result<Vec<RawPeerRecord>, SourceError> {
    let records: Vec<RawPeerRecord> =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedResponse {
            url: url.to_string(),
            source: e,
        })?;

    if records.len() > constants::MAX_PEERS_PER_RESPONSE {
        return Err(SourceError::TooManyPeers {
            count: records.len(),
            max: constants::MAX_PEERS_PER_RESPONSE,
        });
    }

    tracing::debug!(count = records.len(), "Peer list decoded");
    Ok(records)
}
