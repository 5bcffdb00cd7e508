use crate::api::models::ReleaseRecord;
use crate::error::{Result, SetupError};
use crate::user_agent;
use attohttpc::Session;
use log::{debug, trace};
use std::time::Duration;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REPOSITORY: &str = "opentofu/opentofu";
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) session: Session,
    pub(crate) base_url: String,
    pub(crate) repository: String,
}

impl ApiClient {
    /// Client for the public GitHub API. No timeout is set; callers that
    /// need one apply it with [`ApiClient::with_timeout`].
    pub fn new() -> Self {
        let mut session = Session::new();
        session.header("user-agent", user_agent::api_client());
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            base_url: GITHUB_API_BASE.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_repository(mut self, repository: String) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    pub fn releases_url(&self) -> String {
        format!("{}/repos/{}/releases", self.base_url, self.repository)
    }

    /// Fetch one page of releases, newest first as GitHub returns them.
    ///
    /// The bearer header is only attached for a non-empty token.
    pub fn list_releases(&self, token: Option<&str>) -> Result<Vec<ReleaseRecord>> {
        let url = self.releases_url();
        debug!("Fetching releases from {url}");

        let mut request = self
            .session
            .get(&url)
            .header("accept", ACCEPT_MEDIA_TYPE)
            .header("x-github-api-version", API_VERSION);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            trace!("Using bearer token for release listing");
            request = request.header("authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .map_err(|e| SetupError::UpstreamUnavailable {
                status: None,
                reason: format!("Network error connecting to {url}: {e}"),
            })?;

        let status = response.status();
        if !response.is_success() {
            debug!("Release listing returned HTTP {}", status.as_u16());
            return Err(SetupError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                reason: format!(
                    "HTTP {} {} from {url}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            });
        }

        let body = response
            .text()
            .map_err(|e| SetupError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                reason: format!("Failed to read response body: {e}"),
            })?;
        trace!("Release listing body is {} bytes", body.len());

        parse_releases(&body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn parse_releases(body: &str) -> Result<Vec<ReleaseRecord>> {
    serde_json::from_str::<Vec<ReleaseRecord>>(body).map_err(|e| {
        debug!("Failed to parse release listing: {e}");
        SetupError::MalformedRelease(format!("Failed to parse releases response: {e}"))
    })
}
