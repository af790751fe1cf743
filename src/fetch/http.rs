//! GitHub-backed release client

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use super::{FetchError, ReleaseClient};

/// Release index entry for the newest Lucide release
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/lucide-icons/lucide/releases/latest";

/// Base URL of published release assets
pub const RELEASE_DOWNLOAD_BASE: &str = "https://github.com/lucide-icons/lucide/releases/download";

pub const USER_AGENT: &str = "lucide-svg-updater";

const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Blocking HTTP client for the Lucide GitHub releases
#[derive(Debug, Clone)]
pub struct HttpReleaseClient {
    client: Client,
    latest_url: String,
    download_base: String,
}

impl HttpReleaseClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(Self {
            client,
            latest_url: LATEST_RELEASE_URL.to_string(),
            download_base: RELEASE_DOWNLOAD_BASE.to_string(),
        })
    }

    /// Point the client at a mirror of the release index and assets
    pub fn with_endpoints(
        mut self,
        latest_url: impl Into<String>,
        download_base: impl Into<String>,
    ) -> Self {
        self.latest_url = latest_url.into();
        self.download_base = download_base.into();
        self
    }

    /// Asset URL for a tag; asset file names carry the version without `v`
    pub fn release_url(&self, tag: &str) -> String {
        format!(
            "{}/{}/lucide-icons-{}.zip",
            self.download_base.trim_end_matches('/'),
            tag,
            tag.trim_start_matches('v')
        )
    }

    fn get(&self, url: &str, accept: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        tracing::debug!(%url, "GET");
        let response = request
            .send()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl ReleaseClient for HttpReleaseClient {
    fn latest_tag(&self) -> Result<String, FetchError> {
        let body = self.get(&self.latest_url, Some(GITHUB_JSON))?;
        let release: LatestRelease = serde_json::from_slice(&body)?;
        release
            .tag_name
            .filter(|tag| !tag.is_empty())
            .ok_or(FetchError::MissingTag)
    }

    fn download_release(&self, tag: &str) -> Result<Vec<u8>, FetchError> {
        self.get(&self.release_url(tag), None)
    }
}
