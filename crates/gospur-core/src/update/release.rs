//! Release metadata from the GitHub releases API

use crate::error::{Error, Result};
use crate::product::ProductConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Deadline for the release metadata request
pub const FETCH_DEADLINE: Duration = Duration::from_secs(2);

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubRelease {
    #[serde(rename = "tag_name")]
    pub version: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl GitHubRelease {
    pub fn asset_names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }

    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// HTTP client for the releases endpoint
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    base: Url,
    client: reqwest::Client,
}

impl ReleaseClient {
    /// Create a client with a custom user agent
    pub fn new(base: Url, user_agent: &str) -> Self {
        Self {
            base,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config, honoring the URL override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.release_url_env())
            .unwrap_or_else(|_| config.default_release_url().to_string());
        let base = Url::parse(&url_str).map_err(|e| Error::ReleaseRequest {
            url: url_str.clone(),
            reason: format!("invalid URL: {e}"),
        })?;
        Ok(Self::new(base, config.user_agent()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/latest`, or `<base>/tags/<tag>` for an explicit tag
    pub fn build_url(&self, tag: Option<&str>) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::ReleaseRequest {
                url: self.base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?;
            segments.pop_if_empty();
            match tag {
                Some(tag) if tag != "latest" => {
                    segments.push("tags").push(tag);
                }
                _ => {
                    segments.push("latest");
                }
            }
        }
        Ok(url)
    }

    /// Fetch release metadata, bounded by `deadline`
    pub async fn fetch(&self, tag: Option<&str>, deadline: Duration) -> Result<GitHubRelease> {
        self.fetch_cancellable(tag, deadline, std::future::pending())
            .await
    }

    /// Like [`fetch`](Self::fetch), but also gives up as soon as `cancel`
    /// completes. Expiry and cancellation both yield `RequestTimedOut`.
    pub async fn fetch_cancellable<F>(
        &self,
        tag: Option<&str>,
        deadline: Duration,
        cancel: F,
    ) -> Result<GitHubRelease>
    where
        F: Future<Output = ()>,
    {
        let url = self.build_url(tag)?;
        tracing::debug!(%url, "fetching release metadata");

        tokio::select! {
            biased;
            _ = cancel => Err(Error::RequestTimedOut),
            result = tokio::time::timeout(deadline, self.request(url, tag)) => {
                result.map_err(|_| Error::RequestTimedOut)?
            }
        }
    }

    async fn request(&self, url: Url, tag: Option<&str>) -> Result<GitHubRelease> {
        let request_failed = |reason: String| Error::ReleaseRequest {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::RequestTimedOut
                } else {
                    request_failed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::VersionNotFound(tag.unwrap_or("latest").to_string()));
        }
        if !status.is_success() {
            return Err(request_failed(format!("HTTP {status}")));
        }

        response
            .json::<GitHubRelease>()
            .await
            .map_err(|e| Error::MalformedRelease(e.to_string()))
    }

    /// Download an asset body. Not bounded by a deadline.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let request_failed = |reason: String| Error::ReleaseRequest {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(request_failed(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
