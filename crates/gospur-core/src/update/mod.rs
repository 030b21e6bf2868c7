//! Self-update: fetch a release, pick the platform binary, swap it in
//!
//! The flow is a linear state machine:
//! `Idle -> FetchingRelease -> MatchingAsset -> Downloading -> Decompressing
//! -> Replacing -> Done`, with `Failed` reachable from every step. Only the
//! release fetch honors a deadline or cancellation.

pub mod archive;
pub mod asset;
pub mod release;
pub mod replace;
pub mod version;

use crate::error::{Error, Result};
use crate::product::ProductConfig;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

pub use archive::{extract_binary, ArchiveFormat};
pub use asset::{find_matching_binary, release_arch, release_os, Platform};
pub use release::{GitHubRelease, ReleaseAsset, ReleaseClient, FETCH_DEADLINE};
pub use replace::replace_executable;
pub use version::versions_match;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    FetchingRelease,
    MatchingAsset,
    Downloading,
    Decompressing,
    Replacing,
    Done,
    Failed,
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateState::Idle => "idle",
            UpdateState::FetchingRelease => "fetching release",
            UpdateState::MatchingAsset => "matching asset",
            UpdateState::Downloading => "downloading",
            UpdateState::Decompressing => "decompressing",
            UpdateState::Replacing => "replacing",
            UpdateState::Done => "done",
            UpdateState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of comparing the latest release with the running version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    UpToDate { version: String },
    Available(GitHubRelease),
}

/// What `install` put in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub version: String,
    pub asset: String,
    pub path: PathBuf,
}

/// Drives one update run
#[derive(Debug)]
pub struct Updater {
    client: ReleaseClient,
    current_version: String,
    binary_name: String,
    platform: Platform,
    target: PathBuf,
    state: UpdateState,
}

impl Updater {
    pub fn new(
        client: ReleaseClient,
        current_version: impl Into<String>,
        binary_name: impl Into<String>,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            current_version: current_version.into(),
            binary_name: binary_name.into(),
            platform: Platform::current(),
            target: target.into(),
            state: UpdateState::Idle,
        }
    }

    /// Updater for the running executable of `config`'s product
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let client = ReleaseClient::from_config(config)?;
        let target = std::env::current_exe().map_err(|e| Error::io("current executable", e))?;
        tracing::debug!(
            releases = %client.base_url(),
            target = %target.display(),
            "configured updater"
        );
        Ok(Self::new(
            client,
            config.version(),
            config.binary_name(),
            target,
        ))
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    fn transition(&mut self, next: UpdateState) {
        tracing::debug!(from = %self.state, to = %next, "update state");
        self.state = next;
    }

    fn fail<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.transition(UpdateState::Failed);
        }
        result
    }

    /// Fetch the release (latest unless `tag`) and compare it with the
    /// running version
    pub async fn check(&mut self, tag: Option<&str>, deadline: Duration) -> Result<UpdateCheck> {
        self.check_cancellable(tag, deadline, std::future::pending())
            .await
    }

    pub async fn check_cancellable<F>(
        &mut self,
        tag: Option<&str>,
        deadline: Duration,
        cancel: F,
    ) -> Result<UpdateCheck>
    where
        F: Future<Output = ()>,
    {
        self.transition(UpdateState::FetchingRelease);
        let fetched = self.client.fetch_cancellable(tag, deadline, cancel).await;
        let release = self.fail(fetched)?;

        if versions_match(&self.current_version, &release.version) {
            tracing::info!(version = %release.version, "already up to date");
            self.transition(UpdateState::Done);
            return Ok(UpdateCheck::UpToDate {
                version: release.version,
            });
        }

        tracing::info!(
            current = %self.current_version,
            release = %release.version,
            "update available"
        );
        Ok(UpdateCheck::Available(release))
    }

    /// The asset built for this platform
    pub fn select_asset<'r>(&mut self, release: &'r GitHubRelease) -> Result<&'r ReleaseAsset> {
        self.transition(UpdateState::MatchingAsset);
        let found = find_matching_binary(release.asset_names(), &self.platform, &self.binary_name)
            .and_then(|name| release.asset(name))
            .ok_or_else(|| Error::NoCompatibleBinary {
                os: self.platform.os.clone(),
                arch: self.platform.arch.clone(),
            });
        self.fail(found)
    }

    /// Download, unpack and swap in the binary from `release`
    pub async fn install(&mut self, release: &GitHubRelease) -> Result<UpdateOutcome> {
        let asset = self.select_asset(release)?;
        let format = ArchiveFormat::from_name(&asset.name);
        let format = self.fail(format)?;

        self.transition(UpdateState::Downloading);
        let downloaded = self.client.download(&asset.download_url).await;
        let bytes = self.fail(downloaded)?;
        tracing::debug!(asset = %asset.name, bytes = bytes.len(), "downloaded asset");

        self.transition(UpdateState::Decompressing);
        let file_name = self.platform.binary_file_name(&self.binary_name);
        let extracted = tokio::task::spawn_blocking(move || {
            extract_binary(format, &bytes, &file_name)
        })
        .await
        .unwrap_or_else(|e| {
            Err(Error::ArchiveCorrupt {
                archive: asset.name.clone(),
                reason: e.to_string(),
            })
        });
        let binary = self.fail(extracted)?;

        self.transition(UpdateState::Replacing);
        let target = self.target.clone();
        let replaced = tokio::task::spawn_blocking({
            let target = target.clone();
            move || replace_executable(&binary, &target)
        })
        .await
        .unwrap_or_else(|e| {
            Err(Error::ReplaceFailed {
                path: target.clone(),
                reason: e.to_string(),
            })
        });
        self.fail(replaced)?;

        self.transition(UpdateState::Done);
        tracing::info!(version = %release.version, path = %target.display(), "updated");

        Ok(UpdateOutcome {
            version: release.version.clone(),
            asset: asset.name.clone(),
            path: target,
        })
    }
}
