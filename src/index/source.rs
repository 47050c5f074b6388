use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::info;

use super::tag_to_semver;
use crate::http::HttpClient;

/// Default release bucket holding `stable.txt` markers and per-release listings.
pub const DEFAULT_BASE_URL: &str = "https://dl.k8s.io/release";

/// Where stable markers and checksum listings come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Contents of `stable.txt`.
    async fn latest_stable(&self) -> Result<String>;

    /// Contents of `stable-<major>.<minor>.txt`.
    async fn stable_for(&self, major: u64, minor: u64) -> Result<String>;

    /// Contents of `<version>/SHA256SUMS`.
    async fn sha256sums(&self, version: &str) -> Result<String>;
}

/// The release bucket served over HTTP.
pub struct Bucket {
    http: HttpClient,
    base_url: String,
}

impl Bucket {
    pub fn new(http: HttpClient, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReleaseSource for Bucket {
    #[tracing::instrument(skip(self))]
    async fn latest_stable(&self) -> Result<String> {
        let url = format!("{}/stable.txt", self.base_url);
        Ok(self.http.get_text(&url).await?.trim().to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn stable_for(&self, major: u64, minor: u64) -> Result<String> {
        let url = format!("{}/stable-{}.{}.txt", self.base_url, major, minor);
        info!("Getting previous stable from: {}", url);
        Ok(self.http.get_text(&url).await?.trim().to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn sha256sums(&self, version: &str) -> Result<String> {
        let url = format!("{}/{}/SHA256SUMS", self.base_url, version);
        self.http
            .get_text(&url)
            .await
            .with_context(|| format!("get SHA256SUMS from {:?}", url))
    }
}

/// The latest stable release followed by the stable release of each of the
/// `count - 1` preceding minor versions, newest first.
#[tracing::instrument(skip(source))]
pub async fn fetch_stable_versions<S: ReleaseSource + ?Sized>(
    source: &S,
    count: usize,
) -> Result<Vec<String>> {
    if count == 0 {
        bail!("At least one version must be requested");
    }

    let latest = source
        .latest_stable()
        .await
        .context("get latest stable version")?;
    info!("Got latest stable version: {}", latest);

    let mut current = tag_to_semver(&latest).context("convert latest stable version to semver")?;
    if current.major != 1 {
        bail!(
            "assuming that latest stable major version is 1, but it's {}",
            current.major
        );
    }

    let mut versions = vec![latest];
    for _ in 1..count {
        current.minor = current.minor.checked_sub(1).with_context(|| {
            format!("No minor version left before {}", versions.join(", "))
        })?;

        let previous = source
            .stable_for(current.major, current.minor)
            .await
            .context("unable to get previous stable")?;
        info!("Got version: {}", previous);
        versions.push(previous);
    }

    Ok(versions)
}
