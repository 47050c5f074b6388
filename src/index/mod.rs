//! Release index generation.
//!
//! Collects the binaries of the most recent stable releases from the release
//! bucket and writes the static download page plus a JSON description of the
//! same data.

mod binary;
mod render;
mod source;
mod sums;

use anyhow::{Context, Result};
use chrono::Datelike;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::picker::DOWNLOAD_HOST;
use crate::runtime::Runtime;

pub use binary::{Binary, all_arches, all_oses, sort_binaries, tag_to_semver};
pub use render::{PageData, escape_html, initial_selection, render_page};
pub use source::{Bucket, DEFAULT_BASE_URL, ReleaseSource, fetch_stable_versions};
pub use sums::{parse_sha256sums, should_include};

#[cfg(test)]
pub use source::MockReleaseSource;

/// Number of stable minor releases listed on the page.
pub const DEFAULT_VERSION_COUNT: usize = 4;

pub const DEFAULT_INDEX_OUTPUT: &str = "./dist/index.html";
pub const DEFAULT_BINARY_DETAILS: &str = "./dist/release_binaries.json";

/// Where the generated files go and how many releases they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    pub index_output: PathBuf,
    pub binary_details: PathBuf,
    pub version_count: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            index_output: PathBuf::from(DEFAULT_INDEX_OUTPUT),
            binary_details: PathBuf::from(DEFAULT_BINARY_DETAILS),
            version_count: DEFAULT_VERSION_COUNT,
        }
    }
}

/// Contents of the JSON data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryDetails {
    #[serde(rename = "Binaries")]
    pub binaries: Vec<Binary>,
    #[serde(rename = "AllOSes")]
    pub all_oses: Vec<String>,
    #[serde(rename = "AllVersions")]
    pub all_versions: Vec<String>,
    #[serde(rename = "AllArch")]
    pub all_arch: Vec<String>,
}

/// Gather the binaries of the latest `count` stable releases, sorted.
#[tracing::instrument(skip(source))]
pub async fn collect_binaries<S: ReleaseSource + ?Sized>(
    source: &S,
    count: usize,
) -> Result<BinaryDetails> {
    let versions = fetch_stable_versions(source, count).await?;

    let mut binaries = Vec::new();
    for version in &versions {
        let sums = source.sha256sums(version).await?;
        binaries.extend(parse_sha256sums(version, &sums));
    }
    let binaries = sort_binaries(binaries)?;

    Ok(BinaryDetails {
        all_oses: all_oses(&binaries),
        all_arch: all_arches(&binaries),
        all_versions: versions,
        binaries,
    })
}

/// Fetch, render and write both output files.
#[tracing::instrument(skip(runtime, source))]
pub async fn update_index<R: Runtime, S: ReleaseSource + ?Sized>(
    runtime: &R,
    source: &S,
    options: &IndexOptions,
) -> Result<BinaryDetails> {
    let details = collect_binaries(source, options.version_count).await?;
    info!(
        "Collected {} binaries across {} releases",
        details.binaries.len(),
        details.all_versions.len()
    );

    let html = render_page(&PageData {
        binaries: &details.binaries,
        oses: &details.all_oses,
        arches: &details.all_arch,
        versions: &details.all_versions,
        link_host: DOWNLOAD_HOST,
        year: chrono::Local::now().year(),
    });
    write_output(runtime, &options.index_output, html.as_bytes())
        .context("write output file")?;

    let json = serde_json::to_vec_pretty(&details).context("marshal JSON")?;
    write_output(runtime, &options.binary_details, &json).context("write data file")?;

    info!(
        "Wrote {} and {}",
        options.index_output.display(),
        options.binary_details.display()
    );
    Ok(details)
}

/// Write through a sibling temporary file so readers never see a partial page.
fn write_output<R: Runtime>(runtime: &R, path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !runtime.exists(parent) {
            runtime.create_dir_all(parent)?;
        }
    }

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    runtime.write(&temp, contents)?;
    runtime.rename(&temp, path)
}
