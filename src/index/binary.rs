use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One released binary as listed in a `SHA256SUMS` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Binary {
    /// Release tag, e.g. `v1.30.2`
    pub version: String,
    pub operating_system: String,
    pub architecture: String,
    /// File name, e.g. `kubectl` or `kubectl.exe`
    pub name: String,
}

impl Binary {
    /// Download link without the scheme, as shown on the page.
    pub fn link(&self, host: &str) -> String {
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host)
            .trim_end_matches('/');
        format!(
            "{}/{}/bin/{}/{}/{}",
            host, self.version, self.operating_system, self.architecture, self.name
        )
    }

    pub fn semver(&self) -> Result<Version> {
        tag_to_semver(&self.version)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.version, self.operating_system, self.architecture
        )
    }
}

/// Parse a release tag such as `v1.30.2` into a semantic version.
pub fn tag_to_semver(tag: &str) -> Result<Version> {
    let trimmed = tag.trim();
    let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(raw).with_context(|| format!("Failed to parse tag {}", tag))
}

/// Newest release first; within a release by OS, architecture, then name.
pub fn sort_binaries(binaries: Vec<Binary>) -> Result<Vec<Binary>> {
    let mut keyed = binaries
        .into_iter()
        .map(|b| Ok((b.semver()?, b)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(va, a), (vb, b)| {
        (vb.major, vb.minor, vb.patch)
            .cmp(&(va.major, va.minor, va.patch))
            .then_with(|| a.operating_system.cmp(&b.operating_system))
            .then_with(|| a.architecture.cmp(&b.architecture))
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(keyed.into_iter().map(|(_, b)| b).collect())
}

/// Sorted, de-duplicated operating systems.
pub fn all_oses(binaries: &[Binary]) -> Vec<String> {
    unique(binaries.iter().map(|b| b.operating_system.as_str()))
}

/// Sorted, de-duplicated architectures.
pub fn all_arches(binaries: &[Binary]) -> Vec<String> {
    unique(binaries.iter().map(|b| b.architecture.as_str()))
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
