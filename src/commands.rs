use anyhow::{Result, bail};
use log::{debug, info};
use std::net::SocketAddr;

use crate::http::HttpClient;
use crate::index::{Bucket, IndexOptions, update_index};
use crate::picker::{GroupKind, Selection, rules};
use crate::runtime::Runtime;
use crate::serve::{ServeState, serve};

/// Architectures offered by the picker in addition to the ones passed in.
pub const KNOWN_ARCHES: [&str; 6] = ["386", "amd64", "arm", "arm64", "ppc64le", "s390x"];

/// Regenerate the download page and data file once.
#[tracing::instrument(skip(runtime, base_url))]
pub async fn update_index_command<R: Runtime>(
    runtime: R,
    base_url: Option<String>,
    options: IndexOptions,
) -> Result<()> {
    let bucket = Bucket::new(HttpClient::with_default_client()?, base_url);
    info!("Updating index from {}", bucket.base_url());

    let details = update_index(&runtime, &bucket, &options).await?;
    println!(
        "Wrote {} binaries for {} to {}",
        details.binaries.len(),
        details.all_versions.join(", "),
        options.index_output.display()
    );
    Ok(())
}

/// Run the regeneration endpoint.
#[tracing::instrument(skip(runtime, base_url))]
pub async fn serve_command<R: Runtime + 'static>(
    runtime: R,
    addr: SocketAddr,
    base_url: Option<String>,
    options: IndexOptions,
) -> Result<()> {
    let bucket = Bucket::new(HttpClient::with_default_client()?, base_url);
    println!("Listening on {}", addr);
    serve(addr, ServeState::new(runtime, bucket, options)).await
}

/// Replay a picker session and return the resulting download URL.
///
/// Clicks happen in page order (binary, architecture, OS, version), so an OS
/// that the binary/architecture combination disables is reported as an error.
pub fn url_command(binary: &str, os: &str, arch: &str, version: &str) -> Result<String> {
    let os = if os == "darwin" { rules::OSX } else { os };
    let version = version.strip_prefix('v').unwrap_or(version);
    if version.is_empty() {
        bail!("Version must not be empty");
    }

    let mut arches: Vec<&str> = KNOWN_ARCHES.to_vec();
    if !arches.contains(&arch) {
        arches.push(arch);
    }

    let mut selection = Selection::from_options(
        &[rules::CLIENT, rules::SERVER, rules::NODE],
        &[rules::LINUX, rules::OSX, rules::WINDOWS],
        arches.as_slice(),
        &[version],
    );

    for (kind, id) in [
        (GroupKind::Binaries, binary),
        (GroupKind::Arch, arch),
        (GroupKind::Os, os),
        (GroupKind::Version, version),
    ] {
        if !selection.click(kind, id) {
            let group = selection.group(kind);
            if group.contains(id) {
                bail!(
                    "{} {} is not available for {} on {}",
                    kind,
                    id,
                    selection.get_active(GroupKind::Binaries).unwrap_or_default(),
                    selection.get_active(GroupKind::Arch).unwrap_or_default()
                );
            }
            let known: Vec<&str> = group.options().iter().map(|o| o.id.as_str()).collect();
            bail!("Unknown {} {}. Expected one of: {}", kind, id, known.join(", "));
        }
        debug!("Selected {} {}", kind, id);
    }

    match selection.download_url() {
        Some(url) => Ok(url),
        None => bail!("No download URL for the selected options"),
    }
}
