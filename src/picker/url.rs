/// Host serving the release tarballs.
pub const DOWNLOAD_HOST: &str = "https://dl.k8s.io";

/// Map a picker OS identifier to the name used in release artifacts.
pub fn os_transform(os: &str) -> &str {
    match os {
        "osx" => "darwin",
        other => other,
    }
}

/// Build the tarball URL for one combination of the four picker dimensions.
pub fn generate_url(binary_kind: &str, os: &str, arch: &str, version: &str) -> String {
    format!(
        "{}/v{}/kubernetes-{}-{}-{}.tar.gz",
        DOWNLOAD_HOST,
        version,
        binary_kind,
        os_transform(os),
        arch
    )
}
