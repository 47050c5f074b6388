use log::{info, warn};

use super::Binary;

/// Extract the downloadable binaries of one release from its `SHA256SUMS` listing.
///
/// Only `bin/<os>/<arch>/<name>` entries are kept, and of those only files
/// without an extension or ending in `.exe`.
pub fn parse_sha256sums(version: &str, sums: &str) -> Vec<Binary> {
    let mut binaries = Vec::new();

    for line in sums.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            warn!(
                "Skipping unknown SHA256SUMS line for version {}: {:?}",
                version, fields
            );
            continue;
        }

        let bin_path = fields[1];
        if !bin_path.starts_with("bin/") {
            continue;
        }

        let parts: Vec<&str> = bin_path.split('/').collect();
        if parts.len() < 4 {
            warn!("Skipping unknown bin path for version {}: {}", version, bin_path);
            continue;
        }

        let file = parts[parts.len() - 1];
        if !should_include(file) {
            info!("Excluding binary for version {}: {}", version, bin_path);
            continue;
        }

        binaries.push(Binary {
            version: version.to_string(),
            operating_system: parts[1].to_string(),
            architecture: parts[2].to_string(),
            name: parts[3].to_string(),
        });
    }

    binaries
}

/// Executables only: Windows `.exe` files and extension-less files.
pub fn should_include(file: &str) -> bool {
    file.ends_with(".exe") || !file.contains('.')
}
