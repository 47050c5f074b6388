//! Platform availability rules between the binary kind, architecture and OS groups.
//!
//! Both rules rewrite the OS group from the live value of the other dimension only,
//! so applying one twice with the same arguments is the same as applying it once.

use log::warn;

use super::ButtonGroup;

pub const CLIENT: &str = "client";
pub const SERVER: &str = "server";
pub const NODE: &str = "node";

pub const LINUX: &str = "linux";
pub const WINDOWS: &str = "windows";
pub const OSX: &str = "osx";

pub const AMD64: &str = "amd64";
pub const ARM64: &str = "arm64";

/// Re-derive the OS group after the binary kind changed.
pub fn apply_binary_constraint(os: &mut ButtonGroup, binary_kind: &str, current_arch: &str) {
    match binary_kind {
        CLIENT => {
            // client on arm64 keeps whatever the arch rule left behind
            if current_arch != ARM64 {
                os.enable_all();
            }
        }
        SERVER => linux_only(os),
        NODE => {
            os.activate(LINUX);
            os.disable(OSX);
            if current_arch != ARM64 {
                os.enable(WINDOWS);
            }
        }
        other => warn!("Unknown binary: {}", other),
    }
}

/// Re-derive the OS group after the architecture changed.
pub fn apply_arch_constraint(os: &mut ButtonGroup, arch: &str, current_binary_kind: &str) {
    match arch {
        ARM64 => linux_only(os),
        AMD64 if current_binary_kind == NODE => os.enable(WINDOWS),
        _ => {}
    }
}

fn linux_only(os: &mut ButtonGroup) {
    os.activate(LINUX);
    os.disable(WINDOWS);
    os.disable(OSX);
}
