use log::debug;
use serde::Serialize;

use super::rules::{self, AMD64, CLIENT, LINUX};
use super::{ButtonGroup, GroupKind, generate_url};

/// The page-wide picker state: one [`ButtonGroup`] per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    binaries: ButtonGroup,
    os: ButtonGroup,
    arch: ButtonGroup,
    version: ButtonGroup,
}

impl Selection {
    /// Build the selection from its four groups and bring the OS group in line
    /// with the initially active binary kind and architecture.
    pub fn new(
        binaries: ButtonGroup,
        os: ButtonGroup,
        arch: ButtonGroup,
        version: ButtonGroup,
    ) -> Self {
        let mut selection = Self {
            binaries,
            os,
            arch,
            version,
        };
        selection.reapply_binary_rule();
        selection.reapply_arch_rule();
        selection
    }

    /// Build a selection from plain option lists using the page defaults:
    /// `client`, `linux`, `amd64` and the first (newest) version.
    pub fn from_options<S: AsRef<str>>(
        binaries: &[S],
        oses: &[S],
        arches: &[S],
        versions: &[S],
    ) -> Self {
        let ids = |values: &[S]| -> Vec<String> {
            values.iter().map(|v| v.as_ref().to_string()).collect()
        };
        Self::new(
            ButtonGroup::new(GroupKind::Binaries, ids(binaries), Some(CLIENT)),
            ButtonGroup::new(GroupKind::Os, ids(oses), Some(LINUX)),
            ButtonGroup::new(GroupKind::Arch, ids(arches), Some(AMD64)),
            ButtonGroup::new(GroupKind::Version, ids(versions), None),
        )
    }

    pub fn group(&self, kind: GroupKind) -> &ButtonGroup {
        match kind {
            GroupKind::Binaries => &self.binaries,
            GroupKind::Os => &self.os,
            GroupKind::Arch => &self.arch,
            GroupKind::Version => &self.version,
        }
    }

    fn group_mut(&mut self, kind: GroupKind) -> &mut ButtonGroup {
        match kind {
            GroupKind::Binaries => &mut self.binaries,
            GroupKind::Os => &mut self.os,
            GroupKind::Arch => &mut self.arch,
            GroupKind::Version => &mut self.version,
        }
    }

    pub fn get_active(&self, kind: GroupKind) -> Option<&str> {
        self.group(kind).active()
    }

    /// Plain activation within one group; no rules are applied.
    pub fn activate(&mut self, kind: GroupKind, id: &str) -> bool {
        self.group_mut(kind).activate(id)
    }

    /// A user click on `id` in `kind`.
    ///
    /// Unknown and disabled options are ignored and `false` is returned. A binary
    /// or architecture click re-derives the OS group from the live value of the
    /// other dimension.
    pub fn click(&mut self, kind: GroupKind, id: &str) -> bool {
        let clickable = self.group(kind).option(id).is_some_and(|o| o.enabled);
        if !clickable {
            debug!("Ignoring click on {} option {:?}", kind, id);
            return false;
        }

        self.activate(kind, id);
        match kind {
            GroupKind::Binaries => self.reapply_binary_rule(),
            GroupKind::Arch => self.reapply_arch_rule(),
            GroupKind::Os | GroupKind::Version => {}
        }
        true
    }

    /// Download URL for the active options, if every group has one.
    pub fn download_url(&self) -> Option<String> {
        Some(generate_url(
            self.binaries.active()?,
            self.os.active()?,
            self.arch.active()?,
            self.version.active()?,
        ))
    }

    fn reapply_binary_rule(&mut self) {
        if let Some(binary) = self.binaries.active() {
            let arch = self.arch.active().unwrap_or_default();
            rules::apply_binary_constraint(&mut self.os, binary, arch);
        }
    }

    fn reapply_arch_rule(&mut self) {
        if let Some(arch) = self.arch.active() {
            let binary = self.binaries.active().unwrap_or_default();
            rules::apply_arch_constraint(&mut self.os, arch, binary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection::from_options(
            &["client", "node", "server"],
            &["linux", "osx", "windows"],
            &["386", "amd64", "arm", "arm64"],
            &["1.30.2", "1.29.6", "1.14.3"],
        )
    }

    #[test]
    fn test_defaults() {
        let s = selection();
        assert_eq!(s.get_active(GroupKind::Binaries), Some("client"));
        assert_eq!(s.get_active(GroupKind::Os), Some("linux"));
        assert_eq!(s.get_active(GroupKind::Arch), Some("amd64"));
        assert_eq!(s.get_active(GroupKind::Version), Some("1.30.2"));
        assert_eq!(
            s.download_url().unwrap(),
            "https://dl.k8s.io/v1.30.2/kubernetes-client-linux-amd64.tar.gz"
        );
    }

    #[test]
    fn test_initial_rules_applied() {
        let s = Selection::new(
            ButtonGroup::new(GroupKind::Binaries, ["client", "server"], Some("server")),
            ButtonGroup::new(GroupKind::Os, ["linux", "osx", "windows"], Some("osx")),
            ButtonGroup::new(GroupKind::Arch, ["amd64"], None),
            ButtonGroup::new(GroupKind::Version, ["1.30.2"], None),
        );

        assert_eq!(s.get_active(GroupKind::Os), Some("linux"));
        assert!(!s.group(GroupKind::Os).option("osx").unwrap().enabled);
    }

    #[test]
    fn test_client_osx_url() {
        let mut s = selection();
        assert!(s.click(GroupKind::Version, "1.14.3"));
        assert!(s.click(GroupKind::Os, "osx"));

        assert_eq!(
            s.download_url().unwrap(),
            "https://dl.k8s.io/v1.14.3/kubernetes-client-darwin-amd64.tar.gz"
        );
    }

    #[test]
    fn test_server_click_forces_linux() {
        let mut s = selection();
        s.click(GroupKind::Os, "windows");
        s.click(GroupKind::Binaries, "server");

        let os = s.group(GroupKind::Os);
        assert_eq!(os.active(), Some("linux"));
        assert!(!os.option("windows").unwrap().enabled);
        assert!(!os.option("osx").unwrap().enabled);
    }

    #[test]
    fn test_disabled_option_click_is_rejected() {
        let mut s = selection();
        s.click(GroupKind::Binaries, "server");
        let before = s.clone();

        assert!(!s.click(GroupKind::Os, "windows"));
        assert_eq!(s, before);
    }

    #[test]
    fn test_unknown_option_click_is_rejected() {
        let mut s = selection();
        let before = s.clone();

        assert!(!s.click(GroupKind::Arch, "s390x"));
        assert_eq!(s, before);
    }

    #[test]
    fn test_binary_rule_reads_live_arch() {
        let mut s = selection();
        s.click(GroupKind::Arch, "arm64");
        s.click(GroupKind::Binaries, "node");

        // arm64 is still selected, so windows must stay off
        assert!(!s.group(GroupKind::Os).option("windows").unwrap().enabled);

        s.click(GroupKind::Arch, "amd64");
        assert!(s.group(GroupKind::Os).option("windows").unwrap().enabled);
    }

    #[test]
    fn test_client_arm64_keeps_os_restricted() {
        let mut s = selection();
        s.click(GroupKind::Arch, "arm64");
        s.click(GroupKind::Binaries, "server");
        s.click(GroupKind::Binaries, "client");

        let os = s.group(GroupKind::Os);
        assert!(!os.option("windows").unwrap().enabled);
        assert!(!os.option("osx").unwrap().enabled);
    }

    #[test]
    fn test_amd64_click_leaves_osx_disabled_until_binary_click() {
        let mut s = selection();
        s.click(GroupKind::Arch, "arm64");
        s.click(GroupKind::Arch, "amd64");

        // the arch rule only re-enables windows for node
        assert!(!s.group(GroupKind::Os).option("osx").unwrap().enabled);

        s.click(GroupKind::Binaries, "client");
        assert!(s.group(GroupKind::Os).option("osx").unwrap().enabled);
    }

    #[test]
    fn test_download_url_none_for_empty_group() {
        let s = Selection::from_options(&["client"], &["linux"], &["amd64"], &[]);
        assert_eq!(s.download_url(), None);
    }
}
