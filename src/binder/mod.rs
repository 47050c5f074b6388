//! Adapter between page events and the picker state.
//!
//! The [`Page`] trait is the only place that knows about the rendered markup:
//! button groups, the binaries table, the URL field, the download anchor, the
//! copy icon and the clipboard. [`Binder`] owns the single mutable [`Selection`] and translates
//! events into picker transitions, writing the derived state back to the page.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::time::Duration;

use crate::picker::{ButtonGroup, GroupKind, Selection, row_class};

/// How long the copy button shows the success icon before reverting.
pub const COPY_ICON_REVERT_DELAY: Duration = Duration::from_millis(2000);

/// Icon shown on the copy-URL button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyIcon {
    Copy,
    Success,
}

#[cfg_attr(test, mockall::automock)]
pub trait Page {
    /// Redraw the buttons of one group with their enabled/active flags.
    fn render_group(&self, group: &ButtonGroup);

    /// Show only the table rows carrying `class` as far as `kind` is concerned.
    ///
    /// Each kind hides rows with its own marker (`os-hide`, `architecture-hide`,
    /// `version-hide`), so a row is visible only when every filter keeps it.
    fn filter_rows(&self, kind: GroupKind, class: &str);

    /// Write the URL into the text field value and the download anchor's href.
    fn show_download_url(&self, url: &str);

    /// Current value of the URL text field.
    fn url_field_value(&self) -> String;

    /// Select the whole contents of the URL text field.
    fn select_url_field(&self);

    fn copy_to_clipboard(&self, text: &str) -> Result<()>;

    fn set_copy_icon(&self, icon: CopyIcon);

    /// Arrange for [`Binder::on_copy_icon_timeout`] to be called after `delay`.
    fn schedule_icon_revert(&self, delay: Duration);
}

pub struct Binder<P: Page> {
    page: P,
    selection: Selection,
}

impl<P: Page> Binder<P> {
    /// Take ownership of the page state and render it once.
    #[tracing::instrument(skip(page, selection))]
    pub fn attach(page: P, selection: Selection) -> Self {
        let binder = Self { page, selection };
        for kind in GroupKind::ALL {
            binder.page.render_group(binder.selection.group(kind));
        }
        binder.refresh_url();
        binder
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// A click on an option button of `kind`.
    pub fn on_option_click(&mut self, kind: GroupKind, id: &str) {
        if !self.selection.click(kind, id) {
            return;
        }

        self.page.render_group(self.selection.group(kind));
        self.filter_rows(kind);
        // the rules may have moved the active OS
        if matches!(kind, GroupKind::Binaries | GroupKind::Arch) {
            self.page.render_group(self.selection.group(GroupKind::Os));
            self.filter_rows(GroupKind::Os);
        }
        self.refresh_url();
    }

    /// A click on a button identified by its dataset attribute, e.g. `data-os="linux"`.
    pub fn on_dataset_click(&mut self, attribute: &str, value: &str) {
        match GroupKind::from_data_attribute(attribute) {
            Some(kind) => self.on_option_click(kind, value),
            None => warn!("Click on button with unknown attribute {}", attribute),
        }
    }

    pub fn on_url_focus(&self) {
        self.page.select_url_field();
    }

    /// Copy the URL field to the clipboard and flash the success icon.
    #[tracing::instrument(skip(self))]
    pub fn on_copy_url_click(&self) -> Result<()> {
        self.page.select_url_field();
        let url = self.page.url_field_value();
        self.page
            .copy_to_clipboard(&url)
            .context("Failed to copy download URL")?;

        self.page.set_copy_icon(CopyIcon::Success);
        self.page.schedule_icon_revert(COPY_ICON_REVERT_DELAY);
        Ok(())
    }

    pub fn on_copy_icon_timeout(&self) {
        self.page.set_copy_icon(CopyIcon::Copy);
    }

    /// A click on a generic `copy` link: copy its own href.
    #[tracing::instrument(skip(self))]
    pub fn on_copy_link_click(&self, href: &str) -> Result<()> {
        self.page
            .copy_to_clipboard(href)
            .with_context(|| format!("Failed to copy link {}", href))
    }

    fn filter_rows(&self, kind: GroupKind) {
        let class = self
            .selection
            .get_active(kind)
            .and_then(|id| row_class(kind, id));
        if let Some(class) = class {
            self.page.filter_rows(kind, &class);
        }
    }

    fn refresh_url(&self) {
        match self.selection.download_url() {
            Some(url) => {
                debug!("Download URL is now {}", url);
                self.page.show_download_url(&url);
            }
            None => warn!("Cannot build a download URL: a button group has no active option"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;
    use mockall::predicate::{always, eq};

    fn selection() -> Selection {
        Selection::from_options(
            &["client", "node", "server"],
            &["linux", "osx", "windows"],
            &["amd64", "arm64"],
            &["1.30.2", "1.14.3"],
        )
    }

    /// A page that accepts renders and URL writes without checking them.
    fn lenient_page() -> MockPage {
        let mut page = MockPage::new();
        page.expect_render_group().returning(|_| ());
        page.expect_filter_rows().returning(|_, _| ());
        page.expect_show_download_url().returning(|_| ());
        page
    }

    #[test]
    fn test_attach_renders_all_groups_and_url() {
        let mut page = MockPage::new();
        page.expect_render_group().times(4).returning(|_| ());
        page.expect_show_download_url()
            .with(eq("https://dl.k8s.io/v1.30.2/kubernetes-client-linux-amd64.tar.gz"))
            .times(1)
            .returning(|_| ());

        Binder::attach(page, selection());
    }

    #[test]
    fn test_binary_click_rerenders_os_group_and_url() {
        let mut page = MockPage::new();
        page.expect_render_group().times(4).returning(|_| ());
        page.expect_show_download_url().times(1).returning(|_| ());
        let mut binder = Binder::attach(page, selection());
        binder.page.checkpoint();

        binder
            .page
            .expect_render_group()
            .withf(|g| g.kind() == GroupKind::Binaries)
            .times(1)
            .returning(|_| ());
        binder
            .page
            .expect_render_group()
            .withf(|g| {
                g.kind() == GroupKind::Os
                    && g.active() == Some("linux")
                    && !g.option("windows").unwrap().enabled
            })
            .times(1)
            .returning(|_| ());
        binder
            .page
            .expect_filter_rows()
            .with(eq(GroupKind::Os), eq("linux"))
            .times(1)
            .returning(|_, _| ());
        binder
            .page
            .expect_show_download_url()
            .with(eq("https://dl.k8s.io/v1.30.2/kubernetes-server-linux-amd64.tar.gz"))
            .times(1)
            .returning(|_| ());

        binder.on_option_click(GroupKind::Binaries, "server");
    }

    #[test]
    fn test_version_click_refreshes_url_only() {
        let mut binder = Binder::attach(lenient_page(), selection());
        binder.page.checkpoint();

        binder
            .page
            .expect_render_group()
            .withf(|g| g.kind() == GroupKind::Version)
            .times(1)
            .returning(|_| ());
        binder
            .page
            .expect_filter_rows()
            .with(eq(GroupKind::Version), eq("v1-14-3"))
            .times(1)
            .returning(|_, _| ());
        binder
            .page
            .expect_show_download_url()
            .with(eq("https://dl.k8s.io/v1.14.3/kubernetes-client-linux-amd64.tar.gz"))
            .times(1)
            .returning(|_| ());

        binder.on_option_click(GroupKind::Version, "1.14.3");
    }

    #[test]
    fn test_os_and_arch_clicks_filter_rows_by_release_names() {
        let mut binder = Binder::attach(lenient_page(), selection());
        binder.page.checkpoint();

        let mut seq = Sequence::new();
        binder.page.expect_render_group().returning(|_| ());
        binder.page.expect_show_download_url().returning(|_| ());
        binder
            .page
            .expect_filter_rows()
            .with(eq(GroupKind::Os), eq("darwin"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        binder
            .page
            .expect_filter_rows()
            .with(eq(GroupKind::Arch), eq("arm64"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        // arm64 forces linux
        binder
            .page
            .expect_filter_rows()
            .with(eq(GroupKind::Os), eq("linux"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        binder.on_option_click(GroupKind::Os, "osx");
        binder.on_option_click(GroupKind::Arch, "arm64");
    }

    #[test]
    fn test_dataset_click() {
        let mut binder = Binder::attach(lenient_page(), selection());
        binder.on_dataset_click("data-os", "osx");
        binder.on_dataset_click("data-architecture", "amd64");

        assert_eq!(binder.selection().get_active(GroupKind::Os), Some("osx"));
        assert_eq!(
            binder.selection().download_url().unwrap(),
            "https://dl.k8s.io/v1.30.2/kubernetes-client-darwin-amd64.tar.gz"
        );
    }

    #[test]
    fn test_rejected_click_touches_nothing() {
        let mut binder = Binder::attach(lenient_page(), selection());
        binder.on_option_click(GroupKind::Binaries, "server");
        binder.page.checkpoint();

        // strict mock: any page call would panic
        binder.on_option_click(GroupKind::Os, "windows");
        binder.on_dataset_click("data-colour", "red");

        assert_eq!(binder.selection().get_active(GroupKind::Os), Some("linux"));
    }

    #[test]
    fn test_url_focus_selects_field() {
        let mut page = lenient_page();
        page.expect_select_url_field().times(1).returning(|| ());

        let binder = Binder::attach(page, selection());
        binder.on_url_focus();
    }

    #[test]
    fn test_copy_url_flashes_success_icon() {
        let mut seq = Sequence::new();
        let mut page = lenient_page();
        page.expect_select_url_field().returning(|| ());
        page.expect_url_field_value()
            .returning(|| "https://dl.k8s.io/v1.30.2/kubernetes-client-linux-amd64.tar.gz".into());
        page.expect_copy_to_clipboard()
            .with(eq("https://dl.k8s.io/v1.30.2/kubernetes-client-linux-amd64.tar.gz"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        page.expect_set_copy_icon()
            .with(eq(CopyIcon::Success))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());
        page.expect_schedule_icon_revert()
            .with(eq(COPY_ICON_REVERT_DELAY))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());
        page.expect_set_copy_icon()
            .with(eq(CopyIcon::Copy))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());

        let binder = Binder::attach(page, selection());
        binder.on_copy_url_click().unwrap();
        binder.on_copy_icon_timeout();
    }

    #[test]
    fn test_copy_url_failure_keeps_icon() {
        let mut page = lenient_page();
        page.expect_select_url_field().returning(|| ());
        page.expect_url_field_value().returning(String::new);
        page.expect_copy_to_clipboard()
            .returning(|_| Err(anyhow::anyhow!("clipboard unavailable")));

        let binder = Binder::attach(page, selection());
        let err = binder.on_copy_url_click().unwrap_err();
        assert!(err.to_string().contains("Failed to copy download URL"));
    }

    #[test]
    fn test_copy_link_copies_href() {
        let href = "dl.k8s.io/release/v1.30.2/bin/linux/amd64/kubectl";
        let mut page = lenient_page();
        page.expect_copy_to_clipboard()
            .with(eq(href))
            .times(1)
            .returning(|_| Ok(()));
        page.expect_set_copy_icon().with(always()).never();

        let binder = Binder::attach(page, selection());
        binder.on_copy_link_click(href).unwrap();
    }
}
