//! HTML rendering of the download page.
//!
//! The page is plain markup: no script or stylesheet is referenced. Button
//! groups show the initial picker state and every binary gets a table row
//! classed with [`clean`]ed version, OS and architecture.

use super::Binary;
use crate::picker::{ButtonGroup, GroupKind, Selection, clean, rules};

/// Everything the page shows.
pub struct PageData<'a> {
    pub binaries: &'a [Binary],
    pub oses: &'a [String],
    pub arches: &'a [String],
    /// Release tags, newest first
    pub versions: &'a [String],
    /// Host the per-binary copy links point to
    pub link_host: &'a str,
    pub year: i32,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Initial picker state for the rendered page. Version buttons carry the tag
/// without its `v` prefix since the download URL adds it back.
pub fn initial_selection(data: &PageData<'_>) -> Selection {
    let versions: Vec<&str> = data
        .versions
        .iter()
        .map(|v| v.strip_prefix('v').unwrap_or(v))
        .collect();
    let oses: Vec<&str> = data.oses.iter().map(String::as_str).collect();
    let arches: Vec<&str> = data.arches.iter().map(String::as_str).collect();

    Selection::from_options(
        &[rules::CLIENT, rules::SERVER, rules::NODE],
        picker_oses(&oses).as_slice(),
        arches.as_slice(),
        versions.as_slice(),
    )
}

/// Picker OS buttons use `osx` where release paths say `darwin`.
fn picker_oses<'a>(oses: &[&'a str]) -> Vec<&'a str> {
    oses.iter()
        .map(|&os| if os == "darwin" { rules::OSX } else { os })
        .collect()
}

pub fn render_page(data: &PageData<'_>) -> String {
    let selection = initial_selection(data);
    let url = selection.download_url().unwrap_or_default();
    let mut html = String::new();

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Download Kubernetes</title>\n\
         </head>\n<body>\n<section class=\"section\">\n<div class=\"container\">\n\
         <h1 class=\"title\">Download Kubernetes</h1>\n",
    );

    for kind in GroupKind::ALL {
        render_group(&mut html, selection.group(kind));
    }

    html.push_str(&format!(
        "<div class=\"field has-addons\">\n\
         <div class=\"control is-expanded\"><input id=\"download-url\" class=\"input\" type=\"text\" readonly value=\"{url}\"></div>\n\
         <div class=\"control\"><a id=\"copy-url\" class=\"button\" title=\"Copy\"><span class=\"icon\" id=\"copy-icon\">&#128203;</span></a></div>\n\
         <div class=\"control\"><a id=\"download-link\" class=\"button is-primary\" href=\"{url}\">Download</a></div>\n\
         </div>\n",
        url = escape_html(&url)
    ));

    render_table(&mut html, data);

    html.push_str(&format!(
        "</div>\n</section>\n\
         <footer class=\"footer\"><div class=\"content has-text-centered\">&copy; {} The Kubernetes Authors</div></footer>\n\
         </body>\n</html>\n",
        data.year
    ));

    html
}

fn render_group(html: &mut String, group: &ButtonGroup) {
    let kind = group.kind();
    html.push_str(&format!(
        "<div class=\"buttons has-addons\" id=\"{}\">\n",
        kind.dataset_key()
    ));
    for option in group.options() {
        let class = if option.active {
            "button is-success"
        } else {
            "button"
        };
        let disabled = if option.enabled { "" } else { " disabled" };
        let id = escape_html(&option.id);
        html.push_str(&format!(
            "<button class=\"{}\" {}=\"{}\"{}>{}</button>\n",
            class,
            kind.data_attribute(),
            id,
            disabled,
            id
        ));
    }
    html.push_str("</div>\n");
}

fn render_table(html: &mut String, data: &PageData<'_>) {
    html.push_str(
        "<table class=\"table is-fullwidth is-striped\">\n<thead><tr>\
         <th>Version</th><th>Operating System</th><th>Architecture</th><th>Binary</th><th>Link</th>\
         </tr></thead>\n<tbody>\n",
    );

    for binary in data.binaries {
        let link = escape_html(&binary.link(data.link_host));
        html.push_str(&format!(
            "<tr class=\"{} {} {}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a class=\"copy\" href=\"https://{}\">{}</a></td></tr>\n",
            escape_html(&clean(&binary.version)),
            escape_html(&clean(&binary.operating_system)),
            escape_html(&clean(&binary.architecture)),
            escape_html(&binary.version),
            escape_html(&binary.operating_system),
            escape_html(&binary.architecture),
            escape_html(&binary.name),
            link,
            link
        ));
    }

    html.push_str("</tbody>\n</table>\n");
}
