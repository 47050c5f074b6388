//! CSS classes linking picker options to rows of the binaries table.
//!
//! Rows are classed from release paths (`v1.30.2`, `darwin`, `386`) while
//! buttons carry picker identifiers (`1.30.2`, `osx`, `386`). Both sides go
//! through [`clean`] so a button click can match the rows it selects.

use super::{GroupKind, os_transform};

/// Turn an identifier into something usable as a CSS class.
///
/// Dots become dashes (`v1.30.2` -> `v1-30-2`); identifiers starting with a
/// character that sorts before `a` get an `a-` prefix (`386` -> `a-386`).
pub fn clean(item: &str) -> String {
    if item.contains('.') {
        return item.replace('.', "-");
    }
    match item.chars().next() {
        Some(first) if first < 'a' => format!("a-{}", item),
        _ => item.to_string(),
    }
}

/// Row class matching the picker option `id` of `kind`.
///
/// The binary kind does not filter the table, so it has no row class.
pub fn row_class(kind: GroupKind, id: &str) -> Option<String> {
    match kind {
        GroupKind::Binaries => None,
        GroupKind::Os => Some(clean(os_transform(id))),
        GroupKind::Arch => Some(clean(id)),
        GroupKind::Version => {
            let tag = if id.starts_with('v') {
                id.to_string()
            } else {
                format!("v{}", id)
            };
            Some(clean(&tag))
        }
    }
}
