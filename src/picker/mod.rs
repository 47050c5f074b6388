//! Download picker state.
//!
//! # Structure
//!
//! - `group` - button groups and their options
//! - `rules` - OS availability rules driven by binary kind and architecture
//! - `rows` - CSS classes tying options to rows of the binaries table
//! - `selection` - the four-group state and click transitions
//! - `url` - download URL generation

mod group;
mod rows;
pub mod rules;
mod selection;
mod url;

pub use group::{ButtonGroup, GroupKind, PickerOption};
pub use rows::{clean, row_class};
pub use rules::{apply_arch_constraint, apply_binary_constraint};
pub use selection::Selection;
pub use url::{DOWNLOAD_HOST, generate_url, os_transform};
