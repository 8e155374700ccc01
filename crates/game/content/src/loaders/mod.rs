//! Loaders reading layouts and entity templates from RON files.
mod layout;
mod templates;

pub use layout::LayoutLoader;
pub use templates::TemplateLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
