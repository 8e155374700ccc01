use std::path::Path;

use anyhow::Context;

use crate::layout::Layout;
use crate::loaders::{LoadResult, read_file};

/// Reads [`Layout`]s from RON.
///
/// ```ron
/// (
///     name: "cellar",
///     rows: [
///         "#####",
///         "#@.o#",
///         "#####",
///     ],
///     legend: { 'o': "orc" },
/// )
/// ```
pub struct LayoutLoader;

impl LayoutLoader {
    pub fn load(path: &Path) -> LoadResult<Layout> {
        let content = read_file(path)?;
        let layout = Self::parse(&content)
            .with_context(|| format!("invalid layout file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            name = %layout.name,
            width = layout.width(),
            height = layout.height(),
            "layout loaded"
        );
        Ok(layout)
    }

    pub fn parse(content: &str) -> LoadResult<Layout> {
        ron::from_str(content).context("failed to parse layout RON")
    }
}
