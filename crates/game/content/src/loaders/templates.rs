use std::path::Path;

use anyhow::Context;
use game_core::Entity;

use crate::factories::TemplateCatalog;
use crate::loaders::{LoadResult, read_file};

/// Reads a [`TemplateCatalog`] from RON.
///
/// RON format: `Vec<(String, Entity)>`. Identity, owner and position are not
/// part of a template and are filled in on spawn. A later entry replaces an
/// earlier one with the same name.
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .with_context(|| format!("invalid template file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            templates = catalog.names().count(),
            "templates loaded"
        );
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<TemplateCatalog> {
        let entries: Vec<(String, Entity)> =
            ron::from_str(content).context("failed to parse template RON")?;
        let mut catalog = TemplateCatalog::empty();
        for (name, template) in entries {
            catalog.insert(name, template);
        }
        Ok(catalog)
    }
}
