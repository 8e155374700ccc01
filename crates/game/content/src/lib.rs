//! Static game content: entity templates and fixed map layouts.
//!
//! - [`factories`] builds the entity templates every level draws from.
//! - [`layout`] turns an ASCII layout into a populated [`game_core::WorldMap`]
//!   through the [`game_core::LevelGenerator`] interface.
//! - [`loaders`] reads layouts and templates from RON files (feature `loaders`).
//!
//! Content is copied into the world on spawn and never referenced afterwards.
pub mod factories;
pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use factories::TemplateCatalog;
pub use layout::{Layout, LayoutError, LayoutGenerator};

#[cfg(feature = "loaders")]
pub use loaders::{LayoutLoader, TemplateLoader};
