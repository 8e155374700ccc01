//! Entity templates.
//!
//! Templates are never registered; levels spawn copies of them.
use std::collections::BTreeMap;

use game_core::{Entity, Glyph, Rgb};

pub fn player() -> Entity {
    Entity::actor("Player", Glyph::new('@', Rgb::WHITE), 30)
}

pub fn orc() -> Entity {
    Entity::actor("Orc", Glyph::new('o', Rgb(63, 127, 63)), 10)
}

pub fn troll() -> Entity {
    Entity::actor("Troll", Glyph::new('T', Rgb(0, 127, 0)), 16)
}

pub fn health_potion() -> Entity {
    Entity::item("Health Potion", Glyph::new('!', Rgb(127, 0, 255)))
}

/// Named templates a layout legend can refer to.
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Entity>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::empty()
            .with("orc", orc())
            .with("troll", troll())
            .with("health_potion", health_potion())
    }
}

impl TemplateCatalog {
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, template: Entity) -> Self {
        self.insert(name, template);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, template: Entity) {
        self.templates.insert(name.into(), template);
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}
