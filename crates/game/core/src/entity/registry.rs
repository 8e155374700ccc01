use crate::state::{EntityId, MapId, Position};

use super::{Actor, Entity};

/// Entities located on one map, in insertion order.
///
/// Insertion order is the tie-break for every "first entity at" query, so
/// lookups are deterministic across calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRegistry {
    map: MapId,
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new(map: MapId) -> Self {
        Self {
            map,
            entities: Vec::new(),
        }
    }

    /// Map handle stamped onto every inserted entity.
    pub fn map_id(&self) -> MapId {
        self.map
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|entity| entity.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Appends an entity and points its back-reference at this map.
    ///
    /// Identities are allocated by [`crate::World`], which never hands the
    /// same one out twice.
    pub(crate) fn insert(&mut self, mut entity: Entity) -> EntityId {
        debug_assert!(entity.id.is_assigned(), "inserted entity has no identity");
        debug_assert!(!self.contains(entity.id), "entity {} inserted twice", entity.id);
        entity.owner = Some(self.map);
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Removes an entity by identity and clears its back-reference.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        let mut entity = self.entities.remove(index);
        entity.owner = None;
        Some(entity)
    }

    /// Inserts an independent copy of `template` at `position` under `id`.
    ///
    /// The copy shares nothing with the template; mutating one never affects
    /// the other.
    pub(crate) fn spawn(&mut self, template: &Entity, position: Position, id: EntityId) -> &Entity {
        let mut clone = template.clone();
        clone.id = id;
        clone.position = position;
        self.insert(clone);
        &self.entities[self.entities.len() - 1]
    }

    /// Moves an entity within this map. Returns false if it is not here.
    pub(crate) fn set_position(&mut self, id: EntityId, position: Position) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    /// Entities at `position`, in insertion order.
    pub fn entities_at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.position == position)
    }

    /// First entity at `position` that blocks movement.
    pub fn blocking_entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities_at(position)
            .find(|entity| entity.blocks_movement)
    }

    /// First living actor at `position`.
    pub fn actor_at(&self, position: Position) -> Option<Actor<'_>> {
        self.living_actors()
            .find(|actor| actor.position == position)
    }

    /// Actors whose alive predicate holds, in insertion order.
    pub fn living_actors(&self) -> impl Iterator<Item = Actor<'_>> {
        self.entities
            .iter()
            .filter_map(Entity::as_actor)
            .filter(Actor::is_alive)
    }

    /// Entities sorted ascending by render order; ties keep insertion order.
    pub fn render_sequence(&self) -> Vec<&Entity> {
        let mut sequence: Vec<&Entity> = self.entities.iter().collect();
        sequence.sort_by_key(|entity| entity.render_order);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Glyph, RenderOrder};
    use crate::map::Rgb;

    const MAP: MapId = MapId(1);

    fn troll() -> Entity {
        Entity::actor("Troll", Glyph::new('T', Rgb(0, 127, 0)), 16)
    }

    fn potion() -> Entity {
        Entity::item("Potion", Glyph::new('!', Rgb(127, 0, 255)))
    }

    #[test]
    fn insert_stamps_owner_and_remove_clears_it() {
        let mut registry = EntityRegistry::new(MAP);
        let id = registry.spawn(&troll(), Position::new(2, 2), EntityId(4)).id();
        assert_eq!(registry.get(id).and_then(Entity::owner), Some(MAP));

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.owner(), None);
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn spawn_copies_template_with_fresh_identity() {
        let mut registry = EntityRegistry::new(MAP);
        let template = troll();
        let spawned = registry.spawn(&template, Position::new(5, 6), EntityId(9)).clone();

        assert_eq!(spawned.id(), EntityId(9));
        assert_eq!(spawned.position(), Position::new(5, 6));
        assert_eq!(spawned.name, template.name);
        assert_eq!(spawned.glyph, template.glyph);
        assert_eq!(spawned.kind, template.kind);
        assert_eq!(template.owner(), None);
        assert!(!template.id().is_assigned());
    }

    #[test]
    fn mutating_spawned_state_leaves_template_intact() {
        let mut registry = EntityRegistry::new(MAP);
        let template = troll();
        let id = registry.spawn(&template, Position::new(1, 1), EntityId(1)).id();

        let state = registry.get_mut(id).and_then(Entity::actor_state_mut).unwrap();
        state.take_damage(16);

        assert!(!registry.get(id).unwrap().is_alive());
        assert!(template.is_alive());
        assert_eq!(template.actor_state().unwrap().hp.current, 16);
    }

    #[test]
    fn blocking_entity_prefers_blocker_over_earlier_non_blocker() {
        let mut registry = EntityRegistry::new(MAP);
        let cell = Position::new(3, 3);
        registry.spawn(&potion(), cell, EntityId(1));
        let blocker = registry.spawn(&troll(), cell, EntityId(2)).id();

        assert_eq!(
            registry.blocking_entity_at(cell).map(Entity::id),
            Some(blocker)
        );
        assert!(registry.blocking_entity_at(Position::new(4, 3)).is_none());
    }

    #[test]
    fn blocking_tie_break_is_insertion_order() {
        let mut registry = EntityRegistry::new(MAP);
        let cell = Position::new(0, 0);
        registry.spawn(&troll(), cell, EntityId(7));
        registry.spawn(&troll(), cell, EntityId(3));
        assert_eq!(
            registry.blocking_entity_at(cell).map(Entity::id),
            Some(EntityId(7))
        );
    }

    #[test]
    fn actor_at_skips_dead_actors_and_items() {
        let mut registry = EntityRegistry::new(MAP);
        let cell = Position::new(8, 1);
        registry.spawn(&potion(), cell, EntityId(1));
        let dead = registry.spawn(&troll(), cell, EntityId(2)).id();
        registry
            .get_mut(dead)
            .and_then(Entity::actor_state_mut)
            .unwrap()
            .take_damage(100);
        assert!(registry.actor_at(cell).is_none());

        let alive = registry.spawn(&troll(), cell, EntityId(3)).id();
        assert_eq!(registry.actor_at(cell).map(|actor| actor.id()), Some(alive));
    }

    #[test]
    fn living_actors_filters_by_alive_predicate() {
        let mut registry = EntityRegistry::new(MAP);
        registry.spawn(&troll(), Position::new(0, 0), EntityId(1));
        registry.spawn(&potion(), Position::new(1, 0), EntityId(2));
        let dead = registry.spawn(&troll(), Position::new(2, 0), EntityId(3)).id();
        registry
            .get_mut(dead)
            .and_then(Entity::actor_state_mut)
            .unwrap()
            .take_damage(16);

        let ids: Vec<_> = registry.living_actors().map(|actor| actor.id()).collect();
        assert_eq!(ids, vec![EntityId(1)]);
    }

    #[test]
    fn render_sequence_is_stable_ascending() {
        let mut registry = EntityRegistry::new(MAP);
        registry.spawn(&troll(), Position::new(0, 0), EntityId(1));
        registry.spawn(&potion(), Position::new(0, 0), EntityId(2));
        registry.spawn(
            &potion().with_render_order(RenderOrder::Corpse),
            Position::new(0, 0),
            EntityId(3),
        );
        registry.spawn(&potion(), Position::new(0, 0), EntityId(4));

        let order: Vec<_> = registry.render_sequence().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![EntityId(3), EntityId(2), EntityId(4), EntityId(1)]);
    }

    #[test]
    fn insert_appends_in_order() {
        let mut registry = EntityRegistry::new(MAP);
        registry.spawn(&troll(), Position::new(0, 0), EntityId(1));
        let detached = potion().with_position(Position::new(9, 9));
        let mut first = detached.clone();
        first.id = EntityId(2);
        let mut second = detached;
        second.id = EntityId(3);
        registry.insert(first);
        registry.insert(second);

        let ids: Vec<_> = registry.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert!(registry.iter().all(|entity| entity.owner() == Some(MAP)));
    }
}
