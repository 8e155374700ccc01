//! Multi-map container owning every [`WorldMap`] and allocating identities.
//!
//! Cross-map operations (spawning into a map, transferring an entity between
//! maps) live here because they need more than one registry at a time. Each
//! entity sits in exactly one registry; its `owner` handle names that map.
mod error;
mod map;

pub use error::WorldError;
pub use map::WorldMap;

use std::collections::BTreeMap;

use crate::entity::{Entity, EntityRegistry};
use crate::map::{Margin, MapDimensions, TileGrid, TileKind, ViewSize};
use crate::state::{EntityId, MapId, Position};

/// Every map of a session plus the identity allocators.
#[derive(Clone, Debug, Default)]
pub struct World {
    maps: BTreeMap<MapId, WorldMap>,
    next_map_id: u32,
    next_entity_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wall-filled map with a margin sized for `view`.
    pub fn create_map(&mut self, size: MapDimensions, view: ViewSize, viewport_bias: i32) -> MapId {
        let margin = Margin::for_view(view, viewport_bias);
        let grid = TileGrid::filled(size, margin, TileKind::Wall.tile());
        self.insert_map(grid, view, viewport_bias)
    }

    /// Registers a map built around an existing tile grid.
    pub fn insert_map(&mut self, grid: TileGrid, view: ViewSize, viewport_bias: i32) -> MapId {
        let id = MapId(self.next_map_id);
        self.next_map_id += 1;
        tracing::debug!(map = %id, size = ?grid.size(), margin = ?grid.margin(), "map created");
        self.maps
            .insert(id, WorldMap::new(id, grid, view, viewport_bias));
        id
    }

    pub fn map(&self, id: MapId) -> Option<&WorldMap> {
        self.maps.get(&id)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut WorldMap> {
        self.maps.get_mut(&id)
    }

    pub fn maps(&self) -> impl Iterator<Item = &WorldMap> {
        self.maps.values()
    }

    fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Clones `template` into `map` at `position` under a fresh identity.
    pub fn spawn(
        &mut self,
        template: &Entity,
        map: MapId,
        position: Position,
    ) -> Result<EntityId, WorldError> {
        if !self.maps.contains_key(&map) {
            return Err(WorldError::MapNotFound(map));
        }
        let id = self.allocate_entity_id();
        self.registry_mut(map)?.spawn(template, position, id);
        tracing::debug!(entity = %id, name = %template.name, %map, %position, "entity spawned");
        Ok(id)
    }

    /// First placement of a detached entity. Nothing is removed anywhere.
    ///
    /// A detached entity without an identity gets a fresh one. One that kept
    /// its identity (e.g. after [`World::despawn`]) is rejected while another
    /// entity still holds it.
    ///
    /// Entities that already belong to a map must go through [`World::place`].
    pub fn place_new(
        &mut self,
        mut entity: Entity,
        map: MapId,
        position: Position,
    ) -> Result<EntityId, WorldError> {
        if let Some(owner) = entity.owner {
            return Err(WorldError::AlreadyOwned {
                entity: entity.id,
                owner,
            });
        }
        if !self.maps.contains_key(&map) {
            return Err(WorldError::MapNotFound(map));
        }
        if !entity.id.is_assigned() {
            entity.id = self.allocate_entity_id();
        } else if self.entity(entity.id).is_some() {
            return Err(WorldError::DuplicateEntity(entity.id));
        } else {
            self.next_entity_id = self.next_entity_id.max(entity.id.0.saturating_add(1));
        }
        entity.position = position;
        let id = self.registry_mut(map)?.insert(entity);
        tracing::debug!(entity = %id, %map, %position, "entity placed");
        Ok(id)
    }

    /// Moves an entity to `position`, transferring it to `target` when that
    /// names a different map than its current owner.
    ///
    /// A transfer removes the entity from the map its back-reference names
    /// and inserts it into `target`; the target is validated first, so on
    /// error nothing has moved.
    pub fn place(
        &mut self,
        entity: EntityId,
        position: Position,
        target: Option<MapId>,
    ) -> Result<(), WorldError> {
        let owner = self.owner_of(entity)?;

        let destination = match target {
            Some(target) if target != owner => target,
            _ => {
                self.registry_mut(owner)?.set_position(entity, position);
                return Ok(());
            }
        };

        if !self.maps.contains_key(&destination) {
            return Err(WorldError::MapNotFound(destination));
        }

        let mut moved = self
            .registry_mut(owner)?
            .remove(entity)
            .ok_or_else(|| owner_mismatch(entity, owner, Some(owner)))?;
        moved.position = position;
        self.registry_mut(destination)?.insert(moved);

        tracing::debug!(%entity, from = %owner, to = %destination, %position, "entity transferred");
        Ok(())
    }

    /// Removes an entity from whichever map owns it.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Entity, WorldError> {
        let owner = self.owner_of(entity)?;
        let removed = self
            .registry_mut(owner)?
            .remove(entity)
            .ok_or_else(|| owner_mismatch(entity, owner, Some(owner)))?;
        tracing::debug!(%entity, map = %owner, "entity despawned");
        Ok(removed)
    }

    /// Map that currently owns `entity`, if any.
    pub fn locate(&self, entity: EntityId) -> Option<MapId> {
        self.owner_of(entity).ok()
    }

    pub fn entity(&self, entity: EntityId) -> Option<&Entity> {
        self.maps
            .values()
            .find_map(|map| map.entities().get(entity))
    }

    pub fn entity_mut(&mut self, entity: EntityId) -> Option<&mut Entity> {
        self.maps
            .values_mut()
            .find_map(|map| map.entities_mut().get_mut(entity))
    }

    /// Resolves the owning map through the entity's back-reference, checking
    /// it against the registry that actually holds the entity.
    fn owner_of(&self, entity: EntityId) -> Result<MapId, WorldError> {
        let (holder, claimed) = self
            .maps
            .values()
            .find_map(|map| {
                map.entities()
                    .get(entity)
                    .map(|found| (map.id(), found.owner()))
            })
            .ok_or(WorldError::EntityNotFound(entity))?;

        match claimed {
            Some(owner) if owner == holder => Ok(owner),
            _ => Err(owner_mismatch(entity, holder, claimed)),
        }
    }

    fn registry_mut(&mut self, map: MapId) -> Result<&mut EntityRegistry, WorldError> {
        self.maps
            .get_mut(&map)
            .map(WorldMap::entities_mut)
            .ok_or(WorldError::MapNotFound(map))
    }
}

/// Registry/back-reference desync: fatal in debug builds, logged and
/// reported in release builds without touching either registry.
fn owner_mismatch(entity: EntityId, holder: MapId, claimed: Option<MapId>) -> WorldError {
    tracing::error!(%entity, %holder, ?claimed, "entity owner back-reference out of sync");
    if cfg!(debug_assertions) {
        panic!("entity {entity} is held by {holder} but its back-reference names {claimed:?}");
    }
    WorldError::OwnerMismatch {
        entity,
        holder,
        claimed,
    }
}
