use crate::entity::{Actor, Entity, EntityRegistry};
use crate::map::{TileGrid, ViewSize, Viewport, VisibilityTracker};
use crate::state::{MapId, Position};

/// One level: tiles, viewport, visibility, and the entities located on it.
///
/// This is the unit hosts and generators operate on. Grid, visibility, and
/// registry always share the map's grid space.
#[derive(Clone, Debug)]
pub struct WorldMap {
    id: MapId,
    grid: TileGrid,
    viewport: Viewport,
    visibility: VisibilityTracker,
    entities: EntityRegistry,
}

impl WorldMap {
    pub(crate) fn new(id: MapId, grid: TileGrid, view: ViewSize, viewport_bias: i32) -> Self {
        let shape = grid.shape();
        let mut viewport = Viewport::new(view, viewport_bias);
        // Start centered on the logical map until something takes focus.
        let center = grid.to_grid(Position::new(
            (grid.size().width / 2) as i32,
            (grid.size().height / 2) as i32,
        ));
        viewport.recenter_on(center);

        Self {
            id,
            grid,
            viewport,
            visibility: VisibilityTracker::new(shape),
            entities: EntityRegistry::new(id),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable tile access for generators.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut EntityRegistry {
        &mut self.entities
    }

    /// Returns true if `position` lies inside the logical map.
    pub fn in_bounds(&self, position: Position) -> bool {
        self.grid.in_bounds(position)
    }

    pub fn blocking_entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities.blocking_entity_at(position)
    }

    pub fn actor_at(&self, position: Position) -> Option<Actor<'_>> {
        self.entities.actor_at(position)
    }

    pub fn living_actors(&self) -> impl Iterator<Item = Actor<'_>> {
        self.entities.living_actors()
    }

    /// Recenters the viewport on a focus point (usually the player).
    pub fn focus_viewport(&mut self, focus: Position) {
        self.viewport.recenter_on(focus);
        tracing::trace!(map = %self.id, %focus, origin = %self.viewport.origin(), "viewport focused");
    }

    /// Free-scrolls the viewport without changing focus.
    pub fn scroll_viewport(&mut self, dx: i32, dy: i32) {
        self.viewport.scroll_by(dx, dy);
        tracing::trace!(map = %self.id, dx, dy, origin = %self.viewport.origin(), "viewport scrolled");
    }

    /// Recomputes the visible set from `observer`; see [`VisibilityTracker::recompute`].
    pub fn update_visibility(&mut self, observer: Option<Position>, radius: u32) -> bool {
        self.visibility.recompute(&self.grid, observer, radius)
    }
}
