//! Synchronous turn loop.
//!
//! One iteration: present a frame, block for input, resolve at most one
//! action per mapped event, recompute the player's field of view, repeat.
//! Visibility is always recomputed before the next frame is drawn.
mod error;

pub use error::{BoxedError, EngineError};

use std::ops::ControlFlow;

use crate::action::{self, Action, ActionOutcome, EventHandler, EventSource};
use crate::config::GameConfig;
use crate::render::{Compositor, RenderSurface};
use crate::state::{EntityId, MapId};
use crate::world::{World, WorldError, WorldMap};

/// Where the loop currently is within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    AwaitingInput,
    Resolving,
}

/// Owns the world and drives the player's turns.
///
/// The active map always follows the player. It is re-derived from the
/// player's owning map before each action and each frame, so a transfer made
/// through [`Engine::world_mut`] takes effect on the next call.
pub struct Engine<H> {
    world: World,
    active_map: MapId,
    player: EntityId,
    handler: H,
    config: GameConfig,
    compositor: Compositor,
    phase: TurnPhase,
}

impl<H: EventHandler> Engine<H> {
    /// Focuses the player's map and computes the initial field of view so the
    /// first frame is already lit.
    pub fn new(
        world: World,
        player: EntityId,
        handler: H,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        let active_map = world
            .locate(player)
            .ok_or(EngineError::PlayerMissing(player))?;
        let mut engine = Self {
            world,
            active_map,
            player,
            handler,
            config,
            compositor: Compositor::new(),
            phase: TurnPhase::AwaitingInput,
        };
        engine.refocus()?;
        engine.update_visibility()?;
        tracing::info!(%player, map = %active_map, "engine ready");
        Ok(engine)
    }

    pub fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn active_map(&self) -> Result<&WorldMap, EngineError> {
        self.world
            .map(self.active_map)
            .ok_or(EngineError::World(WorldError::MapNotFound(self.active_map)))
    }

    pub fn active_map_id(&self) -> MapId {
        self.active_map
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Dispatches a batch of events in order.
    ///
    /// Events without an intent are skipped and change nothing. Returns
    /// `Break` as soon as an action asks to quit; later events in the batch
    /// are dropped.
    pub fn handle_events<I>(&mut self, events: I) -> Result<ControlFlow<()>, EngineError>
    where
        I: IntoIterator<Item = H::Event>,
    {
        for event in events {
            let Some(action) = self.handler.dispatch(&event) else {
                continue;
            };
            if self.apply(action)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Resolves a single action for the player.
    pub fn apply(&mut self, action: Action) -> Result<ControlFlow<()>, EngineError> {
        let _span = tracing::debug_span!("turn", ?action).entered();

        if action != Action::Quit {
            self.follow_player()?;
        }
        self.phase = TurnPhase::Resolving;
        let outcome = action::perform(&mut self.world, self.active_map, self.player, action);
        self.phase = TurnPhase::AwaitingInput;

        match outcome? {
            ActionOutcome::Quit => return Ok(ControlFlow::Break(())),
            ActionOutcome::Rejected(rejection) => {
                tracing::debug!(%rejection, "action skipped");
                return Ok(ControlFlow::Continue(()));
            }
            ActionOutcome::Applied => {}
        }

        if action.ends_turn() {
            self.follow_player()?;
            self.update_visibility()?;
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Recomputes the visible set around the player.
    ///
    /// Returns `false` when the player stands outside the logical map and
    /// the previous visible set was kept.
    pub fn update_visibility(&mut self) -> Result<bool, EngineError> {
        let observer = self
            .world
            .entity(self.player)
            .ok_or(EngineError::PlayerMissing(self.player))?
            .position();
        let radius = self.config.fov_radius;
        let map = self
            .world
            .map_mut(self.active_map)
            .ok_or(WorldError::MapNotFound(self.active_map))?;
        let updated = map.update_visibility(Some(observer), radius);
        if updated {
            tracing::debug!(
                %observer,
                radius,
                visible = map.visibility().visible_count(),
                explored = map.visibility().explored_count(),
                "visibility recomputed"
            );
        } else {
            tracing::warn!(%observer, "observer outside map; visibility kept");
        }
        Ok(updated)
    }

    /// Draws the active map and presents it.
    pub fn render<S>(&self, surface: &mut S) -> Result<(), EngineError>
    where
        S: RenderSurface,
        S::Error: Into<BoxedError>,
    {
        self.compositor
            .render(self.active_map()?, surface)
            .map_err(|error| EngineError::Surface(error.into()))
    }

    /// Runs the loop until an action asks to quit.
    pub fn run<E, S>(&mut self, source: &mut E, surface: &mut S) -> Result<(), EngineError>
    where
        E: EventSource<Event = H::Event>,
        E::Error: Into<BoxedError>,
        S: RenderSurface,
        S::Error: Into<BoxedError>,
    {
        loop {
            self.follow_player()?;
            self.render(surface)?;
            let events = source
                .wait()
                .map_err(|error| EngineError::Input(error.into()))?;
            if self.handle_events(events)?.is_break() {
                tracing::info!("engine stopped");
                return Ok(());
            }
        }
    }

    /// Re-derives the active map from the player's owner. A changed map gets
    /// its viewport and field of view rebuilt around the player.
    fn follow_player(&mut self) -> Result<(), EngineError> {
        let map = self
            .world
            .locate(self.player)
            .ok_or(EngineError::PlayerMissing(self.player))?;
        if map != self.active_map {
            tracing::debug!(from = %self.active_map, to = %map, "active map changed");
            self.active_map = map;
            self.refocus()?;
            self.update_visibility()?;
        }
        Ok(())
    }

    fn refocus(&mut self) -> Result<(), EngineError> {
        let focus = self
            .world
            .entity(self.player)
            .ok_or(EngineError::PlayerMissing(self.player))?
            .position();
        self.world
            .map_mut(self.active_map)
            .ok_or(WorldError::MapNotFound(self.active_map))?
            .focus_viewport(focus);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::convert::Infallible;

    use super::*;
    use crate::entity::{Entity, Glyph};
    use crate::map::{MapDimensions, Rgb, TileKind, ViewSize};
    use crate::render::FrameBuffer;
    use crate::state::Position;

    /// Maps vi-style letters to actions; anything else is a no-op.
    struct Keys;

    impl EventHandler for Keys {
        type Event = char;

        fn dispatch(&mut self, event: &char) -> Option<Action> {
            match event {
                'h' => Some(Action::Move { dx: -1, dy: 0 }),
                'l' => Some(Action::Move { dx: 1, dy: 0 }),
                '.' => Some(Action::Wait),
                'L' => Some(Action::Scroll { dx: 1, dy: 0 }),
                'q' => Some(Action::Quit),
                _ => None,
            }
        }
    }

    struct Script(VecDeque<Vec<char>>);

    impl EventSource for Script {
        type Event = char;
        type Error = Infallible;

        fn wait(&mut self) -> Result<Vec<char>, Infallible> {
            Ok(self.0.pop_front().unwrap_or_else(|| vec!['q']))
        }
    }

    const VIEW: ViewSize = ViewSize::new(20, 12);

    /// 12x5 open room with the player at (1, 2).
    fn engine() -> Engine<Keys> {
        let mut world = World::new();
        let map = world.create_map(MapDimensions::new(12, 5), VIEW, 1);
        let grid = world.map_mut(map).unwrap().grid_mut();
        for position in grid.game_area().collect::<Vec<_>>() {
            grid.set(position, TileKind::Floor.tile());
        }
        let start = grid.to_grid(Position::new(1, 2));
        let player = world
            .spawn(&Entity::actor("Player", Glyph::new('@', Rgb::WHITE), 30), map, start)
            .unwrap();
        Engine::new(world, player, Keys, GameConfig::new().with_fov_radius(3)).unwrap()
    }

    fn player_position(engine: &Engine<Keys>) -> Position {
        engine.world().entity(engine.player()).unwrap().position()
    }

    #[test]
    fn first_frame_is_lit() {
        let engine = engine();
        let map = engine.active_map().unwrap();
        assert!(map.visibility().is_visible(player_position(&engine)));
        assert_eq!(
            map.viewport().project(player_position(&engine)),
            Some((VIEW.width / 2, VIEW.height / 2 - 1))
        );
    }

    #[test]
    fn move_recomputes_visibility() {
        let mut engine = engine();
        let start = player_position(&engine);
        let flow = engine.handle_events(['l', 'l', 'l']).unwrap();
        assert!(flow.is_continue());

        let now = player_position(&engine);
        assert_eq!(now, start.offset(3, 0));
        let visibility = engine.active_map().unwrap().visibility();
        assert!(visibility.is_visible(now.offset(3, 0)));
        assert!(!visibility.is_visible(start.offset(-1, 0)));
        assert!(visibility.is_explored(start.offset(-1, 0)));
        assert_eq!(engine.phase(), TurnPhase::AwaitingInput);
    }

    #[test]
    fn no_op_events_change_nothing() {
        let mut engine = engine();
        let player = player_position(&engine);
        let wall = player.offset(1, 0);
        let map = engine.active_map_id();
        engine
            .world_mut()
            .map_mut(map)
            .unwrap()
            .grid_mut()
            .set(wall, TileKind::Wall.tile());
        let before = engine.active_map().unwrap().visibility().clone();

        engine.handle_events(['x', 'z']).unwrap();
        assert_eq!(engine.active_map().unwrap().visibility(), &before);

        // A wait resolves a turn, so the new wall now shadows the cells behind it.
        engine.handle_events(['.']).unwrap();
        assert!(!engine.active_map().unwrap().visibility().is_visible(player.offset(2, 0)));
    }

    #[test]
    fn rejected_move_skips_recompute() {
        let mut engine = engine();
        let start = player_position(&engine);
        engine.handle_events(['h']).unwrap();
        let before = engine.active_map().unwrap().visibility().clone();

        // Now at the west edge; stepping west again leaves the map.
        engine.handle_events(['h']).unwrap();
        assert_eq!(player_position(&engine), start.offset(-1, 0));
        assert_eq!(engine.active_map().unwrap().visibility(), &before);
    }

    #[test]
    fn scroll_keeps_player_and_visibility() {
        let mut engine = engine();
        let origin = engine.active_map().unwrap().viewport().origin();
        let before = engine.active_map().unwrap().visibility().clone();
        engine.handle_events(['L']).unwrap();
        let map = engine.active_map().unwrap();
        assert_eq!(map.viewport().origin(), origin.offset(1, 0));
        assert_eq!(map.visibility(), &before);
    }

    #[test]
    fn quit_breaks_and_drops_the_rest() {
        let mut engine = engine();
        let start = player_position(&engine);
        let flow = engine.handle_events(['q', 'l']).unwrap();
        assert!(flow.is_break());
        assert_eq!(player_position(&engine), start);
    }

    #[test]
    fn run_renders_before_every_wait() {
        let mut engine = engine();
        let mut source = Script(VecDeque::from([vec!['l'], vec!['x']]));
        let mut frame = FrameBuffer::new(VIEW);
        engine.run(&mut source, &mut frame).unwrap();

        assert_eq!(frame.frames_presented(), 3);
        let row = usize::from(VIEW.height / 2 - 1);
        assert_eq!(
            frame.presented_lines()[row].chars().nth(usize::from(VIEW.width / 2)),
            Some('@')
        );
    }

    #[test]
    fn player_on_another_map_moves_the_focus() {
        let mut engine = engine();
        let player = engine.player();
        let cellar = engine
            .world_mut()
            .create_map(MapDimensions::new(4, 4), VIEW, 1);
        let cellar_map = engine.world_mut().map_mut(cellar).unwrap();
        let grid = cellar_map.grid_mut();
        let landing = grid.to_grid(Position::new(1, 1));
        grid.fill_rect(
            grid.to_grid(Position::new(0, 0)),
            grid.to_grid(Position::new(3, 3)),
            TileKind::Floor.tile(),
        );
        engine.world_mut().place(player, landing, Some(cellar)).unwrap();

        engine.handle_events(['.']).unwrap();
        assert_eq!(engine.active_map_id(), cellar);
        assert!(engine.active_map().unwrap().visibility().is_visible(landing));
    }

    #[test]
    fn move_after_transfer_resolves_on_the_new_map() {
        let mut engine = engine();
        let player = engine.player();
        let cellar = engine
            .world_mut()
            .create_map(MapDimensions::new(4, 4), VIEW, 1);
        let grid = engine.world_mut().map_mut(cellar).unwrap().grid_mut();
        let landing = grid.to_grid(Position::new(1, 1));
        grid.fill_rect(
            grid.to_grid(Position::new(0, 0)),
            grid.to_grid(Position::new(3, 3)),
            TileKind::Floor.tile(),
        );
        engine.world_mut().place(player, landing, Some(cellar)).unwrap();

        assert_eq!(engine.handle_events(['l']).unwrap(), ControlFlow::Continue(()));
        assert_eq!(engine.active_map_id(), cellar);
        assert_eq!(player_position(&engine), landing.offset(1, 0));
        assert!(engine.active_map().unwrap().visibility().is_visible(landing));
    }

    #[test]
    fn rejected_move_after_transfer_still_lights_the_new_map() {
        let mut engine = engine();
        let player = engine.player();
        let cellar = engine
            .world_mut()
            .create_map(MapDimensions::new(1, 1), VIEW, 1);
        let grid = engine.world_mut().map_mut(cellar).unwrap().grid_mut();
        let landing = grid.to_grid(Position::new(0, 0));
        grid.set(landing, TileKind::Floor.tile());
        engine.world_mut().place(player, landing, Some(cellar)).unwrap();

        // The only floor cell is the landing, so the step east hits a wall.
        engine.handle_events(['l']).unwrap();
        assert_eq!(engine.active_map_id(), cellar);
        assert_eq!(player_position(&engine), landing);
        assert!(engine.active_map().unwrap().visibility().is_visible(landing));
    }

    #[test]
    fn missing_player_is_reported() {
        let mut engine = engine();
        let player = engine.player();
        engine.world_mut().despawn(player).unwrap();
        assert!(matches!(
            engine.handle_events(['.']),
            Err(EngineError::World(WorldError::EntityNotFound(_))) | Err(EngineError::PlayerMissing(_))
        ));
    }
}
