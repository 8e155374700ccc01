//! Fixed ASCII map layouts.
//!
//! A layout is a list of equal-width rows: `#` wall, `.` floor, `@` the
//! player's start, and any other symbol a floor cell holding the template its
//! legend entry names. Layout coordinates are game-space; the generator maps
//! them into grid space through the map's margin.
use std::collections::BTreeMap;

use game_core::{
    Entity, GeneratedLevel, LevelGenerator, LevelRequest, Position, TileKind, World, WorldError,
};

use crate::factories::{self, TemplateCatalog};

const BUILTIN_ROWS: [&str; 16] = [
    "########################################",
    "#.........##############..............##",
    "#.........##############......o.......##",
    "#...@.................................##",
    "#.........##############.........o....##",
    "#.........##############..............##",
    "#.........##################.###########",
    "#####.######################.###########",
    "#####.######################.###########",
    "#####.########.................#########",
    "#####.########.................#########",
    "#####..........................#########",
    "##############........T........#########",
    "##############..!..............#########",
    "##############.................#########",
    "########################################",
];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout '{0}' has no rows")]
    Empty(String),

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layout is {width}x{height} but the map is only {map_width}x{map_height}")]
    DoesNotFit {
        width: usize,
        height: usize,
        map_width: u32,
        map_height: u32,
    },

    #[error("unknown symbol '{symbol}' at {position}")]
    UnknownSymbol { symbol: char, position: Position },

    #[error("symbol '{symbol}' names unknown template '{name}'")]
    UnknownTemplate { symbol: char, name: String },

    #[error("layout has no player start '@'")]
    MissingPlayer,

    #[error("layout has a second player start at {second} (first at {first})")]
    MultiplePlayers { first: Position, second: Position },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// ASCII rows plus the legend mapping extra symbols to template names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub name: String,
    pub rows: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub legend: BTreeMap<char, String>,
}

impl Layout {
    /// The layout shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            rows: BUILTIN_ROWS.iter().map(|row| row.to_string()).collect(),
            legend: BTreeMap::from([
                ('o', "orc".to_string()),
                ('T', "troll".to_string()),
                ('!', "health_potion".to_string()),
            ]),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Resolves every cell, checking shape, symbols, and the player start.
    fn plan<'a>(&self, catalog: &'a TemplateCatalog) -> Result<Plan<'a>, LayoutError> {
        if self.rows.is_empty() {
            return Err(LayoutError::Empty(self.name.clone()));
        }
        let expected = self.width();
        let mut plan = Plan::default();
        let mut player = None;

        for (y, row) in self.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match symbol {
                    '#' => continue,
                    '.' => {}
                    '@' => {
                        if let Some(first) = player {
                            return Err(LayoutError::MultiplePlayers {
                                first,
                                second: position,
                            });
                        }
                        player = Some(position);
                    }
                    _ => {
                        let name = self
                            .legend
                            .get(&symbol)
                            .ok_or(LayoutError::UnknownSymbol { symbol, position })?;
                        let template =
                            catalog
                                .get(name)
                                .ok_or_else(|| LayoutError::UnknownTemplate {
                                    symbol,
                                    name: name.clone(),
                                })?;
                        plan.spawns.push((position, template));
                    }
                }
                plan.floors.push(position);
            }
        }

        plan.player = player.ok_or(LayoutError::MissingPlayer)?;
        Ok(plan)
    }
}

/// Resolved layout, in game-space coordinates.
#[derive(Default)]
struct Plan<'a> {
    floors: Vec<Position>,
    spawns: Vec<(Position, &'a Entity)>,
    player: Position,
}

/// [`LevelGenerator`] that stamps a fixed [`Layout`] into a new map.
#[derive(Clone, Debug)]
pub struct LayoutGenerator {
    layout: Layout,
    catalog: TemplateCatalog,
    player: Entity,
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new(Layout::builtin())
    }
}

impl LayoutGenerator {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            catalog: TemplateCatalog::default(),
            player: factories::player(),
        }
    }

    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_player(mut self, player: Entity) -> Self {
        self.player = player;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl LevelGenerator for LayoutGenerator {
    type Error = LayoutError;

    /// Nothing is added to `world` when the layout is invalid or too large.
    fn generate(
        &self,
        world: &mut World,
        request: &LevelRequest,
    ) -> Result<GeneratedLevel, LayoutError> {
        let (width, height) = (self.layout.width(), self.layout.height());
        if width > request.map_size.width as usize || height > request.map_size.height as usize {
            return Err(LayoutError::DoesNotFit {
                width,
                height,
                map_width: request.map_size.width,
                map_height: request.map_size.height,
            });
        }
        let plan = self.layout.plan(&self.catalog)?;

        let map = world.create_map(request.map_size, request.view_size, request.viewport_bias);
        let grid_map = world.map_mut(map).ok_or(WorldError::MapNotFound(map))?;
        let grid = grid_map.grid_mut();
        let margin = grid.margin();
        for floor in &plan.floors {
            grid.set(margin.to_grid(*floor), TileKind::Floor.tile());
        }

        for (position, template) in &plan.spawns {
            world.spawn(template, map, margin.to_grid(*position))?;
        }
        let start = margin.to_grid(plan.player);
        let player = world.spawn(&self.player, map, start)?;
        if let Some(map) = world.map_mut(map) {
            map.focus_viewport(start);
        }

        tracing::info!(
            layout = %self.layout.name,
            %map,
            %player,
            %start,
            floors = plan.floors.len(),
            spawns = plan.spawns.len(),
            "level generated"
        );
        Ok(GeneratedLevel { map, player })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{MapDimensions, ViewSize};

    fn request() -> LevelRequest {
        LevelRequest::new(MapDimensions::new(80, 45), ViewSize::new(80, 45))
    }

    fn layout(rows: &[&str]) -> Layout {
        Layout {
            name: "test".to_string(),
            rows: rows.iter().map(|row| row.to_string()).collect(),
            legend: BTreeMap::from([('o', "orc".to_string())]),
        }
    }

    #[test]
    fn builtin_layout_generates() {
        let mut world = World::new();
        let level = LayoutGenerator::default()
            .generate(&mut world, &request())
            .unwrap();

        let map = world.map(level.map).unwrap();
        let player = world.entity(level.player).unwrap();
        assert_eq!(player.name, "Player");
        assert_eq!(player.position(), map.grid().to_grid(Position::new(4, 3)));
        assert!(map.grid().is_walkable(player.position()));
        // Two orcs, a troll, a potion, and the player.
        assert_eq!(map.entities().len(), 5);
        assert_eq!(map.living_actors().count(), 4);
        assert_eq!(
            map.viewport().project(player.position()),
            Some((40, 21))
        );
    }

    #[test]
    fn symbols_become_tiles_and_spawns() {
        let mut world = World::new();
        let level = LayoutGenerator::new(layout(&["#####", "#@.o#", "#####"]))
            .generate(&mut world, &request())
            .unwrap();
        let map = world.map(level.map).unwrap();
        let grid = map.grid();

        assert!(!grid.is_walkable(grid.to_grid(Position::new(0, 1))));
        assert!(grid.is_walkable(grid.to_grid(Position::new(2, 1))));
        assert!(grid.is_walkable(grid.to_grid(Position::new(3, 1))));
        // Cells past the layout keep the map's wall fill.
        assert!(!grid.is_walkable(grid.to_grid(Position::new(10, 10))));

        let orc = map.actor_at(grid.to_grid(Position::new(3, 1))).unwrap();
        assert_eq!(orc.name, "Orc");
    }

    #[test]
    fn invalid_layouts_leave_world_untouched() {
        let cases = [
            (layout(&[]), "Empty"),
            (layout(&["#@#", "##"]), "Ragged"),
            (layout(&["#.#"]), "MissingPlayer"),
            (layout(&["@.@"]), "MultiplePlayers"),
            (layout(&["@.x"]), "UnknownSymbol"),
        ];
        for (layout, expected) in cases {
            let mut world = World::new();
            let error = LayoutGenerator::new(layout)
                .generate(&mut world, &request())
                .unwrap_err();
            assert!(format!("{error:?}").starts_with(expected), "{error:?}");
            assert_eq!(world.maps().count(), 0);
        }
    }

    #[test]
    fn legend_must_name_known_templates() {
        let mut world = World::new();
        let generator = LayoutGenerator::new(layout(&["@o"])).with_catalog(TemplateCatalog::empty());
        assert_eq!(
            generator.generate(&mut world, &request()),
            Err(LayoutError::UnknownTemplate {
                symbol: 'o',
                name: "orc".to_string()
            })
        );
    }

    #[test]
    fn oversized_layouts_are_rejected() {
        let mut world = World::new();
        let small = LevelRequest::new(MapDimensions::new(3, 3), ViewSize::new(10, 10));
        let error = LayoutGenerator::default()
            .generate(&mut world, &small)
            .unwrap_err();
        assert!(matches!(error, LayoutError::DoesNotFit { width: 40, height: 16, .. }));
    }
}
