use bitflags::bitflags;

/// 24-bit terminal color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
}

/// Glyph plus foreground/background colors for one character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Appearance {
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Placeholder drawn for tiles that were never explored.
pub const SHROUD: Appearance = Appearance::new(' ', Rgb::WHITE, Rgb::BLACK);

bitflags! {
    /// Physical properties of a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const BLOCKS_MOVEMENT = 1 << 0;
        const TRANSPARENT     = 1 << 1;
    }
}

/// Immutable descriptor for one cell of the tile grid.
///
/// Tiles are plain values: the grid stores copies, and changing a cell means
/// writing a different tile rather than mutating the existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    flags: TileFlags,
    lit: Appearance,
    unlit: Appearance,
}

impl Tile {
    pub const fn new(flags: TileFlags, lit: Appearance, unlit: Appearance) -> Self {
        Self { flags, lit, unlit }
    }

    pub const fn flags(&self) -> TileFlags {
        self.flags
    }

    pub const fn blocks_movement(&self) -> bool {
        self.flags.contains(TileFlags::BLOCKS_MOVEMENT)
    }

    pub const fn transparent(&self) -> bool {
        self.flags.contains(TileFlags::TRANSPARENT)
    }

    /// Appearance while the tile is in the field of view.
    pub const fn lit(&self) -> Appearance {
        self.lit
    }

    /// Appearance once explored but out of sight.
    pub const fn unlit(&self) -> Appearance {
        self.unlit
    }
}

/// Closed set of terrain classes with their property tables.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileKind {
    /// Walkable and see-through.
    Floor,
    /// Blocks both movement and sight.
    Wall,
}

impl TileKind {
    const FLOOR: Tile = Tile::new(
        TileFlags::TRANSPARENT,
        Appearance::new('.', Rgb(230, 220, 160), Rgb(200, 180, 50)),
        Appearance::new('.', Rgb(110, 110, 170), Rgb(50, 50, 150)),
    );

    const WALL: Tile = Tile::new(
        TileFlags::BLOCKS_MOVEMENT,
        Appearance::new('#', Rgb(250, 230, 170), Rgb(130, 110, 50)),
        Appearance::new('#', Rgb(90, 90, 160), Rgb(0, 0, 100)),
    );

    /// Returns the immutable tile descriptor for this kind.
    pub const fn tile(self) -> Tile {
        match self {
            TileKind::Floor => Self::FLOOR,
            TileKind::Wall => Self::WALL,
        }
    }

    /// Layout glyph used by map files and debug dumps.
    pub const fn symbol(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }
}

impl From<TileKind> for Tile {
    fn from(kind: TileKind) -> Self {
        kind.tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn property_tables() {
        let floor = TileKind::Floor.tile();
        assert!(floor.transparent());
        assert!(!floor.blocks_movement());

        let wall = TileKind::Wall.tile();
        assert!(!wall.transparent());
        assert!(wall.blocks_movement());
    }

    #[test]
    fn lit_and_unlit_differ_for_every_kind() {
        for kind in TileKind::iter() {
            let tile = kind.tile();
            assert_ne!(tile.lit(), tile.unlit(), "{kind}");
            assert_ne!(tile.unlit(), SHROUD, "{kind}");
        }
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("WALL".parse::<TileKind>().ok(), Some(TileKind::Wall));
        assert_eq!(TileKind::Floor.as_ref(), "floor");
    }
}
