//! Frame composition: tiles, fog of war, and entities into a character grid.
mod frame;

pub use frame::FrameBuffer;

use crate::map::{Appearance, Rgb, SHROUD};
use crate::world::WorldMap;

/// Fixed-size character grid a frame is drawn onto.
///
/// Writes outside the surface must be ignored by implementations.
pub trait RenderSurface {
    type Error;

    /// Sets glyph, foreground, and background of a cell.
    fn put_cell(&mut self, x: u16, y: u16, appearance: Appearance);

    /// Prints a glyph over a cell, keeping its background.
    fn put_glyph(&mut self, x: u16, y: u16, glyph: char, fg: Rgb);

    /// Flushes the composed frame to the output backend.
    fn present(&mut self) -> Result<(), Self::Error>;

    /// Resets transient draw state after a frame was presented.
    fn clear(&mut self);
}

/// Combines a map's tiles, visibility, viewport, and entities into a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    shroud: Appearance,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub const fn new() -> Self {
        Self { shroud: SHROUD }
    }

    /// Uses a custom placeholder for never-explored cells.
    pub const fn with_shroud(shroud: Appearance) -> Self {
        Self { shroud }
    }

    /// Composes, presents, then clears the surface.
    pub fn render<S: RenderSurface>(&self, map: &WorldMap, surface: &mut S) -> Result<(), S::Error> {
        self.compose(map, surface);
        surface.present()?;
        surface.clear();
        Ok(())
    }

    /// Writes the viewport region of `map` onto `surface` without presenting.
    ///
    /// Each cell is lit if visible, unlit if explored, and shroud otherwise.
    /// Entities are then drawn in ascending render order so higher orders end
    /// up on top; entities outside the field of view or the viewport are
    /// skipped.
    pub fn compose<S: RenderSurface>(&self, map: &WorldMap, surface: &mut S) {
        let grid = map.grid();
        let visibility = map.visibility();
        let viewport = map.viewport();

        for (view_x, view_y, position) in viewport.cells() {
            let appearance = match grid.get(position) {
                Some(tile) if visibility.is_visible(position) => tile.lit(),
                Some(tile) if visibility.is_explored(position) => tile.unlit(),
                _ => self.shroud,
            };
            surface.put_cell(view_x, view_y, appearance);
        }

        for entity in map.entities().render_sequence() {
            if !visibility.is_visible(entity.position()) {
                continue;
            }
            let Some((view_x, view_y)) = viewport.project(entity.position()) else {
                continue;
            };
            surface.put_glyph(view_x, view_y, entity.glyph.symbol, entity.glyph.color);
        }
    }
}
