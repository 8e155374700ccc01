use std::convert::Infallible;

use crate::map::{Appearance, Rgb, SHROUD, ViewSize};

use super::RenderSurface;

/// In-memory [`RenderSurface`].
///
/// Hosts draw it to a real backend after composition; tests inspect it
/// directly. `present` snapshots the working cells so the last shown frame
/// stays readable after `clear`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: ViewSize,
    cells: Vec<Appearance>,
    presented: Vec<Appearance>,
    frames_presented: u64,
}

impl FrameBuffer {
    pub fn new(size: ViewSize) -> Self {
        let len = usize::from(size.width) * usize::from(size.height);
        Self {
            size,
            cells: vec![SHROUD; len],
            presented: vec![SHROUD; len],
            frames_presented: 0,
        }
    }

    pub fn size(&self) -> ViewSize {
        self.size
    }

    /// Changes the frame size, discarding both working and presented cells.
    pub fn resize(&mut self, size: ViewSize) {
        if size != self.size {
            *self = Self {
                frames_presented: self.frames_presented,
                ..Self::new(size)
            };
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| usize::from(y) * usize::from(self.size.width) + usize::from(x))
    }

    /// Working cell at `(x, y)`.
    pub fn cell(&self, x: u16, y: u16) -> Option<Appearance> {
        self.index(x, y).map(|index| self.cells[index])
    }

    /// Cell of the most recently presented frame.
    pub fn presented_cell(&self, x: u16, y: u16) -> Option<Appearance> {
        self.index(x, y).map(|index| self.presented[index])
    }

    /// Rows of the presented frame, left to right.
    pub fn presented_rows(&self) -> impl Iterator<Item = &[Appearance]> {
        self.presented.chunks(usize::from(self.size.width.max(1)))
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Working frame as one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        lines(&self.cells, self.size.width)
    }

    /// Presented frame as one string per row.
    pub fn presented_lines(&self) -> Vec<String> {
        lines(&self.presented, self.size.width)
    }
}

fn lines(cells: &[Appearance], width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    cells
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.glyph).collect())
        .collect()
}

impl RenderSurface for FrameBuffer {
    type Error = Infallible;

    fn put_cell(&mut self, x: u16, y: u16, appearance: Appearance) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = appearance;
        }
    }

    fn put_glyph(&mut self, x: u16, y: u16, glyph: char, fg: Rgb) {
        if let Some(index) = self.index(x, y) {
            let cell = &mut self.cells[index];
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented.copy_from_slice(&self.cells);
        self.frames_presented += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.fill(SHROUD);
    }
}
