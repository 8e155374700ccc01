//! ratatui-backed render surface.
use std::io;

use game_core::{Appearance, FrameBuffer, RenderSurface, Rgb, ViewSize};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Draws the last presented frame of a [`FrameBuffer`].
///
/// Cells beyond `area` are clipped.
pub struct FrameWidget<'a> {
    frame: &'a FrameBuffer,
}

impl<'a> FrameWidget<'a> {
    pub fn new(frame: &'a FrameBuffer) -> Self {
        Self { frame }
    }
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (y, row) in (0..area.height).zip(self.frame.presented_rows()) {
            for (x, appearance) in (0..area.width).zip(row) {
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    let Appearance { glyph, fg, bg } = *appearance;
                    cell.set_char(glyph).set_fg(color(fg)).set_bg(color(bg));
                }
            }
        }
    }
}

/// [`RenderSurface`] composing into a [`FrameBuffer`] and presenting it
/// through a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    frame: FrameBuffer,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, view: ViewSize) -> Self {
        Self {
            terminal,
            frame: FrameBuffer::new(view),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    type Error = io::Error;

    fn put_cell(&mut self, x: u16, y: u16, appearance: Appearance) {
        self.frame.put_cell(x, y, appearance);
    }

    fn put_glyph(&mut self, x: u16, y: u16, glyph: char, fg: Rgb) {
        self.frame.put_glyph(x, y, glyph, fg);
    }

    fn present(&mut self) -> io::Result<()> {
        let Ok(()) = self.frame.present();
        let frame = &self.frame;
        self.terminal
            .draw(|f| f.render_widget(FrameWidget::new(frame), f.area()))?;
        Ok(())
    }

    fn clear(&mut self) {
        self.frame.clear();
    }
}
