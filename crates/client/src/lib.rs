//! Terminal host for the dungeon game.
//!
//! Supplies the three host-side pieces the core engine needs: a crossterm
//! key map ([`KeyMap`]), a blocking event source ([`TerminalEvents`]), and a
//! ratatui render surface ([`TerminalSurface`]).
pub mod config;
pub mod input;
pub mod logging;
pub mod surface;
pub mod terminal;

pub use config::ClientConfig;
pub use input::{KeyMap, TerminalEvents};
pub use surface::{FrameWidget, TerminalSurface};
pub use terminal::TerminalGuard;
