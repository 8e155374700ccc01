//! Keyboard mapping and the blocking crossterm event source.
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::{Action, Direction, EventHandler, EventSource};

/// Translates crossterm key presses into game actions.
///
/// - arrows, `hjkl`, `wasd`: move
/// - `y` `u` `b` `n`: diagonal moves
/// - `.` or space: wait
/// - shift + arrows: scroll the viewport by `scroll_step` cells
/// - `q`, Esc, Ctrl+C: quit
#[derive(Clone, Copy, Debug)]
pub struct KeyMap {
    scroll_step: i32,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self { scroll_step: 1 }
    }
}

impl KeyMap {
    pub fn with_scroll_step(mut self, scroll_step: i32) -> Self {
        self.scroll_step = scroll_step;
        self
    }

    pub fn map_key(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
        }
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            return arrow(key.code).map(|direction| {
                let (dx, dy) = direction.delta();
                Action::Scroll {
                    dx: dx * self.scroll_step,
                    dy: dy * self.scroll_step,
                }
            });
        }

        let direction = match key.code {
            code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => arrow(code),
            KeyCode::Char('k' | 'w') => Some(Direction::North),
            KeyCode::Char('j' | 's') => Some(Direction::South),
            KeyCode::Char('h' | 'a') => Some(Direction::West),
            KeyCode::Char('l' | 'd') => Some(Direction::East),
            KeyCode::Char('y') => Some(Direction::NorthWest),
            KeyCode::Char('u') => Some(Direction::NorthEast),
            KeyCode::Char('b') => Some(Direction::SouthWest),
            KeyCode::Char('n') => Some(Direction::SouthEast),
            KeyCode::Char('.' | ' ') => return Some(Action::Wait),
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            _ => None,
        };
        direction.map(Action::step)
    }
}

fn arrow(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::North),
        KeyCode::Down => Some(Direction::South),
        KeyCode::Left => Some(Direction::West),
        KeyCode::Right => Some(Direction::East),
        _ => None,
    }
}

impl EventHandler for KeyMap {
    type Event = Event;

    fn dispatch(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.map_key(key),
            _ => None,
        }
    }
}

/// Blocks on crossterm's event queue.
///
/// Each wait returns the first event plus whatever else is already queued.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    type Event = Event;
    type Error = io::Error;

    fn wait(&mut self) -> io::Result<Vec<Event>> {
        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn dispatch(event: Event) -> Option<Action> {
        KeyMap::default().dispatch(&event)
    }

    #[test]
    fn movement_keys() {
        let west = Some(Action::Move { dx: -1, dy: 0 });
        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('a')] {
            assert_eq!(dispatch(press(code)), west);
        }
        assert_eq!(dispatch(press(KeyCode::Up)), Some(Action::Move { dx: 0, dy: -1 }));
        assert_eq!(dispatch(press(KeyCode::Char('n'))), Some(Action::Move { dx: 1, dy: 1 }));
        assert_eq!(dispatch(press(KeyCode::Char('y'))), Some(Action::Move { dx: -1, dy: -1 }));
    }

    #[test]
    fn wait_and_quit() {
        assert_eq!(dispatch(press(KeyCode::Char('.'))), Some(Action::Wait));
        assert_eq!(dispatch(press(KeyCode::Char(' '))), Some(Action::Wait));
        assert_eq!(dispatch(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(dispatch(press(KeyCode::Char('q'))), Some(Action::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(dispatch(ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn shift_arrows_scroll() {
        let mut keys = KeyMap::default().with_scroll_step(5);
        let event = Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(keys.dispatch(&event), Some(Action::Scroll { dx: 5, dy: 0 }));
    }

    #[test]
    fn unmapped_input_is_ignored() {
        assert_eq!(dispatch(press(KeyCode::Char('z'))), None);
        assert_eq!(dispatch(press(KeyCode::F(1))), None);
        assert_eq!(dispatch(Event::Resize(80, 24)), None);
        assert_eq!(dispatch(Event::FocusLost), None);

        let mut release = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(dispatch(Event::Key(release)), None);
    }
}
