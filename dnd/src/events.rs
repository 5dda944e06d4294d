//! Event handling for the sheet pager

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: u16 = 3;

/// Columns moved per horizontal key press
const PAN_COLUMNS: u16 = 4;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(width, height) => {
            app.resize(width, height);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(WHEEL_LINES);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(WHEEL_LINES);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollLeft => {
            app.scroll_left(PAN_COLUMNS);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollRight => {
            app.scroll_right(PAN_COLUMNS);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if control => EventResult::Quit,
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,

        // Paging
        KeyCode::PageUp => {
            app.page_up();
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.page_down();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('u') if control => {
            app.page_up();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') if control => {
            app.page_down();
            EventResult::NeedsRedraw
        }

        // Line scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.scroll_to_top();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.scroll_to_bottom();
            EventResult::NeedsRedraw
        }

        // Horizontal panning for sheets wider than the terminal
        KeyCode::Char('h') | KeyCode::Left => {
            app.scroll_left(PAN_COLUMNS);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.scroll_right(PAN_COLUMNS);
            EventResult::NeedsRedraw
        }

        KeyCode::Char('r') => {
            app.reroll();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use dnd_core::dice::FixedRoller;
    use dnd_core::sheet::SheetConfig;
    use dnd_core::testing::sample_wizard;

    fn app() -> App {
        App::new(
            sample_wizard(),
            SheetConfig::default(),
            Box::new(FixedRoller(10)),
            None,
            (100, 30),
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
        assert_eq!(handle_event(&mut app, key(KeyCode::Esc)), EventResult::Quit);
        assert_eq!(handle_event(&mut app, ctrl('c')), EventResult::Quit);
    }

    #[test]
    fn test_vertical_navigation() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('j'))), EventResult::NeedsRedraw);
        assert_eq!(app.scroll_offset().1, 1);
        handle_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.scroll_offset().1, 2);
        handle_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.scroll_offset().1, 1);

        handle_event(&mut app, key(KeyCode::Char('G')));
        let bottom = app.scroll_offset().1;
        assert!(bottom > 1);
        handle_event(&mut app, ctrl('u'));
        assert_eq!(app.scroll_offset().1, bottom - 28);
        handle_event(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.scroll_offset().1, 0);
        handle_event(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset().1, 28);
    }

    #[test]
    fn test_horizontal_navigation() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('l')));
        handle_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.scroll_offset().0, 2 * PAN_COLUMNS);
        handle_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.scroll_offset().0, PAN_COLUMNS);
    }

    #[test]
    fn test_mouse_wheel() {
        let mut app = app();
        handle_event(&mut app, wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.scroll_offset().1, WHEEL_LINES);
        handle_event(&mut app, wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.scroll_offset().1, 0);
        assert_eq!(
            handle_event(&mut app, wheel(MouseEventKind::Moved)),
            EventResult::Continue
        );
    }

    #[test]
    fn test_resize_rerenders() {
        let mut app = app();
        let result = handle_event(&mut app, Event::Resize(240, 60));
        assert_eq!(result, EventResult::NeedsRedraw);
        assert_eq!(app.sheet().width, 240);
    }

    #[test]
    fn test_reroll_key() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.status_message(), Some("Initiative: 11"));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_event(&mut app, Event::Key(release)), EventResult::Continue);
    }
}
