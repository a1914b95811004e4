/// Terminal events to session input.
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termcube_core::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    Action(Action),
    Resize(u16, u16),
}

/// Map one terminal event. Releases, repeats and unknown keys yield `None`.
pub fn map_event(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(width, height) => Some(Input::Resize(width, height)),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char(c) => Action::from_char(c).map(Input::Action),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use termcube_core::{Move, Orbit};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_move_keys() {
        assert_eq!(
            map_event(key(KeyCode::Char('R'))),
            Some(Input::Action(Action::Turn(Move::from_letter('R').unwrap())))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('e'))),
            Some(Input::Action(Action::Orbit(Orbit::YawDown)))
        );
        assert_eq!(map_event(key(KeyCode::Char('q'))), Some(Input::Action(Action::Undo)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(key(KeyCode::Esc)), Some(Input::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(map_event(key(KeyCode::Char('k'))), None);
        assert_eq!(map_event(key(KeyCode::Up)), None);

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('u'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(map_event(Event::Resize(100, 30)), Some(Input::Resize(100, 30)));
    }
}
