/// The input alphabet.
use crate::moves::Move;

/// Orbit velocity nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orbit {
    YawUp,
    YawDown,
    PitchUp,
    PitchDown,
}

/// Everything one keypress can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Turn(Move),
    Orbit(Orbit),
    Random,
    Undo,
}

impl Action {
    /// Map a key to an action. Unrecognized keys map to `None`.
    pub fn from_char(key: char) -> Option<Self> {
        match key {
            'w' => Some(Action::Orbit(Orbit::YawUp)),
            'e' => Some(Action::Orbit(Orbit::YawDown)),
            'o' => Some(Action::Orbit(Orbit::PitchUp)),
            'p' => Some(Action::Orbit(Orbit::PitchDown)),
            ' ' => Some(Action::Random),
            'q' => Some(Action::Undo),
            _ => Move::from_letter(key).map(Action::Turn),
        }
    }
}
