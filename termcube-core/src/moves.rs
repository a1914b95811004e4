/// Quarter-turn moves and the canonicalized move history.
use std::fmt;

use nalgebra::{Unit, Vector3};
use rand::Rng;

/// Outer layer of the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Right,
    Left,
    Front,
    Back,
}

/// Principal axis for whole-cube rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Layer(Face),
    Whole(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A single quarter turn.
///
/// Written as one letter: lowercase is clockwise, uppercase counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub turn: Turn,
    pub direction: Direction,
}

impl Move {
    /// The twelve layer turns that random scrambles draw from.
    pub const SCRAMBLE: [Move; 12] = {
        use Direction::*;
        use Face::*;
        [
            Move::layer(Up, Clockwise),
            Move::layer(Down, Clockwise),
            Move::layer(Right, Clockwise),
            Move::layer(Left, Clockwise),
            Move::layer(Front, Clockwise),
            Move::layer(Back, Clockwise),
            Move::layer(Up, CounterClockwise),
            Move::layer(Down, CounterClockwise),
            Move::layer(Right, CounterClockwise),
            Move::layer(Left, CounterClockwise),
            Move::layer(Front, CounterClockwise),
            Move::layer(Back, CounterClockwise),
        ]
    };

    pub const fn layer(face: Face, direction: Direction) -> Self {
        Self {
            turn: Turn::Layer(face),
            direction,
        }
    }

    pub const fn whole(axis: Axis, direction: Direction) -> Self {
        Self {
            turn: Turn::Whole(axis),
            direction,
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let turn = match letter.to_ascii_lowercase() {
            'u' => Turn::Layer(Face::Up),
            'd' => Turn::Layer(Face::Down),
            'r' => Turn::Layer(Face::Right),
            'l' => Turn::Layer(Face::Left),
            'f' => Turn::Layer(Face::Front),
            'b' => Turn::Layer(Face::Back),
            'x' => Turn::Whole(Axis::X),
            'y' => Turn::Whole(Axis::Y),
            'z' => Turn::Whole(Axis::Z),
            _ => return None,
        };
        let direction = if letter.is_ascii_lowercase() {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        Some(Self { turn, direction })
    }

    pub fn letter(self) -> char {
        let base = match self.turn {
            Turn::Layer(Face::Up) => 'u',
            Turn::Layer(Face::Down) => 'd',
            Turn::Layer(Face::Right) => 'r',
            Turn::Layer(Face::Left) => 'l',
            Turn::Layer(Face::Front) => 'f',
            Turn::Layer(Face::Back) => 'b',
            Turn::Whole(Axis::X) => 'x',
            Turn::Whole(Axis::Y) => 'y',
            Turn::Whole(Axis::Z) => 'z',
        };
        match self.direction {
            Direction::Clockwise => base,
            Direction::CounterClockwise => base.to_ascii_uppercase(),
        }
    }

    /// Same turn, opposite direction.
    pub fn inverse(self) -> Self {
        Self {
            turn: self.turn,
            direction: self.direction.reversed(),
        }
    }

    /// Rotation axis. Direction is applied separately as the sign of the angle.
    pub fn axis(self) -> Unit<Vector3<f32>> {
        let v = match self.turn {
            Turn::Layer(Face::Up) | Turn::Whole(Axis::Y) => Vector3::new(0.0, -1.0, 0.0),
            Turn::Layer(Face::Down) => Vector3::new(0.0, 1.0, 0.0),
            Turn::Layer(Face::Right) | Turn::Whole(Axis::X) => Vector3::new(-1.0, 0.0, 0.0),
            Turn::Layer(Face::Left) => Vector3::new(1.0, 0.0, 0.0),
            Turn::Layer(Face::Front) | Turn::Whole(Axis::Z) => Vector3::new(0.0, 0.0, -1.0),
            Turn::Layer(Face::Back) => Vector3::new(0.0, 0.0, 1.0),
        };
        Unit::new_unchecked(v)
    }

    /// Whether a unit centered at `position` takes part in this move.
    pub fn selects(self, position: &Vector3<f32>) -> bool {
        match self.turn {
            Turn::Layer(Face::Up) => position.y >= 1.0,
            Turn::Layer(Face::Down) => position.y <= -1.0,
            Turn::Layer(Face::Right) => position.x >= 1.0,
            Turn::Layer(Face::Left) => position.x <= -1.0,
            Turn::Layer(Face::Front) => position.z >= 1.0,
            Turn::Layer(Face::Back) => position.z <= -1.0,
            Turn::Whole(_) => true,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::SCRAMBLE[rng.random_range(0..Self::SCRAMBLE.len())]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Ordered history of initiated moves, kept short by two identities:
/// a move followed by its inverse cancels, and three equal quarter turns
/// are one quarter turn the other way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log by pushing each recognized letter in turn.
    pub fn from_letters(letters: &str) -> Self {
        let mut log = Self::new();
        for mv in letters.chars().filter_map(Move::from_letter) {
            log.push(mv);
        }
        log
    }

    /// Append `mv`, then apply the cancellation and triple rules once.
    ///
    /// Only the newest entries can form a new pair or triple, so a single
    /// check after each append keeps the whole log reduced.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);

        if let [.., a, b] = self.moves[..] {
            if a == b.inverse() {
                log::trace!("move log: {a}{b} cancels");
                self.moves.truncate(self.moves.len() - 2);
            }
        }

        if let [.., a, b, c] = self.moves[..] {
            if a == b && b == c {
                log::trace!("move log: {a}{a}{a} -> {}", a.inverse());
                self.moves.truncate(self.moves.len() - 3);
                self.moves.push(a.inverse());
            }
        }
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.moves.iter().try_for_each(|mv| write!(f, "{mv}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_letters_round_trip() {
        for letter in "udrlfbxyzUDRLFBXYZ".chars() {
            let mv = Move::from_letter(letter).unwrap();
            assert_eq!(mv.letter(), letter);
        }
        assert_eq!(Move::from_letter('q'), None);
        assert_eq!(Move::from_letter(' '), None);
    }

    #[test]
    fn test_inverse_flips_case() {
        let mv = Move::from_letter('r').unwrap();
        assert_eq!(mv.inverse().letter(), 'R');
        assert_eq!(mv.inverse().inverse(), mv);
    }

    #[test]
    fn test_cancellation() {
        let log = MoveLog::from_letters("xuU");
        assert_eq!(log.to_string(), "x");

        // Same case is not an inverse pair.
        let log = MoveLog::from_letters("uu");
        assert_eq!(log.to_string(), "uu");
    }

    #[test]
    fn test_triple_reduction() {
        assert_eq!(MoveLog::from_letters("ryyy").to_string(), "rY");
        assert_eq!(MoveLog::from_letters("FFF").to_string(), "f");
    }

    #[test]
    fn test_reduction_is_single_pass() {
        // "uU" cancels on the second push; the remaining two stay.
        assert_eq!(MoveLog::from_letters("uUUU").to_string(), "UU");
        // "uuu" becomes "U", which the fourth "u" then cancels.
        assert_eq!(MoveLog::from_letters("uuuu").to_string(), "");
        assert!(MoveLog::from_letters("rrrrrrrr").is_empty());
    }

    #[test]
    fn test_len_tracks_reductions() {
        let mut log = MoveLog::from_letters("ruf");
        assert_eq!(log.len(), 3);
        log.push(Move::from_letter('F').unwrap());
        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Move::from_letter('u'));

        log.clear();
        assert_eq!(log.len(), 0);
        assert!(log.is_empty());
        assert_eq!(log.last(), None);
    }

    #[test]
    fn test_layer_selection() {
        let up = Move::from_letter('u').unwrap();
        assert!(up.selects(&Vector3::new(0.0, 1.4, -1.4)));
        assert!(!up.selects(&Vector3::new(0.0, 0.0, 1.4)));

        let back = Move::from_letter('B').unwrap();
        assert!(back.selects(&Vector3::new(1.4, 0.0, -1.4)));
        assert!(!back.selects(&Vector3::new(1.4, 0.0, 1.4)));

        let whole = Move::from_letter('x').unwrap();
        assert!(whole.selects(&Vector3::zeros()));
    }

    #[test]
    fn test_random_moves_are_layer_turns() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mv = Move::random(&mut rng);
            assert!(matches!(mv.turn, Turn::Layer(_)));
        }
    }
}
