/// Per-frame state machine tying the cube, its animation, the move history
/// and the orbit camera together.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::action::{Action, Orbit};
use crate::config::Config;
use crate::geometry::Cube;
use crate::moves::{Move, MoveLog};
use crate::projection::OrbitCamera;
use crate::scene::make_cube;
use crate::transform::Transform;

pub struct Session {
    cube: Cube,
    transform: Transform,
    moves: MoveLog,
    orbit: OrbitCamera,
    rng: ChaCha8Rng,
    config: Config,
}

impl Session {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            cube: make_cube(&config.cube),
            transform: Transform::idle(),
            moves: MoveLog::new(),
            orbit: OrbitCamera::new(config.camera.clone()),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn moves(&self) -> &MoveLog {
        &self.moves
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one frame with at most one action.
    ///
    /// A new move first folds the remainder of any running animation into
    /// the cube, then replaces it.
    pub fn step(&mut self, action: Option<Action>) {
        let mut next = None;
        match action {
            Some(Action::Orbit(orbit)) => match orbit {
                Orbit::YawUp => self.orbit.nudge_yaw(1.0),
                Orbit::YawDown => self.orbit.nudge_yaw(-1.0),
                Orbit::PitchUp => self.orbit.nudge_pitch(1.0),
                Orbit::PitchDown => self.orbit.nudge_pitch(-1.0),
            },
            Some(Action::Turn(mv)) => next = Some(mv),
            Some(Action::Random) => next = Some(Move::random(&mut self.rng)),
            Some(Action::Undo) => next = self.moves.last().map(Move::inverse),
            None => {}
        }

        self.transform
            .tick(&mut self.cube, next.is_some(), &self.config.animation);

        if let Some(mv) = next {
            self.transform.start(mv, &self.cube);
            self.moves.push(mv);
        }

        self.orbit.update();
    }

    /// Apply `letters` as keypresses, each followed by frames until idle.
    pub fn play(&mut self, letters: &str) {
        for action in letters.chars().filter_map(Action::from_char) {
            self.step(Some(action));
            self.settle();
        }
    }

    /// Step without input until the running transform completes.
    pub fn settle(&mut self) {
        while !self.transform.is_idle() {
            self.step(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_logs_and_animates() {
        let mut session = Session::new(Config::default(), 0);
        session.step(Action::from_char('u'));
        assert_eq!(session.moves().to_string(), "u");
        assert_eq!(session.transform().progress(), 0.0);
        assert_eq!(session.transform().affected().len(), 9);

        session.step(None);
        assert!(session.transform().progress() > 0.0);
        session.settle();
        assert!(session.transform().is_idle());
    }

    #[test]
    fn test_orbit_keys_do_not_log() {
        let mut session = Session::new(Config::default(), 0);
        session.step(Action::from_char('w'));
        session.step(Action::from_char('o'));
        assert!(session.moves().is_empty());
        assert!(session.transform().is_idle());
        assert!(session.orbit().yaw > 0.0);
        assert!(session.orbit().pitch > 0.0);
    }

    #[test]
    fn test_undo() {
        let mut session = Session::new(Config::default(), 0);
        session.play("rf");
        session.step(Some(Action::Undo));
        // "F" cancels "f" in the log but still animates.
        assert_eq!(session.moves().to_string(), "r");
        assert!(!session.transform().is_idle());
        session.settle();

        let solved = make_cube(&Config::default().cube);
        session.step(Some(Action::Undo));
        session.settle();
        assert!(session.moves().is_empty());
        for (unit, home) in session.cube().units.iter().zip(&solved.units) {
            assert!((unit.position - home.position).norm() < 1e-4);
        }
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut session = Session::new(Config::default(), 0);
        session.step(Some(Action::Undo));
        assert!(session.moves().is_empty());
        assert!(session.transform().is_idle());
    }

    #[test]
    fn test_random_is_seeded() {
        let mut a = Session::new(Config::default(), 42);
        let mut b = Session::new(Config::default(), 42);
        for _ in 0..10 {
            a.step(Some(Action::Random));
            b.step(Some(Action::Random));
        }
        assert_eq!(a.moves(), b.moves());
        assert_eq!(a.cube(), b.cube());
    }
}
